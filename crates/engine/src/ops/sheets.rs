//! Balance sheet CRUD operations.
//!
//! Creation runs the sheet through [`reconcile`] before persisting; read,
//! update and delete go straight to the store. Update is a full field
//! replacement (collections included) and intentionally does **not**
//! re-run reconciliation, so an updated sheet can be out of balance.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::{
    BalanceSheet, EngineError, ResultEngine, assets, equities, liabilities, reconcile::reconcile,
    sheets,
};

use super::{Engine, with_tx};

/// Insert the given line items for a sheet, returning them with assigned ids.
macro_rules! insert_items {
    ($db:expr, $table:ident, $sheet_id:expr, $items:expr) => {{
        let mut persisted = Vec::with_capacity($items.len());
        for item in $items {
            let model = $table::active_model(item, $sheet_id).insert($db).await?;
            persisted.push(crate::LineItem::from(model));
        }
        persisted
    }};
}

/// Load a sheet's line items for one category in insertion order.
macro_rules! load_items {
    ($db:expr, $table:ident, $sheet_id:expr) => {{
        $table::Entity::find()
            .filter($table::Column::BalanceSheetId.eq($sheet_id))
            .order_by_asc($table::Column::Id)
            .all($db)
            .await?
            .into_iter()
            .map(crate::LineItem::from)
            .collect::<Vec<_>>()
    }};
}

fn not_found(id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("balance sheet {id}"))
}

impl Engine {
    /// Reconcile a candidate sheet and persist it.
    ///
    /// The returned value carries the store-assigned ids for the sheet and
    /// every line item, including the adjustment entry when one was added.
    pub async fn create_balance_sheet(&self, draft: BalanceSheet) -> ResultEngine<BalanceSheet> {
        let sheet = reconcile(draft)?;

        with_tx!(self, |db_tx| {
            let model = sheets::active_model(&sheet).insert(&db_tx).await?;
            let assets = insert_items!(&db_tx, assets, model.id, &sheet.assets);
            let liabilities = insert_items!(&db_tx, liabilities, model.id, &sheet.liabilities);
            let equities = insert_items!(&db_tx, equities, model.id, &sheet.equities);

            Ok(BalanceSheet {
                id: Some(model.id),
                company_name: model.company_name,
                date: model.date,
                assets,
                liabilities,
                equities,
            })
        })
    }

    /// All balance sheets in insertion order.
    pub async fn balance_sheets(&self) -> ResultEngine<Vec<BalanceSheet>> {
        let models = sheets::Entity::find()
            .order_by_asc(sheets::Column::Id)
            .all(&self.database)
            .await?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(load_sheet(&self.database, model).await?);
        }
        Ok(result)
    }

    /// One balance sheet by id.
    pub async fn balance_sheet(&self, id: i64) -> ResultEngine<BalanceSheet> {
        let model = sheets::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| not_found(id))?;

        load_sheet(&self.database, model).await
    }

    /// Replace a sheet wholesale: name, date and all three collections.
    ///
    /// No merge semantics and no reconciliation re-run.
    pub async fn update_balance_sheet(
        &self,
        id: i64,
        replacement: BalanceSheet,
    ) -> ResultEngine<BalanceSheet> {
        with_tx!(self, |db_tx| {
            let existing = sheets::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(id))?;

            let mut sheet_model: sheets::ActiveModel = existing.into();
            sheet_model.company_name = ActiveValue::Set(replacement.company_name.clone());
            sheet_model.date = ActiveValue::Set(replacement.date.clone());
            let model = sheet_model.update(&db_tx).await?;

            delete_items(&db_tx, id).await?;
            let assets = insert_items!(&db_tx, assets, id, &replacement.assets);
            let liabilities = insert_items!(&db_tx, liabilities, id, &replacement.liabilities);
            let equities = insert_items!(&db_tx, equities, id, &replacement.equities);

            Ok(BalanceSheet {
                id: Some(model.id),
                company_name: model.company_name,
                date: model.date,
                assets,
                liabilities,
                equities,
            })
        })
    }

    /// Delete a sheet and all its line items.
    pub async fn delete_balance_sheet(&self, id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            if sheets::Entity::find_by_id(id).one(&db_tx).await?.is_none() {
                return Err(not_found(id));
            }

            // Explicit cascade within one DB transaction; sqlite does not
            // always enforce the FK ON DELETE CASCADE declarations.
            delete_items(&db_tx, id).await?;
            sheets::Entity::delete_by_id(id).exec(&db_tx).await?;

            Ok(())
        })
    }
}

async fn load_sheet<C: ConnectionTrait>(db: &C, model: sheets::Model) -> ResultEngine<BalanceSheet> {
    let assets = load_items!(db, assets, model.id);
    let liabilities = load_items!(db, liabilities, model.id);
    let equities = load_items!(db, equities, model.id);

    Ok(BalanceSheet {
        id: Some(model.id),
        company_name: model.company_name,
        date: model.date,
        assets,
        liabilities,
        equities,
    })
}

async fn delete_items<C: ConnectionTrait>(db: &C, sheet_id: i64) -> ResultEngine<()> {
    assets::Entity::delete_many()
        .filter(assets::Column::BalanceSheetId.eq(sheet_id))
        .exec(db)
        .await?;
    liabilities::Entity::delete_many()
        .filter(liabilities::Column::BalanceSheetId.eq(sheet_id))
        .exec(db)
        .await?;
    equities::Entity::delete_many()
        .filter(equities::Column::BalanceSheetId.eq(sheet_id))
        .exec(db)
        .await?;
    Ok(())
}
