//! `balance_sheets` table entity.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::BalanceSheet;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "balance_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub company_name: Option<String>,
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assets::Entity")]
    Assets,
    #[sea_orm(has_many = "super::liabilities::Entity")]
    Liabilities,
    #[sea_orm(has_many = "super::equities::Entity")]
    Equities,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl Related<super::liabilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Liabilities.def()
    }
}

impl Related<super::equities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Active model for inserting or replacing the sheet row itself. Line items
/// are handled separately by the ops layer.
pub(crate) fn active_model(sheet: &BalanceSheet) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        company_name: ActiveValue::Set(sheet.company_name.clone()),
        date: ActiveValue::Set(sheet.date.clone()),
    }
}
