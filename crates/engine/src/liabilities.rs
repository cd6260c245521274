//! `liabilities` table entity.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{LineItem, Money};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "liabilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub value_minor: i64,
    pub balance_sheet_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sheets::Entity",
        from = "Column::BalanceSheetId",
        to = "super::sheets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Sheet,
}

impl Related<super::sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LineItem {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            value: Money::new(model.value_minor),
        }
    }
}

pub(crate) fn active_model(item: &LineItem, sheet_id: i64) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(item.name.clone()),
        value_minor: ActiveValue::Set(item.value.cents()),
        balance_sheet_id: ActiveValue::Set(sheet_id),
    }
}
