//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for bilancio:
//!
//! - `balance_sheets`: named, dated balance sheet headers
//! - `assets`, `liabilities`, `equities`: line items, one table per
//!   category, each with a mandatory FK to the owning sheet
//!
//! Monetary values are stored as integer cents (`value_minor`).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum BalanceSheets {
    Table,
    Id,
    CompanyName,
    Date,
}

#[derive(Iden)]
enum Assets {
    Table,
    Id,
    Name,
    ValueMinor,
    BalanceSheetId,
}

#[derive(Iden)]
enum Liabilities {
    Table,
    Id,
    Name,
    ValueMinor,
    BalanceSheetId,
}

#[derive(Iden)]
enum Equities {
    Table,
    Id,
    Name,
    ValueMinor,
    BalanceSheetId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Balance sheets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(BalanceSheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BalanceSheets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BalanceSheets::CompanyName).string())
                    .col(ColumnDef::new(BalanceSheets::Date).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Assets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assets::Name).string().not_null())
                    .col(ColumnDef::new(Assets::ValueMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assets::BalanceSheetId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assets-balance_sheet_id")
                            .from(Assets::Table, Assets::BalanceSheetId)
                            .to(BalanceSheets::Table, BalanceSheets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-assets-balance_sheet_id")
                    .table(Assets::Table)
                    .col(Assets::BalanceSheetId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Liabilities
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Liabilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Liabilities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Liabilities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Liabilities::ValueMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Liabilities::BalanceSheetId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-liabilities-balance_sheet_id")
                            .from(Liabilities::Table, Liabilities::BalanceSheetId)
                            .to(BalanceSheets::Table, BalanceSheets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-liabilities-balance_sheet_id")
                    .table(Liabilities::Table)
                    .col(Liabilities::BalanceSheetId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Equities
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Equities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Equities::ValueMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Equities::BalanceSheetId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-equities-balance_sheet_id")
                            .from(Equities::Table, Equities::BalanceSheetId)
                            .to(BalanceSheets::Table, BalanceSheets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-equities-balance_sheet_id")
                    .table(Equities::Table)
                    .col(Equities::BalanceSheetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Equities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Liabilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BalanceSheets::Table).to_owned())
            .await?;
        Ok(())
    }
}
