use engine::{ADJUSTMENT_NAME, BalanceSheet, Engine, EngineError, LineItem, Money};
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

fn items(entries: &[(&str, i64)]) -> Vec<LineItem> {
    entries
        .iter()
        .map(|(name, cents)| LineItem::new(*name, Money::new(*cents)))
        .collect()
}

fn draft(
    assets: &[(&str, i64)],
    liabilities: &[(&str, i64)],
    equities: &[(&str, i64)],
) -> BalanceSheet {
    BalanceSheet {
        id: None,
        company_name: Some("Test Co".to_string()),
        date: "01-02-2025".to_string(),
        assets: items(assets),
        liabilities: items(liabilities),
        equities: items(equities),
    }
}

#[tokio::test]
async fn create_assigns_ids_and_persists_items() {
    let (engine, db) = engine_with_db().await;

    let sheet = engine
        .create_balance_sheet(draft(
            &[("Cash", 100_00), ("Inventory", 40_00)],
            &[("Loan", 90_00)],
            &[("Capital", 50_00)],
        ))
        .await
        .unwrap();

    let sheet_id = sheet.id.unwrap();
    assert!(sheet.assets.iter().all(|item| item.id.is_some()));
    assert!(sheet.liabilities.iter().all(|item| item.id.is_some()));
    assert!(sheet.equities.iter().all(|item| item.id.is_some()));

    assert_eq!(count_rows(&db, "balance_sheets").await, 1);
    assert_eq!(count_rows(&db, "assets").await, 2);
    assert_eq!(count_rows(&db, "liabilities").await, 1);
    assert_eq!(count_rows(&db, "equities").await, 1);

    // Same value out of the store.
    let fetched = engine.balance_sheet(sheet_id).await.unwrap();
    assert_eq!(fetched, sheet);
}

#[tokio::test]
async fn create_rejects_out_of_range_totals() {
    let (engine, db) = engine_with_db().await;

    // Each item fits in i64 cents; the category totals do not.
    let near_max = 9_000_000_000_000_000_000;
    let result = engine
        .create_balance_sheet(draft(
            &[],
            &[("Bond A", near_max), ("Bond B", near_max)],
            &[("Capital A", near_max), ("Capital B", near_max)],
        ))
        .await;

    assert!(matches!(result, Err(EngineError::InvalidAmount(_))));
    assert_eq!(count_rows(&db, "balance_sheets").await, 0);
    assert_eq!(count_rows(&db, "liabilities").await, 0);
    assert_eq!(count_rows(&db, "equities").await, 0);
}

#[tokio::test]
async fn create_appends_adjustment_when_unbalanced() {
    let (engine, _db) = engine_with_db().await;

    let sheet = engine
        .create_balance_sheet(draft(&[("Cash", 100_00)], &[], &[("Capital", 50_00)]))
        .await
        .unwrap();

    assert_eq!(sheet.equities.len(), 2);
    assert_eq!(sheet.equities[1].name, ADJUSTMENT_NAME);
    assert_eq!(sheet.equities[1].value, Money::new(50_00));
    assert_eq!(sheet.difference(), Money::ZERO);
}

#[tokio::test]
async fn create_leaves_balanced_sheet_alone() {
    let (engine, _db) = engine_with_db().await;

    let sheet = engine
        .create_balance_sheet(draft(
            &[("Cash", 100_00)],
            &[("Loan", 60_00)],
            &[("Capital", 40_00)],
        ))
        .await
        .unwrap();

    assert_eq!(sheet.equities.len(), 1);
    assert_eq!(sheet.difference(), Money::ZERO);
}

#[tokio::test]
async fn create_normalizes_company_name() {
    let (engine, _db) = engine_with_db().await;

    let mut candidate = draft(&[], &[], &[]);
    candidate.company_name = Some("  john DOE's shop  ".to_string());
    let sheet = engine.create_balance_sheet(candidate).await.unwrap();
    assert_eq!(sheet.company_name.as_deref(), Some("John Doe's Shop"));

    let mut blank = draft(&[], &[], &[]);
    blank.company_name = None;
    let sheet = engine.create_balance_sheet(blank).await.unwrap();
    assert_eq!(sheet.company_name.as_deref(), Some("ABC Corp."));
}

#[tokio::test]
async fn list_returns_sheets_in_insertion_order() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .create_balance_sheet(draft(&[("Cash", 10_00)], &[], &[]))
        .await
        .unwrap();
    let second = engine
        .create_balance_sheet(draft(&[("Cash", 20_00)], &[], &[]))
        .await
        .unwrap();

    let all = engine.balance_sheets().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
}

#[tokio::test]
async fn item_order_survives_persistence() {
    let (engine, _db) = engine_with_db().await;

    let names = ["Cash", "Receivables", "Inventory", "Equipment"];
    let entries: Vec<(&str, i64)> = names.iter().map(|name| (*name, 25_00)).collect();
    let sheet = engine
        .create_balance_sheet(draft(&entries, &[], &[("Capital", 100_00)]))
        .await
        .unwrap();

    let fetched = engine.balance_sheet(sheet.id.unwrap()).await.unwrap();
    let fetched_names: Vec<&str> = fetched.assets.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(fetched_names, names);
}

#[tokio::test]
async fn get_unknown_id_is_key_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.balance_sheet(999).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("balance sheet 999".to_string()));
}

#[tokio::test]
async fn update_replaces_wholesale_without_reconciliation() {
    let (engine, db) = engine_with_db().await;

    let sheet = engine
        .create_balance_sheet(draft(
            &[("Cash", 100_00)],
            &[("Loan", 60_00)],
            &[("Capital", 40_00)],
        ))
        .await
        .unwrap();
    let id = sheet.id.unwrap();

    // Out-of-balance replacement stays out of balance.
    let updated = engine
        .update_balance_sheet(
            id,
            draft(&[("Cash", 100_00)], &[], &[("Capital", 10_00)]),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.equities.len(), 1);
    assert_eq!(updated.difference(), Money::new(90_00));

    // Old items are gone, not merged.
    assert_eq!(count_rows(&db, "assets").await, 1);
    assert_eq!(count_rows(&db, "liabilities").await, 0);
    assert_eq!(count_rows(&db, "equities").await, 1);
}

#[tokio::test]
async fn update_unknown_id_creates_nothing() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .update_balance_sheet(42, draft(&[("Cash", 5_00)], &[], &[]))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::KeyNotFound("balance sheet 42".to_string()));
    assert_eq!(count_rows(&db, "balance_sheets").await, 0);
    assert_eq!(count_rows(&db, "assets").await, 0);
}

#[tokio::test]
async fn delete_cascades_to_all_line_items() {
    let (engine, db) = engine_with_db().await;

    // 2 assets, 1 liability, 3 equities; balanced so no adjustment is added.
    let sheet = engine
        .create_balance_sheet(draft(
            &[("Cash", 100_00), ("Inventory", 50_00)],
            &[("Loan", 50_00)],
            &[("Capital", 40_00), ("Reserves", 30_00), ("Retained", 30_00)],
        ))
        .await
        .unwrap();
    let id = sheet.id.unwrap();
    assert_eq!(count_rows(&db, "equities").await, 3);

    engine.delete_balance_sheet(id).await.unwrap();

    assert_eq!(count_rows(&db, "balance_sheets").await, 0);
    assert_eq!(count_rows(&db, "assets").await, 0);
    assert_eq!(count_rows(&db, "liabilities").await, 0);
    assert_eq!(count_rows(&db, "equities").await, 0);

    let err = engine.balance_sheet(id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_unknown_id_is_key_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.delete_balance_sheet(7).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("balance sheet 7".to_string()));
}
