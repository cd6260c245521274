//! Balance sheet API endpoints

use api_types::balance_sheet::{BalanceSheetNew, BalanceSheetView, LineItemNew, LineItemView};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use engine::Money;

use crate::{ServerError, server::ServerState};

fn map_items(items: Option<Vec<LineItemNew>>) -> Result<Vec<engine::LineItem>, ServerError> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            Ok(engine::LineItem::new(
                item.name,
                Money::from_major_f64(item.value)?,
            ))
        })
        .collect()
}

fn map_new(payload: BalanceSheetNew) -> Result<engine::BalanceSheet, ServerError> {
    Ok(engine::BalanceSheet {
        id: None,
        company_name: payload.company_name,
        date: payload.date,
        assets: map_items(payload.assets)?,
        liabilities: map_items(payload.liabilities)?,
        equities: map_items(payload.equities)?,
    })
}

fn map_item_views(items: Vec<engine::LineItem>) -> Result<Vec<LineItemView>, ServerError> {
    items
        .into_iter()
        .map(|item| {
            Ok(LineItemView {
                id: require_id(item.id)?,
                name: item.name,
                value: item.value.to_major_f64(),
            })
        })
        .collect()
}

fn map_view(sheet: engine::BalanceSheet) -> Result<BalanceSheetView, ServerError> {
    Ok(BalanceSheetView {
        id: require_id(sheet.id)?,
        company_name: sheet.company_name,
        date: sheet.date,
        assets: map_item_views(sheet.assets)?,
        liabilities: map_item_views(sheet.liabilities)?,
        equities: map_item_views(sheet.equities)?,
    })
}

fn require_id(id: Option<i64>) -> Result<i64, ServerError> {
    id.ok_or_else(|| ServerError::Internal("persisted record missing id".to_string()))
}

/// Handle requests for creating a new balance sheet.
///
/// The engine reconciles the candidate before persisting it, so the
/// response may contain one more equity entry than the request.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BalanceSheetNew>,
) -> Result<(StatusCode, Json<BalanceSheetView>), ServerError> {
    let draft = map_new(payload)?;
    let sheet = state.engine.create_balance_sheet(draft).await?;

    Ok((StatusCode::CREATED, Json(map_view(sheet)?)))
}

/// Handle requests for listing all balance sheets.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<BalanceSheetView>>, ServerError> {
    let sheets = state.engine.balance_sheets().await?;

    Ok(Json(
        sheets
            .into_iter()
            .map(map_view)
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

/// Handle requests for a single balance sheet.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<BalanceSheetView>, ServerError> {
    let sheet = state.engine.balance_sheet(id).await?;

    Ok(Json(map_view(sheet)?))
}

/// Handle requests for replacing a balance sheet.
///
/// Full field replacement, no reconciliation re-run.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BalanceSheetNew>,
) -> Result<Json<BalanceSheetView>, ServerError> {
    let replacement = map_new(payload)?;
    let sheet = state.engine.update_balance_sheet(id, replacement).await?;

    Ok(Json(map_view(sheet)?))
}

/// Handle requests for deleting a balance sheet and its line items.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_balance_sheet(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for downloading a balance sheet as PDF.
pub async fn pdf(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let sheet = state.engine.balance_sheet(id).await?;
    let bytes = report::render(&sheet)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=balance_sheet_{id}.pdf"),
            ),
        ],
        bytes,
    ))
}
