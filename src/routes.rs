use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::{
    database::{fetch_orders, insert_order, RECENT_ORDERS_LIMIT},
    error::AppError,
    order::{orders_to_csv, OrderForm},
    state::AppState,
    templates::{flash_code, flash_for, render_index, OrderRow, FLASH_SUBMITTED, FLASH_WRITE_FAILED},
};

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    flash: Option<String>,
}

/// The form page with the latest orders. A failing listing query must not
/// take the form down with it, so that path degrades to a notice instead of
/// an error response.
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, AppError> {
    let flash = params.flash.as_deref().and_then(flash_for);

    let orders = match fetch_orders(&state.pool, RECENT_ORDERS_LIMIT).await {
        Ok(orders) => Some(orders.iter().map(OrderRow::from).collect()),
        Err(e) => {
            error!(error = %e, "failed to load the order listing");
            None
        }
    };

    let body = render_index(&state.templates, flash, orders)?;
    Ok(Html(body))
}

/// Order submission: validate, run the single INSERT, redirect back to the
/// form with a flash code. The redirect clears the form and makes a refresh
/// idempotent. Failed writes are reported generically and never retried.
pub async fn create_order_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<OrderForm>,
) -> Redirect {
    let order = match form.validate() {
        Ok(order) => order,
        Err(e) => {
            info!(error = %e, "rejected order submission");
            return flash_redirect(flash_code(&e));
        }
    };

    match insert_order(&state.pool, &order).await {
        Ok(()) => {
            info!(name = %order.name, quantity = order.quantity, "order stored");
            flash_redirect(FLASH_SUBMITTED)
        }
        Err(e) => {
            error!(error = %e, "failed to store order");
            flash_redirect(FLASH_WRITE_FAILED)
        }
    }
}

/// The same rows the page shows, as a CSV attachment.
pub async fn orders_csv_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let orders = fetch_orders(&state.pool, RECENT_ORDERS_LIMIT).await?;
    let body = orders_to_csv(&orders)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orders.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

fn flash_redirect(code: &str) -> Redirect {
    Redirect::to(&format!("/?flash={code}"))
}
