//! # Orders
//!
//! The one entity this application persists. An [`Order`] is a row in the
//! shared `orders` table; rows are only ever inserted, never updated or
//! deleted here.
//!
//! ## Validation
//!
//! Submissions arrive as raw form text and pass through
//! [`OrderForm::validate`] before anything touches the database:
//! - the name is trimmed and must not end up empty
//! - the quantity must parse as a whole number greater than zero
//!
//! Anything else in the payload is the database's business (`id` and
//! `created_at` are generated there).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Timestamp rendering shared by the page listing and the CSV export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Spreadsheet apps only detect UTF-8 CSVs when the byte-order mark is there.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// A persisted order, as read back from Postgres.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Order {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

/// Raw submission payload.
///
/// The quantity stays a string so that a hand-crafted `quantity=abc` request
/// gets the same validation message as `quantity=0` instead of a bare
/// extractor rejection.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub quantity: String,
}

/// A validated order, ready to insert: name trimmed and non-empty,
/// quantity positive.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub name: String,
    pub quantity: i32,
}

/// Rejections surfaced to the user on the form page. No write is attempted
/// for any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name must not be blank.")]
    EmptyName,

    #[error("Quantity must be a positive whole number.")]
    InvalidQuantity,
}

impl OrderForm {
    pub fn validate(&self) -> Result<NewOrder, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let quantity: i32 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidQuantity)?;
        if quantity <= 0 {
            return Err(ValidationError::InvalidQuantity);
        }

        Ok(NewOrder {
            name: name.to_string(),
            quantity,
        })
    }
}

/// Renders orders as a CSV attachment body, in the same newest-first order as
/// the page listing.
pub fn orders_to_csv(orders: &[Order]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["id", "name", "quantity", "created_at"])?;
        for order in orders {
            writer.write_record([
                order.id.to_string(),
                order.name.clone(),
                order.quantity.to_string(),
                order.created_at.format(TIMESTAMP_FORMAT).to_string(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}
