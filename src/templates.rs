//! # Pages
//!
//! The single HTML page this application serves: order form on top, flash
//! banner when a submission just happened, the latest orders underneath, and
//! a CSV download link.
//!
//! ## Rendering
//!
//! The template is compiled into the binary with `include_str!`, so the
//! deployed container needs no template directory. Tera autoescapes `.html`
//! templates, which is what keeps user-supplied names inert on the page.
//!
//! ## Flash codes
//!
//! Submissions redirect back to `/` with `?flash=<code>`; the code picks a
//! fixed banner. Codes, not free text, travel in the URL so a hand-edited
//! query string cannot put arbitrary content on the page.

use serde::Serialize;
use tera::{Context, Tera};

use crate::order::{Order, ValidationError, TIMESTAMP_FORMAT};

pub const PAGE_TITLE: &str = "Book Order Form";

pub const FLASH_SUBMITTED: &str = "submitted";
pub const FLASH_EMPTY_NAME: &str = "empty-name";
pub const FLASH_BAD_QUANTITY: &str = "bad-quantity";
pub const FLASH_WRITE_FAILED: &str = "write-failed";

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// One-shot banner shown after a redirect.
#[derive(Debug, Serialize)]
pub struct Flash {
    pub kind: &'static str,
    pub message: String,
}

impl Flash {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }
}

/// Banner for a flash code from the query string. Unknown codes map to
/// `None` and render nothing.
pub fn flash_for(code: &str) -> Option<Flash> {
    match code {
        FLASH_SUBMITTED => Some(Flash::success("Order submitted!")),
        FLASH_EMPTY_NAME => Some(Flash::error(ValidationError::EmptyName.to_string())),
        FLASH_BAD_QUANTITY => Some(Flash::error(ValidationError::InvalidQuantity.to_string())),
        FLASH_WRITE_FAILED => Some(Flash::error("Saving the order failed. Please try again.")),
        _ => None,
    }
}

/// The flash code a rejected submission redirects with.
pub fn flash_code(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::EmptyName => FLASH_EMPTY_NAME,
        ValidationError::InvalidQuantity => FLASH_BAD_QUANTITY,
    }
}

/// Listing row with the timestamp preformatted for display.
#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub created_at: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            name: order.name.clone(),
            quantity: order.quantity,
            created_at: order.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", INDEX_TEMPLATE)
        .expect("Bundled index.html template is malformed!");
    tera
}

/// Renders the whole page. `orders: None` means the listing query failed;
/// the table gives way to a notice and the form stays usable.
pub fn render_index(
    tera: &Tera,
    flash: Option<Flash>,
    orders: Option<Vec<OrderRow>>,
) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("title", PAGE_TITLE);
    context.insert("flash", &flash);
    context.insert("load_failed", &orders.is_none());
    context.insert(
        "has_orders",
        &orders.as_ref().is_some_and(|rows| !rows.is_empty()),
    );
    context.insert("orders", &orders.unwrap_or_default());
    tera.render("index.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: i32, name: &str) -> OrderRow {
        OrderRow {
            id,
            name: name.to_string(),
            quantity: 2,
            created_at: "2026-08-22 12:30:00".to_string(),
        }
    }

    #[test]
    fn renders_form_and_listing() {
        let tera = load_templates();
        let html = render_index(&tera, None, Some(vec![row(1, "Alice")])).unwrap();

        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains("<form method=\"post\" action=\"/orders\""));
        assert!(html.contains("Alice"));
        assert!(html.contains("/orders.csv"));
    }

    #[test]
    fn escapes_user_supplied_names() {
        let tera = load_templates();
        let html = render_index(&tera, None, Some(vec![row(1, "<script>alert(1)</script>")]))
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn shows_flash_banner() {
        let tera = load_templates();
        let html = render_index(&tera, flash_for(FLASH_SUBMITTED), Some(vec![])).unwrap();
        assert!(html.contains("Order submitted!"));
        assert!(html.contains("flash success"));
    }

    #[test]
    fn unknown_flash_codes_render_nothing() {
        assert!(flash_for("nonsense").is_none());

        let tera = load_templates();
        let html = render_index(&tera, None, Some(vec![])).unwrap();
        assert!(!html.contains("class=\"flash success\""));
        assert!(html.contains("No orders yet."));
    }

    #[test]
    fn failed_listing_keeps_the_form() {
        let tera = load_templates();
        let html = render_index(&tera, None, None).unwrap();

        assert!(html.contains("Could not load the order list."));
        assert!(html.contains("<form method=\"post\" action=\"/orders\""));
        assert!(!html.contains("/orders.csv"));
    }

    #[test]
    fn validation_errors_map_to_their_codes() {
        assert_eq!(flash_code(&ValidationError::EmptyName), FLASH_EMPTY_NAME);
        assert_eq!(
            flash_code(&ValidationError::InvalidQuantity),
            FLASH_BAD_QUANTITY
        );
    }

    #[test]
    fn order_rows_format_timestamps() {
        let order = Order {
            id: 9,
            name: "Bob".to_string(),
            quantity: 1,
            created_at: NaiveDate::from_ymd_opt(2026, 8, 22)
                .unwrap()
                .and_hms_opt(9, 5, 0)
                .unwrap(),
        };
        let row = OrderRow::from(&order);
        assert_eq!(row.created_at, "2026-08-22 09:05:00");
    }
}
