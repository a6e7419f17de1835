use serde::{Deserialize, Serialize};

/// The fixed column set recognized in uploads, matched by exact header
/// name. Unknown columns are ignored, missing ones yield empty or zero
/// values rather than a parse error.
pub(crate) const COLUMNS: [&str; 7] = [
    "date", "product", "category", "region", "quantity", "price", "revenue",
];

/// One row as it appears in the uploaded file, before any typing.
///
/// Every field is an optional string so that decoding can never fail on
/// row content; all interpretation happens in [`RawRow::coerce`].
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub date: Option<String>,
    pub product: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub revenue: Option<String>,
}

impl RawRow {
    pub(crate) fn set(&mut self, column: &str, value: String) {
        match column {
            "date" => self.date = Some(value),
            "product" => self.product = Some(value),
            "category" => self.category = Some(value),
            "region" => self.region = Some(value),
            "quantity" => self.quantity = Some(value),
            "price" => self.price = Some(value),
            "revenue" => self.revenue = Some(value),
            _ => {}
        }
    }

    /// The single typing step between file content and the stored shape.
    ///
    /// Label fields are trimmed; numeric fields parse as `f64` and fall
    /// back to zero when absent or unparseable. `price` stays `None`
    /// only when the source file carries no price column at all.
    pub fn coerce(self) -> SalesRow {
        SalesRow {
            date: trimmed(self.date),
            product: trimmed(self.product),
            category: trimmed(self.category),
            region: trimmed(self.region),
            quantity: parse_number(self.quantity.as_deref()),
            price: self.price.as_deref().map(|value| parse_number(Some(value))),
            revenue: parse_number(self.revenue.as_deref()),
        }
    }
}

/// A coerced sales row, ready for validation and insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRow {
    /// `YYYY-MM-DD` by convention; stored verbatim.
    pub date: String,
    pub product: String,
    pub category: String,
    pub region: String,
    pub quantity: f64,
    pub price: Option<f64>,
    pub revenue: f64,
}

impl SalesRow {
    /// A row is insertable iff all four label fields are non-empty.
    pub fn has_required_fields(&self) -> bool {
        !(self.date.is_empty()
            || self.product.is_empty()
            || self.category.is_empty()
            || self.region.is_empty())
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, product: &str, quantity: &str) -> RawRow {
        let mut row = RawRow::default();
        row.set("date", date.to_string());
        row.set("product", product.to_string());
        row.set("category", "X".to_string());
        row.set("region", "East".to_string());
        row.set("quantity", quantity.to_string());
        row
    }

    /// Whitespace-only labels count as empty after coercion.
    #[test]
    fn trims_label_fields() {
        let row = raw("  2024-01-05 ", "   ", "2").coerce();
        assert_eq!(row.date, "2024-01-05");
        assert!(row.product.is_empty());
        assert!(!row.has_required_fields());
    }

    /// Numeric fields coerce to zero instead of failing.
    #[test]
    fn numeric_fallback_is_zero() {
        let row = raw("2024-01-05", "A", "not a number").coerce();
        assert_eq!(row.quantity, 0.0);
        assert_eq!(row.revenue, 0.0);
    }

    /// `price` distinguishes a missing column from an unparseable cell.
    #[test]
    fn price_none_only_when_column_absent() {
        let without_price = raw("2024-01-05", "A", "2").coerce();
        assert_eq!(without_price.price, None);

        let mut with_price = raw("2024-01-05", "A", "2");
        with_price.set("price", "garbage".to_string());
        assert_eq!(with_price.coerce().price, Some(0.0));
    }

    /// Unknown column names are dropped silently.
    #[test]
    fn ignores_unknown_columns() {
        let mut row = RawRow::default();
        row.set("discount", "5".to_string());
        assert!(row.date.is_none());
    }
}
