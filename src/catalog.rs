//! Tax item catalog
//! Maps Census item codes to display descriptions for map titles

use std::collections::HashMap;
use std::sync::LazyLock;

/// Item descriptions from the Census state tax collections survey
pub static ITEM_DESCRIPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Selective sales taxes
    m.insert("T10", "Alcoholic Beverages Sales Tax (T10)");
    m.insert("T12", "Insurance Premiums Sales Tax (T12)");
    m.insert("T13", "Motor Fuels Sales Tax (T13)");
    m.insert("T16", "Tobacco Products Sales Tax (T16)");
    m.insert("T19", "Other Selective Sales and Gross Receipts Taxes (T19)");

    // License taxes
    m.insert("T23", "Hunting and Fishing License (T23)");
    m.insert("T24", "Motor Vehicles License (T24)");
    m.insert("T28", "Occupation and Businesses License, NEC (T28)");

    m
});

/// Display title for an item code, falling back for unmapped codes
pub fn item_title(code: &str) -> String {
    ITEM_DESCRIPTIONS
        .get(code)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown Tax Item".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_item() {
        assert_eq!(item_title("T10"), "Alcoholic Beverages Sales Tax (T10)");
        assert_eq!(
            item_title("T19"),
            "Other Selective Sales and Gross Receipts Taxes (T19)"
        );
    }

    #[test]
    fn test_unknown_item() {
        assert_eq!(item_title("T99"), "Unknown Tax Item");
    }
}
