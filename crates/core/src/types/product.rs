//! Catalog product as the rest of the application sees it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A normalized catalog product.
///
/// Serialized with camelCase keys and numeric prices, which is the layout the
/// persisted cart already uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Image URL.
    pub url_img: String,
    /// Number of reviews.
    pub reviews: u64,
    /// Current price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Display-only "before discount" price.
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_price: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Backpack".to_string(),
            description: "Fits 15 inch laptops".to_string(),
            url_img: "https://img.example/1.jpg".to_string(),
            reviews: 120,
            price: Decimal::new(10_995, 2),
            previous_price: Decimal::new(13_194, 2),
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["id"], "1");
        assert_eq!(obj["urlImg"], "https://img.example/1.jpg");
        assert_eq!(obj["reviews"], 120);
        assert!(obj.contains_key("previousPrice"));
        assert!(obj["price"].is_number());
    }

    #[test]
    fn test_prices_survive_json() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.price, product.price);
        assert_eq!(parsed.previous_price, product.previous_price);
    }
}
