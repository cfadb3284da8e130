//! Catalog record to [`Product`] conversion.

use souk_core::{Product, ProductId, mark_up};

use super::discount::DiscountSource;
use super::types::RawProduct;

/// Normalize a catalog record.
///
/// `previous_price` is the current price marked up by a fresh percentage from
/// `discounts`, rounded to cents, so converting the same record twice usually
/// gives two different previous prices.
pub fn convert_product(raw: RawProduct, discounts: &dyn DiscountSource) -> Product {
    let previous_price = mark_up(raw.price, discounts.discount_percent());

    Product {
        id: ProductId::from(raw.id),
        name: raw.title,
        description: raw.description,
        url_img: raw.image,
        reviews: raw.rating.count,
        price: raw.price,
        previous_price,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::super::discount::{SeededDiscount, ThreadRngDiscount};
    use super::super::types::RawRating;
    use super::*;

    struct FixedDiscount(Decimal);

    impl DiscountSource for FixedDiscount {
        fn discount_percent(&self) -> Decimal {
            self.0
        }
    }

    fn raw(price: Decimal) -> RawProduct {
        RawProduct {
            id: 14,
            title: "Samsung 49-Inch Monitor".to_string(),
            price,
            description: "Super ultrawide".to_string(),
            category: "electronics".to_string(),
            image: "https://img.example/14.jpg".to_string(),
            rating: RawRating {
                rate: 2.2,
                count: 140,
            },
        }
    }

    #[test]
    fn test_field_mapping() {
        let product = convert_product(raw(Decimal::new(99_999, 2)), &FixedDiscount(Decimal::TEN));

        assert_eq!(product.id.as_str(), "14");
        assert_eq!(product.name, "Samsung 49-Inch Monitor");
        assert_eq!(product.description, "Super ultrawide");
        assert_eq!(product.url_img, "https://img.example/14.jpg");
        assert_eq!(product.reviews, 140);
        assert_eq!(product.price, Decimal::new(99_999, 2));
        // 999.99 * 1.10 = 1099.989 -> 1099.99
        assert_eq!(product.previous_price, Decimal::new(109_999, 2));
    }

    #[test]
    fn test_previous_price_bounds_for_hundred() {
        let source = ThreadRngDiscount;
        let low = Decimal::new(11_000, 2);
        let high = Decimal::new(14_000, 2);
        for _ in 0..1_000 {
            let product = convert_product(raw(Decimal::ONE_HUNDRED), &source);
            assert!(product.previous_price >= low, "{}", product.previous_price);
            assert!(product.previous_price <= high, "{}", product.previous_price);
            assert!(product.previous_price.scale() <= 2);
        }
    }

    #[test]
    fn test_previous_price_is_reproducible_with_seed() {
        let a = convert_product(raw(Decimal::new(2250, 2)), &SeededDiscount::new(99));
        let b = convert_product(raw(Decimal::new(2250, 2)), &SeededDiscount::new(99));
        assert_eq!(a.previous_price, b.previous_price);
    }
}
