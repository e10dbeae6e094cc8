//! Product records.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductBadge {
    New,
    Sale,
}

impl ProductBadge {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductBadge::New => "new",
            ProductBadge::Sale => "sale",
        }
    }
}

/// A read-only catalog record.
///
/// The same shape is embedded (flattened) in every cart line as the snapshot
/// taken when the product was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category slug (e.g., "laptops").
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Current unit price.
    pub price: Money,
    /// Pre-discount price, when the product is marked down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    /// Number of reviews.
    pub reviews: u32,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Stock keeping unit.
    pub sku: String,
    /// Stock status label (e.g., "In Stock", "Limited Stock").
    pub stock: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<ProductBadge>,
}

impl Product {
    /// Create a product with empty merchandising fields.
    ///
    /// The SKU defaults to the id and the stock label to "In Stock".
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        let id = id.into();
        Self {
            sku: id.as_str().to_string(),
            id,
            name: name.into(),
            category: String::new(),
            brand: String::new(),
            price,
            original_price: None,
            rating: 0.0,
            reviews: 0,
            description: String::new(),
            features: Vec::new(),
            stock: "In Stock".to_string(),
            badge: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    pub fn with_rating(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    /// Check the record against the catalog's field constraints.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |msg: String| Err(CommerceError::ValidationError(msg));

        if self.id.as_str().trim().is_empty() {
            return invalid("product id is empty".to_string());
        }
        if self.name.trim().is_empty() {
            return invalid(format!("product {} has no name", self.id));
        }
        if self.price.is_negative() {
            return invalid(format!("product {} has a negative price", self.id));
        }
        if let Some(original) = self.original_price {
            if original.is_negative() {
                return invalid(format!("product {} has a negative original price", self.id));
            }
            if original.currency != self.price.currency {
                return invalid(format!(
                    "product {} mixes {} and {} prices",
                    self.id, self.price.currency, original.currency
                ));
            }
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return invalid(format!(
                "product {} rating {} is outside 0-{}",
                self.id, self.rating, MAX_RATING
            ));
        }
        Ok(())
    }

    /// Check if the product is marked down from its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|o| o.currency == self.price.currency && o.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Markdown from the original price as a whole percentage, rounded to
    /// the nearest percent.
    pub fn discount_percent(&self) -> Option<u32> {
        if !self.is_on_sale() {
            return None;
        }
        let original = i128::from(self.original_price?.amount_cents);
        let savings = original - i128::from(self.price.amount_cents);
        // round(savings / original * 100), half up
        let percent = (savings * 200 + original) / (original * 2);
        u32::try_from(percent).ok()
    }

    /// Star breakdown for displaying the rating.
    pub fn stars(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }
}

/// Full, half and empty stars for a rating out of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Any fractional part renders as a half star.
    pub fn from_rating(rating: f32) -> Self {
        let rating = rating.clamp(0.0, MAX_RATING);
        let full = rating.floor() as u8;
        let half = rating.fract() != 0.0;
        let empty = (MAX_RATING - rating.ceil()) as u8;
        Self { full, half, empty }
    }

    /// Render as text, e.g. `★★★★½`.
    pub fn render(&self) -> String {
        let mut s = "\u{2605}".repeat(self.full as usize);
        if self.half {
            s.push('\u{00bd}');
        }
        s.push_str(&"\u{2606}".repeat(self.empty as usize));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_product_defaults() {
        let product = Product::new("4", "Dell XPS 13 Plus", usd(129_900));
        assert_eq!(product.sku, "4");
        assert_eq!(product.stock, "In Stock");
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_discount_percent() {
        let product =
            Product::new("4", "Dell XPS 13 Plus", usd(129_900)).with_original_price(usd(149_900));
        assert!(product.is_on_sale());
        // 1 - 1299/1499 = 13.34%
        assert_eq!(product.discount_percent(), Some(13));

        let product = Product::new("5", "Sony WH-1000XM5", usd(34_900)).with_original_price(usd(39_900));
        // 12.53% -> 13
        assert_eq!(product.discount_percent(), Some(13));
    }

    #[test]
    fn test_no_discount_without_markdown() {
        let product = Product::new("8", "Magic Keyboard", usd(34_900));
        assert_eq!(product.discount_percent(), None);

        let product = product.with_original_price(usd(34_900));
        assert!(!product.is_on_sale());
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_stars() {
        assert_eq!(
            StarRating::from_rating(4.8),
            StarRating {
                full: 4,
                half: true,
                empty: 0
            }
        );
        assert_eq!(
            StarRating::from_rating(4.0),
            StarRating {
                full: 4,
                half: false,
                empty: 1
            }
        );
        assert_eq!(
            StarRating::from_rating(0.0),
            StarRating {
                full: 0,
                half: false,
                empty: 5
            }
        );
        assert_eq!(StarRating::from_rating(3.5).render(), "\u{2605}\u{2605}\u{2605}\u{00bd}\u{2606}");
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let bad_rating = Product::new("1", "Phone", usd(100)).with_rating(5.5, 3);
        assert!(matches!(
            bad_rating.validate(),
            Err(CommerceError::ValidationError(_))
        ));

        let negative = Product::new("1", "Phone", usd(-1));
        assert!(negative.validate().is_err());

        let nameless = Product::new("1", "  ", usd(100));
        assert!(nameless.validate().is_err());

        let mixed = Product::new("1", "Phone", usd(100))
            .with_original_price(Money::new(200, Currency::EUR));
        assert!(mixed.validate().is_err());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let product = Product::new("1", "Phone", usd(100)).with_original_price(usd(200));
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("originalPrice").is_some());
        assert!(json.get("badge").is_none());
    }
}
