//! In-memory product catalog.

use std::collections::HashSet;

use crate::catalog::{CatalogQuery, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Read-only product lookup consumed by the cart store.
pub trait ProductCatalog {
    fn find_product(&self, id: &ProductId) -> Option<&Product>;
}

/// A validated, static list of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product and rejecting duplicate ids
    /// or a second currency.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        let currency = products.first().map(|p| p.price.currency);
        for product in &products {
            product.validate()?;
            if Some(product.price.currency) != currency {
                return Err(CommerceError::ValidationError(format!(
                    "product {} is priced in {}, catalog is in {}",
                    product.id,
                    product.price.currency,
                    currency.unwrap_or_default()
                )));
            }
            if !seen.insert(&product.id) {
                return Err(CommerceError::ValidationError(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }
        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Products passing the query's filters, in the query's sort order.
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }
}

impl ProductCatalog for Catalog {
    fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.find(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortOption;
    use crate::money::{Currency, Money};

    const CATALOG_JSON: &str = r#"[
        {
            "id": "1",
            "name": "iPhone 15 Pro Max",
            "category": "smartphones",
            "brand": "Apple",
            "price": { "amount_cents": 119900, "currency": "USD" },
            "originalPrice": { "amount_cents": 129900, "currency": "USD" },
            "rating": 4.8,
            "reviews": 1247,
            "features": ["Titanium design"],
            "sku": "IPH15PM-256-NT",
            "stock": "In Stock",
            "badge": "new"
        },
        {
            "id": "8",
            "name": "Magic Keyboard for iPad Pro",
            "category": "accessories",
            "brand": "Apple",
            "price": { "amount_cents": 34900, "currency": "USD" },
            "rating": 4.5,
            "reviews": 567,
            "sku": "MKBD-IPADPRO-12",
            "stock": "In Stock"
        }
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);

        let phone = catalog.find(&ProductId::new("1")).unwrap();
        assert_eq!(phone.discount_percent(), Some(8));
        assert_eq!(phone.features, vec!["Titanium design"]);

        let keyboard = catalog.find_product(&ProductId::new("8")).unwrap();
        assert!(keyboard.original_price.is_none());
        assert!(keyboard.description.is_empty());
    }

    #[test]
    fn test_find_unknown() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert!(catalog.find(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let product = Product::new("1", "Phone", Money::new(100, Currency::USD));
        let result = Catalog::new(vec![product.clone(), product]);
        assert!(matches!(result, Err(CommerceError::ValidationError(_))));
    }

    #[test]
    fn test_mixed_currencies_rejected() {
        let result = Catalog::new(vec![
            Product::new("a", "Cable", Money::new(100, Currency::USD)),
            Product::new("b", "Adapter", Money::new(100, Currency::EUR)),
        ]);
        assert!(matches!(result, Err(CommerceError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_product_rejected() {
        let product =
            Product::new("1", "Phone", Money::new(100, Currency::USD)).with_rating(9.0, 1);
        assert!(Catalog::new(vec![product]).is_err());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = Catalog::new(vec![
            Product::new("1", "A", Money::zero(Currency::USD)).with_category("laptops"),
            Product::new("2", "B", Money::zero(Currency::USD)).with_category("phones"),
            Product::new("3", "C", Money::zero(Currency::USD)).with_category("laptops"),
        ])
        .unwrap();
        assert_eq!(catalog.categories(), vec!["laptops", "phones"]);
    }

    #[test]
    fn test_query() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let hits = catalog.query(&CatalogQuery::new().with_sort(SortOption::PriceLow));
        assert_eq!(hits[0].id.as_str(), "8");
    }
}
