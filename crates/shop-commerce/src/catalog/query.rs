//! Catalog browsing queries.

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Sort options for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Default,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Sort by name A-Z.
    Name,
    /// Sort by highest rated.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Name,
        SortOption::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Name => "name",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Default => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Name => "Name: A-Z",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Ordering of two products under this option. `Default` keeps catalog
    /// order, so every pair compares equal.
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Default => Ordering::Equal,
            SortOption::PriceLow => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceHigh => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::ValidationError(format!("unknown sort option: {s}")))
    }
}

/// Filter, search and sort applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Category to keep; `None` keeps every category.
    pub category: Option<String>,
    /// Case-insensitive text matched against name, brand and category.
    pub search: Option<String>,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one category. `"all"` clears the filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Set the search text. Blank text clears the search.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a product passes the category filter and search.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            let hit = [&product.name, &product.brand, &product.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Apply the query to a product list. Sorting is stable.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut hits: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        hits.sort_by(|a, b| self.sort.compare(a, b));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn products() -> Vec<Product> {
        vec![
            Product::new("1", "iPhone 15 Pro Max", Money::new(119_900, Currency::USD))
                .with_category("smartphones")
                .with_brand("Apple")
                .with_rating(4.8, 1247),
            Product::new("3", "MacBook Pro 16-inch M3", Money::new(249_900, Currency::USD))
                .with_category("laptops")
                .with_brand("Apple")
                .with_rating(4.9, 567),
            Product::new("5", "Sony WH-1000XM5", Money::new(34_900, Currency::USD))
                .with_category("headphones")
                .with_brand("Sony")
                .with_rating(4.8, 2156),
            Product::new("8", "Magic Keyboard for iPad Pro", Money::new(34_900, Currency::USD))
                .with_category("accessories")
                .with_brand("Apple")
                .with_rating(4.5, 567),
        ]
    }

    fn ids(hits: &[&Product]) -> Vec<String> {
        hits.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_keeps_catalog_order() {
        let products = products();
        let hits = CatalogQuery::new().apply(&products);
        assert_eq!(ids(&hits), vec!["1", "3", "5", "8"]);
    }

    #[test]
    fn test_category_filter() {
        let products = products();
        let hits = CatalogQuery::new().with_category("laptops").apply(&products);
        assert_eq!(ids(&hits), vec!["3"]);

        let hits = CatalogQuery::new().with_category("all").apply(&products);
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn test_search_matches_name_brand_and_category() {
        let products = products();
        assert_eq!(
            ids(&CatalogQuery::new().with_search("  SONY ").apply(&products)),
            vec!["5"]
        );
        assert_eq!(
            ids(&CatalogQuery::new().with_search("apple").apply(&products)),
            vec!["1", "3", "8"]
        );
        assert_eq!(
            ids(&CatalogQuery::new().with_search("phones").apply(&products)),
            vec!["1", "5"]
        );
        assert!(CatalogQuery::new().with_search("   ").search.is_none());
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let products = products();
        let low = CatalogQuery::new()
            .with_sort(SortOption::PriceLow)
            .apply(&products);
        assert_eq!(ids(&low), vec!["5", "8", "1", "3"]);

        let high = CatalogQuery::new()
            .with_sort(SortOption::PriceHigh)
            .apply(&products);
        assert_eq!(ids(&high), vec!["3", "1", "5", "8"]);
    }

    #[test]
    fn test_name_and_rating_sorts() {
        let products = products();
        let by_name = CatalogQuery::new().with_sort(SortOption::Name).apply(&products);
        assert_eq!(ids(&by_name), vec!["1", "3", "8", "5"]);

        let by_rating = CatalogQuery::new()
            .with_sort(SortOption::Rating)
            .apply(&products);
        assert_eq!(ids(&by_rating), vec!["3", "1", "5", "8"]);
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!("price-low".parse::<SortOption>().unwrap(), SortOption::PriceLow);
        assert_eq!("Rating".parse::<SortOption>().unwrap(), SortOption::Rating);
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
