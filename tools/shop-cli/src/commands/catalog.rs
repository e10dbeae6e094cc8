//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::catalog::{CatalogQuery, Product, SortOption};
use shop_commerce::ids::ProductId;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List {
            category,
            search,
            sort,
        } => list_products(category, search, sort, ctx),
        CatalogCommand::Show { id } => show_product(&id, ctx),
    }
}

fn list_products(
    category: Option<String>,
    search: Option<String>,
    sort: SortOption,
    ctx: &Context,
) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    let mut query = CatalogQuery::new().with_sort(sort);
    if let Some(category) = category {
        query = query.with_category(category);
    }
    if let Some(search) = search {
        query = query.with_search(search);
    }
    let products = catalog.query(&query);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", sort.display_name()));

    if products.is_empty() {
        ctx.output.info("No products match.");
        ctx.output.kv("categories", &catalog.categories().join(", "));
        return Ok(());
    }

    let widths = [4, 28, 12, 10, 8];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in &products {
        let price = product.price.display();
        let rating = format!("{:.1}", product.rating);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &price,
                &rating,
            ],
            &widths,
        );
    }
    ctx.output.info(&format!("{} of {} products", products.len(), catalog.len()));

    Ok(())
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let product = catalog
        .find(&ProductId::new(id))
        .with_context(|| format!("Product '{}' not found", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&ProductDetail::from(product));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("brand", &product.brand);
    ctx.output.kv("category", &product.category);
    ctx.output.kv("sku", &product.sku);

    let mut price = product.price.display();
    if let (Some(original), Some(percent)) = (product.original_price, product.discount_percent()) {
        price = format!("{price} (was {}, {percent}% off)", original.display());
    }
    ctx.output.kv("price", &price);
    ctx.output.kv(
        "rating",
        &format!("{} {:.1} ({} reviews)", product.stars().render(), product.rating, product.reviews),
    );
    ctx.output.kv("stock", &stock_badge(&product.stock));
    if let Some(badge) = product.badge {
        ctx.output.kv("badge", badge.as_str());
    }

    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }
    for feature in &product.features {
        ctx.output.list_item(feature);
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductDetail<'a> {
    #[serde(flatten)]
    product: &'a Product,
    discount_percent: Option<u32>,
}

impl<'a> From<&'a Product> for ProductDetail<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            discount_percent: product.discount_percent(),
        }
    }
}
