//! Cart commands.

use anyhow::{bail, Result};
use serde::Serialize;
use shop_cache::KvStore;
use shop_commerce::cart::{parse_quantity, CartLine, CartTotals};
use shop_commerce::ids::ProductId;
use shop_commerce::CartStore;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id, quantity } => {
            let quantity = parse_quantity(&quantity)?;
            let id = ProductId::new(id);
            let line_quantity = cart.add_item(&id, quantity)?;
            ctx.output.debug(&format!("{id} now at quantity {line_quantity}"));
        }
        CartCommand::Remove { id } => {
            if !cart.remove_item(&ProductId::new(&id)) {
                bail!("Product '{}' is not in the cart", id);
            }
        }
        CartCommand::Set { id, quantity } => {
            let quantity = parse_quantity(&quantity)?;
            if !cart.set_quantity(&ProductId::new(&id), quantity) {
                bail!("Product '{}' is not in the cart", id);
            }
        }
    }

    show_cart(&cart, ctx)
}

/// Cart state as printed in JSON mode.
#[derive(Serialize)]
struct CartSummary<'a> {
    lines: &'a [CartLine],
    item_count: i64,
    totals: CartTotals,
}

fn show_cart<S: KvStore>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let totals = cart.totals()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            lines: cart.cart().lines(),
            item_count: cart.item_count(),
            totals,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", cart.item_count()));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [4, 28, 10, 4, 10];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &widths);
    for line in cart.cart().lines() {
        let price = line.product.price.display();
        let quantity = line.quantity.to_string();
        let line_total = line.line_total()?.display();
        ctx.output.table_row(
            &[
                line.product_id().as_str(),
                &line.product.name,
                &price,
                &quantity,
                &line_total,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Shipping", &totals.shipping_label());
    ctx.output.kv("Tax (8%)", &totals.tax.display());
    ctx.output.kv("Total", &totals.total.display());

    Ok(())
}
