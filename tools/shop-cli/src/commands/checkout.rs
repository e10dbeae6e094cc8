//! Place the order for the current cart.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if cart.is_empty() {
        bail!("Your cart is empty. Add something with `shop cart add <id>` first.");
    }

    let totals = cart.totals()?;
    ctx.output.header("Checkout");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Shipping", &totals.shipping_label());
    ctx.output.kv("Tax", &totals.tax.display());
    ctx.output.kv("Total", &totals.total.display());

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", totals.total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled, your cart was kept");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = cart.submit_order();
    spinner.finish_and_clear();
    let receipt = result?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.kv("Order", receipt.reference.as_str());
    ctx.output.kv("Placed", &receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    ctx.output.kv("Charged", &receipt.totals.total.display());

    Ok(())
}
