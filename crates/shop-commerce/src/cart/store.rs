//! Persisted cart store.

use chrono::Utc;
use shop_cache::{Cache, KvStore};

use crate::cart::{Cart, CartTotals, PricingPolicy};
use crate::catalog::ProductCatalog;
use crate::checkout::{OrderReceipt, OrderReferenceGenerator};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::notify::{Notifier, NullNotifier, Severity};

/// Storage slot holding the cart when no other key is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

const SAVE_FAILED_MESSAGE: &str = "Your cart could not be saved. Changes are kept for this session only.";
const RESTORE_FAILED_MESSAGE: &str = "Your saved cart could not be restored. Starting with an empty cart.";

/// Hook called after every cart change so a view can redraw itself.
pub trait CartView {
    fn cart_changed(&self, cart: &Cart, totals: &CartTotals);
}

impl<F> CartView for F
where
    F: Fn(&Cart, &CartTotals),
{
    fn cart_changed(&self, cart: &Cart, totals: &CartTotals) {
        self(cart, totals)
    }
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder<S> {
    catalog: Box<dyn ProductCatalog>,
    cache: Cache<S>,
    key: String,
    notifier: Box<dyn Notifier>,
    views: Vec<Box<dyn CartView>>,
    policy: PricingPolicy,
}

impl<S: KvStore> CartStoreBuilder<S> {
    /// Storage key of the cart slot.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Register a view to be told about every change.
    pub fn view(mut self, view: impl CartView + 'static) -> Self {
        self.views.push(Box::new(view));
        self
    }

    pub fn policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load the persisted cart and return the ready store.
    ///
    /// A missing slot is an empty cart. A slot that cannot be read or fails
    /// validation is reported through the notifier and the store starts
    /// empty; the slot is overwritten on the next change.
    pub fn open(self) -> CartStore<S> {
        let cart = match self.cache.get::<Cart>(&self.key) {
            Ok(Some(cart)) => {
                tracing::debug!(key = %self.key, lines = cart.len(), "restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable cart");
                self.notifier.notify(RESTORE_FAILED_MESSAGE, Severity::Error);
                Cart::new()
            }
        };

        let store = CartStore {
            cart,
            cache: self.cache,
            key: self.key,
            catalog: self.catalog,
            notifier: self.notifier,
            views: self.views,
            policy: self.policy,
            references: OrderReferenceGenerator::new(),
        };
        store.render();
        store
    }
}

/// The shopper's cart together with its persisted mirror.
///
/// Every mutation rewrites the whole cart to its storage slot, then tells
/// the registered views. Storage failures never fail a mutation: the
/// in-memory cart stays authoritative and the shopper is notified.
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
    catalog: Box<dyn ProductCatalog>,
    notifier: Box<dyn Notifier>,
    views: Vec<Box<dyn CartView>>,
    policy: PricingPolicy,
    references: OrderReferenceGenerator,
}

impl<S: KvStore> CartStore<S> {
    /// Start building a store over `catalog` persisted in `store`.
    pub fn builder(catalog: impl ProductCatalog + 'static, store: S) -> CartStoreBuilder<S> {
        CartStoreBuilder {
            catalog: Box::new(catalog),
            cache: Cache::new(store),
            key: DEFAULT_CART_KEY.to_string(),
            notifier: Box::new(NullNotifier),
            views: Vec::new(),
            policy: PricingPolicy::STANDARD,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.catalog.as_ref()
    }

    /// Borrow the cache holding the persisted slot.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    /// Current totals, computed fresh from the cart.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        self.policy.totals(&self.cart)
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// Re-adding a product accumulates onto its line. Returns the line's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::ProductNotFound`] if the catalog has no such product
    /// - [`CommerceError::InvalidQuantity`] if `quantity` is below one
    /// - [`CommerceError::Overflow`] if the line quantity would overflow
    /// - [`CommerceError::CurrencyMismatch`] if the product is priced in a
    ///   different currency from the cart
    ///
    /// The cart is unchanged on error.
    pub fn add_item(&mut self, product_id: &ProductId, quantity: i64) -> Result<i64, CommerceError> {
        let product = self
            .catalog
            .find_product(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;

        let new_quantity = self.cart.add(product, quantity)?;
        let message = format!("{} added to cart!", product.name);
        tracing::debug!(product = %product_id, added = quantity, quantity = new_quantity, "added to cart");

        self.commit();
        self.notifier.notify(&message, Severity::Success);
        Ok(new_quantity)
    }

    /// Remove a product's line. Returns `false` (and does nothing) if the
    /// product is not in the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        if !self.cart.remove(product_id) {
            return false;
        }
        tracing::debug!(product = %product_id, "removed from cart");

        self.commit();
        self.notifier.notify("Item removed from cart", Severity::Info);
        true
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        if !self.cart.set_quantity(product_id, quantity) {
            return false;
        }
        tracing::debug!(product = %product_id, quantity, "updated cart quantity");

        self.commit();
        true
    }

    /// Place the order for the current cart.
    ///
    /// Captures the lines and totals in a receipt, then empties the cart and
    /// persists the empty state. There is no way back: the receipt is the
    /// only record of the submitted lines.
    ///
    /// # Errors
    ///
    /// [`CommerceError::EmptyCart`] if there is nothing to order, or any
    /// error from computing the totals. The cart is unchanged on error.
    pub fn submit_order(&mut self) -> Result<OrderReceipt, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let totals = self.totals()?;
        let placed_at = Utc::now();
        let reference = self.references.next(placed_at);

        let receipt = OrderReceipt {
            reference,
            placed_at,
            lines: self.cart.take_lines(),
            totals,
        };
        tracing::info!(
            order = %receipt.reference,
            items = receipt.item_count(),
            total = %receipt.totals.total,
            "order placed"
        );

        self.commit();
        self.notifier.notify(
            &format!("Order {} placed. Thank you!", receipt.reference),
            Severity::Success,
        );
        Ok(receipt)
    }

    /// Persist then redraw.
    fn commit(&mut self) {
        self.persist();
        self.render();
    }

    fn persist(&mut self) {
        if let Err(e) = self.cache.set(&self.key, &self.cart) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
            self.notifier.notify(SAVE_FAILED_MESSAGE, Severity::Error);
        }
    }

    fn render(&self) {
        if self.views.is_empty() {
            return;
        }
        match self.totals() {
            Ok(totals) => {
                for view in &self.views {
                    view.cart_changed(&self.cart, &totals);
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping cart redraw, totals unavailable"),
        }
    }
}
