//! The commerce store: users, sessions, carts, and orders over storage.
//!
//! All durable state lives as JSON records under fixed keys in two
//! [`Storage`] handles: a durable one (user table, remembered sessions,
//! anonymous cart, product cache) and a transient one (unremembered
//! sessions, the pending-add payload). Every operation is a full
//! read-modify-write of the affected record; concurrent writers race with
//! last-write-wins, exactly like two tabs sharing browser storage.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use techedge_core::{Email, OrderId, OrderStatus, ProductId};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::events::{EventHook, StoreEvent};
use crate::models::{CartItem, CartTotals, Order, PaymentMeta, PendingAdd, Product, Session, User};
use crate::storage::{JsonFileStorage, Storage, StorageError};

/// Cheaply cloneable handle over all persisted store state.
#[derive(Clone)]
pub struct CommerceStore {
    inner: Arc<CommerceStoreInner>,
}

struct CommerceStoreInner {
    durable: Storage,
    transient: Storage,
    config: StoreConfig,
    hooks: Mutex<Vec<EventHook>>,
}

impl CommerceStore {
    /// Build a store over explicit storage handles.
    #[must_use]
    pub fn new(config: StoreConfig, durable: Storage, transient: Storage) -> Self {
        Self {
            inner: Arc::new(CommerceStoreInner {
                durable,
                transient,
                config,
                hooks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// A store keeping everything in memory. Used in tests and demos.
    #[must_use]
    pub fn in_memory(config: StoreConfig) -> Self {
        Self::new(config, Storage::in_memory(), Storage::in_memory())
    }

    /// A store persisting durable state to a JSON file at `path`.
    /// Transient state stays in memory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(
        path: impl Into<std::path::PathBuf>,
        config: StoreConfig,
    ) -> Result<Self, StorageError> {
        let durable = Storage::new(JsonFileStorage::open(path)?);
        Ok(Self::new(config, durable, Storage::in_memory()))
    }

    /// The configuration this store was built with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    fn keys(&self) -> &crate::config::StorageKeys {
        &self.inner.config.keys
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a hook invoked after every state change.
    pub fn on_change(&self, hook: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.inner
            .hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(hook));
    }

    fn notify(&self, event: StoreEvent) {
        let hooks = self
            .inner
            .hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for hook in hooks.iter() {
            hook(&event);
        }
    }

    // =========================================================================
    // User table
    // =========================================================================

    /// The full user table. Missing or corrupt state reads as empty.
    #[must_use]
    pub fn list_users(&self) -> Vec<User> {
        self.inner
            .durable
            .get_json(&self.keys().users)
            .unwrap_or_default()
    }

    /// Replace the full user table.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.inner.durable.set_json(&self.keys().users, &users)?;
        Ok(())
    }

    /// Look up a user by email.
    #[must_use]
    pub fn find_user(&self, email: &Email) -> Option<User> {
        self.list_users().into_iter().find(|u| u.email == *email)
    }

    /// Append a new user, refusing emails already in the table.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmailAlreadyRegistered` without mutating the
    /// table, or `StoreError::Storage` if the write fails.
    pub fn register_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.list_users();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::EmailAlreadyRegistered);
        }
        users.push(user.clone());
        self.save_users(&users)?;
        Ok(user)
    }

    /// Replace the stored record for `user.email`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if no record has that email, or
    /// `StoreError::Storage` if the write fails.
    pub fn update_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.list_users();
        let slot = users
            .iter_mut()
            .find(|u| u.email == user.email)
            .ok_or(StoreError::UserNotFound)?;
        *slot = user.clone();
        self.save_users(&users)?;
        Ok(user)
    }

    /// Remove a user record. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails.
    pub fn remove_user(&self, email: &Email) -> Result<bool, StoreError> {
        let mut users = self.list_users();
        let before = users.len();
        users.retain(|u| u.email != *email);
        if users.len() == before {
            return Ok(false);
        }
        self.save_users(&users)?;
        Ok(true)
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// The active session, if any. The durable slot wins when both exist.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        let key = &self.keys().session;
        self.inner
            .durable
            .get_json::<Session>(key)
            .or_else(|| self.inner.transient.get_json(key))
            .filter(|session| session.logged_in)
    }

    /// Email of the signed-in user, if any.
    #[must_use]
    pub fn current_session_email(&self) -> Option<Email> {
        self.current_session().map(|session| session.email)
    }

    /// Store a session in the slot chosen by `remember`: durable when set,
    /// transient otherwise. The other slot is cleared.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn write_session(&self, session: &Session, remember: bool) -> Result<(), StoreError> {
        let key = &self.keys().session;
        if remember {
            self.inner.transient.remove(key)?;
            self.inner.durable.set_json(key, session)?;
        } else {
            self.inner.durable.remove(key)?;
            self.inner.transient.set_json(key, session)?;
        }
        self.notify(StoreEvent::AuthChanged);
        Ok(())
    }

    /// Overwrite the active session record in the slot it occupies, without
    /// signalling an auth change.
    ///
    /// Used by profile updates to keep the session's display name in step
    /// with the user record. Falls back to the durable slot when no session
    /// is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn refresh_session(&self, session: &Session) -> Result<(), StoreError> {
        let key = &self.keys().session;
        if self.inner.durable.get(key).is_none() && self.inner.transient.get(key).is_some() {
            self.inner.transient.set_json(key, session)?;
        } else {
            self.inner.durable.set_json(key, session)?;
        }
        Ok(())
    }

    /// Clear both session slots.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if a removal cannot be persisted.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        let key = &self.keys().session;
        self.inner.durable.remove(key)?;
        self.inner.transient.remove(key)?;
        self.notify(StoreEvent::AuthChanged);
        Ok(())
    }

    /// Point the session at `email`, or clear it with `None`.
    ///
    /// Builds the session record from the user table when the email is
    /// registered; an unregistered email still gets a session, just without
    /// a display name. Always lands in the durable slot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn set_current_session_email(&self, email: Option<&Email>) -> Result<(), StoreError> {
        match email {
            None => self.clear_session(),
            Some(email) => {
                let now = Utc::now();
                let session = self.find_user(email).map_or_else(
                    || Session::for_email(email.clone(), now),
                    |user| Session::for_user(&user, now),
                );
                self.write_session(&session, true)
            }
        }
    }

    /// The signed-in user's stored record.
    ///
    /// `None` when nobody is signed in, and also when a session exists but
    /// its user record is gone. Callers that need to tell those apart look
    /// at [`current_session`](Self::current_session) as well.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let email = self.current_session_email()?;
        self.find_user(&email)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The active cart: the signed-in user's cart, or the anonymous cart
    /// when nobody is signed in.
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        match self.current_user() {
            Some(user) => user.cart,
            None => self
                .inner
                .durable
                .get_json(&self.keys().cart)
                .unwrap_or_default(),
        }
    }

    /// A specific user's cart, bypassing the session.
    #[must_use]
    pub fn cart_for(&self, email: &Email) -> Vec<CartItem> {
        self.find_user(email).map(|user| user.cart).unwrap_or_default()
    }

    /// Write the active cart back to its owner.
    ///
    /// With a session whose user record is missing, a placeholder record is
    /// created so the cart still lands somewhere findable. Without any
    /// session the anonymous slot is used. Emits
    /// [`StoreEvent::CartUpdated`] with the new item count.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn save_cart(&self, items: &[CartItem]) -> Result<(), StoreError> {
        match self.current_session_email() {
            Some(email) => {
                let mut users = self.list_users();
                match users.iter_mut().find(|u| u.email == email) {
                    Some(user) => user.cart = items.to_vec(),
                    None => users.push(User::stub(email, items.to_vec(), Utc::now())),
                }
                self.save_users(&users)?;
            }
            None => {
                self.inner.durable.set_json(&self.keys().cart, &items)?;
            }
        }
        self.notify(StoreEvent::CartUpdated {
            count: count_items(items),
        });
        Ok(())
    }

    /// Add a product to the active cart, merging into an existing line by
    /// product id. Returns the resulting line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<CartItem, StoreError> {
        let mut items = self.cart();
        let added = quantity.max(1);

        let line = match items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => {
                existing.quantity += added;
                existing.clone()
            }
            None => {
                let line = CartItem::from_product(product, added);
                items.push(line.clone());
                line
            }
        };

        self.save_cart(&items)?;
        Ok(line)
    }

    /// Set the quantity of an existing line. Quantities below one are
    /// bumped to one. Returns the updated line, or `None` (leaving the cart
    /// untouched) when no line has that product id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn set_cart_quantity(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<Option<CartItem>, StoreError> {
        let mut items = self.cart();
        let Some(line) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        line.quantity = quantity.max(1);
        let updated = line.clone();
        self.save_cart(&items)?;
        Ok(Some(updated))
    }

    /// Remove a line from the active cart. Returns the removed line, or
    /// `None` (leaving the cart untouched) when no line has that id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn remove_from_cart(&self, id: ProductId) -> Result<Option<CartItem>, StoreError> {
        let mut items = self.cart();
        let Some(position) = items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };
        let removed = items.remove(position);
        self.save_cart(&items)?;
        Ok(Some(removed))
    }

    /// Total item count across all lines of the active cart.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        count_items(&self.cart())
    }

    /// Subtotal, shipping, and total for the active cart.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        let subtotal = self.cart().iter().map(CartItem::line_total).sum();
        let shipping = self.inner.config.pricing.shipping_for(subtotal);
        CartTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order for the signed-in user's whole cart.
    ///
    /// The cart lines are snapshotted into the order and the order is
    /// appended to the user's history. The cart itself is left as is; it
    /// clears when the payment confirms.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` without a signed-in user with
    /// a stored record, `StoreError::EmptyCart` when there is nothing to
    /// order, and `StoreError::Storage` if the write fails.
    pub fn create_order(&self, meta: PaymentMeta) -> Result<Order, StoreError> {
        let mut user = self.current_user().ok_or(StoreError::NotAuthenticated)?;
        if user.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let now = Utc::now();
        let subtotal = user.cart.iter().map(CartItem::line_total).sum();
        let shipping = self.inner.config.pricing.shipping_for(subtotal);
        let order = Order {
            id: OrderId::generate(now),
            items: user.cart.clone(),
            subtotal,
            shipping,
            total: subtotal + shipping,
            method: meta.method(),
            meta,
            status: OrderStatus::Pending,
            created_at: now,
            paid_at: None,
            note: None,
        };

        user.orders.push(order.clone());
        self.update_user(user)?;
        Ok(order)
    }

    /// Record a payment confirmation on one of the signed-in user's orders
    /// and clear their cart. Emits [`StoreEvent::CartUpdated`] with a count
    /// of zero.
    ///
    /// The cart is cleared wholesale, even if lines were added after the
    /// order was placed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` without a signed-in user,
    /// `StoreError::OrderNotFound` (leaving all state untouched) when the
    /// id is not in their history, and `StoreError::Storage` if the write
    /// fails.
    pub fn mark_order_paid(&self, id: &OrderId, note: &str) -> Result<Order, StoreError> {
        let mut user = self.current_user().ok_or(StoreError::NotAuthenticated)?;
        let order = user
            .orders
            .iter_mut()
            .find(|order| order.id == *id)
            .ok_or(StoreError::OrderNotFound)?;

        order.mark_paid(Utc::now(), note);
        let paid = order.clone();
        user.cart.clear();
        self.update_user(user)?;

        self.notify(StoreEvent::CartUpdated { count: 0 });
        Ok(paid)
    }

    /// The signed-in user's orders, newest first. Empty when nobody is
    /// signed in.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.current_user()
            .map(|user| {
                let mut orders = user.orders;
                orders.reverse();
                orders
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Pending add
    // =========================================================================

    /// Stash a product a visitor tried to add before logging in.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn set_pending_add(&self, product: &Product) -> Result<(), StoreError> {
        self.inner
            .transient
            .set_json(&self.keys().pending_add, &PendingAdd::from_product(product))?;
        Ok(())
    }

    /// The stashed add-before-login payload, if any.
    #[must_use]
    pub fn pending_add(&self) -> Option<PendingAdd> {
        self.inner.transient.get_json(&self.keys().pending_add)
    }

    /// Drop the stashed payload.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the removal cannot be persisted.
    pub fn clear_pending_add(&self) -> Result<(), StoreError> {
        self.inner.transient.remove(&self.keys().pending_add)?;
        Ok(())
    }

    /// Turn a stashed payload into a single-quantity cart add.
    ///
    /// The cached catalog record is preferred over the payload, which may
    /// carry stale pricing. Returns the added line, or `None` when nothing
    /// was stashed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if a write cannot be persisted.
    pub fn redeem_pending_add(&self) -> Result<Option<CartItem>, StoreError> {
        let Some(pending) = self.pending_add() else {
            return Ok(None);
        };
        let product = self
            .cached_product(pending.id)
            .unwrap_or_else(|| pending.into_product());
        let line = self.add_to_cart(&product, 1)?;
        self.clear_pending_add()?;
        Ok(Some(line))
    }

    // =========================================================================
    // Product cache
    // =========================================================================

    /// Products from the last successful catalog fetch.
    #[must_use]
    pub fn cached_products(&self) -> Vec<Product> {
        self.inner
            .durable
            .get_json(&self.keys().products)
            .unwrap_or_default()
    }

    /// A single product from the cache.
    #[must_use]
    pub fn cached_product(&self, id: ProductId) -> Option<Product> {
        self.cached_products().into_iter().find(|p| p.id == id)
    }

    /// Replace the cached product list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write cannot be persisted.
    pub fn cache_products(&self, products: &[Product]) -> Result<(), StoreError> {
        self.inner
            .durable
            .set_json(&self.keys().products, &products)?;
        Ok(())
    }
}

impl std::fmt::Debug for CommerceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceStore")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

fn count_items(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}
