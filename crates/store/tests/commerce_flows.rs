//! End-to-end storefront flows over an in-memory store.
//!
//! Each test drives the public services the way the pages do: sign up or
//! log in, fill the cart, check out, confirm the payment. Storage handles
//! are kept around so the tests can assert which slot state actually
//! landed in.

use techedge_core::{Email, OrderStatus, Price, ProductId};
use techedge_store::models::{PaymentMeta, Product};
use techedge_store::services::{AuthService, CheckoutService, LoginForm, SignupForm};
use techedge_store::{CommerceStore, Storage, StoreConfig};

/// Build a store plus clones of its two storage handles, so tests can
/// inspect raw slots and simulate restarts.
fn store_with_handles() -> (CommerceStore, Storage, Storage) {
    let durable = Storage::in_memory();
    let transient = Storage::in_memory();
    let store = CommerceStore::new(StoreConfig::default(), durable.clone(), transient.clone());
    (store, durable, transient)
}

fn product(id: i64, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::from_cents(cents),
        description: String::new(),
        image: String::new(),
    }
}

fn signup_form(email: &str) -> SignupForm {
    SignupForm {
        fullname: Some("Sam Shopper".to_string()),
        email: email.to_string(),
        password: "hunter22".to_string(),
        password_confirm: "hunter22".to_string(),
        accept_terms: true,
    }
}

fn login_form(email: &str, password: &str, remember: bool) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
        remember,
    }
}

// ============================================================================
// Full Purchase Journey
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_signup_shop_checkout_and_confirmation() {
    let (store, _, _) = store_with_handles();
    let auth = AuthService::new(store.clone());
    let checkout = CheckoutService::new(store.clone());

    auth.sign_up(&signup_form("sam@example.com"))
        .expect("signup should succeed");

    store
        .add_to_cart(&product(1, 80_00), 1)
        .expect("add should succeed");
    store
        .add_to_cart(&product(2, 30_00), 2)
        .expect("add should succeed");

    let totals = store.cart_totals();
    assert_eq!(totals.subtotal, Price::from_cents(140_00));
    assert_eq!(totals.shipping, Price::from_cents(5_00));
    assert_eq!(totals.total, Price::from_cents(145_00));

    let order = checkout
        .place_order(&PaymentMeta::Bank {
            bank_name: "First Bank".to_string(),
            reference: "REF-77".to_string(),
        })
        .expect("order should be placed");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Price::from_cents(145_00));
    // Placement alone does not empty the cart.
    assert_eq!(store.cart_count(), 3);

    let paid = checkout
        .confirm_later(&order)
        .await
        .expect("confirmation task should not panic")
        .expect("confirmation should succeed");
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(paid.note.as_deref(), Some("Bank transfer auto-confirmed"));

    assert!(store.cart().is_empty());
    let orders = store.orders();
    assert_eq!(orders.len(), 1);
    assert!(orders[0].status.is_paid());
}

// ============================================================================
// Remember Me
// ============================================================================

#[test]
fn test_remembered_session_survives_restart() {
    let (store, durable, _) = store_with_handles();
    let auth = AuthService::new(store);
    auth.sign_up(&signup_form("sam@example.com"))
        .expect("signup should succeed");
    auth.log_out().expect("logout should succeed");

    auth.log_in(&login_form("sam@example.com", "hunter22", true))
        .expect("login should succeed");

    // A restart keeps durable storage and loses the transient slots.
    let restarted = CommerceStore::new(StoreConfig::default(), durable, Storage::in_memory());
    let session = restarted
        .current_session()
        .expect("remembered session should survive");
    assert_eq!(session.email.as_str(), "sam@example.com");
    assert_eq!(session.display_name(), "Sam Shopper");
}

#[test]
fn test_unremembered_session_lost_on_restart() {
    let (store, durable, transient) = store_with_handles();
    let auth = AuthService::new(store);
    auth.sign_up(&signup_form("sam@example.com"))
        .expect("signup should succeed");
    auth.log_out().expect("logout should succeed");

    auth.log_in(&login_form("sam@example.com", "hunter22", false))
        .expect("login should succeed");

    // The session record sits in the transient slot only.
    let key = &StoreConfig::default().keys.session;
    assert!(transient.get(key).is_some());
    assert!(durable.get(key).is_none());

    let restarted = CommerceStore::new(StoreConfig::default(), durable, Storage::in_memory());
    assert!(restarted.current_session().is_none());
    // The account itself is durable either way.
    let email = Email::parse("sam@example.com").expect("valid email");
    assert!(restarted.find_user(&email).is_some());
}

// ============================================================================
// Guest Add Before Login
// ============================================================================

#[test]
fn test_guest_add_lands_in_cart_after_signup() {
    let (store, _, _) = store_with_handles();
    let auth = AuthService::new(store.clone());

    // A guest picks a product; the attempt is stashed, not carted.
    store
        .set_pending_add(&product(7, 49_99))
        .expect("stash should succeed");
    assert_eq!(store.cart_count(), 0);

    let user = auth
        .sign_up(&signup_form("sam@example.com"))
        .expect("signup should succeed");

    assert_eq!(user.cart.len(), 1);
    assert_eq!(user.cart[0].id, ProductId::new(7));
    assert_eq!(user.cart[0].quantity, 1);
    assert!(store.pending_add().is_none());
}

#[test]
fn test_guest_add_prefers_cached_catalog_record() {
    let (store, _, _) = store_with_handles();
    let auth = AuthService::new(store.clone());

    // The stashed payload carries yesterday's price.
    store
        .set_pending_add(&product(7, 99_99))
        .expect("stash should succeed");
    store
        .cache_products(&[product(7, 49_99)])
        .expect("cache should succeed");

    auth.sign_up(&signup_form("sam@example.com"))
        .expect("signup should succeed");

    let cart = store.cart();
    assert_eq!(cart[0].price, Price::from_cents(49_99));
}

// ============================================================================
// Demo Account
// ============================================================================

#[test]
fn test_demo_cart_persists_across_demo_logins() {
    let (store, _, _) = store_with_handles();
    let auth = AuthService::new(store.clone());

    auth.log_in(&login_form("demo@demo.com", "password", true))
        .expect("demo login should succeed");
    store
        .add_to_cart(&product(3, 15_00), 2)
        .expect("add should succeed");

    // Saving the cart materialized a placeholder record.
    let email = Email::parse("demo@demo.com").expect("valid email");
    let stub = store.find_user(&email).expect("stub record should exist");
    assert!(stub.password.is_empty());
    assert_eq!(stub.cart.len(), 1);

    auth.log_out().expect("logout should succeed");
    assert_eq!(store.cart_count(), 0);

    // The placeholder cannot be logged into directly, but the demo pair
    // still works and picks the stored cart back up.
    auth.log_in(&login_form("demo@demo.com", "password", true))
        .expect("demo login should succeed");
    assert_eq!(store.cart_count(), 2);
}

#[test]
fn test_anonymous_cart_does_not_follow_the_user_in() {
    let (store, _, _) = store_with_handles();
    let auth = AuthService::new(store.clone());

    store
        .add_to_cart(&product(1, 10_00), 2)
        .expect("add should succeed");

    auth.sign_up(&signup_form("sam@example.com"))
        .expect("signup should succeed");
    assert_eq!(store.cart_count(), 0);

    auth.log_out().expect("logout should succeed");
    assert_eq!(store.cart_count(), 2);
}
