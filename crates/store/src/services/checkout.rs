//! Simulated checkout.
//!
//! Orders are placed immediately; "payment processing" is a fixed delay per
//! method after which the order is unconditionally confirmed. No external
//! settlement is consulted, matching what the pay page has always done.

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::commerce::CommerceStore;
use crate::config::PaymentDelays;
use crate::error::StoreError;
use crate::models::{Order, PaymentMeta};

/// Errors from checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Payment details failed validation. Carries the message shown on the
    /// pay page.
    #[error("{0}")]
    InvalidDetails(String),

    /// Store failure while placing or confirming the order.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Checkout flow over a [`CommerceStore`].
#[derive(Debug, Clone)]
pub struct CheckoutService {
    store: CommerceStore,
    delays: PaymentDelays,
}

impl CheckoutService {
    /// Build a service using the store's configured payment delays.
    #[must_use]
    pub fn new(store: CommerceStore) -> Self {
        let delays = store.config().payments;
        Self { store, delays }
    }

    /// Validate payment details and place an order for the active cart.
    ///
    /// Detail fields are trimmed before they are stored, as the form inputs
    /// are. The cart stays filled until the confirmation lands.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidDetails` when a required field is
    /// empty, and `CheckoutError::Store` for `NotAuthenticated`,
    /// `EmptyCart`, or persistence failures.
    pub fn place_order(&self, meta: &PaymentMeta) -> Result<Order, CheckoutError> {
        let meta = validated(meta)?;
        Ok(self.store.create_order(meta)?)
    }

    /// Schedule the simulated confirmation for a placed order.
    ///
    /// The spawned task waits out the method's configured delay, then marks
    /// the order paid with the method's confirmation note and clears the
    /// cart. Dropping the returned handle does not cancel the confirmation;
    /// once scheduled it always lands, like the page timers it replaces.
    pub fn confirm_later(&self, order: &Order) -> JoinHandle<Result<Order, CheckoutError>> {
        let store = self.store.clone();
        let id = order.id.clone();
        let note = confirmation_note(&order.meta);
        let delay = self.delays.for_method(order.method);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let paid = store.mark_order_paid(&id, &note)?;
            Ok(paid)
        })
    }
}

/// The note recorded when a payment with these details confirms.
#[must_use]
pub fn confirmation_note(meta: &PaymentMeta) -> String {
    match meta {
        PaymentMeta::Bank { .. } => "Bank transfer auto-confirmed".to_string(),
        PaymentMeta::Crypto { network, tx_hash } => format!("Tx {tx_hash} on {network}"),
        PaymentMeta::Paypal { paypal_email } => format!("PayPal: {paypal_email}"),
    }
}

fn validated(meta: &PaymentMeta) -> Result<PaymentMeta, CheckoutError> {
    match meta {
        PaymentMeta::Bank {
            bank_name,
            reference,
        } => {
            let bank_name = bank_name.trim();
            let reference = reference.trim();
            if bank_name.is_empty() || reference.is_empty() {
                return Err(invalid("Enter bank name and reference"));
            }
            Ok(PaymentMeta::Bank {
                bank_name: bank_name.to_string(),
                reference: reference.to_string(),
            })
        }
        PaymentMeta::Crypto { network, tx_hash } => {
            let network = network.trim();
            let tx_hash = tx_hash.trim();
            if network.is_empty() || tx_hash.is_empty() {
                return Err(invalid("Enter network and tx hash"));
            }
            Ok(PaymentMeta::Crypto {
                network: network.to_string(),
                tx_hash: tx_hash.to_string(),
            })
        }
        PaymentMeta::Paypal { paypal_email } => {
            let paypal_email = paypal_email.trim();
            if paypal_email.is_empty() {
                return Err(invalid("Enter your PayPal email"));
            }
            Ok(PaymentMeta::Paypal {
                paypal_email: paypal_email.to_string(),
            })
        }
    }
}

fn invalid(message: &str) -> CheckoutError {
    CheckoutError::InvalidDetails(message.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::Utc;
    use techedge_core::{Email, Password, Price, ProductId};

    use crate::config::StoreConfig;
    use crate::models::{Product, User};

    fn store_with_cart() -> CommerceStore {
        let store = CommerceStore::in_memory(StoreConfig::default());
        let email = Email::parse("a@example.com").unwrap();
        let user = User::new(email.clone(), Password::new("hunter22"), None, Utc::now());
        store.register_user(user).unwrap();
        store.set_current_session_email(Some(&email)).unwrap();
        store
            .add_to_cart(
                &Product {
                    id: ProductId::new(1),
                    title: "Widget".to_string(),
                    price: Price::from_cents(80_00),
                    description: String::new(),
                    image: String::new(),
                },
                2,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_place_order_rejects_blank_details() {
        let checkout = CheckoutService::new(store_with_cart());

        let blank_bank = PaymentMeta::Bank {
            bank_name: "  ".to_string(),
            reference: "REF-1".to_string(),
        };
        match checkout.place_order(&blank_bank) {
            Err(CheckoutError::InvalidDetails(message)) => {
                assert_eq!(message, "Enter bank name and reference");
            }
            other => panic!("expected InvalidDetails, got {other:?}"),
        }

        let blank_crypto = PaymentMeta::Crypto {
            network: String::new(),
            tx_hash: "0xabc".to_string(),
        };
        match checkout.place_order(&blank_crypto) {
            Err(CheckoutError::InvalidDetails(message)) => {
                assert_eq!(message, "Enter network and tx hash");
            }
            other => panic!("expected InvalidDetails, got {other:?}"),
        }

        let blank_paypal = PaymentMeta::Paypal {
            paypal_email: "   ".to_string(),
        };
        match checkout.place_order(&blank_paypal) {
            Err(CheckoutError::InvalidDetails(message)) => {
                assert_eq!(message, "Enter your PayPal email");
            }
            other => panic!("expected InvalidDetails, got {other:?}"),
        }
    }

    #[test]
    fn test_place_order_trims_details() {
        let checkout = CheckoutService::new(store_with_cart());

        let order = checkout
            .place_order(&PaymentMeta::Bank {
                bank_name: "  First Bank  ".to_string(),
                reference: " REF-1 ".to_string(),
            })
            .unwrap();

        assert_eq!(
            order.meta,
            PaymentMeta::Bank {
                bank_name: "First Bank".to_string(),
                reference: "REF-1".to_string(),
            }
        );
    }

    #[test]
    fn test_confirmation_notes() {
        assert_eq!(
            confirmation_note(&PaymentMeta::Bank {
                bank_name: "First Bank".to_string(),
                reference: "REF-1".to_string(),
            }),
            "Bank transfer auto-confirmed"
        );
        assert_eq!(
            confirmation_note(&PaymentMeta::Crypto {
                network: "ETH".to_string(),
                tx_hash: "0xabc".to_string(),
            }),
            "Tx 0xabc on ETH"
        );
        assert_eq!(
            confirmation_note(&PaymentMeta::Paypal {
                paypal_email: "buyer@example.com".to_string(),
            }),
            "PayPal: buyer@example.com"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_later_waits_out_the_delay() {
        let store = store_with_cart();
        let checkout = CheckoutService::new(store.clone());

        let order = checkout
            .place_order(&PaymentMeta::Paypal {
                paypal_email: "buyer@example.com".to_string(),
            })
            .unwrap();

        let started = tokio::time::Instant::now();
        let paid = checkout.confirm_later(&order).await.unwrap().unwrap();

        assert_eq!(started.elapsed(), std::time::Duration::from_millis(1400));
        assert!(paid.status.is_paid());
        assert_eq!(paid.note.as_deref(), Some("PayPal: buyer@example.com"));
        assert!(store.cart().is_empty());
    }
}
