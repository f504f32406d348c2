//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Payment lifecycle of an order.
///
/// Orders are created `pending` and move to `paid` when the simulated
/// confirmation lands. There is no reverse transition and no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
}

impl OrderStatus {
    /// Whether the order has been confirmed paid.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

/// Checkout payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Manual bank transfer with a payer-supplied reference.
    Bank,
    /// Crypto transfer identified by network and transaction hash.
    Crypto,
    /// PayPal, identified by the payer's PayPal email.
    Paypal,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bank => write!(f, "bank"),
            Self::Crypto => write!(f, "crypto"),
            Self::Paypal => write!(f, "paypal"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(Self::Bank),
            "crypto" => Ok(Self::Crypto),
            "paypal" => Ok(Self::Paypal),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(parsed, OrderStatus::Paid);
        assert!(parsed.is_paid());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert!(!OrderStatus::default().is_paid());
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for (method, text) in [
            (PaymentMethod::Bank, "bank"),
            (PaymentMethod::Crypto, "crypto"),
            (PaymentMethod::Paypal, "paypal"),
        ] {
            assert_eq!(method.to_string(), text);
            assert_eq!(text.parse::<PaymentMethod>().unwrap(), method);
            assert_eq!(
                serde_json::to_string(&method).unwrap(),
                format!("\"{text}\"")
            );
        }
    }

    #[test]
    fn test_payment_method_rejects_unknown() {
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
