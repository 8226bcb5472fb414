//! Delivery pricing and the simulated order submission.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use err_derive::Error;
use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, CartState};
use crate::config::{CheckoutConfig, ConfigError};
use crate::money::Price;
use crate::notice::Notice;
use infra::ids::{Entity, Id};

pub const FREE_DELIVERY_THRESHOLD: Price = Price::cents(2500);
pub const FLAT_DELIVERY_FEE: Price = Price::cents(499);

pub fn delivery_fee(subtotal: Price) -> Price {
    if subtotal >= FREE_DELIVERY_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_DELIVERY_FEE
    }
}

pub fn grand_total(subtotal: Price) -> Price {
    subtotal + delivery_fee(subtotal)
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

impl Totals {
    pub fn for_subtotal(subtotal: Price) -> Self {
        Totals {
            subtotal,
            delivery_fee: delivery_fee(subtotal),
            total: grand_total(subtotal),
        }
    }

    pub fn of(cart: &CartState) -> Self {
        Self::for_subtotal(cart.subtotal())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Paypal,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            "paypal" => Ok(PaymentMethod::Paypal),
            _ => Err(CheckoutError::UnknownPaymentMethod(src.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Paypal => "paypal",
        };
        fmt.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error(display = "Cart is empty")]
    EmptyCart,
    #[error(display = "An order is already being processed")]
    AlreadyProcessing,
    #[error(display = "Payment was declined")]
    Declined,
    #[error(display = "Unknown payment method: {:?}", _0)]
    UnknownPaymentMethod(String),
}

impl CheckoutError {
    /// The toast shown when a submission does not go through.
    pub fn notice(&self) -> Notice {
        match self {
            CheckoutError::Declined => Notice::error("Order failed")
                .with_description("Your payment was declined. Please try again."),
            other => Notice::error(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order;

impl Entity for Order {
    const PREFIX: &'static str = "order";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: Id<Order>,
    pub placed_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub totals: Totals,
    pub notice: Notice,
}

/// Runs order submissions against the session's cart, one at a time.
#[derive(Debug, Clone)]
pub struct Checkout {
    cart: Cart,
    in_flight: Arc<AtomicBool>,
    delay: Duration,
    failure_rate: f64,
}

/// A submission that holds the single processing slot. Dropping it before
/// `complete` finishes abandons the order and leaves the cart as it was.
#[derive(Debug)]
pub struct PendingOrder {
    checkout: Checkout,
    payment_method: PaymentMethod,
    _slot: Slot,
}

#[derive(Debug)]
struct Slot(Arc<AtomicBool>);

impl Checkout {
    pub fn new(cart: Cart, config: &CheckoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Checkout {
            cart,
            in_flight: Arc::new(AtomicBool::new(false)),
            delay: config.processing_delay(),
            failure_rate: config.failure_rate,
        })
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.cart.snapshot())
    }

    /// Claims the processing slot for a new submission.
    pub fn begin(&self, payment_method: PaymentMethod) -> Result<PendingOrder, CheckoutError> {
        if self.cart.snapshot().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let slot = Slot::claim(&self.in_flight).ok_or_else(|| {
            warn!("Rejected duplicate checkout submission");
            CheckoutError::AlreadyProcessing
        })?;
        debug!("Checkout started; paying by {}", payment_method);
        Ok(PendingOrder {
            checkout: self.clone(),
            payment_method,
            _slot: slot,
        })
    }

    pub async fn place_order(
        &self,
        payment_method: PaymentMethod,
    ) -> Result<OrderConfirmation, CheckoutError> {
        self.begin(payment_method)?.complete().await
    }
}

impl PendingOrder {
    pub async fn complete(self) -> Result<OrderConfirmation, CheckoutError> {
        let checkout = &self.checkout;
        tokio::time::sleep(checkout.delay).await;

        if checkout.failure_rate > 0.0 && rand::thread_rng().gen_bool(checkout.failure_rate) {
            info!("Order declined after {:?}", checkout.delay);
            return Err(CheckoutError::Declined);
        }

        let lines = checkout.cart.take_lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        let confirmation = OrderConfirmation {
            order_id: Id::generate(),
            placed_at: Utc::now(),
            payment_method: self.payment_method,
            lines,
            totals: Totals::for_subtotal(subtotal),
            notice: Notice::success("Order placed successfully!")
                .with_description("Your delicious food is on its way!"),
        };
        info!(
            "Placed {} for {} ({} lines)",
            confirmation.order_id,
            confirmation.totals.total,
            confirmation.lines.len()
        );
        Ok(confirmation)
    }
}

impl Slot {
    fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Slot(flag.clone()))
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::Menu;

    fn config(failure_rate: f64) -> CheckoutConfig {
        CheckoutConfig {
            processing_delay_ms: 0,
            failure_rate,
        }
    }

    fn cart_with(ids: &[(&str, u32)]) -> Cart {
        let menu = Menu::standard().expect("menu");
        let cart = Cart::new();
        for (id, qty) in ids {
            let item = menu.find(&id.parse().expect("id")).expect("item");
            cart.add_item(item, *qty);
        }
        cart
    }

    #[test]
    fn delivery_is_free_from_threshold() {
        assert_eq!(delivery_fee(Price::cents(2500)), Price::ZERO);
        assert_eq!(delivery_fee(Price::cents(4000)), Price::ZERO);
        assert_eq!(delivery_fee(Price::cents(2499)), Price::cents(499));
        assert_eq!(delivery_fee(Price::ZERO), Price::cents(499));
    }

    #[test]
    fn grand_total_adds_fee() {
        assert_eq!(grand_total(Price::cents(1299)), Price::cents(1798));
        assert_eq!(grand_total(Price::cents(2598)), Price::cents(2598));
    }

    #[test]
    fn rejects_checkout_of_empty_cart() {
        let checkout = Checkout::new(Cart::new(), &config(0.0)).expect("checkout");

        let err = checkout.begin(PaymentMethod::Card).expect_err("empty");

        assert_eq!(err, CheckoutError::EmptyCart);
        assert!(!checkout.is_processing());
    }

    #[test]
    fn only_one_submission_at_a_time() {
        let cart = cart_with(&[("pizza-1", 1)]);
        let checkout = Checkout::new(cart, &config(0.0)).expect("checkout");

        let first = checkout.begin(PaymentMethod::Card).expect("first");
        let second = checkout.begin(PaymentMethod::Cash);

        assert_eq!(second.expect_err("second"), CheckoutError::AlreadyProcessing);
        assert!(checkout.is_processing());
        drop(first);
        assert!(!checkout.is_processing());
    }

    #[test]
    fn abandoned_submission_leaves_cart_intact() {
        let cart = cart_with(&[("pizza-1", 2)]);
        let checkout = Checkout::new(cart.clone(), &config(0.0)).expect("checkout");

        drop(checkout.begin(PaymentMethod::Card).expect("begin"));

        assert_eq!(cart.snapshot().total_item_count(), 2);
        assert!(checkout.begin(PaymentMethod::Card).is_ok());
    }

    #[tokio::test]
    async fn successful_order_clears_cart_and_reports_totals() {
        let cart = cart_with(&[("pizza-1", 2), ("drink-2", 1)]);
        let checkout = Checkout::new(cart.clone(), &config(0.0)).expect("checkout");

        let done = checkout
            .place_order(PaymentMethod::Paypal)
            .await
            .expect("order placed");

        assert!(cart.snapshot().is_empty());
        assert!(!checkout.is_processing());
        assert_eq!(done.lines.len(), 2);
        assert_eq!(done.totals.subtotal, Price::cents(2 * 1299 + 499));
        assert_eq!(done.totals.delivery_fee, Price::ZERO);
        assert_eq!(done.payment_method, PaymentMethod::Paypal);
        assert!(done.order_id.as_str().starts_with("order-"));
        assert_eq!(
            done.notice,
            Notice::success("Order placed successfully!")
                .with_description("Your delicious food is on its way!")
        );
    }

    #[tokio::test]
    async fn receipt_covers_exactly_the_lines_cleared() {
        let cart = cart_with(&[("pizza-1", 1)]);
        let checkout = Checkout::new(cart.clone(), &config(0.0)).expect("checkout");
        let pending = checkout.begin(PaymentMethod::Card).expect("begin");
        let menu = Menu::standard().expect("menu");
        let smoothie = menu.find(&"drink-1".parse().expect("id")).expect("item");
        cart.add_item(smoothie, 2);

        let done = pending.complete().await.expect("order placed");

        let ids = done
            .lines
            .iter()
            .map(|l| l.item_id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["pizza-1", "drink-1"]);
        assert_eq!(
            done.totals.subtotal,
            Price::cents(1299) + smoothie.price * 2
        );
        assert!(cart.snapshot().is_empty());
    }

    #[tokio::test]
    async fn declined_order_keeps_cart() {
        let cart = cart_with(&[("burger-1", 1)]);
        let checkout = Checkout::new(cart.clone(), &config(1.0)).expect("checkout");

        let err = checkout
            .place_order(PaymentMethod::Card)
            .await
            .expect_err("declined");

        assert_eq!(err, CheckoutError::Declined);
        assert_eq!(err.notice().kind, crate::notice::NoticeKind::Error);
        assert_eq!(cart.snapshot().line_count(), 1);
        assert!(!checkout.is_processing());
    }

    #[test]
    fn rejects_invalid_failure_rate() {
        assert!(Checkout::new(Cart::new(), &config(-0.1)).is_err());
    }

    #[test]
    fn parses_payment_methods() {
        assert_eq!("paypal".parse(), Ok(PaymentMethod::Paypal));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
