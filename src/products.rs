//! Products

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A catalog product with a regular price and an optional sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Undiscounted unit price
    pub regular_price: Money<'a, Currency>,

    /// Discounted unit price, if a sale is configured
    pub sale_price: Option<Money<'a, Currency>>,

    /// Instant the sale starts, open-ended when absent
    pub sale_starts: Option<Timestamp>,

    /// Instant the sale ends, open-ended when absent
    pub sale_ends: Option<Timestamp>,
}

impl<'a> Product<'a> {
    /// Create a product sold at its regular price.
    pub fn new(name: impl Into<String>, regular_price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            regular_price,
            sale_price: None,
            sale_starts: None,
            sale_ends: None,
        }
    }

    /// Put the product on sale at the given price.
    #[must_use]
    pub fn with_sale_price(mut self, sale_price: Money<'a, Currency>) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Restrict the sale to start at the given instant.
    #[must_use]
    pub fn with_sale_starts(mut self, starts: Timestamp) -> Self {
        self.sale_starts = Some(starts);
        self
    }

    /// Restrict the sale to end at the given instant.
    #[must_use]
    pub fn with_sale_ends(mut self, ends: Timestamp) -> Self {
        self.sale_ends = Some(ends);
        self
    }

    /// Whether the product is on sale at `now`.
    ///
    /// A product is on sale when it has a sale price strictly below its regular
    /// price and `now` falls inside the (inclusive) sale window.
    pub fn is_on_sale(&self, now: Timestamp) -> bool {
        let Some(sale_price) = self.sale_price else {
            return false;
        };

        if sale_price.to_minor_units() >= self.regular_price.to_minor_units() {
            return false;
        }

        let started = self.sale_starts.is_none_or(|starts| starts <= now);
        let not_ended = self.sale_ends.is_none_or(|ends| now <= ends);

        started && not_ended
    }

    /// The unit price charged at `now`.
    pub fn active_price(&self, now: Timestamp) -> Money<'a, Currency> {
        match self.sale_price {
            Some(sale_price) if self.is_on_sale(now) => sale_price,
            _ => self.regular_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rusty_money::iso::GBP;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_772_366_400).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn product_without_sale_price_is_not_on_sale() {
        let product = Product::new("Tea", Money::from_minor(500, GBP));

        assert!(!product.is_on_sale(now()));
        assert_eq!(product.active_price(now()), Money::from_minor(500, GBP));
    }

    #[test]
    fn sale_price_below_regular_is_on_sale() {
        let product =
            Product::new("Tea", Money::from_minor(500, GBP)).with_sale_price(Money::from_minor(400, GBP));

        assert!(product.is_on_sale(now()));
        assert_eq!(product.active_price(now()), Money::from_minor(400, GBP));
    }

    #[test]
    fn sale_price_equal_to_regular_is_not_on_sale() {
        let product =
            Product::new("Tea", Money::from_minor(500, GBP)).with_sale_price(Money::from_minor(500, GBP));

        assert!(!product.is_on_sale(now()));
    }

    #[test]
    fn sale_window_is_respected() {
        let hour = SignedDuration::from_hours(1);
        let base =
            Product::new("Tea", Money::from_minor(500, GBP)).with_sale_price(Money::from_minor(400, GBP));

        let ended = base.clone().with_sale_ends(now() - hour);
        let pending = base.clone().with_sale_starts(now() + hour);
        let running = base.with_sale_starts(now() - hour).with_sale_ends(now() + hour);

        assert!(!ended.is_on_sale(now()), "sale that has ended");
        assert!(!pending.is_on_sale(now()), "sale that has not started");
        assert!(running.is_on_sale(now()), "sale inside its window");
        assert_eq!(ended.active_price(now()), Money::from_minor(500, GBP));
    }
}
