//! Savings
//!
//! Aggregate savings of a cart: the gap between what its contents would cost at
//! regular prices and what the cart actually charges. Computed fresh on every
//! call; nothing is cached between decorators.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    hooks::SavingsHooks,
    pricing::{PricingError, regular_price_subtotal},
};

/// Errors that can occur while computing savings.
#[derive(Debug, Error, PartialEq)]
pub enum SavingsError {
    /// Error pricing the cart lines.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Sum of regular price × quantity across the cart, after the
/// `cart_regular_price_subtotal` hook.
///
/// # Errors
///
/// Returns a [`SavingsError`] if the lines cannot be priced.
pub fn cart_regular_price_subtotal<'a, H>(
    cart: &Cart<'a>,
    hooks: &H,
) -> Result<Money<'a, Currency>, SavingsError>
where
    H: SavingsHooks + ?Sized,
{
    let subtotal = regular_price_subtotal(cart)?;

    Ok(hooks.cart_regular_price_subtotal(subtotal, cart))
}

/// `max(0, regular subtotal − contents total)`, after the `savings` hook.
///
/// A zero regular subtotal short-circuits to zero. The hook sees every
/// outcome, including zero.
///
/// # Errors
///
/// Returns a [`SavingsError`] if the lines cannot be priced or the hooks
/// return amounts in another currency.
pub fn savings<'a, H>(cart: &Cart<'a>, hooks: &H) -> Result<Money<'a, Currency>, SavingsError>
where
    H: SavingsHooks + ?Sized,
{
    let zero = Money::from_minor(0, cart.currency());
    let regular = cart_regular_price_subtotal(cart, hooks)?;

    if regular.to_minor_units() == 0 {
        return Ok(hooks.savings(zero, cart));
    }

    let difference = regular.sub(cart.contents_total())?;

    if difference.to_minor_units() <= 0 {
        return Ok(hooks.savings(zero, cart));
    }

    Ok(hooks.savings(difference, cart))
}

/// Savings as a fraction of the regular subtotal, zero when there is no regular subtotal.
pub fn savings_percent(
    savings: Money<'_, Currency>,
    regular_subtotal: Money<'_, Currency>,
) -> Percentage {
    let regular_minor = regular_subtotal.to_minor_units();

    if regular_minor == 0 {
        return Percentage::from(0.0);
    }

    let savings_dec = Decimal::from_i64(savings.to_minor_units()).unwrap_or(Decimal::ZERO);
    let regular_dec = Decimal::from_i64(regular_minor).unwrap_or(Decimal::ZERO);

    Percentage::from(savings_dec / regular_dec)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::iso::{GBP, USD};
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::{
        hooks::NoopHooks,
        items::LineItem,
        products::{Product, ProductKey},
    };

    use super::*;

    fn cart_with_total<'a>(
        product: Product<'a>,
        quantity: u32,
        total_minor: i64,
    ) -> Result<Cart<'a>, crate::cart::CartError> {
        let mut catalog: SlotMap<ProductKey, Product<'a>> = SlotMap::with_key();
        let key = catalog.insert(product);

        Cart::with_items(
            catalog,
            [LineItem::new(key, quantity)],
            Money::from_minor(total_minor, GBP),
            GBP,
        )
    }

    struct PromoBonus;

    impl SavingsHooks for PromoBonus {
        fn savings<'a>(
            &self,
            savings: Money<'a, Currency>,
            _cart: &Cart<'a>,
        ) -> Money<'a, Currency> {
            Money::from_minor(savings.to_minor_units() + 100, savings.currency())
        }
    }

    struct ForeignSubtotal;

    impl SavingsHooks for ForeignSubtotal {
        fn cart_regular_price_subtotal<'a>(
            &self,
            _subtotal: Money<'a, Currency>,
            _cart: &Cart<'a>,
        ) -> Money<'a, Currency> {
            Money::from_minor(100, USD)
        }
    }

    #[test]
    fn empty_cart_has_no_savings() -> TestResult {
        let cart = Cart::new(GBP);

        assert_eq!(
            cart_regular_price_subtotal(&cart, &NoopHooks)?,
            Money::from_minor(0, GBP)
        );
        assert_eq!(savings(&cart, &NoopHooks)?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn savings_is_regular_subtotal_minus_contents_total() -> TestResult {
        let product = Product::new("Jacket", Money::from_minor(10_000, GBP))
            .with_sale_price(Money::from_minor(8_000, GBP));
        let cart = cart_with_total(product, 2, 16_000)?;

        assert_eq!(
            cart_regular_price_subtotal(&cart, &NoopHooks)?,
            Money::from_minor(20_000, GBP)
        );
        assert_eq!(savings(&cart, &NoopHooks)?, Money::from_minor(4_000, GBP));

        Ok(())
    }

    #[test]
    fn savings_is_clamped_to_zero() -> TestResult {
        let product = Product::new("Jacket", Money::from_minor(10_000, GBP));
        let cart = cart_with_total(product, 1, 12_000)?;

        assert_eq!(savings(&cart, &NoopHooks)?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn savings_hook_sees_zero_too() -> TestResult {
        let cart = Cart::new(GBP);

        assert_eq!(savings(&cart, &PromoBonus)?, Money::from_minor(100, GBP));

        Ok(())
    }

    #[test]
    fn savings_errors_when_hook_changes_currency() -> TestResult {
        let product = Product::new("Jacket", Money::from_minor(10_000, GBP));
        let cart = cart_with_total(product, 1, 9_000)?;

        let result = savings(&cart, &ForeignSubtotal);

        assert!(matches!(result, Err(SavingsError::Money(_))));

        Ok(())
    }

    #[test]
    fn priced_cart_savings_match_sale_discount() -> TestResult {
        let mut catalog: SlotMap<ProductKey, Product<'_>> = SlotMap::with_key();

        let on_sale = catalog.insert(
            Product::new("Boots", Money::from_minor(3_000, GBP))
                .with_sale_price(Money::from_minor(2_500, GBP)),
        );
        let full_price = catalog.insert(Product::new("Socks", Money::from_minor(500, GBP)));

        let cart = Cart::priced_at(
            catalog,
            [LineItem::new(on_sale, 3), LineItem::new(full_price, 2)],
            GBP,
            Timestamp::UNIX_EPOCH,
        )?;

        assert_eq!(savings(&cart, &NoopHooks)?, Money::from_minor(1_500, GBP));

        Ok(())
    }

    #[test]
    fn savings_percent_is_relative_to_regular_subtotal() {
        let percent = savings_percent(Money::from_minor(4_000, GBP), Money::from_minor(20_000, GBP));

        assert_eq!(percent * Decimal::ONE, Decimal::new(2, 1));
    }

    #[test]
    fn savings_percent_of_zero_subtotal_is_zero() {
        let percent = savings_percent(Money::from_minor(0, GBP), Money::from_minor(0, GBP));

        assert_eq!(percent * Decimal::ONE, Decimal::ZERO);
    }
}
