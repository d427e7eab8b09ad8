//! Render Context

use jiff::Timestamp;

use crate::cart::Cart;

/// The storefront page being rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum View {
    /// The cart page.
    Cart,

    /// The checkout (order review) page.
    Checkout,

    /// Any other page (mini-cart widgets, product pages and so on).
    #[default]
    Other,
}

impl View {
    /// Whether this is the cart page.
    pub fn is_cart(self) -> bool {
        self == View::Cart
    }

    /// Whether this is the checkout page.
    pub fn is_checkout(self) -> bool {
        self == View::Checkout
    }
}

/// Everything a decorator may read while rendering one page.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'c, 'a> {
    cart: &'c Cart<'a>,
    view: View,
    now: Timestamp,
}

impl<'c, 'a> RenderContext<'c, 'a> {
    /// Create a context for rendering `cart` on `view` at instant `now`.
    pub fn new(cart: &'c Cart<'a>, view: View, now: Timestamp) -> Self {
        Self { cart, view, now }
    }

    /// The cart snapshot being rendered.
    pub fn cart(&self) -> &'c Cart<'a> {
        self.cart
    }

    /// The page being rendered.
    pub fn view(&self) -> View {
        self.view
    }

    /// The instant sale windows are evaluated against.
    pub fn now(&self) -> Timestamp {
        self.now
    }
}
