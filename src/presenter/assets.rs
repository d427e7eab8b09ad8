//! Stylesheets and inline styles.

use tracing::debug;

use crate::{
    context::RenderContext,
    markup::{Element, Fragment},
};

use super::SavingsPresenter;

/// Stylesheet handles the decorations depend on.
pub const STYLESHEETS: &[&str] = &["dashicons"];

/// Inline styles for the decorated price wrapper.
pub const STYLES: &str =
    ".product-price__wrapper{display:flex;align-items:center}.woocommerce-Price-amount{margin-right:4px}";

impl SavingsPresenter {
    /// Stylesheet handles to enqueue.
    pub fn enqueue_assets(&self) -> &'static [&'static str] {
        STYLESHEETS
    }

    /// The inline `<style>` block, emitted only on the cart and checkout views.
    pub fn head_styles(&self, ctx: &RenderContext<'_, '_>) -> Option<String> {
        let view = ctx.view();

        if !view.is_cart() && !view.is_checkout() {
            debug!(?view, "skipping styles outside cart and checkout");
            return None;
        }

        let style: Fragment = Element::new("style")
            .child(Fragment::html(STYLES))
            .into();

        Some(style.render())
    }
}
