//! Struck-through regular price subtotals.

use tracing::{debug, warn};

use crate::{
    context::RenderContext,
    hooks::{CartSubtotal, ProductSubtotal, SavingsHooks},
    markup::struck_through,
    pricing::line_regular_subtotal,
    products::Product,
};

use super::SavingsPresenter;

impl SavingsPresenter {
    /// On checkout, show an on-sale product's regular subtotal struck through before `subtotal`.
    ///
    /// The `product_subtotal` hook is consulted, but its result is only used
    /// when [`honor_product_subtotal_override`] is set; otherwise the
    /// struck-through form is always returned.
    ///
    /// [`honor_product_subtotal_override`]: crate::config::PresenterConfig::honor_product_subtotal_override
    pub fn cart_product_subtotal(
        &self,
        ctx: &RenderContext<'_, '_>,
        subtotal: &str,
        product: &Product<'_>,
        quantity: u32,
    ) -> String {
        if !ctx.view().is_checkout() || !product.is_on_sale(ctx.now()) {
            return subtotal.to_string();
        }

        let regular = match line_regular_subtotal(product, quantity) {
            Ok(regular) => regular,
            Err(err) => {
                warn!(product = %product.name, error = %err, "failed to compute regular subtotal");
                return subtotal.to_string();
            }
        };

        let regular_subtotal = self.money.format(&regular);
        let composed = struck_through(regular_subtotal.as_str(), subtotal).render();

        let overridden = self.hooks.product_subtotal(
            composed.clone(),
            &ProductSubtotal {
                regular_subtotal: &regular_subtotal,
                subtotal,
                product,
                quantity,
            },
        );

        if overridden == composed {
            return composed;
        }

        if self.config.honor_product_subtotal_override {
            overridden
        } else {
            debug!(product = %product.name, "ignoring product subtotal override");
            composed
        }
    }

    /// Show the cart's regular price subtotal struck through before `subtotal`.
    ///
    /// Left unchanged when the cart has no savings or no regular subtotal.
    pub fn cart_subtotal(&self, ctx: &RenderContext<'_, '_>, subtotal: &str) -> String {
        let savings = self.savings(ctx);

        if savings.to_minor_units() == 0 {
            return subtotal.to_string();
        }

        let regular = self.regular_subtotal(ctx);

        if regular.to_minor_units() == 0 {
            return subtotal.to_string();
        }

        let regular_subtotal = self.money.plain(&regular);
        let composed = struck_through(regular_subtotal.as_str(), subtotal).render();

        self.hooks.cart_subtotal(
            composed,
            &CartSubtotal {
                regular_subtotal: &regular_subtotal,
                subtotal,
            },
        )
    }
}
