//! The savings row of the totals tables.

use tracing::debug;

use crate::{
    context::RenderContext,
    hooks::SavingsHooks,
    markup::{AllowList, Element, Fragment, sanitize},
};

use super::SavingsPresenter;

impl SavingsPresenter {
    /// The savings row for the cart totals table.
    pub fn cart_totals_before_order_total(&self, ctx: &RenderContext<'_, '_>) -> Option<String> {
        self.savings_total_row(ctx)
    }

    /// The savings row for the checkout order review table.
    pub fn review_order_before_order_total(&self, ctx: &RenderContext<'_, '_>) -> Option<String> {
        self.savings_total_row(ctx)
    }

    /// `<tr class="order-savings">` with the savings title and amount, `None` without savings.
    ///
    /// Savings of zero or less, including negative amounts returned by a
    /// [`SavingsHooks::savings`] hook, render no row.
    pub fn savings_total_row(&self, ctx: &RenderContext<'_, '_>) -> Option<String> {
        let savings = self.savings(ctx);

        if savings.to_minor_units() <= 0 {
            debug!("no savings; omitting savings row");
            return None;
        }

        let allowed = self
            .hooks
            .savings_total_allowed_html(AllowList::savings_total(), &savings);
        let html = self
            .hooks
            .savings_total_html(self.money.format(&savings), &savings);
        let title = self.hooks.savings_total_title(
            self.translate(&self.config.savings_title),
            &savings,
        );

        let header = Element::new("th")
            .maybe_child(self.hooks.before_savings_total_title(&title, &savings))
            .child(Fragment::text(title.as_str()))
            .maybe_child(self.hooks.after_savings_total_title(&title, &savings));

        let amount = Element::new("td")
            .attr("data-title", title.as_str())
            .maybe_child(self.hooks.before_savings_total_content(&html, &savings))
            .child(Fragment::html(sanitize(&html, &allowed)))
            .maybe_child(self.hooks.after_savings_total_content(&html, &savings));

        let row: Fragment = Element::new("tr")
            .attr("class", "order-savings")
            .child(header)
            .child(amount)
            .into();

        Some(row.render())
    }
}
