//! "Price valid till" decoration of line item prices.

use tracing::debug;

use crate::{
    context::RenderContext,
    hooks::{LinePrice, SavingsHooks},
    items::LineItem,
    markup::{AllowList, Element, Fragment, sanitize},
};

use super::SavingsPresenter;

/// Tooltip of the clock icon; `%s` is replaced with the sale end date.
pub(crate) const VALID_TILL_TEXT: &str = "Price valid till %s.";

impl SavingsPresenter {
    /// Decorate the unit price of a cart line whose product is on sale.
    ///
    /// Lines without a product, or whose product is not on sale, keep `price` unchanged.
    pub fn cart_item_price(
        &self,
        ctx: &RenderContext<'_, '_>,
        price: &str,
        item: &LineItem,
    ) -> String {
        self.decorate_line_price(ctx, price, item)
    }

    /// Decorate a line subtotal the same way as its price, on the checkout view only.
    pub fn cart_item_subtotal(
        &self,
        ctx: &RenderContext<'_, '_>,
        subtotal: &str,
        item: &LineItem,
    ) -> String {
        if !ctx.view().is_checkout() {
            return subtotal.to_string();
        }

        self.decorate_line_price(ctx, subtotal, item)
    }

    fn decorate_line_price(
        &self,
        ctx: &RenderContext<'_, '_>,
        price: &str,
        item: &LineItem,
    ) -> String {
        let Some(product) = ctx.cart().product_for(item) else {
            debug!(?item, "line item has no product; leaving price undecorated");
            return price.to_string();
        };

        let now = ctx.now();

        if !product.is_on_sale(now) {
            return price.to_string();
        }

        let view = ctx.view();
        let incoming = LinePrice {
            price,
            item,
            product,
            view,
        };

        if self.hooks.skip_valid_till_html_element(false, &incoming) {
            debug!(product = %product.name, "line price decoration skipped by hook");
            return price.to_string();
        }

        let valid_till = product
            .sale_ends
            .and_then(|ends| {
                self.dates
                    .format(ends, &self.translate(&self.config.date_format))
            })
            .filter(|date| !date.is_empty());

        let price = if view.is_cart() {
            self.money
                .sale_price_html(&product.regular_price, &product.active_price(now))
        } else {
            price.to_string()
        };

        let line = LinePrice {
            price: &price,
            ..incoming
        };

        let icon_class = self
            .hooks
            .price_valid_till_icon_class(self.config.icon_class.clone(), &line);

        let icon = valid_till.map(|date| {
            Element::new("span")
                .attr("class", icon_class)
                .attr("title", self.translate(VALID_TILL_TEXT).replacen("%s", &date, 1))
        });

        let wrapper: Fragment = Element::new("div")
            .attr("class", "product-price__wrapper")
            .child(Fragment::html(sanitize(&price, &AllowList::line_price())))
            .maybe_child(icon)
            .into();

        self.hooks
            .price_valid_till_html_markup(wrapper.render(), &line)
    }
}
