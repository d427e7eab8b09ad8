//! Savings Presenter
//!
//! Bundles configuration, hooks and host collaborators, and answers every host
//! extension point the storefront fires while rendering the cart and checkout.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use tracing::warn;

use crate::{
    config::{ConfigError, PresenterConfig},
    context::RenderContext,
    hooks::{DEFAULT_PRIORITY, HookPipeline},
    host::{
        CatalogTranslator, DateFormatter, MoneyFormatter, PriceHtmlFormatter, Translator,
        ZonedDateFormatter,
    },
    registry::{ExtensionPoint, HostCall, HostOutput, Registry},
    savings,
};

mod assets;
mod line_price;
mod subtotals;
mod summary;

pub use assets::{STYLESHEETS, STYLES};

/// Computes and decorates savings for one storefront.
pub struct SavingsPresenter {
    config: PresenterConfig,
    hooks: HookPipeline,
    money: Box<dyn MoneyFormatter>,
    dates: Box<dyn DateFormatter>,
    translator: Box<dyn Translator>,
}

impl SavingsPresenter {
    /// Create a presenter with the default host collaborators built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeZone`] if the configured time zone is unknown.
    pub fn new(config: PresenterConfig) -> Result<Self, ConfigError> {
        let time_zone = config.time_zone()?;

        Ok(Self {
            money: Box::new(PriceHtmlFormatter::new(config.money.clone())),
            dates: Box::new(ZonedDateFormatter::new(time_zone)),
            translator: Box::new(CatalogTranslator::new(
                config.text_domain.clone(),
                config.translations.clone(),
            )),
            hooks: HookPipeline::new(),
            config,
        })
    }

    /// Replace the hook pipeline.
    #[must_use]
    pub fn with_hooks(mut self, hooks: HookPipeline) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replace the money formatter.
    #[must_use]
    pub fn with_money_formatter(mut self, money: impl MoneyFormatter + 'static) -> Self {
        self.money = Box::new(money);
        self
    }

    /// Replace the date formatter.
    #[must_use]
    pub fn with_date_formatter(mut self, dates: impl DateFormatter + 'static) -> Self {
        self.dates = Box::new(dates);
        self
    }

    /// Replace the translator.
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Presenter settings.
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Registered hooks.
    pub fn hooks(&self) -> &HookPipeline {
        &self.hooks
    }

    /// Registered hooks, mutably.
    pub fn hooks_mut(&mut self) -> &mut HookPipeline {
        &mut self.hooks
    }

    /// Register every host extension point the presenter answers. Registering twice is a no-op.
    pub fn register(&self, registry: &mut Registry) {
        for point in ExtensionPoint::ALL {
            registry.add(point, DEFAULT_PRIORITY);
        }
    }

    /// Answer a host extension point.
    pub fn dispatch(&self, ctx: &RenderContext<'_, '_>, call: HostCall<'_, '_>) -> HostOutput {
        match call {
            HostCall::EnqueueScripts => HostOutput::Stylesheets(self.enqueue_assets()),
            HostCall::Head => HostOutput::Emit(self.head_styles(ctx)),
            HostCall::CartItemPrice { price, item } => {
                HostOutput::Filtered(self.cart_item_price(ctx, price, item))
            }
            HostCall::CartItemSubtotal { subtotal, item } => {
                HostOutput::Filtered(self.cart_item_subtotal(ctx, subtotal, item))
            }
            HostCall::CartProductSubtotal {
                subtotal,
                product,
                quantity,
            } => HostOutput::Filtered(self.cart_product_subtotal(ctx, subtotal, product, quantity)),
            HostCall::CartSubtotal { subtotal } => {
                HostOutput::Filtered(self.cart_subtotal(ctx, subtotal))
            }
            HostCall::CartTotalsBeforeOrderTotal => {
                HostOutput::Emit(self.cart_totals_before_order_total(ctx))
            }
            HostCall::ReviewOrderBeforeOrderTotal => {
                HostOutput::Emit(self.review_order_before_order_total(ctx))
            }
        }
    }

    /// Regular price subtotal of the cart, zero if it cannot be computed.
    pub fn regular_subtotal<'a>(&self, ctx: &RenderContext<'_, 'a>) -> Money<'a, Currency> {
        let cart = ctx.cart();

        savings::cart_regular_price_subtotal(cart, &self.hooks).unwrap_or_else(|err| {
            warn!(error = %err, "failed to compute regular price subtotal");
            Money::from_minor(0, cart.currency())
        })
    }

    /// Savings of the cart, zero if they cannot be computed.
    pub fn savings<'a>(&self, ctx: &RenderContext<'_, 'a>) -> Money<'a, Currency> {
        let cart = ctx.cart();

        savings::savings(cart, &self.hooks).unwrap_or_else(|err| {
            warn!(error = %err, "failed to compute savings");
            Money::from_minor(0, cart.currency())
        })
    }

    fn translate(&self, text: &str) -> String {
        self.translator.translate(text, &self.config.text_domain)
    }
}

impl Default for SavingsPresenter {
    fn default() -> Self {
        let config = PresenterConfig::default();

        Self {
            money: Box::new(PriceHtmlFormatter::new(config.money.clone())),
            dates: Box::new(ZonedDateFormatter::default()),
            translator: Box::new(CatalogTranslator::new(
                config.text_domain.clone(),
                config.translations.clone(),
            )),
            hooks: HookPipeline::new(),
            config,
        }
    }
}

impl fmt::Debug for SavingsPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavingsPresenter")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use jiff::Timestamp;
    use rusty_money::{Money, iso::GBP};
    use slotmap::SlotMap;

    use crate::{
        cart::{Cart, CartError},
        items::LineItem,
        products::{Product, ProductKey},
    };

    /// 2026-03-01T12:00:00Z
    pub(crate) fn now() -> Timestamp {
        Timestamp::from_second(1_772_366_400).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// 2026-03-31T00:00:00Z
    pub(crate) fn sale_end() -> Timestamp {
        Timestamp::from_second(1_774_915_200).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// A jacket on sale (100.00 → 80.00 until March 31) and a plain 50.00 scarf.
    pub(crate) fn cart() -> Result<(Cart<'static>, ProductKey, ProductKey), CartError> {
        let mut catalog: SlotMap<ProductKey, Product<'static>> = SlotMap::with_key();

        let jacket = catalog.insert(
            Product::new("Jacket", Money::from_minor(10_000, GBP))
                .with_sale_price(Money::from_minor(8_000, GBP))
                .with_sale_ends(sale_end()),
        );
        let scarf = catalog.insert(Product::new("Scarf", Money::from_minor(5_000, GBP)));

        let cart = Cart::priced_at(
            catalog,
            [LineItem::new(jacket, 2), LineItem::new(scarf, 1)],
            GBP,
            now(),
        )?;

        Ok((cart, jacket, scarf))
    }
}
