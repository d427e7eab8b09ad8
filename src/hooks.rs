//! Extension Points
//!
//! Every customisation seam of the presenter is a method on [`SavingsHooks`].
//! Filters receive the value computed so far plus read-only arguments and return
//! the (possibly replaced) value; the default implementation passes it through.
//! Actions return optional markup to inject at a fixed position.
//!
//! [`HookPipeline`] chains any number of named hook sets, running them in
//! ascending priority order. Stages sharing a priority run in the order they
//! were added.

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    context::View,
    items::LineItem,
    markup::{AllowList, Fragment},
    products::Product,
};

/// Priority used when the caller has no preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Arguments of the line item price extension points.
#[derive(Debug, Clone, Copy)]
pub struct LinePrice<'r, 'a> {
    /// Price markup being decorated
    pub price: &'r str,

    /// Line item being rendered
    pub item: &'r LineItem,

    /// Product attached to the line item
    pub product: &'r Product<'a>,

    /// Page being rendered
    pub view: View,
}

/// Arguments of the `product_subtotal` extension point.
#[derive(Debug, Clone, Copy)]
pub struct ProductSubtotal<'r, 'a> {
    /// Formatted regular price × quantity
    pub regular_subtotal: &'r str,

    /// Formatted subtotal as charged (sale price × quantity)
    pub subtotal: &'r str,

    /// Product of the line
    pub product: &'r Product<'a>,

    /// Quantity of the line
    pub quantity: u32,
}

/// Arguments of the `cart_subtotal` extension point.
#[derive(Debug, Clone, Copy)]
pub struct CartSubtotal<'r> {
    /// Cart regular price subtotal
    pub regular_subtotal: &'r str,

    /// Cart subtotal as charged
    pub subtotal: &'r str,
}

/// Customisation seams of the savings presenter.
pub trait SavingsHooks {
    /// Override the cart's regular price subtotal (sum of regular price × quantity).
    fn cart_regular_price_subtotal<'a>(
        &self,
        subtotal: Money<'a, Currency>,
        _cart: &Cart<'a>,
    ) -> Money<'a, Currency> {
        subtotal
    }

    /// Override the cart savings, including the zero reported when there are none.
    fn savings<'a>(&self, savings: Money<'a, Currency>, _cart: &Cart<'a>) -> Money<'a, Currency> {
        savings
    }

    /// Return `true` to leave an on-sale line item price undecorated.
    fn skip_valid_till_html_element(&self, skip: bool, _line: &LinePrice<'_, '_>) -> bool {
        skip
    }

    /// Classes of the "price valid till" icon.
    fn price_valid_till_icon_class(&self, class: String, _line: &LinePrice<'_, '_>) -> String {
        class
    }

    /// Final markup of a decorated line item price.
    fn price_valid_till_html_markup(&self, markup: String, _line: &LinePrice<'_, '_>) -> String {
        markup
    }

    /// Composed struck-through product subtotal.
    fn product_subtotal(&self, formatted: String, _parts: &ProductSubtotal<'_, '_>) -> String {
        formatted
    }

    /// Composed struck-through cart subtotal.
    fn cart_subtotal(&self, formatted: String, _parts: &CartSubtotal<'_>) -> String {
        formatted
    }

    /// Markup allowed in the savings total cell.
    fn savings_total_allowed_html(
        &self,
        allowed: AllowList,
        _savings: &Money<'_, Currency>,
    ) -> AllowList {
        allowed
    }

    /// Formatted savings total markup, before sanitizing.
    fn savings_total_html(&self, html: String, _savings: &Money<'_, Currency>) -> String {
        html
    }

    /// Title of the savings row.
    fn savings_total_title(&self, title: String, _savings: &Money<'_, Currency>) -> String {
        title
    }

    /// Markup injected before the savings row title.
    fn before_savings_total_title(
        &self,
        _title: &str,
        _savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        None
    }

    /// Markup injected after the savings row title.
    fn after_savings_total_title(
        &self,
        _title: &str,
        _savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        None
    }

    /// Markup injected before the savings amount.
    fn before_savings_total_content(
        &self,
        _html: &str,
        _savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        None
    }

    /// Markup injected after the savings amount.
    fn after_savings_total_content(
        &self,
        _html: &str,
        _savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        None
    }
}

/// Hooks that change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl SavingsHooks for NoopHooks {}

struct Stage {
    name: String,
    priority: i32,
    hooks: Box<dyn SavingsHooks>,
}

/// Named hook sets run in priority order.
#[derive(Default)]
pub struct HookPipeline {
    stages: Vec<Stage>,
}

impl HookPipeline {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named stage. Lower priorities run first; equal priorities run in insertion order.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        hooks: impl SavingsHooks + 'static,
    ) -> &mut Self {
        let position = self
            .stages
            .iter()
            .position(|stage| stage.priority > priority)
            .unwrap_or(self.stages.len());

        self.stages.insert(
            position,
            Stage {
                name: name.into(),
                priority,
                hooks: Box::new(hooks),
            },
        );

        self
    }

    /// Remove every stage with the given name, returning whether any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.stages.len();

        self.stages.retain(|stage| stage.name != name);

        self.stages.len() != before
    }

    /// Stage names in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name.as_str())
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no stages are registered.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn fold<T>(&self, value: T, apply: impl Fn(&dyn SavingsHooks, T) -> T) -> T {
        self.stages
            .iter()
            .fold(value, |value, stage| apply(stage.hooks.as_ref(), value))
    }

    fn collect(&self, emit: impl Fn(&dyn SavingsHooks) -> Option<Fragment>) -> Option<Fragment> {
        let fragments: Vec<Fragment> = self
            .stages
            .iter()
            .filter_map(|stage| emit(stage.hooks.as_ref()))
            .collect();

        if fragments.is_empty() {
            None
        } else {
            Some(Fragment::Group(fragments))
        }
    }
}

impl fmt::Debug for HookPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.stages
                    .iter()
                    .map(|stage| (stage.name.as_str(), stage.priority)),
            )
            .finish()
    }
}

impl SavingsHooks for HookPipeline {
    fn cart_regular_price_subtotal<'a>(
        &self,
        subtotal: Money<'a, Currency>,
        cart: &Cart<'a>,
    ) -> Money<'a, Currency> {
        self.fold(subtotal, |hooks, value| {
            hooks.cart_regular_price_subtotal(value, cart)
        })
    }

    fn savings<'a>(&self, savings: Money<'a, Currency>, cart: &Cart<'a>) -> Money<'a, Currency> {
        self.fold(savings, |hooks, value| hooks.savings(value, cart))
    }

    fn skip_valid_till_html_element(&self, skip: bool, line: &LinePrice<'_, '_>) -> bool {
        self.fold(skip, |hooks, value| {
            hooks.skip_valid_till_html_element(value, line)
        })
    }

    fn price_valid_till_icon_class(&self, class: String, line: &LinePrice<'_, '_>) -> String {
        self.fold(class, |hooks, value| {
            hooks.price_valid_till_icon_class(value, line)
        })
    }

    fn price_valid_till_html_markup(&self, markup: String, line: &LinePrice<'_, '_>) -> String {
        self.fold(markup, |hooks, value| {
            hooks.price_valid_till_html_markup(value, line)
        })
    }

    fn product_subtotal(&self, formatted: String, parts: &ProductSubtotal<'_, '_>) -> String {
        self.fold(formatted, |hooks, value| hooks.product_subtotal(value, parts))
    }

    fn cart_subtotal(&self, formatted: String, parts: &CartSubtotal<'_>) -> String {
        self.fold(formatted, |hooks, value| hooks.cart_subtotal(value, parts))
    }

    fn savings_total_allowed_html(
        &self,
        allowed: AllowList,
        savings: &Money<'_, Currency>,
    ) -> AllowList {
        self.fold(allowed, |hooks, value| {
            hooks.savings_total_allowed_html(value, savings)
        })
    }

    fn savings_total_html(&self, html: String, savings: &Money<'_, Currency>) -> String {
        self.fold(html, |hooks, value| hooks.savings_total_html(value, savings))
    }

    fn savings_total_title(&self, title: String, savings: &Money<'_, Currency>) -> String {
        self.fold(title, |hooks, value| hooks.savings_total_title(value, savings))
    }

    fn before_savings_total_title(
        &self,
        title: &str,
        savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        self.collect(|hooks| hooks.before_savings_total_title(title, savings))
    }

    fn after_savings_total_title(
        &self,
        title: &str,
        savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        self.collect(|hooks| hooks.after_savings_total_title(title, savings))
    }

    fn before_savings_total_content(
        &self,
        html: &str,
        savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        self.collect(|hooks| hooks.before_savings_total_content(html, savings))
    }

    fn after_savings_total_content(
        &self,
        html: &str,
        savings: &Money<'_, Currency>,
    ) -> Option<Fragment> {
        self.collect(|hooks| hooks.after_savings_total_content(html, savings))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;

    use super::*;

    struct Suffix(&'static str);

    impl SavingsHooks for Suffix {
        fn savings_total_title(&self, title: String, _savings: &Money<'_, Currency>) -> String {
            format!("{title}{}", self.0)
        }

        fn before_savings_total_title(
            &self,
            _title: &str,
            _savings: &Money<'_, Currency>,
        ) -> Option<Fragment> {
            Some(Fragment::text(self.0))
        }
    }

    struct DoubleSavings;

    impl SavingsHooks for DoubleSavings {
        fn savings<'a>(
            &self,
            savings: Money<'a, Currency>,
            _cart: &Cart<'a>,
        ) -> Money<'a, Currency> {
            Money::from_minor(savings.to_minor_units() * 2, savings.currency())
        }
    }

    #[test]
    fn noop_hooks_pass_values_through() {
        let savings = Money::from_minor(500, GBP);

        assert_eq!(
            NoopHooks.savings_total_title("Savings".to_string(), &savings),
            "Savings"
        );
        assert_eq!(NoopHooks.before_savings_total_title("Savings", &savings), None);
        assert_eq!(NoopHooks.savings(savings, &Cart::new(GBP)), savings);
    }

    #[test]
    fn stages_run_in_priority_then_insertion_order() {
        let mut pipeline = HookPipeline::new();

        pipeline
            .add("late", 20, Suffix("-c"))
            .add("first", 5, Suffix("-a"))
            .add("middle", DEFAULT_PRIORITY, Suffix("-b"))
            .add("middle-too", DEFAULT_PRIORITY, Suffix("-b2"));

        let savings = Money::from_minor(500, GBP);

        assert_eq!(
            pipeline.names().collect::<Vec<_>>(),
            vec!["first", "middle", "middle-too", "late"]
        );
        assert_eq!(
            pipeline.savings_total_title("Savings".to_string(), &savings),
            "Savings-a-b-b2-c"
        );
    }

    #[test]
    fn actions_collect_in_order() {
        let mut pipeline = HookPipeline::new();

        pipeline.add("b", 2, Suffix("b")).add("a", 1, Suffix("a"));

        let savings = Money::from_minor(500, GBP);
        let injected = pipeline.before_savings_total_title("Savings", &savings);

        assert_eq!(injected.map(|fragment| fragment.render()), Some("ab".to_string()));
    }

    #[test]
    fn empty_pipeline_injects_nothing() {
        let savings = Money::from_minor(500, GBP);

        assert!(HookPipeline::new().is_empty());
        assert_eq!(
            HookPipeline::new().after_savings_total_content("x", &savings),
            None
        );
    }

    #[test]
    fn remove_drops_named_stage() {
        let mut pipeline = HookPipeline::new();
        pipeline.add("double", DEFAULT_PRIORITY, DoubleSavings);

        let cart = Cart::new(GBP);

        assert_eq!(
            pipeline.savings(Money::from_minor(300, GBP), &cart),
            Money::from_minor(600, GBP)
        );

        assert!(pipeline.remove("double"));
        assert!(!pipeline.remove("double"));
        assert_eq!(pipeline.len(), 0);
        assert_eq!(
            pipeline.savings(Money::from_minor(300, GBP), &cart),
            Money::from_minor(300, GBP)
        );
    }
}
