//! Host Registration
//!
//! The storefront extension points the presenter subscribes to, and the typed
//! calls and outputs exchanged at each of them.

use crate::{items::LineItem, products::Product};

/// Whether a host extension point transforms a value or emits markup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HookKind {
    /// Receives a value and returns a replacement.
    Filter,

    /// Emits output at a fixed position.
    Action,
}

/// A storefront extension point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Stylesheet enqueueing.
    EnqueueScripts,

    /// Document head output.
    Head,

    /// Unit price of a cart line.
    CartItemPrice,

    /// Subtotal of a cart line.
    CartItemSubtotal,

    /// Product subtotal computed by the cart.
    CartProductSubtotal,

    /// Cart-wide subtotal.
    CartSubtotal,

    /// Cart totals table, before the order total row.
    CartTotalsBeforeOrderTotal,

    /// Checkout order review table, before the order total row.
    ReviewOrderBeforeOrderTotal,
}

impl ExtensionPoint {
    /// Every extension point, in registration order.
    pub const ALL: [ExtensionPoint; 8] = [
        ExtensionPoint::EnqueueScripts,
        ExtensionPoint::Head,
        ExtensionPoint::CartTotalsBeforeOrderTotal,
        ExtensionPoint::ReviewOrderBeforeOrderTotal,
        ExtensionPoint::CartItemPrice,
        ExtensionPoint::CartItemSubtotal,
        ExtensionPoint::CartProductSubtotal,
        ExtensionPoint::CartSubtotal,
    ];

    /// The host's name for the extension point.
    pub fn hook_name(self) -> &'static str {
        match self {
            ExtensionPoint::EnqueueScripts => "wp_enqueue_scripts",
            ExtensionPoint::Head => "wp_head",
            ExtensionPoint::CartItemPrice => "woocommerce_cart_item_price",
            ExtensionPoint::CartItemSubtotal => "woocommerce_cart_item_subtotal",
            ExtensionPoint::CartProductSubtotal => "woocommerce_cart_product_subtotal",
            ExtensionPoint::CartSubtotal => "woocommerce_cart_subtotal",
            ExtensionPoint::CartTotalsBeforeOrderTotal => {
                "woocommerce_cart_totals_before_order_total"
            }
            ExtensionPoint::ReviewOrderBeforeOrderTotal => {
                "woocommerce_review_order_before_order_total"
            }
        }
    }

    /// Whether the point is a filter or an action.
    pub fn kind(self) -> HookKind {
        match self {
            ExtensionPoint::CartItemPrice
            | ExtensionPoint::CartItemSubtotal
            | ExtensionPoint::CartProductSubtotal
            | ExtensionPoint::CartSubtotal => HookKind::Filter,
            ExtensionPoint::EnqueueScripts
            | ExtensionPoint::Head
            | ExtensionPoint::CartTotalsBeforeOrderTotal
            | ExtensionPoint::ReviewOrderBeforeOrderTotal => HookKind::Action,
        }
    }

    /// Number of arguments the host passes to the callback.
    pub fn accepted_args(self) -> u8 {
        match self {
            ExtensionPoint::CartItemPrice | ExtensionPoint::CartItemSubtotal => 2,
            ExtensionPoint::CartProductSubtotal => 3,
            ExtensionPoint::CartSubtotal => 1,
            ExtensionPoint::EnqueueScripts
            | ExtensionPoint::Head
            | ExtensionPoint::CartTotalsBeforeOrderTotal
            | ExtensionPoint::ReviewOrderBeforeOrderTotal => 0,
        }
    }
}

/// A subscription to one extension point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Extension point subscribed to
    pub point: ExtensionPoint,

    /// Host priority; lower runs first
    pub priority: i32,
}

/// Subscriptions in the order they were made.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `point`, returning `false` if it was already subscribed.
    pub fn add(&mut self, point: ExtensionPoint, priority: i32) -> bool {
        if self.is_registered(point) {
            return false;
        }

        self.registrations.push(Registration { point, priority });

        true
    }

    /// Whether `point` has a subscription.
    pub fn is_registered(&self, point: ExtensionPoint) -> bool {
        self.registrations.iter().any(|reg| reg.point == point)
    }

    /// Subscriptions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter()
    }

    /// Number of subscriptions.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether there are no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

/// A host firing one of the extension points, with its arguments.
#[derive(Debug, Clone, Copy)]
pub enum HostCall<'r, 'a> {
    /// [`ExtensionPoint::EnqueueScripts`]
    EnqueueScripts,

    /// [`ExtensionPoint::Head`]
    Head,

    /// [`ExtensionPoint::CartItemPrice`]
    CartItemPrice {
        /// Formatted unit price
        price: &'r str,

        /// Line being rendered
        item: &'r LineItem,
    },

    /// [`ExtensionPoint::CartItemSubtotal`]
    CartItemSubtotal {
        /// Formatted line subtotal
        subtotal: &'r str,

        /// Line being rendered
        item: &'r LineItem,
    },

    /// [`ExtensionPoint::CartProductSubtotal`]
    CartProductSubtotal {
        /// Formatted product subtotal
        subtotal: &'r str,

        /// Product of the line
        product: &'r Product<'a>,

        /// Quantity of the line
        quantity: u32,
    },

    /// [`ExtensionPoint::CartSubtotal`]
    CartSubtotal {
        /// Formatted cart subtotal
        subtotal: &'r str,
    },

    /// [`ExtensionPoint::CartTotalsBeforeOrderTotal`]
    CartTotalsBeforeOrderTotal,

    /// [`ExtensionPoint::ReviewOrderBeforeOrderTotal`]
    ReviewOrderBeforeOrderTotal,
}

impl HostCall<'_, '_> {
    /// The extension point being fired.
    pub fn point(&self) -> ExtensionPoint {
        match self {
            HostCall::EnqueueScripts => ExtensionPoint::EnqueueScripts,
            HostCall::Head => ExtensionPoint::Head,
            HostCall::CartItemPrice { .. } => ExtensionPoint::CartItemPrice,
            HostCall::CartItemSubtotal { .. } => ExtensionPoint::CartItemSubtotal,
            HostCall::CartProductSubtotal { .. } => ExtensionPoint::CartProductSubtotal,
            HostCall::CartSubtotal { .. } => ExtensionPoint::CartSubtotal,
            HostCall::CartTotalsBeforeOrderTotal => ExtensionPoint::CartTotalsBeforeOrderTotal,
            HostCall::ReviewOrderBeforeOrderTotal => ExtensionPoint::ReviewOrderBeforeOrderTotal,
        }
    }
}

/// What the presenter hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutput {
    /// Stylesheet handles to enqueue.
    Stylesheets(&'static [&'static str]),

    /// Markup to emit at the current position, if any.
    Emit(Option<String>),

    /// Replacement for the filtered value.
    Filtered(String),
}
