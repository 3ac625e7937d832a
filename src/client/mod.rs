//! State the storefront UI owns locally: the cart, the contact form and
//! price display helpers. Nothing here talks to the network directly.

pub mod cart;
pub mod contact;
pub mod format;

pub use cart::{CartItemInput, CartLine, CartSnapshot, CartStore};
pub use contact::{ContactForm, ContactTransport, FormError, SubmitError};
pub use format::{discount_percent, format_inr};
