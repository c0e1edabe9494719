//! Order domain logic
//!
//! Checkout (cart merge, field validation, atomic stock reservation,
//! snapshot persistence) and the order status state machine. Nothing in
//! here knows about HTTP; handlers in `api::orders` drive it.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod status;
pub mod validate;

// Re-exports
pub use cart::CartLine;
pub use checkout::{CheckoutRequest, OrderReceipt, ReceiptLine, create_order};
pub use error::{CheckoutError, LineError};
