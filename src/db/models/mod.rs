//! Database Models

// Catalog
pub mod product;

// Orders
pub mod order;

// Re-exports
pub use product::{Product, ProductCreate};
pub use order::{Order, OrderItem, OrderItemCreate, OrderStatus, ShippingAddress};
