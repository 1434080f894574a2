//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod goals;
pub mod health;
pub mod recurring;
pub mod subscriptions;
pub mod transactions;
pub mod users;

// Re-export all handlers for use in router
pub use budgets::*;
pub use goals::*;
pub use health::*;
pub use recurring::*;
pub use subscriptions::*;
pub use transactions::*;
pub use users::*;
