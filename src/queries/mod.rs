//! Query modules over a loaded library.
//!
//! Each module provides a query struct that borrows from a
//! [`CardCatalog`](crate::catalog::CardCatalog) and exposes read-only
//! lookups returning typed results.

pub mod cards;
pub mod prices;
pub mod schemes;

pub use cards::CardQuery;
pub use prices::PriceQuery;
pub use schemes::SchemeQuery;
