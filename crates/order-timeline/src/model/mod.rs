//! Pure data structures for orders as the timeline sees them.
//!
//! - [`raw`]: the loosely-typed record shape delivered by the feed
//! - [`order`]: the canonical [`Order`] produced by the normalizer
//! - [`status`]: the closed [`OrderStatus`] enumeration

pub mod order;
pub mod raw;
pub mod status;

pub use order::*;
pub use raw::*;
pub use status::*;
