//! Core vector contract: the `Vector` trait, its traversals and the length cache.

pub mod cache;
pub mod iter;
pub mod traits;
pub mod wrappers;

pub use cache::LengthCache;
pub use iter::{AllElements, Element, NonZeroElements, Traverse};
pub use traits::{Vector, VectorFlags};
