//! Vector module: concrete storage types.

pub mod dense;
pub use dense::DenseVector;
pub mod view;
pub use view::VectorView;
