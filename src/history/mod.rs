pub mod stats;
pub mod store;

pub use stats::*;
pub use store::*;
