pub mod aggregator;
pub mod session;

pub use aggregator::*;
pub use session::*;
