pub mod martingale;

pub use martingale::*;
