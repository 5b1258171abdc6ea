pub mod outcome;
pub mod prediction;
pub mod sources;

pub use outcome::*;
pub use prediction::*;
pub use sources::*;
