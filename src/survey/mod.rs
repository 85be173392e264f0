pub mod catalog;
pub mod mapping;
pub mod validation;

pub use catalog::*;
pub use mapping::*;
pub use validation::*;
