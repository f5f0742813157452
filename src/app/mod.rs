pub mod error;
pub mod resolver;

pub use error::{AppMetaError, Result};
pub use resolver::{classify, Resolver};
