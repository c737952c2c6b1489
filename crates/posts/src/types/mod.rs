pub mod errors;

pub use errors::{PostError, PostResult};
