pub mod error;

pub use error::{GenError, GenResult};
