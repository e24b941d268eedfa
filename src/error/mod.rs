mod types;

pub use types::{MenuError, Result};
