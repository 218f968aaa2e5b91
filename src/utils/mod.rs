pub mod error;
pub mod time;
pub mod types;

pub use error::{DigestError, Result};
pub use types::{Event, HostRef};
