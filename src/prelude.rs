pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::executor::{TaskHandle, WorkerPool};
pub use crate::runtime::{global, shutdown};
pub use crate::singleton::Singleton;
