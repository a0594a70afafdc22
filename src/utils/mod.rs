// Utils compartidos

pub mod constants;
pub mod navigation;
pub mod storage;

pub use constants::*;
pub use navigation::{BrowserNavigator, Navigator};
pub use storage::{BrowserStorage, MemoryStorage, StorageBackend, StorageError};
