pub mod storage;
pub mod types;

pub use storage::{load_history, save_history};
pub use types::{History, Snapshot};
