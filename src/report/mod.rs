//! Reporting sink: table view, JSON persistence and change notification
//!
//! These consume the pipeline output and hold no state of their own.

pub mod notify;
pub mod persist;
pub mod table;

pub use notify::{NotifyError, TelegramNotifier, compose_message};
pub use persist::{PersistError, PersistedRecord, read_results, write_results};
pub use table::render_table;
