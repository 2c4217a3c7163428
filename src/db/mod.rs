pub mod init;
pub mod store;

pub use store::{ClosedPositionStore, SnapshotStore, SqliteStore, TransactionStore};
