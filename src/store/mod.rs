//! Persistence layer — key-value snapshot storage for wizard state.

pub mod libsql_backend;
pub mod memory;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use memory::MemoryBackend;
pub use traits::SnapshotStore;
