//! In-memory record store.
//!
//! # Data Flow
//! ```text
//! handler (create)
//!     → Record::new(fields)   (identity generated here)
//!     → RecordStore::insert(table, record)
//!
//! handler (list)
//!     → RecordStore::select(table) / select_where(table, predicate)
//!     → Vec<Record> in insertion order
//! ```
//!
//! # Design Decisions
//! - Explicitly constructed and passed to the dispatch state, never a global
//! - Cloning the store shares the same tables (cheap `Arc` clone)
//! - Appends happen under the table's shard lock: no lost or duplicated writes
//! - No update/delete operations

pub mod memory;
pub mod record;

pub use memory::RecordStore;
pub use record::Record;
