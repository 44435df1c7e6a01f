//! Journal data model and entry store
//!
//! This module owns the unit of analysis and its persistence:
//!
//! - **types**: `JournalEntry`, `Metric`, `EventType`
//! - **store**: JSON-lines backed `EntryStore`
//! - **error**: Error types
//!
//! Entries are sparse (every metric optional, never assumed zero) and
//! validated against their bounds at the store boundary, so everything
//! downstream can assume in-range values.

pub mod error;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::EntryStore;
pub use types::{EventType, JournalEntry, Metric};
