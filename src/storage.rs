/// The key-value store adapter and its implementations.
pub mod store;
pub use store::{FileStore, MemoryStore, Store, StoreError, keys};

/// The business profile store.
pub mod profile;
pub use profile::ProfileStore;

/// The obligation registry.
pub mod registry;
pub use registry::ObligationRegistry;

/// Reminder settings and the dispatch seam.
pub mod reminders;
pub use reminders::{Channel, NullSink, ReminderService, ReminderSink};
