//! This crate is the storage and statistics core of a local-first personal task tracker.
//!
//! It provides the [`Task`] data model, a [`TaskStore`] that owns the durable task
//! collection (create/read/update/complete/delete over a single serialized blob), and the
//! [`stats`] module computing the derived views a progress screen displays. \
//! Presentation (screens, navigation, theming widgets) is deliberately out of this crate:
//! a UI layer talks to it exclusively through `TaskStore` and `stats`.
//!
//! Persistence goes through the [`traits::Storage`] seam: a durable key-value substrate
//! holding the whole collection under one key. The [`storage`] module provides a
//! file-backed substrate as well as an in-memory one for tests.
//!
//! Every mutation is a full read-modify-write cycle over the collection. `TaskStore`
//! serializes these cycles through an in-process lock, so concurrent mutations cannot
//! overwrite each other's effects from stale snapshots.

pub mod error;

mod task;
pub use task::Priority;
pub use task::Task;
pub use task::TaskPatch;

pub mod traits;
pub mod storage;

mod store;
pub use store::TaskStore;
pub use store::TASKS_KEY;

pub mod stats;
pub mod settings;

pub mod mock_behaviour;
pub mod utils;
