//! Core domain types shared by the statistics engine and its collaborators

pub mod collection;
pub mod duration;
pub mod update;

pub use collection::{CollectionName, Snapshot};
pub use duration::duration_serde;
pub use update::{StatusUpdate, UpdateId};
