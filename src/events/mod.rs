//! Notifications from the rules engine to presentation.
//!
//! The engine reports through [`GameObserver`] hooks. [`EventLog`] turns
//! those hooks into serializable [`GameEvent`] records.

pub mod event;
pub mod observer;

pub use event::GameEvent;
pub use observer::{EventLog, GameObserver, NullObserver};
