// rflink/src/session/mod.rs

pub mod builder;
pub mod handle;
pub mod unsolicited;

pub use builder::SessionBuilder;
pub use handle::{CancelToken, Ready, Session, Uninitialized};
pub use unsolicited::{Observer, UnsolicitedKind};
