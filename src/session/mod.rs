//! Session state and event dispatch for the presentation layer

pub mod context;
pub mod events;
pub mod handler;

pub use context::SessionContext;
pub use events::{Notice, SessionEvent};
pub use handler::Session;
