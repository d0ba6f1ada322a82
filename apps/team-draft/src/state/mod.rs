pub mod session_store;

pub use session_store::{RequesterId, SessionEntry, SessionStore};
