//! Login, token resolution and logout.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
