//! # saveurl-auth
//!
//! Authentication for SaveUrURL.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `jwt`: session token creation, validation and revocation
//! - `session`: login, token resolution and logout

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, RevocationList};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{LoginResult, SessionManager};
