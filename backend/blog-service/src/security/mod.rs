/// Security primitives: password hashing and signed session tokens
pub mod password;
pub mod session;

pub use session::{SessionClaims, SessionKeys};
