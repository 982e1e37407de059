//! Authentication: password hashing, credential verification, bearer tokens.

mod credentials;
mod handlers;
mod jwt;
mod password;

pub use credentials::{Authenticated, CredentialVerifier, Verification};
pub use handlers::{login, register, LoginResponse};
pub use jwt::{Claims, JwtKeys, TOKEN_TTL_DAYS};
pub use password::{hash_password, verify_password};
