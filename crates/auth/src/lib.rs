//! # Authentication Primitives
//!
//! Credential handling shared by the API server and the start-up seed:
//! - Argon2id password hashing and the account password policy
//! - JWT bearer token issuing and validation

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtConfig, TokenSubject, create_access_token, extract_bearer_token, validate_token};
pub use password::{PasswordConfig, PasswordError, hash_password, validate_password_strength, verify_password};
pub use secrecy;
