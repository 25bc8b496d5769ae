//! Identity provider implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
