//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{AccessToken, Claims, JwtService};
pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordService,
};
