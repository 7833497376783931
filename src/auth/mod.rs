//! Authentication: credential hashing, JWT, account handlers.

mod handlers;
mod jwt;
mod password;

pub use handlers::{create_user, login_user, me};
pub use jwt::{Claims, JwtKeys};
pub use password::CredentialHasher;
