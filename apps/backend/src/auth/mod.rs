pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{mint_access_token, verify_access_token, TokenError};
