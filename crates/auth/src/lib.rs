//! `jobboard-auth` — authentication seam.
//!
//! Token issuance, refresh and blacklisting live in a separate identity
//! service; this crate only defines the claims shape and the validation
//! trait the HTTP layer consumes, plus a static validator for tests and
//! local development.

pub mod claims;
pub mod validator;

pub use claims::AuthClaims;
pub use validator::{AuthError, StaticTokenValidator, TokenValidator};
