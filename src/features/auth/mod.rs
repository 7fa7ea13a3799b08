//! Bearer token authentication for the write endpoints.
//!
//! Tokens are HS256 JWTs signed with the shared `JWT_SECRET`. A valid token
//! puts an [`model::AuthenticatedUser`] into the request extensions; no role
//! checks are applied.

mod validator;

pub mod model;

pub use validator::JwtValidator;
