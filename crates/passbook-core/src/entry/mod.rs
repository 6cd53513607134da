//! Credential entries and input validation

mod types;
mod validation;

pub use types::{Entry, RevealedPassword};
pub(crate) use validation::validate_token;
