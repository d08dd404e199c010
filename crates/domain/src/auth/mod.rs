//! Authentication domain types

mod redirect;
mod types;

pub use redirect::{
    CallbackParams, MAX_REDIRECT_REQUEST_BYTES, RedirectCallback, parse_redirect_request,
};
pub use types::{AuthError, AuthState, AuthorizationCode, BearerToken};
