//! OAuth redirect capture and code exchange.

mod callback_server;
mod oauth2_provider;

pub use callback_server::TcpRedirectListener;
pub use oauth2_provider::OAuth2TokenClient;
