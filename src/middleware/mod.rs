mod auth;
mod error_handler;

pub use auth::attach_token;
pub use error_handler::{log_errors, read_body};
