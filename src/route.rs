pub mod api_error;
pub mod best_server;
pub(crate) mod cors;
pub mod health;
pub(crate) mod request_body;
pub mod servers;
