pub mod error;
pub mod haversine;
pub mod request;
pub mod response;
pub mod score_select_server;
#[allow(clippy::module_inception)]
pub mod select_server;
