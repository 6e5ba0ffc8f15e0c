pub mod postgres_server_repository;
#[allow(clippy::module_inception)]
pub mod server_repository;
pub mod server_repository_error;
