#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("No available servers")]
    NoServersAvailable,
}
