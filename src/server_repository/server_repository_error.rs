#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ServerRepositoryError {
    #[error("{0}")]
    ConstraintViolation(String),
    #[error("{0}")]
    Datastore(String),
}

impl From<sqlx::Error> for ServerRepositoryError {
    fn from(error: sqlx::Error) -> Self {
        let is_constraint_violation = error
            .as_database_error()
            .and_then(|database_error| database_error.code())
            .is_some_and(|code| code.starts_with("23"));

        if is_constraint_violation {
            ServerRepositoryError::ConstraintViolation(error.to_string())
        } else {
            ServerRepositoryError::Datastore(error.to_string())
        }
    }
}

impl From<sqlx::migrate::MigrateError> for ServerRepositoryError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        ServerRepositoryError::Datastore(error.to_string())
    }
}
