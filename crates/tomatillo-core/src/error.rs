use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Classifies a failed write against the task tables: a dangling task id
    /// becomes `NotFound`, a CHECK violation becomes `InvalidInput`.
    pub(crate) fn from_write(err: sqlx::Error, task_id: i64) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return CoreError::NotFound(format!("No task found with ID {}", task_id));
                }
                sqlx::error::ErrorKind::CheckViolation => {
                    return CoreError::InvalidInput(db_err.message().to_string());
                }
                _ => {}
            }
        }
        CoreError::Database(err)
    }

    pub(crate) fn task_not_found(id: i64) -> Self {
        CoreError::NotFound(format!("No task found with ID {}", id))
    }
}
