use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Db(e.to_string())
    }
}

impl ServiceError {
    /// Caller-side problem (bad payload) rather than a store failure.
    pub fn is_client_error(&self) -> bool {
        use models::errors::ModelError;
        matches!(
            self,
            Self::Validation(_)
                | Self::Model(ModelError::Validation(_))
                | Self::Model(ModelError::UnknownDataCenter(_))
        )
    }
}
