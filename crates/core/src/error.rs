#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} #{index} not found")]
    NotFound { entity: &'static str, index: usize },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Aggregated submit-time validation: every missing or invalid field,
    /// in form order, by its user-facing label.
    #[error("Required fields missing or invalid: {}", fields.join(", "))]
    Incomplete { fields: Vec<String> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
