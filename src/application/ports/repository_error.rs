#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A write would break a task invariant or collide with an existing id.
    #[error("task constraint violated: {0}")]
    ConstraintViolation(String),
}
