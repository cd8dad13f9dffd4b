/// Convenience result type used across Cadence.
pub type CadenceResult<T> = Result<T, CadenceError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is derived from inputs only, so the same inputs always reproduce the same error.
#[derive(thiserror::Error, Debug)]
pub enum CadenceError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Zero-width, non-monotonic or mismatched interpolation ranges.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Non-positive spring constants or frame rate.
    #[error("invalid spring config: {0}")]
    InvalidSpringConfig(String),

    /// A scheduled scene does not fit the composition timeline.
    #[error("schedule overflow: {0}")]
    ScheduleOverflow(String),

    /// A leaf references a static asset the resolver does not know.
    #[error("missing asset reference: '{0}'")]
    MissingAssetReference(String),

    /// Errors while validating or sampling animation expressions.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating frames.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Serializable discriminant of [`CadenceError`], used in render output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`CadenceError::Validation`].
    Validation,
    /// See [`CadenceError::InvalidRange`].
    InvalidRange,
    /// See [`CadenceError::InvalidSpringConfig`].
    InvalidSpringConfig,
    /// See [`CadenceError::ScheduleOverflow`].
    ScheduleOverflow,
    /// See [`CadenceError::MissingAssetReference`].
    MissingAssetReference,
    /// See [`CadenceError::Animation`].
    Animation,
    /// See [`CadenceError::Evaluation`].
    Evaluation,
    /// See [`CadenceError::Serde`].
    Serde,
    /// See [`CadenceError::Other`].
    Other,
}

impl CadenceError {
    /// Build a [`CadenceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CadenceError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`CadenceError::InvalidSpringConfig`] value.
    pub fn invalid_spring(msg: impl Into<String>) -> Self {
        Self::InvalidSpringConfig(msg.into())
    }

    /// Build a [`CadenceError::ScheduleOverflow`] value.
    pub fn schedule_overflow(msg: impl Into<String>) -> Self {
        Self::ScheduleOverflow(msg.into())
    }

    /// Build a [`CadenceError::MissingAssetReference`] value.
    pub fn missing_asset(reference: impl Into<String>) -> Self {
        Self::MissingAssetReference(reference.into())
    }

    /// Build a [`CadenceError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`CadenceError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`CadenceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Serializable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidRange(_) => ErrorKind::InvalidRange,
            Self::InvalidSpringConfig(_) => ErrorKind::InvalidSpringConfig,
            Self::ScheduleOverflow(_) => ErrorKind::ScheduleOverflow,
            Self::MissingAssetReference(_) => ErrorKind::MissingAssetReference,
            Self::Animation(_) => ErrorKind::Animation,
            Self::Evaluation(_) => ErrorKind::Evaluation,
            Self::Serde(_) => ErrorKind::Serde,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

impl From<serde_json::Error> for CadenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
