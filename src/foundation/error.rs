/// Convenience result type used across svgstep.
pub type SvgStepResult<T> = Result<T, SvgStepError>;

/// Top-level error taxonomy used by fallible boundaries (parsing, scripts, rendering).
///
/// Animation operations themselves never return errors: a selector that matches nothing is a
/// logged warning, not a failure.
#[derive(thiserror::Error, Debug)]
pub enum SvgStepError {
    /// Malformed SVG text or attribute data.
    #[error("parse error: {0}")]
    Parse(String),

    /// Selector text that cannot be parsed.
    #[error("selector error: {0}")]
    Selector(String),

    /// Invalid timeline arguments (negative durations, unknown labels).
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Invalid sequence script content.
    #[error("script error: {0}")]
    Script(String),

    /// Errors while rasterizing a document snapshot.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgStepError {
    /// Build a [`SvgStepError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`SvgStepError::Selector`] value.
    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    /// Build a [`SvgStepError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`SvgStepError::Script`] value.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Build a [`SvgStepError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SvgStepError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SvgStepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
