use thiserror::Error;

/// Parse failures for catalog lookups.
///
/// None of these ever reach page code: every public entry point resolves them
/// to a documented default and logs a warning instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmbientError {
    #[error("unknown composition `{0}`")]
    UnknownComposition(String),
    #[error("unknown effect kind `{0}`")]
    UnknownEffect(String),
    #[error("unknown intensity `{0}`")]
    UnknownIntensity(String),
}
