/// Failures surfaced by the viewer core.
///
/// Spec and config errors are precondition violations raised at construction
/// time; `BackendUnavailable` is reported by a host that could not obtain a
/// rendering surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewerError {
    /// Malformed `ArchSpec` or an inconsistent upper/lower pairing.
    #[error("invalid arch spec: {0}")]
    InvalidSpec(String),

    /// Malformed camera bounds or timing configuration.
    #[error("invalid viewer config: {0}")]
    InvalidConfig(String),

    /// No GPU adapter or drawable surface could be acquired.
    #[error("rendering backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
