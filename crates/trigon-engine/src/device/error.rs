use super::{ApiError, ShaderStage};

/// Render context construction failure.
///
/// Every variant is fatal to the construction attempt and never to the
/// process: the controller logs it, unwinds what was acquired, and keeps
/// running without a context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("no default EGL display")]
    DisplayUnavailable,

    #[error("failed to initialize EGL display")]
    DisplayInitFailed(#[source] ApiError),

    #[error("no EGL config matches the surface request")]
    NoMatchingConfig,

    #[error("failed to create EGL window surface")]
    SurfaceCreateFailed(#[source] ApiError),

    #[error("failed to create EGL context")]
    ContextCreateFailed(#[source] ApiError),

    #[error("failed to make EGL context current")]
    MakeCurrentFailed(#[source] ApiError),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompileFailed { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ProgramLinkFailed { log: String },

    #[error("failed to create geometry objects")]
    GeometryUploadFailed(#[source] ApiError),
}
