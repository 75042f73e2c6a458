use thiserror::Error;

/// Failures of the window host. The angle engine itself never fails.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("frame buffer error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
