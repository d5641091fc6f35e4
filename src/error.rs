//! Error types for the viewer

use std::path::PathBuf;

/// Failure while presenting a frame
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("surface out of memory")]
    OutOfMemory,

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("could not create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface not supported by the adapter")]
    UnsupportedSurface,
}

/// Failure while reading a scene catalog
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("could not read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("catalog contains no scenes")]
    Empty,
}

/// Failure while reading a viewer configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level failure of the windowed application
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
}
