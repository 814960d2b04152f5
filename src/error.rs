//! Error types for the galaxy viewer.
//!
//! Generation, GPU setup and the windowed viewer each get their own enum so
//! callers can tell a bad parameter apart from a missing adapter.

use std::fmt;

/// Errors raised while validating parameters or generating a point cloud.
#[derive(Debug, Clone, PartialEq)]
pub enum GalaxyError {
    /// A negative point count was requested.
    InvalidCount(i64),
    /// A color string could not be parsed as `#rrggbb`.
    InvalidColor(String),
}

impl fmt::Display for GalaxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalaxyError::InvalidCount(count) => {
                write!(f, "Invalid point count {}: count must be zero or positive", count)
            }
            GalaxyError::InvalidColor(text) => {
                write!(f, "Invalid color '{}': expected #rrggbb", text)
            }
        }
    }
}

impl std::error::Error for GalaxyError {}

/// Errors that can occur while talking to the GPU.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The shading program failed to compile or link into a pipeline.
    ShaderCompilation(String),
    /// The surface could not hand out a frame.
    Surface(wgpu::SurfaceError),
    /// A point set is too large for one vertex buffer or one instanced draw.
    TooManyPoints(usize),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found (needs Vulkan, Metal, DX12 or WebGPU)"
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::ShaderCompilation(msg) => {
                write!(f, "Failed to compile shading program: {}", msg)
            }
            GpuError::Surface(e) => write!(f, "Failed to acquire surface texture: {}", e),
            GpuError::TooManyPoints(n) => {
                write!(f, "{} points exceed the GPU buffer or instance limit", n)
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::Surface(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

impl From<wgpu::SurfaceError> for GpuError {
    fn from(e: wgpu::SurfaceError) -> Self {
        GpuError::Surface(e)
    }
}

/// Errors raised by the [`Visualization`](crate::Visualization) while
/// regenerating or drawing.
#[derive(Debug)]
pub enum RenderError {
    /// Point generation rejected the parameters.
    Galaxy(GalaxyError),
    /// The backend failed to upload or draw.
    Gpu(GpuError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Galaxy(e) => write!(f, "Generation error: {}", e),
            RenderError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Galaxy(e) => Some(e),
            RenderError::Gpu(e) => Some(e),
        }
    }
}

impl From<GalaxyError> for RenderError {
    fn from(e: GalaxyError) -> Self {
        RenderError::Galaxy(e)
    }
}

impl From<GpuError> for RenderError {
    fn from(e: GpuError) -> Self {
        RenderError::Gpu(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// Setting up or drawing the visualization failed.
    Render(RenderError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Render(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<RenderError> for ViewerError {
    fn from(e: RenderError) -> Self {
        ViewerError::Render(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Render(RenderError::Gpu(e))
    }
}

impl From<GalaxyError> for ViewerError {
    fn from(e: GalaxyError) -> Self {
        ViewerError::Render(RenderError::Galaxy(e))
    }
}
