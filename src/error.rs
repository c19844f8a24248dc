/// Fatal errors. Anything recoverable is handled where it happens.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("no graphics adapter can present to this window")]
    NoAdapter,
    #[error("failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("window surface has no formats supported by the adapter")]
    IncompatibleSurface,
    #[error("out of GPU memory while acquiring a frame")]
    OutOfMemory,
}
