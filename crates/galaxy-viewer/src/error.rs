use galaxy_field::FieldError;

/// Fatal viewer failures. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Rejected configuration, caught before the device is touched.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Adapter/device acquisition or buffer allocation failed.
    #[error("device error: {0}")]
    Device(String),

    /// Drawing or presenting a frame failed.
    #[error("render error: {0}")]
    Render(String),
}

impl From<FieldError> for ViewerError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::InvalidConfig(msg) => Self::InvalidConfig(msg),
        }
    }
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
