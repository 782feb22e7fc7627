use thiserror::Error;

pub const FALLBACK_SERVICE_MESSAGE: &str = "An error occurred while fetching the data";
pub const NOTE_CONTENT_REQUIRED: &str = "Please enter note content";

/// Transport and service failures. None of these are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Request timed out. Please check if the server is running.")]
    Timeout,
    /// The payload is the transport detail; it is logged, not shown.
    #[error("Network error. Please check your connection and if the server is running.")]
    Network(String),
    #[error("{message}")]
    Service { status: u16, message: String },
}

impl RemoteError {
    /// HTTP status of a service error; transport failures report 0.
    pub fn status(&self) -> u16 {
        match self {
            RemoteError::Service { status, .. } => *status,
            RemoteError::Timeout | RemoteError::Network(_) => 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    Invalid(String),
    #[error("{context}: {source}")]
    Remote {
        context: &'static str,
        #[source]
        source: RemoteError,
    },
}

impl DashboardError {
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            DashboardError::Remote { source, .. } => Some(source),
            DashboardError::Invalid(_) => None,
        }
    }
}

pub(crate) trait RemoteContext<T> {
    fn context(self, context: &'static str) -> Result<T, DashboardError>;
}

impl<T> RemoteContext<T> for Result<T, RemoteError> {
    fn context(self, context: &'static str) -> Result<T, DashboardError> {
        self.map_err(|source| DashboardError::Remote { context, source })
    }
}
