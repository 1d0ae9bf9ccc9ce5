use serde::Serialize;
use thiserror::Error;

/// Return code the provisioning server uses for a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Classification of a non-success return code.
///
/// Every integer other than [`SUCCESS_CODE`] maps onto exactly one kind;
/// codes without a dedicated entry fall back to [`ErrorKind::UnhandledCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    InvalidValue,
    ValueMissing,
    Server,
    ServiceUnavailable,
    UnhandledCode,
}

impl ErrorKind {
    /// Look up the kind for a return code. `None` means the code signals success.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            SUCCESS_CODE => None,
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            404 => Some(Self::NotFound),
            420 => Some(Self::InvalidValue),
            421 => Some(Self::ValueMissing),
            500 => Some(Self::Server),
            503 => Some(Self::ServiceUnavailable),
            _ => Some(Self::UnhandledCode),
        }
    }

    /// The return code this kind is bound to, or `None` for the open-ended fallback.
    pub fn code(self) -> Option<i64> {
        match self {
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::NotFound => Some(404),
            Self::InvalidValue => Some(420),
            Self::ValueMissing => Some(421),
            Self::Server => Some(500),
            Self::ServiceUnavailable => Some(503),
            Self::UnhandledCode => None,
        }
    }

    /// Build the error for this kind, carrying the triggering code and the
    /// server's diagnostic messages.
    pub fn into_error(self, code: i64, server_messages: Vec<String>) -> ProvisioningError {
        match self {
            Self::BadRequest => ProvisioningError::BadRequest {
                code,
                server_messages,
            },
            Self::Unauthorized => ProvisioningError::Unauthorized {
                code,
                server_messages,
            },
            Self::NotFound => ProvisioningError::NotFound {
                code,
                server_messages,
            },
            Self::InvalidValue => ProvisioningError::InvalidValue {
                code,
                server_messages,
            },
            Self::ValueMissing => ProvisioningError::ValueMissing {
                code,
                server_messages,
            },
            Self::Server => ProvisioningError::Server {
                code,
                server_messages,
            },
            Self::ServiceUnavailable => ProvisioningError::ServiceUnavailable {
                code,
                server_messages,
            },
            Self::UnhandledCode => ProvisioningError::UnhandledCode {
                code,
                server_messages,
            },
        }
    }
}

/// Error type for every provisioning operation.
///
/// The return-code variants display the fixed, human-readable message for
/// their kind and keep the server's raw `TextMessage` lines in
/// `server_messages` so callers can log them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum ProvisioningError {
    /// Return code 400.
    #[error("Invalid request")]
    BadRequest {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Return code 401.
    #[error("Client lacks privileges to execute the requested operation")]
    Unauthorized {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Return code 404.
    #[error("The requested resource could not be found")]
    NotFound {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Return code 420.
    #[error("One or more request values is invalid")]
    InvalidValue {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Return code 421.
    #[error("Required attributue value is missing")]
    ValueMissing {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Return code 500.
    #[error("Unable to process the provisioning call due to a problem with PathFinder server")]
    Server {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Return code 503.
    #[error(
        "The server is currently unable to handle the request due to a temporary overload or maintenance on the server"
    )]
    ServiceUnavailable {
        code: i64,
        server_messages: Vec<String>,
    },

    /// Any non-success code without a dedicated variant.
    #[error("Received unhandled return code: {code}")]
    UnhandledCode {
        code: i64,
        server_messages: Vec<String>,
    },

    /// The response document did not have the envelope shape the parsers expect.
    #[error("Malformed provisioning response: {detail}")]
    MalformedResponse { detail: String },

    /// The transport collaborator failed before a response document was produced.
    #[error("Transport error: {detail}")]
    Transport { detail: String },
}

impl ProvisioningError {
    /// Classify a return code. Returns `None` for [`SUCCESS_CODE`].
    pub fn from_return_code(code: i64, server_messages: Vec<String>) -> Option<Self> {
        ErrorKind::from_code(code).map(|kind| kind.into_error(code, server_messages))
    }

    /// The taxonomy entry for return-code errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::BadRequest { .. } => Some(ErrorKind::BadRequest),
            Self::Unauthorized { .. } => Some(ErrorKind::Unauthorized),
            Self::NotFound { .. } => Some(ErrorKind::NotFound),
            Self::InvalidValue { .. } => Some(ErrorKind::InvalidValue),
            Self::ValueMissing { .. } => Some(ErrorKind::ValueMissing),
            Self::Server { .. } => Some(ErrorKind::Server),
            Self::ServiceUnavailable { .. } => Some(ErrorKind::ServiceUnavailable),
            Self::UnhandledCode { .. } => Some(ErrorKind::UnhandledCode),
            Self::MalformedResponse { .. } | Self::Transport { .. } => None,
        }
    }

    /// The return code that triggered this error, if it came from the server.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::BadRequest { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::NotFound { code, .. }
            | Self::InvalidValue { code, .. }
            | Self::ValueMissing { code, .. }
            | Self::Server { code, .. }
            | Self::ServiceUnavailable { code, .. }
            | Self::UnhandledCode { code, .. } => Some(*code),
            Self::MalformedResponse { .. } | Self::Transport { .. } => None,
        }
    }

    /// Diagnostic lines reported by the server, in the order it sent them.
    pub fn server_messages(&self) -> &[String] {
        match self {
            Self::BadRequest {
                server_messages, ..
            }
            | Self::Unauthorized {
                server_messages, ..
            }
            | Self::NotFound {
                server_messages, ..
            }
            | Self::InvalidValue {
                server_messages, ..
            }
            | Self::ValueMissing {
                server_messages, ..
            }
            | Self::Server {
                server_messages, ..
            }
            | Self::ServiceUnavailable {
                server_messages, ..
            }
            | Self::UnhandledCode {
                server_messages, ..
            } => server_messages,
            Self::MalformedResponse { .. } | Self::Transport { .. } => &[],
        }
    }

    /// Whether the failure is caused by the request rather than the server, used for log levels.
    ///
    /// Returns `true` when `warn` is appropriate and `false` for `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::BadRequest { .. }
                | Self::Unauthorized { .. }
                | Self::NotFound { .. }
                | Self::InvalidValue { .. }
                | Self::ValueMissing { .. }
        )
    }
}

/// Convenience type alias for `Result<T, ProvisioningError>`.
pub type Result<T> = std::result::Result<T, ProvisioningError>;
