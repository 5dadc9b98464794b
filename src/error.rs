use thiserror::Error;

/// Failure of a call to the remote API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Non-2xx response; `message` comes from the error body when there is one
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 401 from the API. The local session has already been cleared.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("The server returned no content")]
    EmptyBody,

    /// Refused locally because there is no session token
    #[error("{0}")]
    SignedOut(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestError::Unauthorized(_) | RequestError::SignedOut(_))
    }

    /// Auth failures are never retried: the token is gone either way
    pub fn is_retryable(&self) -> bool {
        !self.is_unauthorized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_server_message() {
        let err = RequestError::Status { status: 400, message: "Department has active reports".into() };
        assert_eq!(err.to_string(), "Department has active reports");
        assert_eq!(err.status(), Some(400));
        assert!(err.is_retryable());
    }

    #[test]
    fn auth_errors_are_not_retryable() {
        assert!(!RequestError::Unauthorized("expired".into()).is_retryable());
        assert!(!RequestError::SignedOut("log in".into()).is_retryable());
        assert!(RequestError::Network("offline".into()).is_retryable());
    }
}
