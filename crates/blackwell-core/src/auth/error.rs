use thiserror::Error;

/// Failures of the social sign-in round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Sign-in was cancelled")]
    Cancelled,

    #[error("Provider error: {0}")]
    Failed(String),

    /// The session changed while the provider flow was pending.
    #[error("Session changed while sign-in was pending")]
    Superseded,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User already exists")]
    UserExists { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Coarse error category, for callers that localize or branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Authentication,
    Provider,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::PasswordMismatch => ErrorKind::Validation,
            AuthError::UserExists { .. } => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Authentication,
            AuthError::Provider(_) => ErrorKind::Provider,
        }
    }

    /// Translation key for the toast surface.
    pub fn message_key(&self) -> &'static str {
        match self {
            AuthError::PasswordMismatch => "auth.error.passwordMismatch",
            AuthError::UserExists { .. } => "auth.error.userExists",
            AuthError::InvalidCredentials => "auth.error.invalidCredentials",
            AuthError::Provider(ProviderError::Cancelled) => "auth.error.providerCancelled",
            AuthError::Provider(_) => "auth.error.generic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::PasswordMismatch.kind(), ErrorKind::Validation);
        assert_eq!(
            AuthError::UserExists { email: "a@x.com".into() }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Authentication);
        assert_eq!(
            AuthError::from(ProviderError::Cancelled).kind(),
            ErrorKind::Provider
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(
            AuthError::UserExists { email: "a@x.com".into() }.to_string(),
            "User already exists"
        );
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(
            AuthError::from(ProviderError::Failed("popup closed".into())).to_string(),
            "Provider error: popup closed"
        );
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(
            AuthError::from(ProviderError::Superseded).message_key(),
            "auth.error.generic"
        );
        assert_eq!(
            AuthError::InvalidCredentials.message_key(),
            "auth.error.invalidCredentials"
        );
    }
}
