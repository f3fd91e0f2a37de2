//! Conversions from external infrastructure errors into domain errors.

use congregate_domain::CongregateError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CongregateError);

impl From<InfraError> for CongregateError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CongregateError> for InfraError {
    fn from(value: CongregateError) -> Self {
        InfraError(value)
    }
}

trait IntoCongregateError {
    fn into_congregate(self) -> CongregateError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → CongregateError */
/* -------------------------------------------------------------------------- */

impl IntoCongregateError for KeyringError {
    fn into_congregate(self) -> CongregateError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => CongregateError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                CongregateError::Internal("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => CongregateError::Config(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                CongregateError::Config(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => CongregateError::Internal(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => {
                CongregateError::Internal(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                CongregateError::Internal(format!("unable to access secure storage: {err}"))
            }
            _ => CongregateError::Internal(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_congregate())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CongregateError */
/* -------------------------------------------------------------------------- */

impl IntoCongregateError for HttpError {
    fn into_congregate(self) -> CongregateError {
        if self.is_timeout() {
            return CongregateError::Remote("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CongregateError::Remote("HTTP connection failure".into());
        }

        if self.is_builder() {
            return CongregateError::Internal(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return CongregateError::Remote(format!("malformed HTTP response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => CongregateError::Auth(message),
                404 => CongregateError::NotFound(message),
                400..=499 => CongregateError::Validation(message),
                _ => CongregateError::Remote(message),
            };
        }

        CongregateError::Remote(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_congregate())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CongregateError */
/* -------------------------------------------------------------------------- */

impl IntoCongregateError for std::io::Error {
    fn into_congregate(self) -> CongregateError {
        match self.kind() {
            std::io::ErrorKind::NotFound => CongregateError::NotFound(self.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                CongregateError::Config(format!("permission denied: {self}"))
            }
            _ => CongregateError::Internal(format!("I/O failure: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_congregate())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
