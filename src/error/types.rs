// Error taxonomy for the risk aggregation engine
use std::fmt;
use thiserror::Error;

/// Expected failure modes of a provider adapter call.
///
/// Adapters never panic or bubble raw transport errors; every expected
/// failure is mapped onto one of these kinds before it leaves the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Network failure, timeout, or 5xx from the upstream service.
    Unavailable,
    /// The identifier is unknown to this provider.
    NotFound,
    /// The provider rejected the call due to rate limiting.
    RateLimited,
    /// The response body could not be parsed into the expected shape.
    Malformed,
    /// Missing or rejected credentials.
    Unauthorized,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderErrorKind::Unavailable => "unavailable",
            ProviderErrorKind::NotFound => "not found",
            ProviderErrorKind::RateLimited => "rate limited",
            ProviderErrorKind::Malformed => "malformed response",
            ProviderErrorKind::Unauthorized => "unauthorized",
        };
        write!(f, "{}", name)
    }
}

/// Error returned by a provider adapter call.
#[derive(Debug, Clone, Error)]
#[error("provider {provider} {kind}: {message}")]
pub struct ProviderError {
    pub provider: &'static str,
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: &'static str, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(provider: &'static str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Unavailable, message)
    }

    pub fn not_found(provider: &'static str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::NotFound, message)
    }

    pub fn rate_limited(provider: &'static str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::RateLimited, message)
    }

    pub fn malformed(provider: &'static str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Malformed, message)
    }

    pub fn unauthorized(provider: &'static str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Unauthorized, message)
    }

    /// Map a reqwest transport/decode error onto the adapter taxonomy.
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            return Self::unavailable(provider, err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_status(provider, status, err.to_string());
        }
        if err.is_decode() {
            return Self::malformed(provider, err.to_string());
        }
        Self::unavailable(provider, err.to_string())
    }

    /// Map an HTTP status onto the adapter taxonomy.
    pub fn from_status(
        provider: &'static str,
        status: reqwest::StatusCode,
        message: impl Into<String>,
    ) -> Self {
        let kind = match status.as_u16() {
            404 => ProviderErrorKind::NotFound,
            429 => ProviderErrorKind::RateLimited,
            401 | 403 => ProviderErrorKind::Unauthorized,
            _ => ProviderErrorKind::Unavailable,
        };
        Self::new(provider, kind, message)
    }
}

/// Errors raised while converting a raw payload into normalized signals.
///
/// Normalization fails closed: a payload missing the fields needed for an
/// exact computation produces an error, never a guessed default.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizationError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("division by zero while normalizing {context}")]
    DivideByZero { context: String },

    #[error("value out of range for {context}: {value}")]
    OutOfRange { context: String, value: String },
}

impl NormalizationError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        NormalizationError::MissingField { field: field.into() }
    }

    pub fn divide_by_zero(context: impl Into<String>) -> Self {
        NormalizationError::DivideByZero { context: context.into() }
    }

    pub fn out_of_range(context: impl Into<String>, value: impl fmt::Display) -> Self {
        NormalizationError::OutOfRange {
            context: context.into(),
            value: value.to_string(),
        }
    }
}

/// Configuration problems for optional data sources.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("missing credentials for {source_name}")]
    MissingCredentials { source_name: String },
}

/// Run-fatal engine errors.
///
/// The only fatal condition during an aggregation run is a malformed
/// identifier; every provider or normalization failure degrades into a
/// section-level error marker inside the Report instead.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("invalid token identifier: {input}")]
    InvalidIdentifier { input: String },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}
