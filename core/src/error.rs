//! Error types for the Flagsmith API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." Only the lookup-by-UUID endpoints produce it; a 404 anywhere else
//! lands in `HttpError` with the raw status code and body for debugging.

use std::fmt;

use thiserror::Error;

/// The kinds of resource that can be looked up by UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Feature,
    FeatureState,
    Segment,
    FeatureMvOption,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Feature => "feature",
            Resource::FeatureState => "feature state",
            Resource::Segment => "segment",
            Resource::FeatureMvOption => "feature multivariate option",
        };
        f.write_str(name)
    }
}

/// Errors returned by `FlagsmithClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for a lookup-by-UUID request.
    #[error("flagsmithapi: {resource} '{identifier}' not found")]
    NotFound {
        resource: Resource,
        identifier: String,
    },

    /// The server returned a non-2xx status that is not a lookup 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Neither the numeric id nor the UUID of a referenced resource was set.
    #[error("missing {0} reference: set either its id or its uuid")]
    MissingReference(&'static str),

    /// A list endpoint expected to yield a single match yielded another count.
    #[error("expected {expected} result(s), found {found}")]
    UnexpectedResultCount { expected: usize, found: usize },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub(crate) fn not_found(resource: Resource, identifier: impl ToString) -> Self {
        ApiError::NotFound {
            resource,
            identifier: identifier.to_string(),
        }
    }
}
