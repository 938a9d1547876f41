//! Request builder, response parser and round-trip driver.
//!
//! # Design
//! `FlagsmithClient` holds only its configuration and a `Transport`; it
//! carries no mutable state between calls, so one instance can be shared
//! across threads. Every operation is a `build` step producing an
//! `HttpRequest`, a transport round trip, and a `parse` step consuming the
//! `HttpResponse`. Per-resource operations live in the `api` module.

use std::fmt;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, Resource};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resolve::Resolver;
use crate::transport::{Transport, UreqTransport};

/// Blocking client for the Flagsmith admin API.
pub struct FlagsmithClient<T = UreqTransport> {
    base_url: String,
    master_api_key: String,
    transport: T,
}

impl FlagsmithClient<UreqTransport> {
    /// Create a client. An empty `base_url` selects the production endpoint.
    pub fn new(master_api_key: &str, base_url: &str) -> Self {
        Self::from_config(ClientConfig::new(master_api_key, base_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> FlagsmithClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.resolved_base_url(),
            master_api_key: config.master_api_key,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// UUID-to-id resolution backed by this client.
    pub fn resolver(&self) -> Resolver<'_, T> {
        Resolver::new(self)
    }

    /// Build a request for `path` (relative to the base URL) with the
    /// standard headers attached.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Api-Key {}", self.master_api_key),
            ),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }

    pub fn build_json_request<B>(&self, method: HttpMethod, path: &str, body: &B) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.build_request(method, path, Some(body)))
    }

    pub(crate) fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("flagsmithapi: {} {}", request.method, request.url);
        self.transport.execute(request)
    }

    pub(crate) fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(self.build_request(HttpMethod::Get, path, None))?;
        parse_json(response, None)
    }

    /// GET a single resource by UUID; a 404 becomes `ApiError::NotFound`.
    pub(crate) fn lookup<R: DeserializeOwned>(
        &self,
        path: &str,
        resource: Resource,
        identifier: &str,
    ) -> Result<R, ApiError> {
        let response = self.execute(self.build_request(HttpMethod::Get, path, None))?;
        parse_json(response, Some((resource, identifier)))
    }

    pub(crate) fn send<B, R>(&self, method: HttpMethod, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.execute(self.build_json_request(method, path, body)?)?;
        parse_json(response, None)
    }

    /// Like `send`, for endpoints whose response body is not needed.
    pub(crate) fn send_discarding<B>(&self, method: HttpMethod, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.execute(self.build_json_request(method, path, body)?)?;
        check_status(&response, None)
    }

    pub(crate) fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.execute(self.build_request(HttpMethod::Delete, path, None))?;
        check_status(&response, None)
    }
}

impl<T> fmt::Debug for FlagsmithClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagsmithClient")
            .field("base_url", &self.base_url)
            .field("master_api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
///
/// `lookup` names the resource being fetched by UUID; only then does a 404
/// become `NotFound`.
pub fn check_status(response: &HttpResponse, lookup: Option<(Resource, &str)>) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if let (404, Some((resource, identifier))) = (response.status, lookup) {
        return Err(ApiError::not_found(resource, identifier));
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

pub fn parse_json<R: DeserializeOwned>(
    response: HttpResponse,
    lookup: Option<(Resource, &str)>,
) -> Result<R, ApiError> {
    check_status(&response, lookup)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
