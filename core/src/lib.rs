//! Blocking client for the Flagsmith feature-flag admin API.
//!
//! # Overview
//! `FlagsmithClient` turns typed operations (create a feature, update a
//! segment override, rotate a server-side key) into `HttpRequest` values,
//! hands them to a `Transport`, and parses the `HttpResponse` back into the
//! types in `types`. The default transport is a `ureq` agent; tests plug in
//! a scripted one.
//!
//! # Design
//! - The client is stateless between calls and can be shared across threads.
//! - Callers may reference a project or feature by UUID alone; the client
//!   resolves numeric ids with one extra lookup when a path needs them.
//! - Feature state values come back in two shapes (a typed record or a raw
//!   scalar); `value::FeatureStateValue` accepts both and always sends the
//!   typed record.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod overrides;
pub mod resolve;
pub mod transport;
pub mod types;
pub mod value;

pub use client::FlagsmithClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Resource};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use overrides::{SegmentOverride, SegmentPlacement};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Condition, Environment, Feature, FeatureMultivariateOption, FeatureSegment, FeatureSegmentPriority,
    FeatureState, FeatureType, Identity, Organisation, Page, Project, Rule, RuleType, Segment,
    ServerSideEnvKey, Tag, Trait,
};
pub use value::{FeatureStateValue, TraitValue};
