//! Per-resource operations, one `impl FlagsmithClient` block per resource.
//!
//! Paths are relative to the client's base URL and always end with `/`.

mod api_keys;
mod environments;
mod feature_segments;
mod feature_states;
mod features;
mod identities;
mod mv_options;
mod organisations;
mod projects;
mod segments;
mod tags;
