//! Identities and their traits.

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{Identity, Page, Trait};

impl<T: Transport> FlagsmithClient<T> {
    pub fn get_identity(&self, environment_key: &str, identity_id: i64) -> Result<Identity, ApiError> {
        self.get(&format!("/environments/{environment_key}/identities/{identity_id}/"))
    }

    pub fn create_identity(&self, environment_key: &str, identity: &Identity) -> Result<Identity, ApiError> {
        self.send(
            HttpMethod::Post,
            &format!("/environments/{environment_key}/identities/"),
            identity,
        )
    }

    pub fn delete_identity(&self, environment_key: &str, identity_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/environments/{environment_key}/identities/{identity_id}/"))
    }

    /// First page of an identity's traits.
    pub fn list_traits(&self, environment_key: &str, identity_id: i64) -> Result<Vec<Trait>, ApiError> {
        let page: Page<Trait> = self.get(&traits_path(environment_key, identity_id))?;
        Ok(page.results)
    }

    pub fn create_trait(&self, environment_key: &str, identity_id: i64, identity_trait: &Trait) -> Result<Trait, ApiError> {
        self.send(
            HttpMethod::Post,
            &traits_path(environment_key, identity_id),
            identity_trait,
        )
    }

    pub fn update_trait(&self, environment_key: &str, identity_id: i64, identity_trait: &Trait) -> Result<Trait, ApiError> {
        let trait_id = identity_trait.id.ok_or(ApiError::MissingReference("trait"))?;
        self.send(
            HttpMethod::Put,
            &format!("{}{trait_id}/", traits_path(environment_key, identity_id)),
            identity_trait,
        )
    }

    pub fn delete_trait(&self, environment_key: &str, identity_id: i64, trait_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}{trait_id}/", traits_path(environment_key, identity_id)))
    }
}

fn traits_path(environment_key: &str, identity_id: i64) -> String {
    format!("/environments/{environment_key}/identities/{identity_id}/traits/")
}
