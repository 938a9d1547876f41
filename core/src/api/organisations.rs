//! Organisation lookup.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::Organisation;

impl<T: Transport> FlagsmithClient<T> {
    pub fn get_organisation_by_uuid(&self, organisation_uuid: Uuid) -> Result<Organisation, ApiError> {
        self.get(&format!("/organisations/get-by-uuid/{organisation_uuid}/"))
    }
}
