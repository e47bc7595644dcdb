use crate::types::{CreateOrganization, Organization};
use crate::{ApiClient, ApiResult, RequestOptions};

#[derive(Debug, Clone, Copy)]
pub struct OrganizationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrganizationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Used by the onboarding wizard.
    pub async fn create(&self, input: &CreateOrganization) -> ApiResult<Organization> {
        let options = RequestOptions::post().json(input)?;
        self.client.request("/orgs/create", options).await
    }
}
