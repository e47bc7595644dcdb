use evently_core::EventSlug;

use crate::types::{PublicEvent, Registration, RegistrationRequest};
use crate::{ApiClient, ApiResult, RequestOptions};

/// Unauthenticated endpoints backing event microsites.
#[derive(Debug, Clone, Copy)]
pub struct PublicApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PublicApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_event(&self, slug: &EventSlug) -> ApiResult<PublicEvent> {
        self.client
            .request(&format!("/public/events/{slug}"), RequestOptions::get())
            .await
    }

    pub async fn register(
        &self,
        slug: &EventSlug,
        registration: &RegistrationRequest,
    ) -> ApiResult<Registration> {
        let options = RequestOptions::post().json(registration)?;
        self.client
            .request(&format!("/public/events/{slug}/register"), options)
            .await
    }
}
