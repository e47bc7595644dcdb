use evently_core::EventId;

use crate::types::{CreateEvent, Event, EventFilters, UpdateEvent};
use crate::{ApiClient, ApiResult, RequestOptions};

/// Organizer-side event endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EventsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EventsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /events/list` with the filters encoded as query parameters.
    pub async fn list(&self, filters: &EventFilters) -> ApiResult<Vec<Event>> {
        let options = RequestOptions::get().query(filters.to_query());
        self.client.request("/events/list", options).await
    }

    pub async fn get(&self, id: EventId) -> ApiResult<Event> {
        self.client
            .request(&format!("/events/{id}"), RequestOptions::get())
            .await
    }

    pub async fn create(&self, input: &CreateEvent) -> ApiResult<Event> {
        let options = RequestOptions::post().json(input)?;
        self.client.request("/events/create", options).await
    }

    pub async fn update(&self, id: EventId, patch: &UpdateEvent) -> ApiResult<Event> {
        let options = RequestOptions::patch().json(patch)?;
        self.client
            .request(&format!("/events/{id}/update"), options)
            .await
    }

    /// The API answers with a bare `{ success: true }`; any payload is kept untyped.
    pub async fn delete(&self, id: EventId) -> ApiResult<serde_json::Value> {
        self.client
            .request(&format!("/events/{id}"), RequestOptions::delete())
            .await
    }
}
