//! HTTP implementation of [`CatalogService`] over the catalog's REST routes.

use async_trait::async_trait;

use super::{CatalogService, SearchQuery};
use crate::{
    config::Config,
    error::RemoteError,
    models::{Entry, EntryDraft, EntryId},
};

/// A [`CatalogService`] speaking the catalog backend's REST dialect:
///
/// - `GET /entries`, `GET /search?q=&tags=`, `GET /tags`
/// - `POST /entry`, `PUT /entry/{id}`, `DELETE /entry/{id}`
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

/// Error bodies come back as `{ "error": "..." }`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// `GET /tags` wraps its answer in an envelope.
#[derive(serde::Deserialize)]
struct TagsBody {
    tags: Vec<String>,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();

        // normalize so route joins below stay simple
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Builds a client pointed at the configured service endpoint.
    pub async fn from_config() -> Self {
        Self::new(Config::read().await.base_url.clone())
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    /// Turns a non-2xx response into [`RemoteError::Rejected`], pulling the
    /// message out of the `{ "error": ... }` body when there is one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) if !body.trim().is_empty() => body,
                Err(_) => status.to_string(),
            },
            Err(_) => status.to_string(),
        };

        tracing::error!("catalog service rejected a request: {status}: {message}");

        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    fn malformed(err: reqwest::Error) -> RemoteError {
        RemoteError::MalformedResponse(err.to_string())
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn list_entries(&self) -> Result<Vec<Entry>, RemoteError> {
        tracing::debug!("fetching the full entry collection");

        let response = self.client.get(self.url("/entries")).send().await?;

        Self::check(response)
            .await?
            .json::<Vec<Entry>>()
            .await
            .map_err(Self::malformed)
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, RemoteError> {
        tracing::debug!("creating entry named `{}`", draft.name);

        let response = self
            .client
            .post(self.url("/entry"))
            .json(draft)
            .send()
            .await?;

        Self::check(response)
            .await?
            .json::<Entry>()
            .await
            .map_err(Self::malformed)
    }

    async fn update_entry(&self, id: &EntryId, draft: &EntryDraft) -> Result<Entry, RemoteError> {
        tracing::debug!("updating entry `{id}`");

        let response = self
            .client
            .put(self.url(&format!("/entry/{id}")))
            .json(draft)
            .send()
            .await?;

        Self::check(response)
            .await?
            .json::<Entry>()
            .await
            .map_err(Self::malformed)
    }

    async fn delete_entry(&self, id: &EntryId) -> Result<(), RemoteError> {
        tracing::debug!("deleting entry `{id}`");

        let response = self
            .client
            .delete(self.url(&format!("/entry/{id}")))
            .send()
            .await?;

        // the ack body ("Entry deleted") carries nothing we need
        Self::check(response).await?;
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>, RemoteError> {
        tracing::debug!(
            "searching: term `{}`, tags {:?}, limit {:?}",
            query.term,
            query.tags,
            query.limit
        );

        // the service expects params to be absent, not empty
        let mut params: Vec<(&str, String)> = Vec::new();
        if !query.term.is_empty() {
            params.push(("q", query.term.clone()));
        }
        if !query.tags.is_empty() {
            params.push(("tags", query.tags.join(",")));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let response = self
            .client
            .get(self.url("/search"))
            .query(&params)
            .send()
            .await?;

        Self::check(response)
            .await?
            .json::<Vec<Entry>>()
            .await
            .map_err(Self::malformed)
    }

    async fn list_tags(&self) -> Result<Vec<String>, RemoteError> {
        tracing::debug!("fetching the service-side tag list");

        let response = self.client.get(self.url("/tags")).send().await?;

        let body: TagsBody = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::malformed)?;

        Ok(body.tags)
    }
}
