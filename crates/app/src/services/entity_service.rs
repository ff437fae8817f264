//! Entity service — CRUD use-cases against one REST resource.
//!
//! Dates are normalised by the entities' serde representation: outgoing
//! payloads carry `YYYY-MM-DD` strings, responses are decoded back into
//! [`Date`](libris_domain::time::Date) values on every element.

use std::borrow::Cow;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use libris_domain::collection::add_to_collection_if_missing;
use libris_domain::error::{LibrisError, NotFoundError, TransportError, ValidationError};
use libris_domain::resource::Resource;

use crate::ports::http::MERGE_PATCH_JSON;
use crate::ports::{HttpClient, HttpRequest, HttpResponse, Method};
use crate::services::query::{Page, QueryOptions};

/// Application service for the REST resource of `T`.
pub struct EntityService<T, C> {
    client: C,
    resource: PhantomData<fn() -> T>,
}

impl<T: Resource, C: HttpClient> EntityService<T, C> {
    /// Create a new service sending its requests through `client`.
    pub fn new(client: C) -> Self {
        Self {
            client,
            resource: PhantomData,
        }
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create `entity` on the server and return the stored version.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Validation`] if invariants fail, or
    /// [`LibrisError::Transport`] if the exchange fails.
    pub async fn create(&self, entity: &T) -> Result<T, LibrisError> {
        entity.validate()?;
        let request = HttpRequest::new(Method::Post, T::PATH).with_json(encode(entity)?);
        let response = self.exchange(request).await?;
        decode(&response)
    }

    /// Replace the stored version of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] without contacting the server
    /// when `entity` was never persisted, [`LibrisError::Validation`] if
    /// invariants fail, or [`LibrisError::Transport`] if the exchange fails.
    pub async fn update(&self, entity: &T) -> Result<T, LibrisError> {
        entity.validate()?;
        let id = require_id(entity)?;
        let request = HttpRequest::new(Method::Put, item_path::<T>(id)).with_json(encode(entity)?);
        let response = self.exchange(request).await?;
        decode(&response)
    }

    /// Merge the present fields of `entity` into its stored version.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn partial_update(&self, entity: &T) -> Result<T, LibrisError> {
        entity.validate()?;
        let id = require_id(entity)?;
        let request = HttpRequest::new(Method::Patch, item_path::<T>(id))
            .with_json(encode(entity)?)
            .with_content_type(MERGE_PATCH_JSON);
        let response = self.exchange(request).await?;
        decode(&response)
    }

    /// Fetch one entity. `None` when the server has nothing under `id`.
    ///
    /// Both an empty success body and a `404` status mean "not found".
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] on any other failure.
    pub async fn find(&self, id: T::Id) -> Result<Option<T>, LibrisError> {
        let path = item_path::<T>(id);
        tracing::debug!(method = %Method::Get, %path, "sending request");
        let response = self
            .client
            .send(HttpRequest::new(Method::Get, path.clone()))
            .await?;
        if response.status == 404 {
            tracing::debug!(entity = T::NAME, %id, "entity not found");
            return Ok(None);
        }
        let response = check_status(Method::Get, &path, response)?;
        if !response.has_body() {
            tracing::debug!(entity = T::NAME, %id, "empty body, treating as not found");
            return Ok(None);
        }
        decode(&response).map(Some)
    }

    /// Fetch one entity that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::NotFound`] when no entity with `id` exists,
    /// or [`LibrisError::Transport`] if the exchange fails.
    pub async fn get(&self, id: T::Id) -> Result<T, LibrisError> {
        self.find(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: T::NAME,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Fetch one page of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] if the exchange fails.
    pub async fn query(&self, options: &QueryOptions) -> Result<Page<T>, LibrisError> {
        let request = HttpRequest::new(Method::Get, T::PATH).with_query(options.to_params());
        let response = self.exchange(request).await?;
        let items = if response.has_body() {
            decode(&response)?
        } else {
            Vec::new()
        };
        Ok(Page {
            items,
            total_count: response.total_count(),
        })
    }

    /// Delete the entity stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] if the server does not confirm.
    pub async fn delete(&self, id: T::Id) -> Result<(), LibrisError> {
        self.exchange(HttpRequest::new(Method::Delete, item_path::<T>(id)))
            .await?;
        Ok(())
    }

    /// Load the options of a relationship selector, keeping `selected`
    /// available even when the server list does not contain it.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] if the list cannot be fetched.
    pub async fn relationship_options(&self, selected: Option<&T>) -> Result<Vec<T>, LibrisError> {
        let page = self.query(&QueryOptions::default()).await?;
        let merged = match add_to_collection_if_missing(&page.items, [selected]) {
            Cow::Owned(merged) => Some(merged),
            Cow::Borrowed(_) => None,
        };
        Ok(merged.unwrap_or(page.items))
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, LibrisError> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, "sending request");
        let response = self.client.send(request).await?;
        check_status(method, &path, response)
    }
}

/// Problem details returned by the API on rejected requests.
#[derive(Deserialize)]
struct ErrorBody {
    title: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

fn check_status(method: Method, path: &str, response: HttpResponse) -> Result<HttpResponse, LibrisError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.title.or(body.detail).or(body.message));
    tracing::warn!(
        %method,
        %path,
        status = response.status,
        message = message.as_deref().unwrap_or_default(),
        "request rejected"
    );
    Err(TransportError::Status {
        status: response.status,
        message,
    }
    .into())
}

fn item_path<T: Resource>(id: T::Id) -> String {
    format!("{}/{id}", T::PATH)
}

fn require_id<T: Resource>(entity: &T) -> Result<T::Id, LibrisError> {
    entity
        .id()
        .ok_or_else(|| ValidationError::MissingId { entity: T::NAME }.into())
}

fn encode<T: Resource>(entity: &T) -> Result<serde_json::Value, LibrisError> {
    serde_json::to_value(entity).map_err(|err| TransportError::Encode(err).into())
}

fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, LibrisError> {
    serde_json::from_slice(&response.body).map_err(|err| TransportError::Decode(err).into())
}
