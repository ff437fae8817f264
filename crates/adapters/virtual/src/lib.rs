//! # libris-adapter-virtual
//!
//! In-memory stand-in for the library administration REST API, used by tests
//! and demonstrations.
//!
//! ## Behaviour
//!
//! | Request | Outcome |
//! |---------|---------|
//! | `POST /api/<e>` | `201` with the stored entity; `400 idexists` when the body has an id |
//! | `PUT /api/<e>/{id}` | `200`; `400 idnull` / `idinvalid` / `idnotfound` on id problems |
//! | `PATCH /api/<e>/{id}` | like `PUT`, but only non-null fields are merged |
//! | `GET /api/<e>/{id}` | `200` with the entity; `404` when unknown (or an empty `200`, see [`VirtualBackend::reporting_missing_as_empty`]) |
//! | `GET /api/<e>` | `200` with one page and an `X-Total-Count` header |
//! | `DELETE /api/<e>/{id}` | `204`; `404` when unknown |
//!
//! ## Dependency rule
//!
//! Depends on `libris-app` (port traits) and `libris-domain` only.

mod listing;

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use libris_app::ports::http::TOTAL_COUNT_HEADER;
use libris_app::ports::{HttpClient, HttpRequest, HttpResponse, Method};
use libris_domain::book::Book;
use libris_domain::borrowing::Borrowing;
use libris_domain::category::Category;
use libris_domain::error::{LibrisError, TransportError};
use libris_domain::resource::Resource;
use libris_domain::spaces::Spaces;
use libris_domain::user::User;
use serde_json::{Value, json};

use listing::Listing;

#[derive(Default)]
struct State {
    collections: HashMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
    log: Vec<(Method, String)>,
}

/// Simulated REST API holding every resource in memory.
pub struct VirtualBackend {
    state: Mutex<State>,
    missing_as_empty: bool,
}

impl Default for VirtualBackend {
    fn default() -> Self {
        Self::empty()
            .with_resource(Book::PATH)
            .with_resource(Borrowing::PATH)
            .with_resource(Spaces::PATH)
            .with_resource(Category::PATH)
            .with_resource(User::PATH)
    }
}

impl VirtualBackend {
    /// A backend serving the library resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend serving no resource at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            missing_as_empty: false,
        }
    }

    /// Serve an additional resource path such as `api/authors`.
    #[must_use]
    pub fn with_resource(self, path: &str) -> Self {
        self.lock()
            .collections
            .entry(path.trim_matches('/').to_string())
            .or_default();
        self
    }

    /// Answer by-id reads of unknown entities with an empty `200` instead of
    /// a `404`.
    #[must_use]
    pub fn reporting_missing_as_empty(mut self) -> Self {
        self.missing_as_empty = true;
        self
    }

    /// Store `entity` directly, bypassing the API rules, and return it with
    /// its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] if `entity` cannot be represented
    /// as JSON or `T` is not served.
    pub fn seed<T: Resource>(&self, entity: &T) -> Result<T, LibrisError> {
        let mut value = serde_json::to_value(entity).map_err(TransportError::Encode)?;
        let mut state = self.lock();
        if !state.collections.contains_key(T::PATH) {
            return Err(TransportError::Status {
                status: 404,
                message: Some(format!("{} is not served", T::PATH)),
            }
            .into());
        }
        let id = state.allocate_id();
        value["id"] = json!(id);
        if let Some(collection) = state.collections.get_mut(T::PATH) {
            collection.insert(id, value.clone());
        }
        drop(state);
        serde_json::from_value(value).map_err(|err| TransportError::Decode(err).into())
    }

    /// Every request received so far, as `(method, path)`.
    #[must_use]
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.lock().log.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let mut state = self.lock();
        let path = request.path.trim_matches('/').to_string();
        state.log.push((request.method, path.clone()));

        if state.collections.contains_key(&path) {
            return match request.method {
                Method::Get => state.list(&path, &request.query),
                Method::Post => state.create(&path, request.body.as_ref()),
                _ => problem(405, "Method Not Allowed", "methodnotallowed"),
            };
        }

        let Some((collection, raw_id)) = path.rsplit_once('/') else {
            return problem(404, "Not Found", "notfound");
        };
        if !state.collections.contains_key(collection) {
            return problem(404, "Not Found", "notfound");
        }
        let Ok(id) = raw_id.parse::<i64>() else {
            return problem(400, "Bad Request", "idinvalid");
        };

        match request.method {
            Method::Get => match state.collections[collection].get(&id) {
                Some(value) => HttpResponse::new(200).with_json(value),
                None if self.missing_as_empty => HttpResponse::new(200),
                None => problem(404, "Not Found", "notfound"),
            },
            Method::Put => state.replace(collection, id, request.body.as_ref(), false),
            Method::Patch => state.replace(collection, id, request.body.as_ref(), true),
            Method::Delete => match state.collections.get_mut(collection).and_then(|c| c.remove(&id)) {
                Some(_) => HttpResponse::new(204),
                None => problem(404, "Not Found", "notfound"),
            },
            Method::Post => problem(405, "Method Not Allowed", "methodnotallowed"),
        }
    }
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn list(&self, path: &str, query: &[(String, String)]) -> HttpResponse {
        let listing = match Listing::from_query(query) {
            Ok(listing) => listing,
            Err(reason) => return problem(400, &reason, "badrequest"),
        };
        let (page, total) = listing.apply(self.collections[path].values());
        HttpResponse::new(200)
            .with_header(TOTAL_COUNT_HEADER, total.to_string())
            .with_json(&Value::Array(page))
    }

    fn create(&mut self, path: &str, body: Option<&Value>) -> HttpResponse {
        let Some(Value::Object(fields)) = body else {
            return problem(400, "Bad Request", "badrequest");
        };
        if fields.get("id").is_some_and(|id| !id.is_null()) {
            return problem(400, "A new entity cannot already have an ID", "idexists");
        }
        let id = self.allocate_id();
        let mut stored = Value::Object(fields.clone());
        stored["id"] = json!(id);
        if let Some(collection) = self.collections.get_mut(path) {
            collection.insert(id, stored.clone());
        }
        tracing::debug!(path, id, "virtual entity created");
        HttpResponse::new(201).with_json(&stored)
    }

    fn replace(&mut self, path: &str, id: i64, body: Option<&Value>, merge: bool) -> HttpResponse {
        let Some(Value::Object(fields)) = body else {
            return problem(400, "Bad Request", "badrequest");
        };
        let Some(body_id) = fields.get("id").and_then(Value::as_i64) else {
            return problem(400, "Invalid id", "idnull");
        };
        if body_id != id {
            return problem(400, "Invalid ID", "idinvalid");
        }
        let Some(stored) = self.collections.get_mut(path).and_then(|c| c.get_mut(&id)) else {
            return problem(400, "Entity not found", "idnotfound");
        };

        if merge {
            if let Value::Object(current) = &mut *stored {
                for (key, value) in fields {
                    if !value.is_null() {
                        current.insert(key.clone(), value.clone());
                    }
                }
            }
        } else {
            *stored = Value::Object(fields.clone());
        }
        HttpResponse::new(200).with_json(stored)
    }
}

/// Problem-details error response.
fn problem(status: u16, title: &str, key: &str) -> HttpResponse {
    HttpResponse::new(status).with_json(&json!({
        "title": title,
        "status": status,
        "message": format!("error.{key}"),
    }))
}

impl HttpClient for VirtualBackend {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, LibrisError>> + Send {
        let response = self.handle(&request);
        async move { Ok(response) }
    }
}
