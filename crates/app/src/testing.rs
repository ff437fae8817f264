//! Port fakes shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use libris_domain::error::{LibrisError, TransportError};

use crate::ports::{HttpClient, HttpRequest, HttpResponse, Navigator, Route};

/// Replies with pre-recorded responses, in order, and remembers every request.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub fn reply(self, response: HttpResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn reply_json(self, status: u16, body: serde_json::Value) -> Self {
        self.reply(HttpResponse::new(status).with_json(&body))
    }

    pub fn fail(self, reason: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedClient {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, LibrisError>> + Send {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        async move {
            match next {
                Some(Ok(response)) => Ok(response),
                Some(Err(reason)) => Err(TransportError::Network(reason.into()).into()),
                None => Err(TransportError::Network("no response scripted".into()).into()),
            }
        }
    }
}

/// Remembers every navigation.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
