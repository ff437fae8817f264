//! Route resolution — supply the entity a view needs before it activates.
//!
//! A view for "new" gets an empty entity straight away. A view for an
//! existing entity gets it from the server, or the user is sent to the
//! not-found view and the view does not activate.

use std::future::Future;

use libris_domain::error::{LibrisError, ValidationError};
use libris_domain::resource::Resource;

use crate::ports::{Navigator, Route};

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// The view may activate with this entity.
    Resolved(T),
    /// The user was sent elsewhere; the view must not activate.
    Redirected(Route),
}

impl<T> Resolution<T> {
    /// The resolved entity, if any.
    #[must_use]
    pub fn into_resolved(self) -> Option<T> {
        match self {
            Self::Resolved(entity) => Some(entity),
            Self::Redirected(_) => None,
        }
    }
}

/// Parse an optional route parameter into an identifier.
///
/// A missing or blank parameter means "new entity".
///
/// # Errors
///
/// Returns [`ValidationError::InvalidId`] when the parameter is not an
/// identifier.
pub fn route_id<T: Resource>(param: Option<&str>) -> Result<Option<T::Id>, ValidationError> {
    match param.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidId(raw.to_string())),
    }
}

/// Resolve the entity for a route.
///
/// Without `id`, returns `T::default()` without calling `find`. With `id`,
/// calls `find` once; a `None` result navigates to [`Route::NotFound`]
/// exactly once and yields [`Resolution::Redirected`].
///
/// # Errors
///
/// Propagates any error from `find` unchanged; there is no retry.
pub async fn resolve<T, F, Fut, N>(
    id: Option<T::Id>,
    find: F,
    navigator: &N,
) -> Result<Resolution<T>, LibrisError>
where
    T: Resource,
    F: FnOnce(T::Id) -> Fut,
    Fut: Future<Output = Result<Option<T>, LibrisError>>,
    N: Navigator + ?Sized,
{
    let Some(id) = id else {
        return Ok(Resolution::Resolved(T::default()));
    };
    match find(id).await? {
        Some(entity) => Ok(Resolution::Resolved(entity)),
        None => {
            tracing::info!(entity = T::NAME, %id, "entity not found, redirecting");
            navigator.navigate(Route::NotFound);
            Ok(Resolution::Redirected(Route::NotFound))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::ports::HttpResponse;
    use crate::services::entity_service::EntityService;
    use crate::testing::{RecordingNavigator, ScriptedClient};
    use libris_domain::id::SpacesId;
    use libris_domain::spaces::Spaces;
    use serde_json::json;

    #[tokio::test]
    async fn should_return_entity_returned_by_find() {
        let navigator = RecordingNavigator::default();
        let svc = EntityService::<Spaces, _>::new(
            ScriptedClient::default().reply_json(200, json!({ "id": 123 })),
        );

        let resolution = resolve(Some(SpacesId::new(123)), |id| svc.find(id), &navigator)
            .await
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::Resolved(Spaces {
                id: Some(SpacesId::new(123)),
                ..Spaces::default()
            })
        );
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn should_return_new_entity_without_calling_find() {
        let navigator = RecordingNavigator::default();
        let calls = Cell::new(0);

        let resolution = resolve::<Spaces, _, _, _>(
            None,
            |_| {
                calls.set(calls.get() + 1);
                async { Ok::<_, LibrisError>(None::<Spaces>) }
            },
            &navigator,
        )
        .await
        .unwrap();

        assert_eq!(resolution, Resolution::Resolved(Spaces::default()));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn should_route_to_not_found_when_server_has_no_data() {
        let navigator = RecordingNavigator::default();
        let svc = EntityService::<Spaces, _>::new(
            ScriptedClient::default().reply(HttpResponse::new(200)),
        );

        let resolution = resolve(Some(SpacesId::new(123)), |id| svc.find(id), &navigator)
            .await
            .unwrap();

        assert_eq!(resolution, Resolution::Redirected(Route::NotFound));
        assert_eq!(resolution.into_resolved(), None);
        assert_eq!(navigator.routes(), vec![Route::NotFound]);
    }

    #[tokio::test]
    async fn should_propagate_transport_failure_without_navigating() {
        let navigator = RecordingNavigator::default();
        let svc = EntityService::<Spaces, _>::new(ScriptedClient::default().fail("timeout"));

        let result = resolve(Some(SpacesId::new(1)), |id| svc.find(id), &navigator).await;

        assert!(matches!(result, Err(LibrisError::Transport(_))));
        assert!(navigator.routes().is_empty());
    }

    #[test]
    fn should_parse_route_parameter() {
        assert_eq!(route_id::<Spaces>(None), Ok(None));
        assert_eq!(route_id::<Spaces>(Some(" ")), Ok(None));
        assert_eq!(route_id::<Spaces>(Some("42")), Ok(Some(SpacesId::new(42))));
        assert_eq!(
            route_id::<Spaces>(Some("abc")),
            Err(ValidationError::InvalidId("abc".to_string()))
        );
    }
}
