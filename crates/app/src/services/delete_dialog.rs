//! Delete dialog — confirm or cancel the removal of one entity.

use libris_domain::error::LibrisError;
use libris_domain::resource::Resource;

use crate::ports::HttpClient;
use crate::services::entity_service::EntityService;

/// How the dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The user backed out; nothing was sent.
    Dismissed,
    /// The server confirmed the deletion.
    Deleted,
}

pub struct DeleteDialog<'a, T, C> {
    service: &'a EntityService<T, C>,
}

impl<'a, T: Resource, C: HttpClient> DeleteDialog<'a, T, C> {
    pub fn new(service: &'a EntityService<T, C>) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn cancel(&self) -> DialogOutcome {
        DialogOutcome::Dismissed
    }

    /// Delete the entity stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Transport`] when the server does not confirm;
    /// the dialog stays open in that case.
    pub async fn confirm_delete(&self, id: T::Id) -> Result<DialogOutcome, LibrisError> {
        self.service.delete(id).await?;
        tracing::info!(entity = T::NAME, %id, "deleted");
        Ok(DialogOutcome::Deleted)
    }
}
