//! Editor — the save workflow behind an entity form.
//!
//! Saving creates the entity when it has no identifier and updates it
//! otherwise. While the request is in flight the [`SavingFlag`] is raised so
//! the form can refuse a second submission. The user is sent back to the
//! previous view only when the server accepted the save; on failure the form
//! stays as it was so the user can retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use libris_domain::error::LibrisError;
use libris_domain::resource::Resource;

use crate::ports::{HttpClient, Navigator, Route};
use crate::services::entity_service::EntityService;

/// "Save in progress" indicator, cheap to clone and share with a view.
#[derive(Debug, Clone, Default)]
pub struct SavingFlag(Arc<AtomicBool>);

impl SavingFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}

/// Lowers the flag when the save completes, fails, or is dropped mid-flight.
struct SavingGuard<'a>(&'a SavingFlag);

impl<'a> SavingGuard<'a> {
    fn raise(flag: &'a SavingFlag) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Form controller for one entity type.
pub struct Editor<T, C, N> {
    service: EntityService<T, C>,
    navigator: N,
    saving: SavingFlag,
}

impl<T: Resource, C: HttpClient, N: Navigator> Editor<T, C, N> {
    pub fn new(service: EntityService<T, C>, navigator: N) -> Self {
        Self {
            service,
            navigator,
            saving: SavingFlag::default(),
        }
    }

    /// Report progress through an externally owned flag.
    #[must_use]
    pub fn with_saving_flag(mut self, saving: SavingFlag) -> Self {
        self.saving = saving;
        self
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    #[must_use]
    pub fn saving_flag(&self) -> SavingFlag {
        self.saving.clone()
    }

    #[must_use]
    pub fn service(&self) -> &EntityService<T, C> {
        &self.service
    }

    /// Leave the form without saving.
    pub fn previous_state(&self) {
        self.navigator.navigate(Route::Back);
    }

    /// Persist `form`.
    ///
    /// # Errors
    ///
    /// Returns whatever the create or update call returned; the flag is
    /// lowered and no navigation happens.
    pub async fn save(&self, form: &T) -> Result<T, LibrisError> {
        let result = {
            let _guard = SavingGuard::raise(&self.saving);
            match form.id() {
                Some(_) => self.service.update(form).await,
                None => self.service.create(form).await,
            }
        };

        match result {
            Ok(saved) => {
                tracing::info!(entity = T::NAME, id = ?saved.id(), "saved");
                self.previous_state();
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(entity = T::NAME, error = %err, "save failed");
                Err(err)
            }
        }
    }
}
