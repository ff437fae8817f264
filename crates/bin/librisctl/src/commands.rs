//! Command execution — maps one CLI action onto the application services.

use libris_app::ports::{HttpClient, Navigator, Route};
use libris_app::resolve::{Resolution, resolve, route_id};
use libris_app::services::delete_dialog::DeleteDialog;
use libris_app::services::editor::Editor;
use libris_app::services::entity_service::EntityService;
use libris_domain::book::Book;
use libris_domain::borrowing::Borrowing;
use libris_domain::category::Category;
use libris_domain::error::{LibrisError, ValidationError};
use libris_domain::resource::Resource;
use libris_domain::spaces::Spaces;
use libris_domain::user::User;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Action, EntityKind};

/// What a command produced.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// A document to print.
    Output(Value),
    /// The workflow sent the user to another view instead.
    Navigated(Route),
    /// The entity is gone.
    Deleted,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{entity} records are read-only")]
    ReadOnly { entity: &'static str },

    #[error("invalid JSON document")]
    Input(#[source] serde_json::Error),

    #[error("failed to render output")]
    Output(#[source] serde_json::Error),

    #[error(transparent)]
    Libris(#[from] LibrisError),
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        Self::Libris(err.into())
    }
}

/// Navigator for a terminal session: there is no view to move to, so
/// navigations are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(%route, "navigate");
    }
}

/// Run `action` against the resource selected by `entity`.
///
/// # Errors
///
/// Returns [`CommandError::ReadOnly`] for writes to users, and otherwise
/// whatever the underlying workflow reports.
pub async fn dispatch<C, N>(
    client: C,
    navigator: N,
    entity: EntityKind,
    action: Action,
) -> Result<Outcome, CommandError>
where
    C: HttpClient,
    N: Navigator,
{
    match entity {
        EntityKind::Books => run::<Book, _, _>(client, navigator, action).await,
        EntityKind::Borrowings => run::<Borrowing, _, _>(client, navigator, action).await,
        EntityKind::Spaces => run::<Spaces, _, _>(client, navigator, action).await,
        EntityKind::Categories => run::<Category, _, _>(client, navigator, action).await,
        EntityKind::Users if action.writes() => Err(CommandError::ReadOnly {
            entity: User::NAME,
        }),
        EntityKind::Users => run::<User, _, _>(client, navigator, action).await,
    }
}

async fn run<T, C, N>(client: C, navigator: N, action: Action) -> Result<Outcome, CommandError>
where
    T: Resource,
    C: HttpClient,
    N: Navigator,
{
    let service = EntityService::<T, C>::new(client);
    match action {
        Action::List(args) => {
            let page = service.query(&args.options()).await?;
            output(&ListOutput {
                total_count: page.total_count,
                items: page.items,
            })
        }
        Action::Get { id } => {
            let id = route_id::<T>(Some(id.as_str()))?;
            match resolve(id, |id| service.find(id), &navigator).await? {
                Resolution::Resolved(entity) => output(&entity),
                Resolution::Redirected(route) => Ok(Outcome::Navigated(route)),
            }
        }
        Action::Create { json } => output(&service.create(&parse::<T>(&json)?).await?),
        Action::Update { json } => output(&service.update(&parse::<T>(&json)?).await?),
        Action::Patch { json } => output(&service.partial_update(&parse::<T>(&json)?).await?),
        Action::Save { json } => {
            let form = parse::<T>(&json)?;
            let editor = Editor::new(service, navigator);
            output(&editor.save(&form).await?)
        }
        Action::Delete { id } => {
            let id = route_id::<T>(Some(id.as_str()))?
                .ok_or(ValidationError::MissingId { entity: T::NAME })?;
            DeleteDialog::new(&service).confirm_delete(id).await?;
            Ok(Outcome::Deleted)
        }
        Action::Options { selected } => {
            let selected = match route_id::<T>(selected.as_deref())? {
                Some(id) => service.find(id).await?,
                None => None,
            };
            output(&service.relationship_options(selected.as_ref()).await?)
        }
    }
}

#[derive(Serialize)]
struct ListOutput<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    total_count: Option<u64>,
    items: Vec<T>,
}

fn parse<T: Resource>(json: &str) -> Result<T, CommandError> {
    serde_json::from_str(json).map_err(CommandError::Input)
}

fn output(value: &impl Serialize) -> Result<Outcome, CommandError> {
    serde_json::to_value(value)
        .map(Outcome::Output)
        .map_err(CommandError::Output)
}
