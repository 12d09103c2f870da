//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use tracing::debug;

use trattoria_core::{CollectionState, Entity, Intent, Settled, Store, Success};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Dispatch `intent` and wait for its terminal transition.
///
/// On failure the store's error slot has already been set; it is cleared
/// here once the error is handed back for display, so the store does not
/// keep reporting a failure the user has seen.
pub async fn settle<E: Entity>(
    store: &Store<E>,
    intent: Intent<E>,
    global: &GlobalOpts,
) -> Result<Arc<CollectionState<E>>, CliError> {
    settle_with_payload(store, intent, global)
        .await
        .map(|settled| settled.state)
}

/// Settle an intent whose call returns a single entity, and hand back
/// that entity as the server sent it.
pub async fn settle_entity<E: Entity>(
    store: &Store<E>,
    intent: Intent<E>,
    global: &GlobalOpts,
) -> Result<E, CliError> {
    let kind = intent.kind();
    settle_with_payload(store, intent, global)
        .await?
        .success
        .and_then(Success::into_entity)
        .ok_or_else(|| CliError::Engine {
            message: format!("{} {kind} settled without an entity", E::KIND),
        })
}

async fn settle_with_payload<E: Entity>(
    store: &Store<E>,
    intent: Intent<E>,
    global: &GlobalOpts,
) -> Result<Settled<E>, CliError> {
    let kind = intent.kind();
    let spinner = output::spinner(global, &format!("{} {kind}", E::KIND));
    let result = store.settle_with_payload(intent).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(settled) => Ok(settled),
        Err(err) => {
            debug!(
                entity = %E::KIND,
                %kind,
                last_error = ?store.state().last_error,
                "surfacing failed intent"
            );
            clear_error(store).await;
            Err(err.into())
        }
    }
}

/// Empty the store's error slot once its failure has been reported.
pub async fn clear_error<E: Entity>(store: &Store<E>) {
    if let Err(e) = store.settle(Intent::ClearError).await {
        debug!(entity = %E::KIND, error = %e, "could not clear error slot");
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Render an optional text field for tables and detail views.
pub fn or_dash(value: Option<&str>) -> String {
    value.map_or_else(|| "-".into(), ToOwned::to_owned)
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.into()
}
