use std::collections::BTreeSet;

use dispatch_logging::{dispatch_debug, dispatch_info, dispatch_warn};

use crate::records::parse_contacts;
use crate::{AppState, BatchId, BatchOutcome, Effect, Msg, Panel, SendCycle, SendStatus, Severity};

const NOTHING_TO_SEND: &str = "All contacts have already been sent.";
const MISSING_ENDPOINT: &str = "Please configure a valid webhook URL.";
const MISSING_IMPORT_PATH: &str = "Please enter the path of the file to import.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConfigToggled => {
            state.panel = match state.panel {
                Panel::Endpoint => Panel::List,
                _ => Panel::Endpoint,
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::EndpointChanged(url) => {
            if url != state.endpoint {
                state.endpoint = url;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ImportPromptOpened => {
            if !state.is_busy() {
                state.panel = Panel::ImportPrompt;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ImportPathChanged(path) => {
            state.import_path = path;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ImportPathSubmitted => submit_import_path(&mut state),
        Msg::ImportLoaded { source, content } => {
            let drafts = parse_contacts(&content);
            let added = state.store.import(drafts);
            dispatch_info!("Imported {} contacts from {}", added, source);
            if added == 0 {
                state.set_notice(Severity::Warning, format!("No contacts found in {source}."));
            } else {
                state.set_notice(
                    Severity::Info,
                    format!("Imported {added} contacts from {source}."),
                );
            }
            Vec::new()
        }
        Msg::ImportFailed { source, message } => {
            dispatch_warn!("Import of {} failed: {}", source, message);
            state.set_notice(
                Severity::Error,
                format!("Could not read {source}: {message}"),
            );
            Vec::new()
        }
        Msg::ManualFormOpened => {
            if !state.is_busy() {
                state.panel = Panel::ManualForm;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ManualFieldChanged { field, value } => {
            state.form.set_value(field, value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ManualFocusMoved { forward } => {
            state.form.focus = if forward {
                state.form.focus.next()
            } else {
                state.form.focus.previous()
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::ManualSubmitted => {
            submit_manual(&mut state);
            Vec::new()
        }
        Msg::PanelClosed => {
            if state.panel != Panel::List {
                state.panel = Panel::List;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            if state.is_busy() {
                dispatch_debug!("Clear refused while a batch is in flight");
            } else if !state.store.is_empty() {
                state.store.clear();
                state.notice = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SendClicked => start_cycle(&mut state),
        Msg::BatchFinished { batch_id, outcome } => {
            finish_cycle(&mut state, batch_id, outcome);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn submit_import_path(state: &mut AppState) -> Vec<Effect> {
    if state.is_busy() {
        return Vec::new();
    }
    let path = state.import_path.trim().to_string();
    if path.is_empty() {
        state.set_notice(Severity::Warning, MISSING_IMPORT_PATH);
        return Vec::new();
    }
    state.import_path.clear();
    state.panel = Panel::List;
    state.mark_dirty();
    vec![Effect::ReadImportFile { path }]
}

fn submit_manual(state: &mut AppState) {
    if state.is_busy() {
        return;
    }
    match state.form.to_contact() {
        Ok(draft) => {
            let id = state.store.push(draft);
            dispatch_debug!("Manual contact {} added", id);
            state.form.reset_after_submit();
            state.panel = Panel::List;
            state.notice = None;
            state.mark_dirty();
        }
        Err(err) => {
            state.set_notice(Severity::Warning, err.message());
        }
    }
}

fn start_cycle(state: &mut AppState) -> Vec<Effect> {
    if state.is_busy() || state.store.is_empty() {
        return Vec::new();
    }

    let endpoint = state.endpoint.trim().to_string();
    if endpoint.is_empty() {
        state.panel = Panel::Endpoint;
        state.set_notice(Severity::Warning, MISSING_ENDPOINT);
        return Vec::new();
    }

    let ids: BTreeSet<_> = state.store.pending_ids().into_iter().collect();
    if ids.is_empty() {
        state.set_notice(Severity::Info, NOTHING_TO_SEND);
        return Vec::new();
    }

    state.store.set_status(&ids, SendStatus::Sending, None);
    let contacts = ids
        .iter()
        .filter_map(|id| state.store.get(*id))
        .map(|contact| contact.to_outbound())
        .collect::<Vec<_>>();

    let batch_id = state.allocate_batch_id();
    dispatch_info!(
        "Starting batch {} with {} contacts to {}",
        batch_id,
        contacts.len(),
        endpoint
    );
    state.cycle = Some(SendCycle {
        batch_id,
        endpoint: endpoint.clone(),
        ids,
    });
    state.notice = None;
    state.mark_dirty();

    vec![Effect::PostBatch {
        batch_id,
        endpoint,
        contacts,
    }]
}

fn finish_cycle(state: &mut AppState, batch_id: BatchId, outcome: BatchOutcome) {
    let cycle = match state.cycle.take() {
        Some(cycle) if cycle.batch_id == batch_id => cycle,
        other => {
            dispatch_warn!("Ignoring result for batch {} which is not in flight", batch_id);
            state.cycle = other;
            return;
        }
    };

    let count = cycle.ids.len();
    match outcome.error_message() {
        None => {
            state.store.set_status(&cycle.ids, SendStatus::Success, None);
            dispatch_info!("Batch {} delivered ({} contacts)", batch_id, count);
            state.set_notice(Severity::Info, format!("Batch of {count} contacts delivered."));
        }
        Some(message) => {
            state
                .store
                .set_status(&cycle.ids, SendStatus::Error, Some(&message));
            dispatch_warn!("Batch {} failed: {}", batch_id, message);
            state.set_notice(
                Severity::Error,
                format!("Batch of {count} contacts failed: {message}"),
            );
        }
    }
    state.mark_dirty();
}
