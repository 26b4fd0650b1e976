use std::sync::Once;

use dispatcher_core::{update, AppState, Effect, FormField, Msg, Panel, Severity};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dispatch_logging::initialize_for_tests);
}

fn fill(state: AppState, field: FormField, value: &str) -> AppState {
    update(
        state,
        Msg::ManualFieldChanged {
            field,
            value: value.to_string(),
        },
    )
    .0
}

fn open_form(state: AppState) -> AppState {
    update(state, Msg::ManualFormOpened).0
}

#[test]
fn phone_is_stored_as_digits() {
    init_logging();
    let state = open_form(AppState::new());
    let state = fill(state, FormField::Name, "  Carla ");
    let state = fill(state, FormField::Phone, "(11) 98888-7777");
    let (state, effects) = update(state, Msg::ManualSubmitted);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].phone, "11988887777");
    assert_eq!(view.rows[0].name, "Carla");
    assert_eq!(view.panel, Panel::List);
}

#[test]
fn empty_phone_is_rejected_without_mutation() {
    init_logging();
    let state = open_form(AppState::new());
    let state = fill(state, FormField::Name, "Carla");
    let (state, _) = update(state, Msg::ManualSubmitted);

    let view = state.view();
    assert_eq!(view.stats.total, 0);
    assert_eq!(view.panel, Panel::ManualForm);
    assert_eq!(view.form.name, "Carla");
    let notice = view.notice.expect("validation notice");
    assert_eq!(notice.severity, Severity::Warning);
    assert_eq!(notice.text, "Please enter the phone number.");
}

#[test]
fn phone_without_digits_is_rejected() {
    init_logging();
    let state = open_form(AppState::new());
    let state = fill(state, FormField::Phone, "call me");
    let (state, _) = update(state, Msg::ManualSubmitted);

    assert_eq!(state.view().stats.total, 0);
    assert_eq!(
        state.notice().map(|n| n.text.as_str()),
        Some("Invalid phone number.")
    );
}

#[test]
fn submit_keeps_campaign_and_template_but_resets_name_and_phone() {
    init_logging();
    let state = open_form(AppState::new());
    let state = fill(state, FormField::Name, "Carla");
    let state = fill(state, FormField::Phone, "11988887777");
    let state = fill(state, FormField::Campaign, " Natal ");
    let state = fill(state, FormField::Template, "lembrete");
    let (state, _) = update(state, Msg::ManualSubmitted);

    let form = state.form();
    assert_eq!(form.name, "");
    assert_eq!(form.phone, "");
    assert_eq!(form.campaign, " Natal ");
    assert_eq!(form.template, "lembrete");
    assert_eq!(form.focus, FormField::Name);

    let row = &state.view().rows[0];
    assert_eq!(row.campaign, "Natal");
    assert_eq!(row.template, "lembrete");
}

#[test]
fn blank_optional_fields_take_defaults() {
    init_logging();
    let state = open_form(AppState::new());
    let state = fill(state, FormField::Phone, "5511");
    let state = fill(state, FormField::Campaign, "  ");
    let state = fill(state, FormField::Template, "");
    let (state, _) = update(state, Msg::ManualSubmitted);

    let row = &state.view().rows[0];
    assert_eq!(row.name, "Unknown");
    assert_eq!(row.campaign, "General");
    assert_eq!(row.template, "welcome");
}

#[test]
fn manual_form_refused_while_sending() {
    init_logging();
    let state = AppState::with_endpoint("https://hooks.example.com/x");
    let state = open_form(state);
    let state = fill(state, FormField::Phone, "1");
    let (state, _) = update(state, Msg::ManualSubmitted);
    let (state, effects) = update(state, Msg::SendClicked);
    assert!(matches!(effects.as_slice(), [Effect::PostBatch { .. }]));

    let state = open_form(state);
    assert_eq!(state.panel(), Panel::List);

    let state = fill(state, FormField::Phone, "2");
    let (state, _) = update(state, Msg::ManualSubmitted);
    assert_eq!(state.view().stats.total, 1);
}

#[test]
fn focus_moves_between_fields() {
    init_logging();
    let state = open_form(AppState::new());
    let (state, _) = update(state, Msg::ManualFocusMoved { forward: true });
    assert_eq!(state.form().focus, FormField::Phone);
    let (state, _) = update(state, Msg::ManualFocusMoved { forward: false });
    let (state, _) = update(state, Msg::ManualFocusMoved { forward: false });
    assert_eq!(state.form().focus, FormField::Template);
}
