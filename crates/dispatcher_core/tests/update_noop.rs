use dispatcher_core::{update, AppState, Msg};

#[test]
fn tick_leaves_state_untouched() {
    let state = AppState::with_endpoint("https://hooks.example.com/contacts");
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_mark_dirty() {
    let (mut state, _) = update(
        AppState::new(),
        Msg::ImportLoaded {
            source: "list.csv".to_string(),
            content: "name,phone\nAna,1\n".to_string(),
        },
    );
    assert!(state.consume_dirty());

    let (mut next, effects) = update(state, Msg::Tick);

    assert!(!next.consume_dirty());
    assert!(effects.is_empty());
}
