use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dispatcher_core::{AppViewModel, Msg, Panel};

use super::ui::inputs::EditTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Dispatch(Msg),
    /// Forward the key to a text editor.
    Edit(EditTarget),
    ScrollUp,
    ScrollDown,
    Ignore,
}

/// Maps a key press to an action given what is on screen. Disabled controls
/// map to `Ignore` so the core never sees them.
pub fn map_key(key: KeyEvent, view: &AppViewModel) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match view.panel {
        Panel::List => map_list_key(key, view),
        Panel::Endpoint => match key.code {
            KeyCode::Esc | KeyCode::Enter => KeyAction::Dispatch(Msg::ConfigToggled),
            _ => KeyAction::Edit(EditTarget::Endpoint),
        },
        Panel::ImportPrompt => match key.code {
            KeyCode::Esc => KeyAction::Dispatch(Msg::PanelClosed),
            KeyCode::Enter => KeyAction::Dispatch(Msg::ImportPathSubmitted),
            _ => KeyAction::Edit(EditTarget::ImportPath),
        },
        Panel::ManualForm => match key.code {
            KeyCode::Esc => KeyAction::Dispatch(Msg::PanelClosed),
            KeyCode::Enter => KeyAction::Dispatch(Msg::ManualSubmitted),
            KeyCode::Tab | KeyCode::Down => {
                KeyAction::Dispatch(Msg::ManualFocusMoved { forward: true })
            }
            KeyCode::BackTab | KeyCode::Up => {
                KeyAction::Dispatch(Msg::ManualFocusMoved { forward: false })
            }
            _ => KeyAction::Edit(EditTarget::Form(view.form.focus)),
        },
    }
}

fn map_list_key(key: KeyEvent, view: &AppViewModel) -> KeyAction {
    let enabled = |allowed: bool, msg: Msg| {
        if allowed {
            KeyAction::Dispatch(msg)
        } else {
            KeyAction::Ignore
        }
    };

    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('i') => enabled(view.editing_enabled(), Msg::ImportPromptOpened),
        KeyCode::Char('a') => enabled(view.editing_enabled(), Msg::ManualFormOpened),
        KeyCode::Char('x') => enabled(view.clear_enabled(), Msg::ClearClicked),
        KeyCode::Char('s') => enabled(view.send.enabled, Msg::SendClicked),
        KeyCode::Char('e') => KeyAction::Dispatch(Msg::ConfigToggled),
        KeyCode::Esc => enabled(view.notice.is_some(), Msg::NoticeDismissed),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::ScrollDown,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatcher_core::{update, AppState, FormField};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_state() -> AppState {
        let (state, _) = update(
            AppState::with_endpoint("http://localhost/hook"),
            Msg::ImportLoaded {
                source: "t.csv".to_string(),
                content: "name,phone\nAna,1\n".to_string(),
            },
        );
        state
    }

    #[test]
    fn list_keys_dispatch_when_idle() {
        let view = loaded_state().view();
        assert_eq!(
            map_key(press(KeyCode::Char('s')), &view),
            KeyAction::Dispatch(Msg::SendClicked)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('x')), &view),
            KeyAction::Dispatch(Msg::ClearClicked)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a')), &view),
            KeyAction::Dispatch(Msg::ManualFormOpened)
        );
        assert_eq!(map_key(press(KeyCode::Char('q')), &view), KeyAction::Quit);
    }

    #[test]
    fn controls_are_disabled_while_sending() {
        let (state, _) = update(loaded_state(), Msg::SendClicked);
        let view = state.view();
        assert!(view.busy);

        for code in ['i', 'a', 'x', 's'] {
            assert_eq!(map_key(press(KeyCode::Char(code)), &view), KeyAction::Ignore);
        }
        assert_eq!(
            map_key(press(KeyCode::Char('e')), &view),
            KeyAction::Dispatch(Msg::ConfigToggled)
        );
    }

    #[test]
    fn empty_list_cannot_be_cleared_or_sent() {
        let view = AppState::with_endpoint("http://localhost/hook").view();
        assert_eq!(map_key(press(KeyCode::Char('x')), &view), KeyAction::Ignore);
        assert_eq!(map_key(press(KeyCode::Char('s')), &view), KeyAction::Ignore);
    }

    #[test]
    fn form_keys_edit_focused_field() {
        let (state, _) = update(AppState::new(), Msg::ManualFormOpened);
        let (state, _) = update(state, Msg::ManualFocusMoved { forward: true });
        let view = state.view();

        assert_eq!(
            map_key(press(KeyCode::Char('1')), &view),
            KeyAction::Edit(EditTarget::Form(FormField::Phone))
        );
        assert_eq!(
            map_key(press(KeyCode::Enter), &view),
            KeyAction::Dispatch(Msg::ManualSubmitted)
        );
        assert_eq!(
            map_key(press(KeyCode::BackTab), &view),
            KeyAction::Dispatch(Msg::ManualFocusMoved { forward: false })
        );
        // 'q' is text here, not quit
        assert_eq!(
            map_key(press(KeyCode::Char('q')), &view),
            KeyAction::Edit(EditTarget::Form(FormField::Phone))
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let (state, _) = update(AppState::new(), Msg::ConfigToggled);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, &state.view()), KeyAction::Quit);
    }
}
