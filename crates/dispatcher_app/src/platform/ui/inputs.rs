use crossterm::event::{Event, KeyEvent};
use dispatcher_core::{AppViewModel, FormField, Msg};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Endpoint,
    ImportPath,
    Form(FormField),
}

/// Cursor-aware editors for every text field. The core state owns the values;
/// these mirror them so keystrokes can be applied with cursor movement.
#[derive(Debug, Default)]
pub struct InputFields {
    endpoint: Input,
    import_path: Input,
    name: Input,
    phone: Input,
    campaign: Input,
    template: Input,
}

impl InputFields {
    pub fn from_view(view: &AppViewModel) -> Self {
        let mut fields = Self::default();
        fields.sync(view);
        fields
    }

    /// Replaces any editor whose value no longer matches the state, e.g. after
    /// the form is reset on submit.
    pub fn sync(&mut self, view: &AppViewModel) {
        sync_input(&mut self.endpoint, &view.endpoint);
        sync_input(&mut self.import_path, &view.import_path);
        for field in FormField::ALL {
            sync_input(self.form_input_mut(field), view.form.value(field));
        }
    }

    pub fn get(&self, target: EditTarget) -> &Input {
        match target {
            EditTarget::Endpoint => &self.endpoint,
            EditTarget::ImportPath => &self.import_path,
            EditTarget::Form(FormField::Name) => &self.name,
            EditTarget::Form(FormField::Phone) => &self.phone,
            EditTarget::Form(FormField::Campaign) => &self.campaign,
            EditTarget::Form(FormField::Template) => &self.template,
        }
    }

    /// Applies a key to the target editor and returns the change message when
    /// the value changed. Pure cursor moves return `None`.
    pub fn edit(&mut self, target: EditTarget, key: KeyEvent) -> Option<Msg> {
        let input = match target {
            EditTarget::Endpoint => &mut self.endpoint,
            EditTarget::ImportPath => &mut self.import_path,
            EditTarget::Form(field) => self.form_input_mut(field),
        };
        let before = input.value().to_string();
        input.handle_event(&Event::Key(key));
        let value = input.value().to_string();
        if value == before {
            return None;
        }
        Some(match target {
            EditTarget::Endpoint => Msg::EndpointChanged(value),
            EditTarget::ImportPath => Msg::ImportPathChanged(value),
            EditTarget::Form(field) => Msg::ManualFieldChanged { field, value },
        })
    }

    fn form_input_mut(&mut self, field: FormField) -> &mut Input {
        match field {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
            FormField::Campaign => &mut self.campaign,
            FormField::Template => &mut self.template,
        }
    }
}

fn sync_input(input: &mut Input, value: &str) {
    if input.value() != value {
        *input = Input::new(value.to_string());
    }
}
