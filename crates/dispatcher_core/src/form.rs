use crate::contact::{digits_only, NewContact, DEFAULT_CAMPAIGN, DEFAULT_TEMPLATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Phone,
    Campaign,
    Template,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Phone,
        FormField::Campaign,
        FormField::Template,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Phone,
            FormField::Phone => FormField::Campaign,
            FormField::Campaign => FormField::Template,
            FormField::Template => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Template,
            FormField::Phone => FormField::Name,
            FormField::Campaign => FormField::Phone,
            FormField::Template => FormField::Campaign,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name (optional)",
            FormField::Phone => "Phone *",
            FormField::Campaign => "Campaign",
            FormField::Template => "Template",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingPhone,
    InvalidPhone,
}

impl FormError {
    pub fn message(self) -> &'static str {
        match self {
            FormError::MissingPhone => "Please enter the phone number.",
            FormError::InvalidPhone => "Invalid phone number.",
        }
    }
}

/// Manual-entry form. Campaign and template survive a submit so repeated
/// entries for the same campaign only need name and phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualForm {
    pub name: String,
    pub phone: String,
    pub campaign: String,
    pub template: String,
    pub focus: FormField,
}

impl Default for ManualForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            campaign: DEFAULT_CAMPAIGN.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            focus: FormField::default(),
        }
    }
}

impl ManualForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Campaign => &self.campaign,
            FormField::Template => &self.template,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Phone => self.phone = value,
            FormField::Campaign => self.campaign = value,
            FormField::Template => self.template = value,
        }
    }

    /// Validates without mutating.
    pub fn to_contact(&self) -> Result<NewContact, FormError> {
        if self.phone.trim().is_empty() {
            return Err(FormError::MissingPhone);
        }
        if digits_only(&self.phone).is_empty() {
            return Err(FormError::InvalidPhone);
        }
        Ok(NewContact::from_raw(
            &self.name,
            &self.phone,
            Some(&self.campaign),
            Some(&self.template),
        ))
    }

    pub(crate) fn reset_after_submit(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.focus = FormField::Name;
    }
}
