use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("no form element matches {0}")]
    MissingForm(String),
    #[error("form submit handler is already bound")]
    AlreadyBound,
}

/// Index of a form element in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormHandle(usize);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertElement {
    pub text: String,
    pub visible: bool,
}

/// Mutations of the status regions, one per `.text()`/`.show()`/`.hide()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomCommand {
    SetText { element_id: &'static str, text: String },
    Show { element_id: &'static str },
    Hide { element_id: &'static str },
}

/// Native submit event. Unless prevented, the browser would navigate away.
#[derive(Debug)]
pub struct SubmitEvent {
    form: FormHandle,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form: FormHandle) -> Self {
        Self {
            form,
            default_prevented: false,
        }
    }

    pub fn form(&self) -> FormHandle {
        self.form
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormElement {
    id: Option<String>,
}

/// The subset of the page the subscription form touches: forms, text
/// inputs keyed by element id, and alert regions keyed by element id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    forms: Vec<FormElement>,
    inputs: BTreeMap<String, String>,
    alerts: BTreeMap<String, AlertElement>,
    submit_bound: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_form(&mut self, id: Option<&str>) -> FormHandle {
        self.forms.push(FormElement {
            id: id.map(str::to_owned),
        });
        FormHandle(self.forms.len() - 1)
    }

    pub fn add_input(&mut self, id: &str, value: &str) {
        self.inputs.insert(id.to_string(), value.to_string());
    }

    /// Alerts start out visible, as unstyled markup would.
    pub fn add_alert(&mut self, id: &str) {
        self.alerts.insert(
            id.to_string(),
            AlertElement {
                text: String::new(),
                visible: true,
            },
        );
    }

    /// First form with the given id, or the first form at all for `None`.
    pub fn find_form(&self, id: Option<&str>) -> Option<FormHandle> {
        match id {
            Some(id) => self
                .forms
                .iter()
                .position(|form| form.id.as_deref() == Some(id))
                .map(FormHandle),
            None => (!self.forms.is_empty()).then_some(FormHandle(0)),
        }
    }

    pub fn forms(&self) -> impl Iterator<Item = FormHandle> + '_ {
        (0..self.forms.len()).map(FormHandle)
    }

    pub fn value(&self, id: &str) -> Result<&str, PageError> {
        self.inputs
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), PageError> {
        let slot = self
            .inputs
            .get_mut(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?;
        *slot = value.into();
        Ok(())
    }

    pub fn alert(&self, id: &str) -> Result<&AlertElement, PageError> {
        self.alerts
            .get(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    pub fn apply(&mut self, command: DomCommand) -> Result<(), PageError> {
        match command {
            DomCommand::SetText { element_id, text } => self.alert_mut(element_id)?.text = text,
            DomCommand::Show { element_id } => self.alert_mut(element_id)?.visible = true,
            DomCommand::Hide { element_id } => self.alert_mut(element_id)?.visible = false,
        }
        Ok(())
    }

    fn alert_mut(&mut self, id: &str) -> Result<&mut AlertElement, PageError> {
        self.alerts
            .get_mut(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    pub(crate) fn mark_submit_bound(&mut self) -> Result<(), PageError> {
        if self.submit_bound {
            return Err(PageError::AlreadyBound);
        }
        self.submit_bound = true;
        Ok(())
    }
}
