use gracile_core::{update, AppState, AppViewModel, Effect, FieldName, FormInputSet, FormKind, Msg};
use gracile_logging::{gracile_debug, gracile_info};

use super::constants::{ALERT_ERROR, ALERT_SUCCESS};
use super::render::render;
use super::{Document, FormHandle, PageError, SubmitEvent};

/// Page setup, run once per document: checks the elements the form needs,
/// binds the submit handler and hides both alerts.
pub fn bind_form(document: &mut Document, form: FormKind) -> Result<FormController, PageError> {
    let form_handle = document
        .find_form(form.form_id())
        .ok_or_else(|| PageError::MissingForm(describe_selector(form)))?;
    for field in FieldName::ALL {
        document.value(field.as_str())?;
    }
    document.alert(ALERT_ERROR)?;
    document.alert(ALERT_SUCCESS)?;
    document.mark_submit_bound()?;

    gracile_info!("Bound submit handler for {} form", form);
    let mut controller = FormController {
        form,
        form_handle,
        state: AppState::new(form),
    };
    controller.dispatch(document, Msg::PageLoaded)?;
    Ok(controller)
}

fn describe_selector(form: FormKind) -> String {
    match form.form_id() {
        Some(id) => format!("#{id}"),
        None => "form".to_string(),
    }
}

/// Submit handler bound to one form. Owns the core state; the document
/// is handed in on every call.
#[derive(Debug)]
pub struct FormController {
    form: FormKind,
    form_handle: FormHandle,
    state: AppState,
}

impl FormController {
    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn form_handle(&self) -> FormHandle {
        self.form_handle
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Handles a native submit. Events for other forms are left alone.
    pub fn on_submit(
        &mut self,
        document: &mut Document,
        event: &mut SubmitEvent,
    ) -> Result<Vec<Effect>, PageError> {
        if !self.is_bound_to(event.form()) {
            gracile_debug!("Ignoring submit for unbound form {:?}", event.form());
            return Ok(Vec::new());
        }
        event.prevent_default();

        let fields = read_fields(document)?;
        self.dispatch(document, Msg::FormSubmitted(fields))
    }

    /// The test page binds every form; the subscriptions page only its own.
    fn is_bound_to(&self, handle: FormHandle) -> bool {
        self.form.form_id().is_none() || handle == self.form_handle
    }

    /// Feeds any message through the update loop and re-renders if needed.
    pub fn dispatch(&mut self, document: &mut Document, msg: Msg) -> Result<Vec<Effect>, PageError> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if self.state.consume_dirty() {
            for command in render(&self.state.view()) {
                document.apply(command)?;
            }
        }
        Ok(effects)
    }
}

fn read_fields(document: &Document) -> Result<FormInputSet, PageError> {
    FieldName::ALL
        .into_iter()
        .map(|field| Ok((field, document.value(field.as_str())?.to_string())))
        .collect()
}
