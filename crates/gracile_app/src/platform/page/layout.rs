use gracile_core::{FieldName, FormKind};

use super::constants::{ALERT_ERROR, ALERT_SUCCESS};
use super::Document;

/// Builds the page a form kind is served on: the form, its three inputs
/// (empty) and both alert regions.
pub fn subscription_page(form: FormKind) -> Document {
    let mut document = Document::new();

    document.add_alert(ALERT_ERROR);
    document.add_alert(ALERT_SUCCESS);
    document.add_form(form.form_id());
    for field in FieldName::ALL {
        document.add_input(field.as_str(), "");
    }

    document
}
