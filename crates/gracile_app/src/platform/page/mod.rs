//! Headless page: the document the form lives in, and the submit binding.
pub mod constants;
mod controller;
mod document;
pub mod layout;
pub mod render;

pub use controller::{bind_form, FormController};
pub use document::{AlertElement, DomCommand, Document, FormHandle, PageError, SubmitEvent};
