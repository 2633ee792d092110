//! Reply templates.

pub mod model;

pub use model::{EmailTemplate, EmailTemplateField};
