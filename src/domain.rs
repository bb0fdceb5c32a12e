pub mod contact_form;
pub mod composed_email;

pub use contact_form::{sanitize_field, ContactForm, ContactSubmission, MAX_FIELD_LENGTH};
pub use composed_email::ComposedEmail;
