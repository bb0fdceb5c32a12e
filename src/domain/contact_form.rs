use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

/// Upper bound applied to every form field after trimming and stripping.
pub const MAX_FIELD_LENGTH: usize = 1000;

/// The raw wire shape of a contact submission.
///
/// Every field is kept as a `serde_json::Value` on purpose: the form client
/// performs no validation, so a field may be missing, null, a string, or any
/// other JSON type. Anything that is not a string collapses to the empty
/// string during sanitization.
#[derive(serde::Deserialize, Default)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub subject: Value,
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub phone: Value,
}

/// The single transform applied to every field, required or optional:
/// drop every `<` and `>`, trim, cap at [`MAX_FIELD_LENGTH`] graphemes.
///
/// Stripping runs before the trim so a bracket can never shield surrounding
/// whitespace from it (`"<  a"` must collapse to `"a"` in one pass), and the
/// trailing trim after the cut keeps the transform idempotent when the
/// truncation lands on whitespace.
pub fn sanitize_field(raw: &Value) -> String {
    let text = match raw {
        Value::String(s) => s.as_str(),
        _ => "",
    };

    let stripped: String = text.chars().filter(|c| *c != '<' && *c != '>').collect();

    // A grapheme is defined by the Unicode standard as a "user-perceived"
    // character: `å` is a single grapheme, but it is composed of two characters
    // (`a` and `̊`). Truncating on graphemes never splits one apart.
    stripped
        .trim()
        .graphemes(true)
        .take(MAX_FIELD_LENGTH)
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[derive(Debug, thiserror::Error)]
#[error("name, email and message are required")]
pub struct MissingRequiredFields;

/// A contact submission that passed validation, with all five fields
/// sanitized. This is the only shape the mail composition ever sees.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
    phone: String,
}

impl ContactSubmission {
    /// Sanitizes every field and requires `name`, `email` and `message` to be
    /// non-empty afterwards.
    ///
    /// Validation runs on the sanitized values, so a field made of nothing but
    /// whitespace is rejected instead of producing an email with a blank
    /// field in it.
    pub fn parse(form: ContactForm) -> Result<Self, MissingRequiredFields> {
        let name = sanitize_field(&form.name);
        let email = sanitize_field(&form.email);
        let subject = sanitize_field(&form.subject);
        let message = sanitize_field(&form.message);
        let phone = sanitize_field(&form.phone);

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(MissingRequiredFields);
        }

        Ok(Self {
            name,
            email,
            subject,
            message,
            phone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}
