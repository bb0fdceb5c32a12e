use crate::domain::ContactSubmission;

/// The message handed to the mail transport: built per request from a
/// sanitized submission, dispatched once, then discarded.
#[derive(Debug, Clone)]
pub struct ComposedEmail {
    pub subject: String,
    pub html_body: String,
    /// Sanitized sender email, set as the reply-to so the site owner can
    /// answer directly from their inbox.
    pub reply_to: String,
}

impl ComposedEmail {
    pub fn from_submission(submission: &ContactSubmission) -> Self {
        let subject = if submission.subject().is_empty() {
            format!("Contact Form - {}", submission.name())
        } else {
            format!("{} - Contact Form - {}", submission.subject(), submission.name())
        };

        let phone = if submission.phone().is_empty() {
            "Not provided"
        } else {
            submission.phone()
        };

        // Sanitized fields contain no angle brackets, so interpolating them
        // into markup cannot open or close a tag.
        let mut html_body = String::new();
        html_body.push_str(&format!(
            "<p><strong>Name:</strong> {}</p>",
            submission.name()
        ));
        html_body.push_str(&format!(
            "<p><strong>Email:</strong> <a href=\"mailto:{0}\">{0}</a></p>",
            submission.email()
        ));
        html_body.push_str(&format!("<p><strong>Phone:</strong> {}</p>", phone));
        if !submission.subject().is_empty() {
            html_body.push_str(&format!(
                "<p><strong>Subject:</strong> {}</p>",
                submission.subject()
            ));
        }
        html_body.push_str("<hr />");
        html_body.push_str(&format!("<p>{}</p>", submission.message()));

        Self {
            subject,
            html_body,
            reply_to: submission.email().to_owned(),
        }
    }
}
