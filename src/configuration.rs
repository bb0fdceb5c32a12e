use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::{deserialize_bool_from_anything, deserialize_number_from_string};

/// Recipient used when `email.recipient` is left unset. Production deployments
/// are expected to override it via `APP__EMAIL__RECIPIENT`.
pub const DEFAULT_RECIPIENT: &str = "jatinkavani877@gmail.com";

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email: EmailSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Origin allowed to call the contact endpoint cross-origin. `*` permits
    /// any origin, which matches the public nature of a portfolio site.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

/// Settings for the outbound SMTP transport.
///
/// The password is wrapped in [`Secret`] so it never shows up in `Debug`
/// output or log records; access goes through `expose_secret()`.
#[derive(serde::Deserialize, Clone)]
pub struct EmailSettings {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(
        default = "default_smtp_port",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub smtp_port: u16,
    /// `true` selects implicit TLS (SMTPS), `false` selects STARTTLS.
    #[serde(
        default = "default_smtp_secure",
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub smtp_secure: bool,
    pub username: String,
    pub password: Secret<String>,
    pub recipient: Option<String>,
}

impl EmailSettings {
    /// The address contact submissions are delivered to.
    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(DEFAULT_RECIPIENT)
    }
}

fn default_allowed_origin() -> String {
    "*".into()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_smtp_secure() -> bool {
    true
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();

    // Base values come from a top level file named `configuration` with any
    // extension the `config` crate knows how to parse: yaml, json, etc.
    settings.merge(config::File::with_name("configuration").required(false))?;

    // Environment variables override the file, e.g. `APP__EMAIL__USERNAME`
    // maps to `Settings.email.username`.
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    let settings: Settings = settings.try_into()?;

    // Fail fast: a handler must never attempt a send with a half-configured
    // transport, so missing credentials abort startup instead of surfacing
    // as per-request delivery failures.
    if settings.email.username.trim().is_empty()
        || settings.email.password.expose_secret().trim().is_empty()
    {
        return Err(config::ConfigError::Message(
            "email.username and email.password must be set (APP__EMAIL__USERNAME / APP__EMAIL__PASSWORD)".into(),
        ));
    }

    Ok(settings)
}
