use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::{header, Method};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::email_client::{MailTransport, SmtpMailer};
use crate::routes::{
    contact_info, contact_preflight, health_check, method_not_allowed, submit_contact,
    ContactRecipient,
};

/// A built but not yet running server, bound to its listener. Splitting build
/// from run lets the test suite grab the randomly assigned port before the
/// server starts serving.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Builds the application with the production SMTP transport.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let mailer =
            SmtpMailer::new(&configuration.email).context("Failed to configure the mail transport")?;
        Self::build_with_mailer(configuration, Arc::new(mailer)).await
    }

    /// Builds the application around an injected transport. Used by the test
    /// suite to substitute a recording double.
    pub async fn build_with_mailer(
        configuration: Settings,
        mailer: Arc<dyn MailTransport>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            mailer,
            configuration.email.recipient().to_owned(),
            configuration.application.allowed_origin,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    mailer: Arc<dyn MailTransport>,
    recipient: String,
    allowed_origin: String,
) -> Result<Server, std::io::Error> {
    // using web::Data to wrap the shared state in smart pointer(Arc)
    // as App requires the app_data to implement Clone trait for "T"
    // and in Arc<T> T is clonable, no matter what T is
    let mailer: web::Data<dyn MailTransport> = web::Data::from(mailer);
    let recipient = web::Data::new(ContactRecipient(recipient));

    let server = HttpServer::new(move || {
        // The form client is typically served from a different origin, so the
        // contact endpoint has to answer cross-origin requests.
        let cors = if allowed_origin == "*" {
            Cors::default().allow_any_origin().send_wildcard()
        } else {
            Cors::default().allowed_origin(&allowed_origin)
        }
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/api/contact")
                    .route(web::get().to(contact_info))
                    .route(web::post().to(submit_contact))
                    .route(web::method(Method::OPTIONS).to(contact_preflight))
                    // Anything else (PUT, DELETE, ...) gets the structured
                    // 405 body instead of actix's bare default.
                    .default_service(web::route().to(method_not_allowed)),
            )
            .app_data(mailer.clone())
            .app_data(recipient.clone())
    })
    .listen(listener)?
    .run();

    // No .await here
    Ok(server)
}
