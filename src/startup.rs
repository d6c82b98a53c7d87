use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::routes::{contact, health_check};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let recipient = Recipient(configuration.email_client.recipient_email.clone());
        if recipient.0.is_empty() || configuration.email_client.sender_email.is_empty() {
            tracing::warn!(
                "The sender or recipient address is not configured. Every relayed message will fail to send."
            );
        }
        let allowed_origin = AllowedOrigin::parse(&configuration.application.allowed_origin)?;
        let email_client = configuration.email_client.client()?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        // port 0 asks the OS for a free one, so read back what we got
        let port = listener.local_addr()?.port();
        tracing::info!(port, "Listening for contact form submissions");
        let server = run(
            listener,
            email_client,
            recipient,
            allowed_origin,
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

/// Address that relayed enquiries are delivered to.
pub struct Recipient(pub String);

/// Origin allowed to call the relay from a browser.
#[derive(Clone)]
pub struct AllowedOrigin(HeaderValue);

impl AllowedOrigin {
    pub fn parse(origin: &str) -> Result<Self, anyhow::Error> {
        let value = HeaderValue::from_str(origin)
            .map_err(|_| anyhow::anyhow!("`{}` is not a valid allowed origin", origin))?;
        Ok(Self(value))
    }
}

fn cors_headers(origin: AllowedOrigin) -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.0))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipient: Recipient,
    allowed_origin: AllowedOrigin,
) -> Result<Server, std::io::Error> {
    // web::Data wraps in an Arc, so every worker shares one client
    let email_client = web::Data::new(email_client);
    let recipient = web::Data::new(recipient);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers(allowed_origin.clone()))
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/contact")
                    .route(web::post().to(contact::submit))
                    .route(web::method(Method::OPTIONS).to(contact::preflight))
                    .default_service(web::to(contact::method_not_allowed)),
            )
            .app_data(email_client.clone())
            .app_data(recipient.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
