use crate::configuration::{EmailSettings, Settings};
use crate::domain::SubmitterEmail;
use crate::email_client::EmailClient;
use crate::routes::*;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_delivery = EmailDelivery::new(configuration.email)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, email_delivery)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// The pieces needed to relay a submission. Both halves are optional: the
/// contact endpoint checks them per request and reports a configuration
/// error to the operator when one is missing.
pub struct EmailDelivery {
    pub client: Option<EmailClient>,
    pub recipient: Option<SubmitterEmail>,
}

impl EmailDelivery {
    pub fn new(settings: EmailSettings) -> Result<Self, anyhow::Error> {
        let recipient = match &settings.recipient {
            Some(address) => Some(
                SubmitterEmail::parse(address)
                    .map_err(|e| anyhow::anyhow!("Invalid contact recipient: {}", e))?,
            ),
            None => None,
        };
        let client = match settings.sendgrid_api_key.clone() {
            Some(api_key) => {
                let sender = settings
                    .sender()
                    .map_err(|e| anyhow::anyhow!("Invalid sender address: {}", e))?;
                Some(EmailClient::new(
                    settings.base_url.clone(),
                    sender,
                    settings.sender_name.clone(),
                    api_key,
                    settings.timeout(),
                ))
            }
            None => None,
        };
        Ok(Self { client, recipient })
    }
}

pub fn run(listener: TcpListener, email_delivery: EmailDelivery) -> Result<Server, std::io::Error> {
    let email_delivery = web::Data::new(email_delivery);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(health_check)
            .service(home)
            .service(contact)
            .app_data(email_delivery.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
