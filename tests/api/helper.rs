use contact_form::configuration::{get_configuration, Settings};
use contact_form::startup::Application;
use contact_form::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_home(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spin up an application instance on a random port, pointed at a wiremock
/// stand-in for SendGrid. `customize` can override any setting, e.g. drop
/// the API key to exercise the configuration failure paths.
pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let mut configuration = get_configuration().expect("Failed to read configuration.");
    configuration.application.port = 0;
    configuration.email.base_url = email_server.uri();
    configuration.email.sendgrid_api_key = Some(Secret::new("sendgrid-test-key".to_string()));
    configuration.email.recipient = Some("owner@codewhiz.co".to_string());
    configuration.email.timeout_milliseconds = 200;
    customize(&mut configuration);

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        email_server,
    }
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "A",
        "email": "a@b.co",
        "subject": "Hi",
        "message": "Hello"
    })
}
