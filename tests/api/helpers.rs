use once_cell::sync::Lazy;
use wakewatch::configuration::get_configuration;
use wakewatch::domain::EmailPolicy;
use wakewatch::startup::Application;
use wakewatch::telemetry::get_subscriber;
use wakewatch::telemetry::init_subscriber;
use wiremock::MockServer;

/// Init the tracing subscriber once only. To see logs, set `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks have different types, hence the duplicated arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).unwrap();
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).unwrap();
        }
    };
});

pub const TEST_API_KEY: &str = "test-anon-key";

pub struct TestApp {
    pub addr: String,
    /// Stands in for the hosted `email_signups` table
    pub store_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_home(
        &self,
        query: &str,
    ) -> reqwest::Response {
        self.api_client
            .get(format!("{}/{query}", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    /// `POST /waitlist`, as a browser would send it
    pub async fn post_waitlist(
        &self,
        body: String,
    ) -> reqwest::Response {
        self.post_form("waitlist", body).await
    }

    pub async fn post_dismiss(
        &self,
        body: String,
    ) -> reqwest::Response {
        self.post_form("waitlist/dismiss", body).await
    }

    async fn post_form(
        &self,
        path: &str,
        body: String,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/{path}", self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("execute request")
    }
}

/// urlencoded `email` + `surface`
pub fn form_body(
    email: &str,
    surface: &str,
) -> String {
    serde_urlencoded::to_string([("email", email), ("surface", surface)]).unwrap()
}

/// Spawn the app on a random port, with the store pointed at a `MockServer`
pub async fn spawn_app() -> TestApp { spawn(true, EmailPolicy::Native).await }

/// As `spawn_app`, but checking emails with `policy`
pub async fn spawn_app_with_policy(policy: EmailPolicy) -> TestApp { spawn(true, policy).await }

/// Spawn the app as it would run with no store variables set
pub async fn spawn_app_without_store() -> TestApp { spawn(false, EmailPolicy::Native).await }

async fn spawn(
    with_store: bool,
    policy: EmailPolicy,
) -> TestApp {
    Lazy::force(&TRACING);

    let store_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        // port 0: the OS picks a free port, retrieved later with `get_port`
        cfg.application.port = 0;
        cfg.application.email_policy = policy;
        cfg.store.base_url = match with_store {
            true => store_server.uri(),
            false => String::new(),
        };
        cfg.store.api_key = secrecy::Secret::new(TEST_API_KEY.to_string());
        cfg
    };

    let app = Application::build(cfg).await.expect("build app");
    let addr = format!("http://127.0.0.1:{}", app.get_port());
    tokio::spawn(app.run_until_stopped());

    TestApp {
        addr,
        store_server,
        api_client: reqwest::Client::new(),
    }
}
