use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::EmailPolicy;
use crate::routes::dismiss_signup;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::join_waitlist;
use crate::store_client::StoreClient;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener and build the store client. The store settings are
    /// read here once; nothing else in the app looks at the environment.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;

        // with port 0, the OS picks one; remember which
        let port = listener.local_addr()?.port();

        if cfg.store.base_url.is_empty() {
            tracing::warn!("store base_url is not set; every signup will fail");
        }
        let store = cfg.store.client()?;

        let server = run(listener, store, cfg.application.email_policy)?;
        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints.
pub fn run(
    listener: TcpListener,
    store: StoreClient,
    email_policy: EmailPolicy,
) -> Result<Server, anyhow::Error> {
    // `Data` is an `Arc`; every worker gets a clone of the same client (and
    // its connection pool)
    let store = Data::new(store);
    let email_policy = Data::new(email_policy);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/waitlist", web::post().to(join_waitlist))
            .route("/waitlist/dismiss", web::post().to(dismiss_signup))
            .app_data(store.clone())
            .app_data(email_policy.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
