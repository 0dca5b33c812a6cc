use actix_web::{middleware::Logger, web, App, HttpServer};
use localghost_auth::config::EnvConfig;
use localghost_auth::db::database_service::DatabaseService;
use localghost_auth::flow::AccountFlow;
use localghost_auth::routes::configure_routes;
use localghost_auth::utils::mail::{Mailer, ResendMailer};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let database_service = Arc::new(
        DatabaseService::new(
            &config.db_url,
        )
            .await
            .expect("Failed to initialize DatabaseService")
    );

    let mailer: Arc<dyn Mailer> = Arc::new(
        ResendMailer::new(&config.mail).expect("Failed to initialize mail transport")
    );
    let flow = AccountFlow::from_config(Arc::clone(&database_service), mailer, &config);

    if config.public_hostname.is_none() {
        tracing::warn!("HOSTNAME is not set; registrations will fail before mail is sent");
    }

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&database_service)))
            .app_data(web::Data::new(flow.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
