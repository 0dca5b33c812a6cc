use actix_web::{web, App};
use std::sync::Arc;
use localghost_auth::{
    config::EnvConfig,
    db::database_service::DatabaseService,
    flow::AccountFlow,
};

use super::TestContext;

pub struct TestClient {
    pub db: Arc<DatabaseService>,
    pub flow: AccountFlow,
    pub config: EnvConfig,
}

impl TestClient {
    pub fn new(ctx: &TestContext) -> Self {
        TestClient {
            db: Arc::clone(&ctx.db),
            flow: ctx.flow.clone(),
            config: ctx.config.clone(),
        }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.flow.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .configure(localghost_auth::routes::configure_routes)
    }
}
