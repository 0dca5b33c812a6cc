use actix_web::{get, http::header::LOCATION, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::webutils::{login_redirect, session_user};

/// Self-hosted services behind the reverse proxy: display name and path on the public host.
pub const SERVICES: &[(&str, &str)] = &[
    ("Nextcloud", "/nextcloud"),
    ("Jellyfin", "/jellyfin/"),
    ("GhostLog", "/GhostLog"),
];

#[derive(Serialize, Deserialize, Debug)]
pub struct ServiceLink {
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ServicesRes {
    pub services: Vec<ServiceLink>,
}

fn public_url(config: &EnvConfig, path: &str) -> Result<String, AppError> {
    let host = config
        .public_hostname
        .as_deref()
        .ok_or_else(|| AppError::Config("HOSTNAME environment variable not set".into()))?;
    Ok(format!("https://{host}{path}"))
}

fn external_redirect(url: String) -> HttpResponse {
    HttpResponse::Found().insert_header((LOCATION, url)).finish()
}

#[get("/services")]
pub async fn services(
    req: HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = session_user(&req, &db).await? else {
        return Ok(login_redirect(&req));
    };
    info!("User {} accessed the services page", user.id);

    let links = SERVICES
        .iter()
        .map(|(name, path)| -> Result<ServiceLink, AppError> {
            Ok(ServiceLink { name: name.to_string(), url: public_url(&config, path)? })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(HttpResponse::Ok().json(ServicesRes { services: links }))
}

#[get("/services/nextcloud")]
pub async fn nextcloud(
    req: HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = session_user(&req, &db).await? else {
        return Ok(login_redirect(&req));
    };
    info!("User {} clicked Nextcloud", user.id);
    Ok(external_redirect(public_url(&config, "/nextcloud")?))
}

#[get("/services/jellyfin")]
pub async fn jellyfin(
    req: HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = session_user(&req, &db).await? else {
        return Ok(login_redirect(&req));
    };
    info!("User {} clicked Jellyfin", user.id);
    Ok(external_redirect(public_url(&config, "/jellyfin/")?))
}

// The blog is public; the session only matters for the access log.
#[get("/ghostblog")]
pub async fn ghostblog(
    req: HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
) -> Result<HttpResponse, AppError> {
    match session_user(&req, &db).await? {
        Some(user) => info!("User {} clicked GhostLog", user.id),
        None => info!("Anonymous visitor clicked GhostLog"),
    }
    Ok(external_redirect(public_url(&config, "/GhostLog")?))
}
