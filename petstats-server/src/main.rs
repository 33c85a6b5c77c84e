#![deny(missing_docs)]
//! PetStats server executable.
//!
//! Serves aggregated pet statistics for the clinic over HTTP.

mod config;
mod db;
mod models;
mod openapi;
mod routes;
mod schema;
mod store;

#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use log::info;
#[cfg(not(test))]
use petstats_core::StatisticsService;

#[cfg(not(test))]
use crate::config::ServerConfig;
#[cfg(not(test))]
use crate::db::init_pool;
#[cfg(not(test))]
use crate::routes::{AppState, configure};
#[cfg(not(test))]
use crate::store::DieselClinicStore;

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let pool = init_pool(&config.database_url, config.pool_size).map_err(std::io::Error::other)?;
    let store = Arc::new(DieselClinicStore::new(pool));
    let statistics = StatisticsService::new(store.clone(), store, config.aggregation_mode);
    info!(
        "Statistics aggregation mode: {}",
        statistics.mode().as_str()
    );

    let state = web::Data::new(AppState { statistics });
    let allowed_origins = config.ui_origins.clone();
    let listen_addr = config.host.clone();
    let listen_port = config.port;
    info!("Starting PetStats server on http://{listen_addr}:{listen_port}");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure)
        })
        .bind((listen_addr, listen_port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
