//! Development backend for image inspections
//!
//! Accepts the multipart create request (`images` parts plus a JSON
//! `descriptions` list) and serves the list, detail, image and delete
//! endpoints from memory.

pub mod config;
pub mod constants;
pub mod handlers;
pub mod state;

use actix_web::web;
use state::AppState;

/// Register state, multipart limits and every route
pub fn configure(state: web::Data<AppState>) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        let limits = state.limits();
        cfg.app_data(state.clone())
            .app_data(handlers::create::multipart_config(&limits))
            .service(handlers::health::health)
            .service(handlers::create::create)
            .service(handlers::inspections::list)
            .service(handlers::inspections::show)
            .service(handlers::inspections::remove)
            .service(handlers::inspections::image);
    }
}
