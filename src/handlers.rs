//! HTTP routes

use crate::app_state::AppState;
use crate::fetcher::fetch_menu_data;
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

pub const MENU_UNAVAILABLE: &str = "Could not retrieve menu data or no menu items found.";

/// Current menu as a JSON array of `{name, description, price}`
#[get("/menu")]
async fn get_menu(data: web::Data<AppState>) -> impl Responder {
    let source = data.source.clone();
    let metrics = data.metrics.clone();

    let menu = match web::block(move || fetch_menu_data(source.as_ref(), &metrics)).await {
        Ok(menu) => menu,
        Err(e) => {
            log::error!("Menu fetch task failed: {}", e);
            Vec::new()
        }
    };

    if menu.is_empty() {
        return HttpResponse::InternalServerError().json(json!({ "error": MENU_UNAVAILABLE }));
    }
    HttpResponse::Ok().json(menu)
}

#[get("/metrics")]
async fn get_metrics(data: web::Data<AppState>) -> impl Responder {
    let snapshot = data.metrics.snapshot();
    HttpResponse::Ok().json(json!({
        "success_rate": snapshot.success_rate(),
        "fetches": snapshot,
    }))
}

/// Register all routes on an `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_menu).service(get_metrics);
}
