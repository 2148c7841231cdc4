use crate::handlers::error::handle_not_found;
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{delete, get, web, HttpResponse, Result as ActixResult};
use common::Inspection;
use tracing::info;

/// List inspections, newest first
#[get("/api/inspections")]
pub async fn list(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let inspections: Vec<Inspection> = state
        .list()
        .iter()
        .map(|inspection| inspection.to_response())
        .collect();

    info!(count = inspections.len(), "GET /api/inspections");

    Ok(HttpResponse::Ok().json(inspections))
}

/// Fetch one inspection
#[get("/api/inspections/{id}")]
pub async fn show(path: web::Path<String>, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let inspection = state
        .get(&id)
        .ok_or_else(|| handle_not_found("Inspection", &id))?;

    Ok(HttpResponse::Ok().json(inspection.to_response()))
}

/// Delete one inspection and its images
#[delete("/api/inspections/{id}")]
pub async fn remove(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if !state.delete(&id) {
        return Err(handle_not_found("Inspection", &id));
    }

    info!(inspection_id = %id, "DELETE /api/inspections - Inspection deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// Serve the raw bytes of one image
#[get("/api/inspections/{id}/images/{image_id}")]
pub async fn image(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (id, image_id) = path.into_inner();
    let image = state
        .image(&id, &image_id)
        .ok_or_else(|| handle_not_found("Image", &image_id))?;

    Ok(HttpResponse::Ok()
        .content_type(image.content_type.as_str())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(image.file_name.clone())],
        })
        .body(image.content))
}
