use crate::config::UploadLimits;
use crate::handlers::create_form::CreateInspectionForm;
use crate::handlers::error::{handle_error, handle_payload_too_large};
use crate::state::{AppState, NewImage};
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_multipart::MultipartError;
use actix_web::error::PayloadError;
use actix_web::{post, web, HttpRequest, HttpResponse, Result as ActixResult};
use common::FALLBACK_CONTENT_TYPE;
use tracing::info;

/// Multipart limits for create requests.
///
/// A body over the total limit is reported as 413 rather than actix's default 400.
pub fn multipart_config(limits: &UploadLimits) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(limits.max_total_size)
        .memory_limit(limits.max_total_size)
        .error_handler(multipart_error)
}

fn multipart_error(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        MultipartError::Payload(PayloadError::Overflow) => {
            handle_payload_too_large("Request body too large", PayloadError::Overflow)
        }
        other => handle_error("Malformed multipart request", other),
    }
}

/// Create an inspection (multipart/form-data)
#[post("/api/inspections")]
pub async fn create(
    form: MultipartForm<CreateInspectionForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    // Validate form fields (count pairing, description list, image names)
    let descriptions = form
        .validate_fields()
        .map_err(actix_web::error::ErrorBadRequest)?;

    let max_file_size = state.limits().max_file_size;
    let CreateInspectionForm { images, .. } = form.into_inner();

    let mut new_images = Vec::with_capacity(images.len());
    for (image, description) in images.into_iter().zip(descriptions) {
        let file_name = image.file_name.unwrap_or_default();
        if image.data.len() as u64 > max_file_size {
            return Err(handle_payload_too_large(
                "Image too large",
                format!("{} exceeds {} bytes", file_name, max_file_size),
            ));
        }

        new_images.push(NewImage {
            content_type: image
                .content_type
                .map(|mime| mime.to_string())
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            file_name,
            description,
            content: image.data,
        });
    }

    let stored = state.create(new_images);

    info!(
        inspection_id = %stored.id,
        images = stored.images.len(),
        "POST /api/inspections - Inspection created"
    );

    Ok(HttpResponse::Created().json(stored.to_response()))
}
