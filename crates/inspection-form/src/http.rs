//! HTTP adapter for [`InspectionApi`]

use crate::api::{ApiError, InspectionApi};
use crate::payload::InspectionPayload;
use async_trait::async_trait;
use common::{
    Inspection, DESCRIPTIONS_FIELD, FALLBACK_CONTENT_TYPE, IMAGES_FIELD, INSPECTIONS_PATH,
};
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

/// Talks to the inspection backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpInspectionApi {
    base_url: String,
    client: Client,
}

impl HttpInspectionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Use a preconfigured client (timeouts, proxies) for every request
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the multipart form: one `images` part per slot, in order,
    /// followed by the JSON description list.
    fn build_multipart_form(payload: &InspectionPayload) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for file in payload.images() {
            let part = Part::bytes(file.content().to_vec())
                .file_name(file.name().to_string())
                .mime_str(file.content_type().unwrap_or(FALLBACK_CONTENT_TYPE))
                .map_err(|e| ApiError::TransportError(format!("Failed to set MIME type: {}", e)))?;
            form = form.part(IMAGES_FIELD, part);
        }

        let descriptions = payload.descriptions_json().map_err(|e| {
            ApiError::TransportError(format!("Failed to serialize descriptions: {}", e))
        })?;
        Ok(form.text(DESCRIPTIONS_FIELD, descriptions))
    }
}

#[async_trait]
impl InspectionApi for HttpInspectionApi {
    async fn create_inspection(&self, payload: &InspectionPayload) -> Result<Inspection, ApiError> {
        let form = Self::build_multipart_form(payload)?;
        debug!("Posting inspection with {} images", payload.len());

        let response = self
            .client
            .post(self.url(INSPECTIONS_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, None).await?;
        response.json().await.map_err(transport_error)
    }

    async fn list_inspections(&self) -> Result<Vec<Inspection>, ApiError> {
        let response = self
            .client
            .get(self.url(INSPECTIONS_PATH))
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, None).await?;
        response.json().await.map_err(transport_error)
    }

    async fn get_inspection(&self, id: &str) -> Result<Inspection, ApiError> {
        let response = self
            .client
            .get(self.url(&Inspection::path(id)))
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, Some(id)).await?;
        response.json().await.map_err(transport_error)
    }

    async fn delete_inspection(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&Inspection::path(id)))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response, Some(id)).await?;
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    warn!("Inspection request failed: {}", e);
    ApiError::TransportError(e.to_string())
}

/// Map a non-success response onto [`ApiError`]
async fn check_status(response: Response, id: Option<&str>) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default().trim().to_string();
    warn!("Inspection request returned {}: {}", status, message);

    Err(classify_status(status, message, id))
}

fn classify_status(status: StatusCode, message: String, id: Option<&str>) -> ApiError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        StatusCode::NOT_FOUND => match id {
            Some(id) => ApiError::NotFound(id.to_string()),
            None => ApiError::ServerRejected {
                status: status.as_u16(),
                message,
            },
        },
        s if s.is_client_error() => ApiError::ServerRejected {
            status: s.as_u16(),
            message,
        },
        s => ApiError::TransportError(format!("{} {}", s, message).trim_end().to_string()),
    }
}
