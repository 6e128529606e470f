/// HTTP client for the comparison service
///
/// One request per submission: a multipart POST carrying the registration
/// number and the photo, aimed at the endpoint of the selected comparison
/// model. The base URL is injected from configuration at construction time
/// rather than hardcoded at the call sites.
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::{debug, warn};

use crate::api::error::CompareError;
use crate::api::response::{CompareResponse, ComparisonResult};
use crate::config::Config;
use crate::state::form::{AlgorithmVariant, CompareRequest};

/// Multipart field carrying the registration number
const FIELD_REGISTRATION_NUMBER: &str = "registration_number";
/// Multipart field carrying the photo attachment
const FIELD_CAPTURED_IMAGE: &str = "captured_image";

/// Client for the remote comparison service
#[derive(Debug, Clone)]
pub struct CompareClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CompareClient {
    /// Build a client aimed at the configured service
    pub fn new(config: &Config) -> Self {
        CompareClient {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    /// Resolve the endpoint URL for a comparison model
    pub fn endpoint(&self, variant: AlgorithmVariant) -> Result<Url, CompareError> {
        self.base_url
            .join(variant.endpoint_path())
            .map_err(|e| CompareError::Request(format!("invalid endpoint URL: {e}")))
    }

    /// Submit one comparison request and normalize the response
    ///
    /// Takes the client by value so the whole call can be handed to a
    /// background task; cloning the client is cheap. No retries, no
    /// timeout: the call runs to completion, success or error.
    pub async fn compare(self, request: CompareRequest) -> Result<ComparisonResult, CompareError> {
        let url = self.endpoint(request.variant)?;

        let photo = Part::bytes(request.image.bytes)
            .file_name(request.image.file_name)
            .mime_str(&request.image.mime_type)
            .map_err(|e| CompareError::Request(format!("invalid attachment type: {e}")))?;

        let form = Form::new()
            .text(FIELD_REGISTRATION_NUMBER, request.registration_number)
            .part(FIELD_CAPTURED_IMAGE, photo);

        debug!(%url, variant = %request.variant, "dispatching comparison request");

        let response = self
            .http
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "comparison request failed to reach the service");
                CompareError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.is_client_error() {
            warn!(%url, %status, "comparison request rejected");
            return Err(CompareError::Rejected(status.as_u16()));
        }
        if !status.is_success() {
            warn!(%url, %status, "comparison service failure");
            return Err(CompareError::Server(status.as_u16()));
        }

        let body: CompareResponse = response
            .json()
            .await
            .map_err(|e| CompareError::InvalidResponse(e.to_string()))?;

        Ok(body.into_result())
    }
}
