//! HTTP client for the detections backend
//!
//! `DetectionsApi` is the seam the screens talk through; `HttpApi` is the
//! blocking `ureq` implementation used at runtime.

use crate::error::ApiError;
use crate::model::{Credentials, Detection, LoginResponse};

/// Operations the dashboard needs from the backend
pub trait DetectionsApi: Send + Sync {
    /// `POST /login`
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `GET /detections`
    fn detections(&self) -> Result<Vec<Detection>, ApiError>;
}

/// Blocking HTTP implementation of [`DetectionsApi`]
pub struct HttpApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl DetectionsApi for HttpApi {
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.url("/login");
        let response = self
            .agent
            .post(&url)
            .send_json(credentials)
            .map_err(|e| ApiError::from_ureq(&url, e))?;

        response
            .into_json::<LoginResponse>()
            .map_err(|e| ApiError::decode(&url, e))
    }

    fn detections(&self) -> Result<Vec<Detection>, ApiError> {
        let url = self.url("/detections");
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ApiError::from_ureq(&url, e))?;

        response
            .into_json::<Vec<Detection>>()
            .map_err(|e| ApiError::decode(&url, e))
    }
}
