//! In-process stand-in for the backend, used by unit tests

use crate::error::ApiError;
use crate::model::{Credentials, Detection, LoginResponse};
use crate::services::DetectionsApi;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How `login` should answer
pub enum LoginBehavior {
    Respond(LoginResponse),
    Reject,
}

/// How `detections` should answer
pub enum FetchBehavior {
    Respond(Vec<Detection>),
    Fail,
    /// Never return
    Hang,
}

pub struct FakeApi {
    login: LoginBehavior,
    fetch: FetchBehavior,
    login_calls: AtomicUsize,
    detections_calls: AtomicUsize,
    last_credentials: Mutex<Option<Credentials>>,
}

impl FakeApi {
    pub fn new(login: LoginBehavior, fetch: FetchBehavior) -> Self {
        Self {
            login,
            fetch,
            login_calls: AtomicUsize::new(0),
            detections_calls: AtomicUsize::new(0),
            last_credentials: Mutex::new(None),
        }
    }

    pub fn accepting(username: &str, role: &str) -> Self {
        Self::new(
            LoginBehavior::Respond(LoginResponse {
                message: LoginResponse::SUCCESS_MESSAGE.to_string(),
                username: Some(username.to_string()),
                role: Some(role.to_string()),
            }),
            FetchBehavior::Respond(Vec::new()),
        )
    }

    pub fn responding(message: &str) -> Self {
        Self::new(
            LoginBehavior::Respond(LoginResponse {
                message: message.to_string(),
                username: None,
                role: None,
            }),
            FetchBehavior::Respond(Vec::new()),
        )
    }

    pub fn rejecting() -> Self {
        Self::new(LoginBehavior::Reject, FetchBehavior::Respond(Vec::new()))
    }

    pub fn with_detections(count: usize) -> Self {
        Self::new(LoginBehavior::Reject, FetchBehavior::Respond(sample_detections(count)))
    }

    pub fn failing() -> Self {
        Self::new(LoginBehavior::Reject, FetchBehavior::Fail)
    }

    pub fn hanging() -> Self {
        Self::new(LoginBehavior::Reject, FetchBehavior::Hang)
    }

    pub fn and_fetch(mut self, fetch: FetchBehavior) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn detections_calls(&self) -> usize {
        self.detections_calls.load(Ordering::SeqCst)
    }

    pub fn last_credentials(&self) -> Option<Credentials> {
        self.last_credentials.lock().unwrap().clone()
    }
}

impl DetectionsApi for FakeApi {
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_credentials.lock().unwrap() = Some(credentials.clone());

        match &self.login {
            LoginBehavior::Respond(response) => Ok(response.clone()),
            LoginBehavior::Reject => Err(ApiError::Status {
                url: "fake://login".to_string(),
                status: 401,
            }),
        }
    }

    fn detections(&self) -> Result<Vec<Detection>, ApiError> {
        self.detections_calls.fetch_add(1, Ordering::SeqCst);

        match &self.fetch {
            FetchBehavior::Respond(detections) => Ok(detections.clone()),
            FetchBehavior::Fail => Err(ApiError::Transport {
                url: "fake://detections".to_string(),
                reason: "connection refused".to_string(),
            }),
            FetchBehavior::Hang => loop {
                std::thread::park();
            },
        }
    }
}

pub fn sample_detections(count: usize) -> Vec<Detection> {
    let kinds = ["fish", "rock", "trash"];
    (0..count)
        .map(|i| Detection {
            id: Some((i + 1).to_string()),
            user_id: Some("1".to_string()),
            timestamp: Some(format!("2024-05-01T10:{:02}:00", i)),
            object_type: Some(kinds[i % kinds.len()].to_string()),
            image_url: Some(format!("http://localhost:5000/img/{}.jpg", i + 1)),
        })
        .collect()
}
