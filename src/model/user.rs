//! Signed-in user and the credentials used to obtain it

use serde::{Deserialize, Serialize};

/// The user held by the session for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: String,
}

impl User {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    /// Heading shown above the detections list
    pub fn greeting(&self) -> String {
        format!("Welcome, {} ({})", self.username, self.role)
    }
}

/// Body of `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body returned by `POST /login`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    /// Status marker the backend sends on a successful login
    pub const SUCCESS_MESSAGE: &'static str = "Login successful";

    pub fn is_success(&self) -> bool {
        self.message == Self::SUCCESS_MESSAGE
    }

    /// Build the session user, if both user fields came back
    pub fn user(&self) -> Option<User> {
        match (&self.username, &self.role) {
            (Some(username), Some(role)) => Some(User::new(username.clone(), role.clone())),
            _ => None,
        }
    }
}
