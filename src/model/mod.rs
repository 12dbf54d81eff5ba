//! Model layer - data carried between the API and the screens
//!
//! - `User` / `Credentials` / `LoginResponse` - session and login payloads
//! - `Detection` - records shown in the dashboard list
//! - `Screen` - which of the two screens the session gate shows
//! - `ModalStack` - overlays on top of the detections screen

pub mod detection;
pub mod modal;
pub mod ui;
pub mod user;

pub use detection::Detection;
pub use user::{Credentials, LoginResponse, User};
