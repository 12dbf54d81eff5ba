//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod detections;
pub mod help_dialog;
pub mod layout;
pub mod login;
pub mod quit_dialog;

pub use detections::{draw_detections_screen, DetectionsRenderContext, DetectionsView};
pub use help_dialog::HelpDialog;
pub use layout::{calculate_detections_layout, centered_popup};
pub use login::LoginForm;
pub use quit_dialog::QuitDialog;
