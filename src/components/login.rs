//! Login form component
//!
//! Collects a username and password and submits them to the backend.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::ui::LoginField;
use crate::model::Credentials;
use crate::services::DetectionsApi;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Shown when the backend answers without the success marker
pub const LOGIN_FAILED: &str = "Login failed";
/// Shown when the request itself fails
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login form component
#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Error message from the last submission
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Submit the current fields, blocking until the backend answers
    ///
    /// Returns `Action::LoggedIn` on success. Any other outcome leaves a
    /// fixed error message on the form.
    pub fn submit(&mut self, api: &dyn DetectionsApi) -> Option<Action> {
        self.error = None;

        let credentials = Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        match api.login(&credentials) {
            Ok(response) if response.is_success() => match response.user() {
                Some(user) => {
                    log::info!("signed in as {} ({})", user.username, user.role);
                    Some(Action::LoggedIn(user))
                }
                None => {
                    log::warn!("login succeeded but the response had no username/role");
                    self.error = Some(INVALID_CREDENTIALS.to_string());
                    None
                }
            },
            Ok(response) => {
                log::info!("login rejected: {}", response.message);
                self.error = Some(LOGIN_FAILED.to_string());
                None
            }
            Err(e) => {
                log::warn!("login request failed: {}", e);
                self.error = Some(INVALID_CREDENTIALS.to_string());
                None
            }
        }
    }

    fn input_line<'a>(&self, label: &'a str, value: String, field: LoginField) -> Line<'a> {
        let focused = self.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cursor = if focused { "_" } else { "" };

        Line::from(vec![
            Span::styled(if focused { "> " } else { "  " }, label_style),
            Span::styled(format!("{:10}", label), label_style),
            Span::styled(
                format!("{}{}", value, cursor),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl Component for LoginForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Esc => Some(Action::ForceQuit),
            KeyCode::Enter => Some(Action::SubmitLogin),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.toggle();
                None
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
                None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.focused_input().push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let popup = centered_popup(area, 50, 12);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Sign in ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Username
                Constraint::Length(1), // Password
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Error
                Constraint::Min(0),
                Constraint::Length(1), // Help
            ])
            .split(inner);

        let username = self.input_line("Username", self.username.clone(), LoginField::Username);
        frame.render_widget(Paragraph::new(username), chunks[1]);

        let masked = "*".repeat(self.password.chars().count());
        let password = self.input_line("Password", masked, LoginField::Password);
        frame.render_widget(Paragraph::new(password), chunks[2]);

        if let Some(ref error) = self.error {
            let error_line = Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(error_line, chunks[4]);
        }

        let help = Paragraph::new(Line::from(Span::styled(
            "Tab  Switch field   Enter  Login   Esc  Quit",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[6]);

        Ok(())
    }
}
