//! Root application component - the session gate
//!
//! Holds the signed-in user (if any) and shows exactly one of two screens:
//! the login form while nobody is signed in, the detections list after.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_detections_screen, DetectionsRenderContext, DetectionsView, HelpDialog, LoginForm,
    QuitDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::Screen;
use crate::model::User;
use crate::services::{self, DetectionFetcher, DetectionsApi};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;

/// Main application state - coordinates between components
pub struct App {
    /// Signed-in user; `None` until the login form succeeds
    user: Option<User>,

    /// Backend client shared with the fetch worker
    api: Arc<dyn DetectionsApi>,

    /// One-shot detections request
    fetcher: DetectionFetcher,

    /// Modal overlay stack (detections screen only)
    pub modals: ModalStack,

    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub login: LoginForm,
    pub detections: DetectionsView,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn DetectionsApi>) -> App {
        App {
            user: None,
            api,
            fetcher: DetectionFetcher::new(),
            modals: ModalStack::new(),
            config,
            should_quit: false,
            login: LoginForm::new(),
            detections: DetectionsView::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Screen shown for the current session state
    pub fn screen(&self) -> Screen {
        match self.user {
            None => Screen::Login,
            Some(_) => Screen::Detections,
        }
    }

    /// Install the signed-in user and mount the detections screen
    fn sign_in(&mut self, user: User) {
        if self.detections.mount() {
            self.fetcher.spawn(Arc::clone(&self.api));
        }
        self.user = Some(user);
    }

    fn open_selected_image(&mut self) {
        let Some(url) = self.detections.selected_image_url().map(str::to_string) else {
            return;
        };

        match services::open_url(&url, self.config.open_command.as_deref()) {
            Ok(()) => self.detections.status_message = None,
            Err(e) => {
                log::warn!("could not open {}: {:#}", url, e);
                self.detections.status_message = Some(format!("{:#}", e));
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.screen() {
            Screen::Login => self.login.handle_key_event(key),
            Screen::Detections => match self.modals.top() {
                Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
                Some(Modal::Help) => self.help_dialog.handle_key_event(key),
                None => self.detections.handle_key_event(key),
            },
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.fetcher.is_pending() {
                    if let Some(detections) = self.fetcher.poll() {
                        self.detections.set_detections(detections);
                    }
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Session
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitLogin => {
                if self.user.is_none() {
                    return Ok(self.login.submit(self.api.as_ref()));
                }
            }
            Action::LoggedIn(user) => {
                self.sign_in(user);
            }

            // ─────────────────────────────────────────────────────────────────
            // Detections
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                return self.detections.update(action);
            }
            Action::OpenImage => {
                self.open_selected_image();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.screen() {
            Screen::Login => self.login.draw(frame, area)?,
            Screen::Detections => {
                if let Some(user) = &self.user {
                    let ctx = DetectionsRenderContext { user };
                    draw_detections_screen(frame, area, &mut self.detections, &ctx)?;
                }

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render_to_string;
    use crate::services::fake::{sample_detections, FakeApi, FetchBehavior};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::thread;
    use std::time::{Duration, Instant};

    fn app_with(api: FakeApi) -> (App, Arc<FakeApi>) {
        let api = Arc::new(api);
        let app = App::new(Config::default(), api.clone());
        (app, api)
    }

    /// Feed an action through the app the way the main loop does
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
        {
            dispatch(app, action);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn tick_until_loaded(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.detections.loaded_at.is_none() && Instant::now() < deadline {
            dispatch(app, Action::Tick);
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn draw(app: &mut App) -> String {
        render_to_string(100, 24, |frame| {
            let area = frame.area();
            app.draw(frame, area)
        })
    }

    #[test]
    fn test_starts_on_login_screen() {
        let (mut app, _) = app_with(FakeApi::accepting("alice", "admin"));

        assert_eq!(app.screen(), Screen::Login);
        assert!(app.user().is_none());
        assert!(draw(&mut app).contains("Sign in"));
    }

    #[test]
    fn test_login_flow_shows_welcome_heading() {
        let (mut app, api) = app_with(
            FakeApi::accepting("alice", "admin")
                .and_fetch(FetchBehavior::Respond(sample_detections(2))),
        );

        type_text(&mut app, "alice");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Detections);
        assert_eq!(app.user(), Some(&User::new("alice", "admin")));
        assert_eq!(api.login_calls(), 1);

        tick_until_loaded(&mut app);
        let screen = draw(&mut app);
        assert!(screen.contains("Welcome, alice (admin)"));
        assert_eq!(app.detections.detections.len(), 2);
        assert_eq!(api.detections_calls(), 1);
    }

    #[test]
    fn test_failed_login_stays_on_login_screen() {
        let (mut app, api) = app_with(FakeApi::rejecting());

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(api.login_calls(), 1);
        assert_eq!(api.detections_calls(), 0);
        assert!(draw(&mut app).contains("Invalid credentials"));
    }

    #[test]
    fn test_failed_fetch_leaves_empty_list_without_error() {
        let (mut app, _) = app_with(
            FakeApi::accepting("bob", "student").and_fetch(FetchBehavior::Fail),
        );
        dispatch(&mut app, Action::SubmitLogin);

        for _ in 0..50 {
            dispatch(&mut app, Action::Tick);
            thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(app.screen(), Screen::Detections);
        assert!(app.detections.detections.is_empty());
        assert!(app.detections.status_message.is_none());
        let screen = draw(&mut app);
        assert!(screen.contains("Welcome, bob (student)"));
        assert!(!screen.contains("failed"));
    }

    #[test]
    fn test_fetch_is_not_repeated() {
        let (mut app, api) = app_with(
            FakeApi::accepting("alice", "admin")
                .and_fetch(FetchBehavior::Respond(sample_detections(1))),
        );
        dispatch(&mut app, Action::SubmitLogin);
        tick_until_loaded(&mut app);

        // Further submits and ticks are ignored once signed in
        dispatch(&mut app, Action::SubmitLogin);
        for _ in 0..5 {
            dispatch(&mut app, Action::Tick);
        }

        assert_eq!(api.login_calls(), 1);
        assert_eq!(api.detections_calls(), 1);
    }

    #[test]
    fn test_quit_dialog_flow() {
        let (mut app, _) = app_with(FakeApi::accepting("alice", "admin"));
        dispatch(&mut app, Action::SubmitLogin);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_opens_and_closes() {
        let (mut app, _) = app_with(FakeApi::accepting("alice", "admin"));
        dispatch(&mut app, Action::SubmitLogin);

        press(&mut app, KeyCode::Char('?'));
        assert!(draw(&mut app).contains("Keyboard Shortcuts"));

        press(&mut app, KeyCode::Char('?'));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_open_image_failure_is_reported_in_status_line() {
        let (mut app, _) = app_with(
            FakeApi::accepting("alice", "admin")
                .and_fetch(FetchBehavior::Respond(sample_detections(1))),
        );
        app.config.open_command = Some("definitely-not-a-real-browser-binary".to_string());
        dispatch(&mut app, Action::SubmitLogin);
        tick_until_loaded(&mut app);

        press(&mut app, KeyCode::Enter);

        let message = app.detections.status_message.clone().unwrap_or_default();
        assert!(message.contains("definitely-not-a-real-browser-binary"));
    }
}
