//! Detections view - the signed-in screen
//!
//! Greets the user and lists every detection the backend returned.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_detections_layout;
use crate::model::{Detection, User};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Detections list screen
#[derive(Default)]
pub struct DetectionsView {
    /// Records from the last fetch, replaced wholesale
    pub detections: Vec<Detection>,
    pub list_state: ListState,
    /// Set on first mount so the fetch is only issued once
    mounted: bool,
    /// When the list arrived
    pub loaded_at: Option<DateTime<Local>>,
    /// One-line feedback, e.g. a link that failed to open
    pub status_message: Option<String>,
}

impl DetectionsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the screen as shown
    ///
    /// Returns `true` only on the first call; the caller starts the
    /// detections fetch then and never again.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        true
    }

    /// Replace the list with a freshly fetched one
    pub fn set_detections(&mut self, detections: Vec<Detection>) {
        self.detections = detections;
        self.loaded_at = Some(Local::now());
        self.list_state
            .select(if self.detections.is_empty() { None } else { Some(0) });
    }

    pub fn selected(&self) -> Option<&Detection> {
        self.list_state.selected().and_then(|i| self.detections.get(i))
    }

    pub fn selected_image_url(&self) -> Option<&str> {
        self.selected().map(Detection::image_url)
    }

    fn select_next(&mut self) {
        if self.detections.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.detections.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.detections.is_empty() {
            return;
        }
        let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(prev));
    }

    /// Build one list row: `timestamp - object_type - image_url`
    fn row<'a>(detection: &'a Detection, type_width: usize) -> ListItem<'a> {
        let object_type = detection.object_type();
        let padding = type_width.saturating_sub(object_type.width());

        ListItem::new(Line::from(vec![
            Span::styled(detection.timestamp(), Style::default().fg(Color::White)),
            Span::styled(" - ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}{}", object_type, " ".repeat(padding)),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(" - ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                detection.image_url(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]))
    }
}

impl Component for DetectionsView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter | KeyCode::Char('o') => Some(Action::OpenImage),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.select_next(),
            Action::PrevItem => self.select_prev(),
            Action::FirstItem => {
                if !self.detections.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            Action::LastItem => {
                if !self.detections.is_empty() {
                    self.list_state.select(Some(self.detections.len() - 1));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing goes through draw_detections_screen, which needs the user
        Ok(())
    }
}

/// What the detections screen borrows from the session gate at draw time
pub struct DetectionsRenderContext<'a> {
    pub user: &'a User,
}

/// Draw the detections screen for the signed-in user
pub fn draw_detections_screen(
    frame: &mut Frame,
    area: Rect,
    view: &mut DetectionsView,
    ctx: &DetectionsRenderContext,
) -> Result<()> {
    let layout = calculate_detections_layout(area, view.status_message.is_some());

    // Heading
    let greeting = ctx.user.greeting();
    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            greeting,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Detections:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(heading, layout.heading);

    // List
    let type_width = view
        .detections
        .iter()
        .map(|d| d.object_type().width())
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = view
        .detections
        .iter()
        .map(|d| DetectionsView::row(d, type_width))
        .collect();

    let title = match view.loaded_at {
        Some(at) => format!(
            " {} detections, loaded {} ",
            view.detections.len(),
            at.format("%H:%M:%S")
        ),
        None => String::new(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, layout.list, &mut view.list_state);

    if let (Some(status_area), Some(message)) = (layout.status, &view.status_message) {
        let status = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(status, status_area);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
        Span::raw("Move  "),
        Span::styled(" Enter/o ", Style::default().fg(Color::Cyan)),
        Span::raw("Open image  "),
        Span::styled(" ? ", Style::default().fg(Color::Cyan)),
        Span::raw("Help  "),
        Span::styled(" q ", Style::default().fg(Color::Cyan)),
        Span::raw("Quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, layout.help);

    Ok(())
}
