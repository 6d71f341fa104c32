use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use std::io;
use webbrowser::Browser;

use crate::dashboard::Dashboard;
use crate::problem::ProblemRecord;
use crate::view::SortKey;

const PAGE: usize = 10;
/// Status lines disappear after this many ticks
const STATUS_TICKS: u16 = 30;

pub type LinkOpener = fn(&str) -> io::Result<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    TagPicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// None keeps the message until replaced
    pub ticks_left: Option<u16>,
}

/// Terminal-side state wrapped around the [`Dashboard`]
pub struct App {
    pub dashboard: Dashboard,
    pub mode: Mode,
    pub selected: usize,
    pub scroll_offset: usize,
    pub tag_cursor: usize,
    pub tag_scroll: usize,
    pub status: Option<StatusMessage>,
    opener: LinkOpener,
}

fn open_in_browser(url: &str) -> io::Result<()> {
    if Browser::is_available() {
        webbrowser::open(url)
    } else {
        Err(io::Error::new(io::ErrorKind::NotFound, "no browser available"))
    }
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            mode: Mode::Browse,
            selected: 0,
            scroll_offset: 0,
            tag_cursor: 0,
            tag_scroll: 0,
            status: None,
            opener: open_in_browser,
        }
    }

    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            ticks_left: Some(STATUS_TICKS),
        });
    }

    /// Status that stays until something else replaces it
    pub fn set_sticky_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            ticks_left: None,
        });
    }

    pub fn on_tick(&mut self) {
        let expired = match self.status.as_mut().and_then(|s| s.ticks_left.as_mut()) {
            Some(ticks) => {
                *ticks = ticks.saturating_sub(1);
                *ticks == 0
            }
            None => false,
        };
        if expired {
            self.status = None;
        }
    }

    pub fn selected_record(&self) -> Option<&ProblemRecord> {
        self.dashboard.view_record(self.selected)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match self.mode {
            Mode::Browse => self.on_browse_key(key),
            Mode::TagPicker => self.on_tag_key(key),
        }
    }

    fn on_browse_key(&mut self, key: KeyEvent) -> Control {
        let len = self.dashboard.view_len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = step_down(self.selected, 1, len),
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(PAGE),
            KeyCode::PageDown => self.selected = step_down(self.selected, PAGE, len),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            KeyCode::Char('1') | KeyCode::Char('d') => self.select_sort(SortKey::Difficulty),
            KeyCode::Char('2') | KeyCode::Char('f') => self.select_sort(SortKey::Frequency),
            KeyCode::Char('3') | KeyCode::Char('a') => self.select_sort(SortKey::AcceptanceRate),
            KeyCode::Char(' ') => self.toggle_selected_solved(),
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('t') => self.mode = Mode::TagPicker,
            KeyCode::Char('c') => self.clear_filters(),
            _ => {}
        }
        Control::Continue
    }

    fn on_tag_key(&mut self, key: KeyEvent) -> Control {
        let len = self.dashboard.tags().len();
        match key.code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('t') | KeyCode::Backspace => {
                self.mode = Mode::Browse
            }
            KeyCode::Up | KeyCode::Char('k') => self.tag_cursor = self.tag_cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.tag_cursor = step_down(self.tag_cursor, 1, len),
            KeyCode::PageUp => self.tag_cursor = self.tag_cursor.saturating_sub(PAGE),
            KeyCode::PageDown => self.tag_cursor = step_down(self.tag_cursor, PAGE, len),
            KeyCode::Home => self.tag_cursor = 0,
            KeyCode::End => self.tag_cursor = len.saturating_sub(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_tag_at_cursor(),
            KeyCode::Char('c') => self.clear_filters(),
            _ => {}
        }
        Control::Continue
    }

    fn select_sort(&mut self, key: SortKey) {
        self.dashboard.set_sort_key(key);
        self.selected = 0;
        self.scroll_offset = 0;
    }

    fn toggle_selected_solved(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let (link, title) = (record.link.clone(), record.title.clone());
        let solved = self.dashboard.toggle_solved(&link);
        let text = if solved {
            format!("Marked solved: {title}")
        } else {
            format!("Marked unsolved: {title}")
        };
        self.set_status(text, false);
    }

    fn open_selected(&mut self) {
        let Some(link) = self.selected_record().map(|r| r.link.clone()) else {
            return;
        };
        match (self.opener)(&link) {
            Ok(()) => {
                info!("opened {link}");
                self.set_status(format!("Opened {link}"), false);
            }
            Err(e) => {
                warn!("could not open {link}: {e}");
                self.set_status(format!("Could not open {link}: {e}"), true);
            }
        }
    }

    fn toggle_tag_at_cursor(&mut self) {
        let Some(tag) = self.dashboard.tags().get(self.tag_cursor).cloned() else {
            return;
        };
        self.dashboard.toggle_tag(&tag);
        self.clamp_selection();
    }

    fn clear_filters(&mut self) {
        self.dashboard.clear_tags();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.view_len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Keep the selected row inside a window of `height` rows
    pub fn scroll_to_selection(&mut self, height: usize) {
        self.scroll_offset = follow(self.selected, self.scroll_offset, height);
    }

    pub fn scroll_to_tag_cursor(&mut self, height: usize) {
        self.tag_scroll = follow(self.tag_cursor, self.tag_scroll, height);
    }
}

fn step_down(pos: usize, by: usize, len: usize) -> usize {
    (pos + by).min(len.saturating_sub(1))
}

fn follow(cursor: usize, offset: usize, height: usize) -> usize {
    if height == 0 {
        offset
    } else if cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_problems;
    use crate::store::MemoryStore;
    use crate::view::SortDirection;

    const CSV: &str = "Difficulty,Title,Frequency,Acceptance,Link,Topics\n\
        Easy,Two Sum,100,0.55,https://l/two-sum,\"Array, Hash Table\"\n\
        Hard,Word Ladder,55,0.39,https://l/word-ladder,Graph\n\
        Medium,Merge Intervals,85,0.48,https://l/merge-intervals,\"Array, Sorting\"\n";

    fn press(app: &mut App, code: KeyCode) -> Control {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn test_app() -> App {
        let dashboard = Dashboard::new(
            parse_problems(CSV),
            SortKey::Frequency,
            Box::new(MemoryStore::default()),
        );
        App::new(dashboard).with_link_opener(|_| Ok(()))
    }

    #[test]
    fn quit_keys() {
        let mut app = test_app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Control::Quit);
        assert_eq!(press(&mut app, KeyCode::Esc), Control::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Control::Quit
        );
    }

    #[test]
    fn navigation_is_clamped() {
        let mut app = test_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn sort_keys_follow_state_machine() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.dashboard.sort().key, SortKey::Difficulty);
        assert_eq!(app.dashboard.sort().direction, SortDirection::Ascending);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_record().unwrap().title, "Two Sum");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.dashboard.sort().direction, SortDirection::Descending);
        assert_eq!(app.selected_record().unwrap().title, "Word Ladder");

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.dashboard.sort().key, SortKey::AcceptanceRate);
        assert_eq!(app.dashboard.sort().direction, SortDirection::Descending);
    }

    #[test]
    fn space_toggles_solved_with_status() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.dashboard.is_solved("https://l/two-sum"));
        assert_eq!(app.status.as_ref().unwrap().text, "Marked solved: Two Sum");

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.dashboard.is_solved("https://l/two-sum"));
    }

    #[test]
    fn tag_picker_filters_view() {
        let mut app = test_app();
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.mode, Mode::TagPicker);

        // tags: Array, Graph, Hash Table, Sorting
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.dashboard.is_tag_selected("Graph"));
        assert_eq!(app.dashboard.view_len(), 1);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.selected_record().unwrap().title, "Word Ladder");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.dashboard.view_len(), 3);
    }

    #[test]
    fn open_failure_sets_error_status() {
        let mut app = test_app().with_link_opener(|_| Err(io::Error::other("boom")));
        press(&mut app, KeyCode::Enter);
        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("boom"));
    }

    #[test]
    fn status_expires_after_ticks() {
        let mut app = test_app();
        app.set_status("hello", false);
        for _ in 0..STATUS_TICKS - 1 {
            app.on_tick();
        }
        assert!(app.status.is_some());
        app.on_tick();
        assert!(app.status.is_none());

        app.set_sticky_status("stays", true);
        for _ in 0..100 {
            app.on_tick();
        }
        assert!(app.status.is_some());
    }

    #[test]
    fn keys_on_empty_view_are_harmless() {
        let dashboard = Dashboard::new(Vec::new(), SortKey::Frequency, Box::new(MemoryStore::default()));
        let mut app = App::new(dashboard).with_link_opener(|_| Ok(()));
        for code in [KeyCode::Down, KeyCode::End, KeyCode::Char(' '), KeyCode::Enter] {
            assert_eq!(press(&mut app, code), Control::Continue);
        }
        assert_eq!(app.selected, 0);
        assert!(app.status.is_none());
    }

    #[test]
    fn follow_keeps_cursor_in_window() {
        assert_eq!(follow(0, 0, 5), 0);
        assert_eq!(follow(7, 0, 5), 3);
        assert_eq!(follow(2, 3, 5), 2);
        assert_eq!(follow(4, 3, 5), 3);
        assert_eq!(follow(4, 3, 0), 3);
    }
}
