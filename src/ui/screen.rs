use ratatui::Frame;

use crate::{
    app::{App, Mode},
    ui::{body_layout, render_header, render_instructions, render_status, table, tags},
};

const BROWSE_HELP: &str = "Sort: (1/d)ifficulty (2/f)requency (3/a)cceptance, again to flip | (space) solved | (enter/o)pen\n↑/↓ PgUp/PgDn Home/End | (t)ags (c)lear filters | (q)uit";
const TAGS_HELP: &str = "(space/enter) toggle tag | (c)lear | ↑/↓ PgUp/PgDn Home/End | (b)ack (q)uit";

/// A UI screen boundary: owns the layout of one mode
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Problem table with header and help
pub struct BrowseScreen;

impl Screen for BrowseScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let chunks = body_layout(f.area());
        render_header(app, f, chunks[0]);
        table::render_problem_table(app, f, chunks[1]);
        render_status(app, f, chunks[2]);
        render_instructions(BROWSE_HELP, f, chunks[3]);
    }
}

/// Tag filter picker
pub struct TagPickerScreen;

impl Screen for TagPickerScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let chunks = body_layout(f.area());
        render_header(app, f, chunks[0]);
        tags::render_tag_list(app, f, chunks[1]);
        render_status(app, f, chunks[2]);
        render_instructions(TAGS_HELP, f, chunks[3]);
    }
}

/// Helper to construct the appropriate screen for the current mode
pub fn current_screen(mode: &Mode) -> Box<dyn Screen> {
    match mode {
        Mode::Browse => Box::new(BrowseScreen),
        Mode::TagPicker => Box::new(TagPickerScreen),
    }
}
