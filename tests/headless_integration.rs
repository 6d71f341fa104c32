use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use leetdash::app::{App, Control, Mode};
use leetdash::dashboard::Dashboard;
use leetdash::lists::BundledList;
use leetdash::runtime::{DashEvent, FixedTicker, Runner, TestEventSource};
use leetdash::store::MemoryStore;
use leetdash::view::{SortDirection, SortKey};

fn key(code: KeyCode) -> DashEvent {
    DashEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn bundled_app() -> App {
    let records = BundledList::TopInterview.load().unwrap();
    let dashboard = Dashboard::new(records, SortKey::Frequency, Box::new(MemoryStore::default()));
    App::new(dashboard).with_link_opener(|_| Ok(()))
}

/// Drive the app like the binary's loop until it quits or the events run dry
fn drive(app: &mut App, events: Vec<DashEvent>) -> bool {
    let (tx, rx) = mpsc::channel();
    for ev in events {
        tx.send(ev).unwrap();
    }
    drop(tx);

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for _ in 0..200u32 {
        match runner.step() {
            DashEvent::Tick => return false,
            DashEvent::Resize => {}
            DashEvent::Key(k) => {
                if app.on_key(k) == Control::Quit {
                    return true;
                }
            }
        }
    }
    false
}

#[test]
fn headless_sort_filter_and_solve_flow() {
    let mut app = bundled_app();

    let quit = drive(
        &mut app,
        vec![
            // difficulty ascending: an Easy problem first
            key(KeyCode::Char('1')),
            // mark it solved
            key(KeyCode::Char(' ')),
            // open the tag picker and select the first tag
            key(KeyCode::Char('t')),
            key(KeyCode::Char(' ')),
            key(KeyCode::Esc),
            key(KeyCode::Char('q')),
        ],
    );

    assert!(quit);
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.dashboard.sort().key, SortKey::Difficulty);
    assert_eq!(app.dashboard.sort().direction, SortDirection::Ascending);
    assert_eq!(app.dashboard.solved().len(), 1);
    assert_eq!(app.dashboard.progress().solved, 1);

    let first_tag = app.dashboard.tags()[0].clone();
    assert!(app.dashboard.is_tag_selected(&first_tag));
    assert!(app
        .dashboard
        .current_view()
        .iter()
        .all(|r| r.topics.contains(&first_tag)));
}

#[test]
fn headless_frequency_flip_reverses_view() {
    let mut app = bundled_app();
    let descending: Vec<String> = app
        .dashboard
        .current_view()
        .iter()
        .map(|r| r.link.clone())
        .collect();

    drive(&mut app, vec![key(KeyCode::Char('f'))]);
    assert_eq!(app.dashboard.sort().direction, SortDirection::Ascending);

    let mut ascending: Vec<String> = app
        .dashboard
        .current_view()
        .iter()
        .map(|r| r.link.clone())
        .collect();
    ascending.reverse();
    assert_eq!(descending, ascending);
}

#[test]
fn headless_ctrl_c_quits_from_tag_picker() {
    let mut app = bundled_app();
    let quit = drive(
        &mut app,
        vec![
            key(KeyCode::Char('t')),
            DashEvent::Resize,
            DashEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ],
    );
    assert!(quit);
    assert_eq!(app.mode, Mode::TagPicker);
}
