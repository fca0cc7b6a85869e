// Keyboard handling
//
// Layered dispatch: search prompt -> global keys -> board navigation.
// Only key presses are handled; release and repeat events from terminals
// that report them are ignored.

use super::app::{App, InputMode};
use crate::board::BoardKind;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Whether a layer consumed the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C quits from anywhere, including the search prompt
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.mode == InputMode::Search {
        handle_search_key(app, key);
        return;
    }

    if handle_global_key(app, key) == Handled::Yes {
        return;
    }
    handle_board_key(app, key);
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.commit_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

fn handle_global_key(app: &mut App, key: KeyEvent) -> Handled {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            if let Some(&kind) = BoardKind::all().get(index) {
                app.select_board(kind);
            }
        }
        _ => return Handled::No,
    }
    Handled::Yes
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    let board = app.board_mut();
    match key.code {
        KeyCode::Tab | KeyCode::Right => board.next_tab(),
        KeyCode::BackTab | KeyCode::Left => board.prev_tab(),
        KeyCode::Char('n') | KeyCode::PageDown => board.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => board.prev_page(),
        KeyCode::Home => board.first_page(),
        KeyCode::End => board.last_page(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::source::{DemoSource, SourceEvent};
    use chrono::Utc;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn demo_app() -> App {
        let mut app = App::new(&Config::default(), LogBuffer::new(), "demo".to_string(), None);
        app.apply_source_event(SourceEvent::Delivered {
            snapshot: DemoSource::new(42).fetch().validate(),
            changed: BoardKind::all().to_vec(),
        });
        app
    }

    #[test]
    fn test_number_keys_switch_boards() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active, BoardKind::Users);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.active, BoardKind::Notifications);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active, BoardKind::Submissions);
    }

    #[test]
    fn test_tab_keys_cycle_buckets() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.board().model(Utc::now()).active_tab, 1);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Left);
        // Wraps to the last bucket
        assert_eq!(app.board().model(Utc::now()).active_tab, 3);
    }

    #[test]
    fn test_page_keys_stay_in_bounds() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('2'));
        let total = app.board().model(Utc::now()).total_pages;

        press(&mut app, KeyCode::End);
        assert_eq!(app.board().model(Utc::now()).page, total);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board().model(Utc::now()).page, total);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.board().model(Utc::now()).page, 1);
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Char('/'));
        for c in "quick".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' was typed into the prompt, not treated as quit
        assert!(!app.should_quit);
        assert_eq!(app.board().query(), "quick");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.board().query(), "quick");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.board().query(), "");
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = demo_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut app, key);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
