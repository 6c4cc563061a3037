use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
}

impl NormalAction {
    pub(crate) fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                Some(Self::NextPage)
            }
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                Some(Self::PrevPage)
            }
            KeyCode::Home | KeyCode::Char('g') => Some(Self::FirstPage),
            KeyCode::End | KeyCode::Char('G') => Some(Self::LastPage),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        let Some(action) = NormalAction::from_event(&key) else {
            return;
        };
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::NextPage => self.page.next_page(),
            NormalAction::PrevPage => self.page.prev_page(),
            NormalAction::FirstPage => self.page.first_page(),
            NormalAction::LastPage => self.page.last_page(),
        }
    }
}
