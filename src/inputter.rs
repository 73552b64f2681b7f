use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};
use tracing::trace;

/// Single line text input backing the search bar.
///
/// The curser position counts characters, not bytes.
#[derive(Debug, Default)]
pub struct Inputter {
    current_input: String,
    curser_pos: usize,
}

impl Inputter {
    /// Applies an editing key. Returns true if the text changed.
    pub fn read(&mut self, key: event::KeyEvent) -> bool {
        let before = self.current_input.len();
        let changed = match (key.code, key.modifiers) {
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Left, _) => self.left(),
            (KeyCode::Right, _) => self.right(),
            (KeyCode::Home, _) => self.home(),
            (KeyCode::End, _) => self.end(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear_line(),
            (KeyCode::Char(chr), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.insert(chr),
            _ => false,
        };
        trace!(
            "Input {:?}: \"{}\" ({} -> {} bytes)",
            key.code,
            self.current_input,
            before,
            self.current_input.len()
        );
        changed
    }

    pub fn get(&self) -> &str {
        &self.current_input
    }

    pub fn curser_pos(&self) -> usize {
        self.curser_pos
    }

    pub fn clear(&mut self) {
        self.current_input.clear();
        self.curser_pos = 0;
    }

    fn clear_line(&mut self) -> bool {
        let changed = !self.current_input.is_empty();
        self.clear();
        changed
    }

    fn insert(&mut self, chr: char) -> bool {
        self.current_input.insert(self.bytepos(self.curser_pos), chr);
        self.curser_pos += 1;
        true
    }

    fn backspace(&mut self) -> bool {
        if self.curser_pos == 0 {
            return false;
        }
        self.curser_pos -= 1;
        self.current_input.remove(self.bytepos(self.curser_pos));
        true
    }

    fn delete(&mut self) -> bool {
        if self.curser_pos >= self.current_input.chars().count() {
            return false;
        }
        self.current_input.remove(self.bytepos(self.curser_pos));
        true
    }

    fn left(&mut self) -> bool {
        self.curser_pos = self.curser_pos.saturating_sub(1);
        false
    }

    fn right(&mut self) -> bool {
        if self.curser_pos < self.current_input.chars().count() {
            self.curser_pos += 1;
        }
        false
    }

    fn home(&mut self) -> bool {
        self.curser_pos = 0;
        false
    }

    fn end(&mut self) -> bool {
        self.curser_pos = self.current_input.chars().count();
        false
    }

    fn bytepos(&self, char_pos: usize) -> usize {
        self.current_input
            .char_indices()
            .nth(char_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}
