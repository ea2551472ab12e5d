//! Single-line text entry used by every prompt in the footer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Byte offset into `value`, always on a grapheme boundary
    cursor: usize,
    placeholder: &'static str,
    /// Maximum number of chars, if limited
    char_limit: Option<usize>,
}

impl TextInput {
    pub fn new(placeholder: &'static str) -> Self {
        TextInput {
            placeholder,
            ..Default::default()
        }
    }

    /// Start with `value` and the cursor at its end
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if let Some(limit) = self.char_limit {
            self.value = self.value.chars().take(limit).collect();
        }
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the current text, leaving the input empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Cell column of the cursor, for drawing
    pub fn cursor_col(&self) -> usize {
        unicode::display_col(&self.value, self.cursor)
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.value.len();
                false
            }
            KeyCode::Char('u') if ctrl => {
                let changed = self.cursor > 0;
                self.value.drain(..self.cursor);
                self.cursor = 0;
                changed
            }
            KeyCode::Char('w') if ctrl => self.delete_word(),
            KeyCode::Backspace if alt || ctrl => self.delete_word(),
            KeyCode::Char(c) if !ctrl && !alt => self.insert(c),
            KeyCode::Backspace => match unicode::prev_boundary(&self.value, self.cursor) {
                Some(prev) => {
                    self.value.drain(prev..self.cursor);
                    self.cursor = prev;
                    true
                }
                None => false,
            },
            KeyCode::Delete => match unicode::next_boundary(&self.value, self.cursor) {
                Some(next) => {
                    self.value.drain(self.cursor..next);
                    true
                }
                None => false,
            },
            KeyCode::Left => {
                if let Some(prev) = unicode::prev_boundary(&self.value, self.cursor) {
                    self.cursor = prev;
                }
                false
            }
            KeyCode::Right => {
                if let Some(next) = unicode::next_boundary(&self.value, self.cursor) {
                    self.cursor = next;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                false
            }
            _ => false,
        }
    }

    /// Insert `text` at the cursor, stopping at the char limit
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            changed |= self.insert(c);
        }
        changed
    }

    fn insert(&mut self, c: char) -> bool {
        if self
            .char_limit
            .is_some_and(|limit| self.value.chars().count() >= limit)
        {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    fn delete_word(&mut self) -> bool {
        let start = unicode::word_start_before(&self.value, self.cursor);
        if start == self.cursor {
            return false;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
        true
    }
}
