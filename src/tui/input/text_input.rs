//! Text input field handling.

use unicode_width::UnicodeWidthStr;

/// State for a single-line text input field.
///
/// The cursor counts characters, not bytes, so pasted multi-byte text
/// never splits a code point.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index();
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Inserts pasted text at the cursor, dropping control characters
    /// such as line breaks.
    pub fn insert_str(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
        let at = self.byte_index();
        self.content.insert_str(at, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal columns occupied by the text before the cursor.
    pub fn cursor_width(&self) -> usize {
        self.content[..self.byte_index()].width()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        text.chars().for_each(|c| input.insert(c));
        input
    }

    #[test]
    fn edits_at_cursor() {
        let mut input = typed("abd");
        input.move_left();
        input.insert('c');
        assert_eq!(input.as_str(), "abcd");

        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "bcd");

        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "bc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn multi_byte_characters() {
        let mut input = typed("añ日");
        assert_eq!(input.cursor(), 3);
        assert_eq!(input.cursor_width(), 4);

        input.move_left();
        input.backspace();
        assert_eq!(input.as_str(), "a日");
        assert_eq!(input.cursor_width(), 1);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = typed("x");
        input.move_right();
        input.move_right();
        input.delete();
        assert_eq!(input.as_str(), "x");

        input.move_home();
        input.delete();
        input.move_left();
        input.backspace();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let mut input = typed("ad");
        input.move_left();
        input.insert_str("b\r\nc");
        assert_eq!(input.as_str(), "abcd");
        assert_eq!(input.cursor(), 3);
    }
}
