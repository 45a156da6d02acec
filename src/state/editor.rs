//! Minimal multi-line text buffer backing the editor pane.
//!
//! Only what the update pipeline consumes lives here: the current text and a
//! "changed" answer from every mutating operation.

use unicode_width::UnicodeWidthChar;

/// Cursor position as (line, char index within line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Char index within the line.
    pub column: usize,
}

/// Editable text. Always holds at least one (possibly empty) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    lines: Vec<String>,
    cursor: Cursor,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
        }
    }
}

impl EditorBuffer {
    /// Buffer holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        Self {
            lines,
            cursor: Cursor::default(),
        }
    }

    /// Current text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Lines without their terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Terminal column of the cursor, accounting for wide characters.
    pub fn display_column(&self) -> usize {
        self.lines[self.cursor.line]
            .chars()
            .take(self.cursor.column)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    fn byte_index(&self) -> usize {
        let line = &self.lines[self.cursor.line];
        line.char_indices()
            .nth(self.cursor.column)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    /// Insert `ch` at the cursor.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch == '\n' {
            return self.insert_newline();
        }
        let at = self.byte_index();
        self.lines[self.cursor.line].insert(at, ch);
        self.cursor.column += 1;
        true
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) -> bool {
        let at = self.byte_index();
        let rest = self.lines[self.cursor.line].split_off(at);
        self.lines.insert(self.cursor.line + 1, rest);
        self.cursor = Cursor {
            line: self.cursor.line + 1,
            column: 0,
        };
        true
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
            let at = self.byte_index();
            self.lines[self.cursor.line].remove(at);
            return true;
        }
        if self.cursor.line == 0 {
            return false;
        }
        let current = self.lines.remove(self.cursor.line);
        self.cursor.line -= 1;
        self.cursor.column = self.line_len(self.cursor.line);
        self.lines[self.cursor.line].push_str(&current);
        true
    }

    /// Delete the character under the cursor, joining lines at line end.
    pub fn delete(&mut self) -> bool {
        if self.cursor.column < self.line_len(self.cursor.line) {
            let at = self.byte_index();
            self.lines[self.cursor.line].remove(at);
            return true;
        }
        if self.cursor.line + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(self.cursor.line + 1);
        self.lines[self.cursor.line].push_str(&next);
        true
    }

    /// Move one char left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.line_len(self.cursor.line);
        }
    }

    /// Move one char right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor.column < self.line_len(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
    }

    /// Move one line up, clamping the column.
    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
        }
    }

    /// Move one line down, clamping the column.
    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
        }
    }

    /// Jump to the start of the line.
    pub fn move_home(&mut self) {
        self.cursor.column = 0;
    }

    /// Jump to the end of the line.
    pub fn move_end(&mut self) {
        self.cursor.column = self.line_len(self.cursor.line);
    }
}
