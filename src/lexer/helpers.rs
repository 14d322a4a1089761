use super::Lexer;

impl<'a> Lexer<'a> {
    pub fn peek_char(&self) -> char {
        self.peek_char_n(0)
    }

    pub fn peek_char_n(&self, n: usize) -> char {
        self.input[self.position..].chars().nth(n).unwrap_or('\0')
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn consume_char(&mut self) {
        let Some(current_char) = self.input[self.position..].chars().next() else {
            return;
        };
        self.position += current_char.len_utf8();

        if current_char == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn consume_while<F>(&mut self, predicate: F)
    where
        F: Fn(char) -> bool,
    {
        while !self.is_at_end() && predicate(self.peek_char()) {
            self.consume_char();
        }
    }

    pub fn get_slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Text of a 1-based source line, empty when out of range
    pub fn line_text(&self, line: usize) -> String {
        line.checked_sub(1)
            .and_then(|index| self.input.lines().nth(index))
            .unwrap_or_default()
            .to_string()
    }
}
