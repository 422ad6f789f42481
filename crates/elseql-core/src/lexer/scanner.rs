//! ELSEQL tokenizer implementation.

use super::Token;

/// A lexer that tokenizes ELSEQL input on demand.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Scans an identifier segment.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        Token::Ident(String::from(&self.input[self.start..self.pos]))
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Fractional part
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance(); // consume e/E
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];

        if is_float {
            match text.parse::<f64>() {
                Ok(f) => Token::Float(f),
                Err(e) => Token::Error(format!("Invalid float: {e}")),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => Token::Int(i),
                Err(e) => Token::Error(format!("Invalid integer: {e}")),
            }
        }
    }

    /// Scans a quoted string literal with backslash escapes.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some(c) => value.push(c),
                    None => {
                        return Token::Error(String::from("Unterminated string literal"));
                    }
                },
                Some(c) => value.push(c),
                None => {
                    return Token::Error(String::from("Unterminated string literal"));
                }
            }
        }

        Token::Str(value)
    }

    /// Scans a backtick-delimited raw string. No escapes.
    fn scan_raw_string(&mut self) -> Token {
        self.advance(); // consume opening backtick
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some('`') => break,
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Token::Error(String::from("Unterminated raw string literal"));
                }
            }
        }

        let value = String::from(&self.input[content_start..self.pos]);
        self.advance(); // consume closing backtick
        Token::RawStr(value)
    }

    /// Scans the next token. Returns [`Token::Eof`] at the end of the
    /// input, and keeps returning it when called again.
    pub fn next_token(&mut self) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.start = self.pos;

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::Eof,
        };

        match c {
            '"' | '\'' => self.scan_string(c),
            '`' => self.scan_raw_string(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),
            c => {
                self.advance();
                Token::Punct(c)
            }
        }
    }

    /// Tokenizes the entire input, including the trailing `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
