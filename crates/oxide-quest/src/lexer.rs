//! A small SQL scanner.
//!
//! The resolver and grader never parse full statements. They only need to
//! know which keywords a query uses and which identifier follows `FROM`, and
//! they need string literals kept apart so that `'from'` inside a quote is not
//! mistaken for the keyword.

/// Keywords the grader and resolver care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    Distinct,
    Order,
    Group,
    By,
    Having,
    Limit,
    As,
    And,
    Or,
    Not,
    Join,
    On,
    Asc,
    Desc,
}

impl Keyword {
    /// Returns the keyword for an identifier, case-insensitively.
    #[must_use]
    pub fn from_word(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "DISTINCT" => Some(Self::Distinct),
            "ORDER" => Some(Self::Order),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "LIMIT" => Some(Self::Limit),
            "AS" => Some(Self::As),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "JOIN" => Some(Self::Join),
            "ON" => Some(Self::On),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    /// Bare or quoted identifier.
    Identifier(String),
    /// Numeric literal, kept as written.
    Number(String),
    /// Single-quoted string literal, unescaped.
    String(String),
    /// Operator or punctuation, e.g. `>=` or `(`.
    Symbol(&'static str),
    /// Input the scanner could not make sense of.
    Error(String),
}

/// A lexer over one query string.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    start: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn scan_word(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let text = &self.input[self.start..self.pos];
        Keyword::from_word(text).map_or_else(
            || Token::Identifier(String::from(text)),
            Token::Keyword,
        )
    }

    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        Token::Number(String::from(&self.input[self.start..self.pos]))
    }

    /// Scans a quoted run. A doubled quote stands for one literal quote.
    fn scan_quoted(&mut self, quote: char) -> Result<String, String> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                Some(c) => value.push(c),
                None => return Err(String::from("unterminated quoted text")),
            }
        }
    }

    fn symbol(&mut self, c: char) -> Token {
        let two = match (c, self.peek()) {
            ('<', Some('=')) => Some("<="),
            ('<', Some('>')) | ('!', Some('=')) => Some("<>"),
            ('>', Some('=')) => Some(">="),
            ('|', Some('|')) => Some("||"),
            _ => None,
        };
        if let Some(op) = two {
            self.advance();
            return Token::Symbol(op);
        }
        match c {
            '(' => Token::Symbol("("),
            ')' => Token::Symbol(")"),
            ',' => Token::Symbol(","),
            ';' => Token::Symbol(";"),
            '.' => Token::Symbol("."),
            '*' => Token::Symbol("*"),
            '+' => Token::Symbol("+"),
            '-' => Token::Symbol("-"),
            '/' => Token::Symbol("/"),
            '%' => Token::Symbol("%"),
            '=' => Token::Symbol("="),
            '<' => Token::Symbol("<"),
            '>' => Token::Symbol(">"),
            _ => Token::Error(format!("unexpected character: {c}")),
        }
    }

    /// Scans the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let c = self.peek()?;
        let token = match c {
            '\'' => self.scan_quoted('\'').map_or_else(
                |_| Token::Error(String::from("unterminated string literal")),
                Token::String,
            ),
            '"' | '`' => self.scan_quoted(c).map_or_else(
                |_| Token::Error(String::from("unterminated quoted identifier")),
                Token::Identifier,
            ),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_word(),
            c => {
                self.advance();
                self.symbol(c)
            }
        };
        Some(token)
    }

    /// Scans the whole input.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

/// Scans `input`, failing on the first token the scanner rejects.
///
/// # Errors
///
/// Returns the scanner's message for the first [`Token::Error`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let tokens = Lexer::new(input).tokenize();
    if let Some((_, message)) = first_error(&tokens) {
        return Err(message.to_string());
    }
    Ok(tokens)
}

/// Position and message of the first [`Token::Error`] in `tokens`.
#[must_use]
pub fn first_error(tokens: &[Token]) -> Option<(usize, &str)> {
    tokens.iter().enumerate().find_map(|(i, t)| match t {
        Token::Error(message) => Some((i, message.as_str())),
        _ => None,
    })
}

/// Returns true if `keyword` appears as a keyword token, outside any literal.
#[must_use]
pub fn has_keyword(input: &str, keyword: Keyword) -> bool {
    Lexer::new(input)
        .tokenize()
        .iter()
        .any(|t| *t == Token::Keyword(keyword))
}

/// Returns the identifier directly after the first `FROM`, if there is one.
#[must_use]
pub fn table_after_from(tokens: &[Token]) -> Option<&str> {
    let from = tokens
        .iter()
        .position(|t| *t == Token::Keyword(Keyword::From))?;
    match tokens.get(from + 1) {
        Some(Token::Identifier(name)) => Some(name),
        _ => None,
    }
}
