/// Lexer for tinyts
///
/// Tokenizes TypeScript-like source into a stream of tokens.
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    NumberLiteral,
    True,
    False,

    // Keywords
    Const, // const

    // Operators
    Plus,     // +
    Question, // ?
    Colon,    // :
    Equals,   // =
    Arrow,    // =>

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Semicolon,  // ;

    // Identifier (variable name, parameter name, type name)
    Ident,

    // Character the language has no use for
    Unknown,

    // End of file
    Eof,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.is_at_end() {
            return self.token_at(TokenKind::Eof, "", self.line, self.column);
        }

        let start_line = self.line;
        let start_column = self.column;
        let c = self.peek();

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '+' => TokenKind::Plus,
            '=' => {
                self.advance();
                if self.peek() == '>' {
                    self.advance();
                    return self.token_at(TokenKind::Arrow, "=>", start_line, start_column);
                }
                return self.token_at(TokenKind::Equals, "=", start_line, start_column);
            }
            _ => {
                if c.is_ascii_digit() {
                    return self.number_literal();
                } else if c.is_alphabetic() || c == '_' || c == '$' {
                    return self.identifier_or_keyword();
                }
                TokenKind::Unknown
            }
        };

        self.advance();
        self.token_at(kind, &c.to_string(), start_line, start_column)
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.is_at_end() {
                return;
            }

            match self.peek() {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                '/' if self.peek_next() == Some('/') => {
                    // Comment until end of line
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn number_literal(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;
        let mut value = String::new();

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        // Fractional part only when a digit follows the dot
        if self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            value.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        self.token_at(TokenKind::NumberLiteral, &value, start_line, start_column)
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;
        let mut value = String::new();

        while !self.is_at_end() {
            let c = self.peek();
            if c.is_alphanumeric() || c == '_' || c == '$' {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match value.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "const" => TokenKind::Const,
            _ => TokenKind::Ident,
        };

        self.token_at(kind, &value, start_line, start_column)
    }

    fn token_at(&self, kind: TokenKind, lexeme: &str, line: usize, column: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.position += 1;
        self.column += 1;
        c
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLiteral => write!(f, "NUMBER"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Const => write!(f, "const"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Question => write!(f, "?"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Equals => write!(f, "="),
            TokenKind::Arrow => write!(f, "=>"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Ident => write!(f, "IDENT"),
            TokenKind::Unknown => write!(f, "UNKNOWN"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}
