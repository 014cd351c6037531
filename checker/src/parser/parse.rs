/// Recursive descent parser for tinyts
use crate::Dialect;
use crate::ast::arith;
use crate::ast::basic::{Param, Term, Type};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

const MAX_NESTING_DEPTH: usize = 100;

/// One `;`-terminated item before the result of a program
enum ProgramItem {
    Const { name: String, init: Term },
    Statement(Term),
}

/// Build the nested term for `prefix` followed by `result`, innermost last.
/// Consecutive statements share one `Seq`; each `const` scopes over
/// everything after it.
fn fold_program(prefix: Vec<ProgramItem>, result: Term) -> Term {
    let mut rest = result;
    let mut statements = Vec::new();

    for item in prefix.into_iter().rev() {
        match item {
            ProgramItem::Statement(term) => statements.push(term),
            ProgramItem::Const { name, init } => {
                rest = wrap_statements(&mut statements, rest);
                rest = Term::constant(name, init, rest);
            }
        }
    }
    wrap_statements(&mut statements, rest)
}

/// `statements` is in reverse source order and is left empty
fn wrap_statements(statements: &mut Vec<Term>, rest: Term) -> Term {
    if statements.is_empty() {
        return rest;
    }
    statements.reverse();
    Term::seq(std::mem::take(statements), rest)
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    nesting_depth: usize,
    dialect: Dialect,
}

impl Parser {
    /// Parser for the extended dialect
    pub fn new(input: &str) -> Self {
        Self::with_dialect(input, Dialect::Basic)
    }

    pub fn with_dialect(input: &str, dialect: Dialect) -> Self {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize();
        Parser {
            tokens,
            current: 0,
            nesting_depth: 0,
            dialect,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse a whole program: bindings and statements followed by a result
    pub fn parse(&mut self) -> Result<Term, ParseError> {
        let term = self.parse_program()?;
        if !self.is_at_end() {
            return Err(self.unexpected());
        }
        Ok(term)
    }

    /// Parse a program that may only use arithmetic constructs
    ///
    /// Always parses in the arithmetic dialect, whatever the parser was
    /// built with, so extended constructs are reported where they occur.
    pub fn parse_arith(&mut self) -> Result<arith::Term, ParseError> {
        let dialect = std::mem::replace(&mut self.dialect, Dialect::Arith);
        let result = self.parse();
        self.dialect = dialect;

        let term = result?;
        arith::Term::try_from(term).map_err(|e| {
            let start = &self.tokens[0];
            ParseError {
                message: e.to_string(),
                line: start.line,
                column: start.column,
            }
        })
    }

    /// Bindings and statements are read in a loop and folded afterwards,
    /// so program length does not count against the nesting limit.
    fn parse_program(&mut self) -> Result<Term, ParseError> {
        let mut prefix = Vec::new();

        let result = loop {
            if self.check(&TokenKind::Const) {
                self.require_extended("const binding")?;
                self.advance(); // consume 'const'
                let name = self.consume_ident("Expected variable name after 'const'")?;
                self.consume(&TokenKind::Equals, "Expected '=' in const binding")?;
                let init = self.parse_expr()?;
                self.consume(&TokenKind::Semicolon, "Expected ';' after const binding")?;
                prefix.push(ProgramItem::Const { name, init });
                continue;
            }

            let term = self.parse_expr()?;
            if !self.check(&TokenKind::Semicolon) {
                break term;
            }
            self.advance(); // consume ';'

            // Trailing ';' after the result
            if self.is_at_end() {
                break term;
            }

            self.require_extended("statement sequence")?;
            prefix.push(ProgramItem::Statement(term));
        };

        Ok(fold_program(prefix, result))
    }

    fn parse_expr(&mut self) -> Result<Term, ParseError> {
        self.enter_nesting()?;
        let result = self.parse_conditional();
        self.exit_nesting();
        result
    }

    fn parse_conditional(&mut self) -> Result<Term, ParseError> {
        let cond = self.parse_addition()?;
        if !self.check(&TokenKind::Question) {
            return Ok(cond);
        }
        self.advance(); // consume '?'

        let thn = self.parse_expr()?;
        self.consume(&TokenKind::Colon, "Expected ':' in conditional expression")?;
        let els = self.parse_expr()?;

        Ok(Term::cond(cond, thn, els))
    }

    fn parse_addition(&mut self) -> Result<Term, ParseError> {
        let mut left = self.parse_call()?;
        while self.check(&TokenKind::Plus) {
            self.advance(); // consume '+'
            let right = self.parse_call()?;
            left = Term::add(left, right);
        }
        Ok(left)
    }

    fn parse_call(&mut self) -> Result<Term, ParseError> {
        let mut term = self.parse_primary()?;
        while self.check(&TokenKind::LeftParen) {
            self.require_extended("function call")?;
            self.advance(); // consume '('

            let mut args = Vec::new();
            if !self.check(&TokenKind::RightParen) {
                loop {
                    args.push(self.parse_expr()?);
                    if self.check(&TokenKind::Comma) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            self.consume(&TokenKind::RightParen, "Expected ')' after arguments")?;

            term = Term::call(term, args);
        }
        Ok(term)
    }

    fn parse_primary(&mut self) -> Result<Term, ParseError> {
        match &self.peek().kind {
            TokenKind::NumberLiteral => {
                let value = self.peek().lexeme.parse::<f64>().map_err(|_| {
                    let token = self.peek();
                    ParseError {
                        message: format!("Invalid number: {}", token.lexeme),
                        line: token.line,
                        column: token.column,
                    }
                })?;
                self.advance();
                Ok(Term::number(value))
            }

            TokenKind::True => {
                self.advance();
                Ok(Term::True)
            }

            TokenKind::False => {
                self.advance();
                Ok(Term::False)
            }

            TokenKind::Ident => {
                self.require_extended("variable")?;
                let name = self.peek().lexeme.clone();
                self.advance();
                Ok(Term::Variable(name))
            }

            TokenKind::LeftParen => {
                if self.at_function_start() {
                    return self.parse_function();
                }
                self.advance(); // consume '('
                let inner = self.parse_expr()?;
                self.consume(&TokenKind::RightParen, "Expected ')'")?;
                Ok(inner)
            }

            _ => Err(self.unexpected()),
        }
    }

    /// `(` followed by `)` `=>` or by `name :` starts an arrow function
    fn at_function_start(&self) -> bool {
        match (self.peek_at(1), self.peek_at(2)) {
            (Some(TokenKind::RightParen), Some(TokenKind::Arrow)) => true,
            (Some(TokenKind::Ident), Some(TokenKind::Colon)) => true,
            _ => false,
        }
    }

    fn parse_function(&mut self) -> Result<Term, ParseError> {
        self.require_extended("function")?;
        let params = self.parse_params()?;
        self.consume(&TokenKind::Arrow, "Expected '=>' after parameters")?;
        let body = self.parse_expr()?;
        Ok(Term::func(params, body))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.consume(&TokenKind::LeftParen, "Expected '(' before parameters")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let name = self.consume_ident("Expected parameter name")?;
                self.consume(&TokenKind::Colon, "Expected ':' after parameter name")?;
                let ty = self.parse_type()?;
                params.push(Param::new(name, ty));
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.consume(&TokenKind::RightParen, "Expected ')' after parameters")?;
        Ok(params)
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        self.enter_nesting()?;
        let result = self.parse_type_inner();
        self.exit_nesting();
        result
    }

    fn parse_type_inner(&mut self) -> Result<Type, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            let params = self.parse_params()?;
            self.consume(&TokenKind::Arrow, "Expected '=>' in function type")?;
            let ret = self.parse_type()?;
            return Ok(Type::function(params, ret));
        }

        if self.peek().kind != TokenKind::Ident {
            return Err(self.error("Expected type"));
        }
        let ty = match self.peek().lexeme.as_str() {
            "number" => Type::Number,
            "boolean" => Type::Boolean,
            other => return Err(self.error(&format!("Unknown type '{}'", other))),
        };
        self.advance();
        Ok(ty)
    }

    // Helper methods

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.current + offset).map(|t| &t.kind)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        &self.peek().kind == kind
    }

    fn consume(&mut self, kind: &TokenKind, message: &str) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    fn consume_ident(&mut self, message: &str) -> Result<String, ParseError> {
        if self.peek().kind == TokenKind::Ident {
            let lexeme = self.peek().lexeme.clone();
            self.advance();
            Ok(lexeme)
        } else {
            Err(self.error(message))
        }
    }

    fn require_extended(&self, construct: &str) -> Result<(), ParseError> {
        match self.dialect {
            Dialect::Basic => Ok(()),
            Dialect::Arith => Err(self.error(&format!(
                "{} is not part of the arithmetic dialect",
                construct
            ))),
        }
    }

    fn unexpected(&self) -> ParseError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => self.error("Unexpected end of input"),
            TokenKind::Unknown => self.error(&format!("Unexpected character '{}'", token.lexeme)),
            _ => self.error(&format!("Unexpected token: {}", token.kind)),
        }
    }

    fn error(&self, message: &str) -> ParseError {
        let token = self.peek();
        ParseError {
            message: message.to_string(),
            line: token.line,
            column: token.column,
        }
    }

    fn enter_nesting(&mut self) -> Result<(), ParseError> {
        self.nesting_depth += 1;
        if self.nesting_depth > MAX_NESTING_DEPTH {
            Err(ParseError {
                message: format!("Maximum nesting depth of {} exceeded", MAX_NESTING_DEPTH),
                line: self.peek().line,
                column: self.peek().column,
            })
        } else {
            Ok(())
        }
    }

    fn exit_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}
