//! Opal lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Span};
use logos::Logos;

/// Lexer for Opal source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    /// Buffer for peeked tokens (supports multi-token lookahead)
    peeked: Vec<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            peeked: Vec::new(),
            at_eof: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if !self.peeked.is_empty() {
            return Ok(self.peeked.remove(0));
        }

        self.scan_token()
    }

    /// Scan a new token from source
    fn scan_token(&mut self) -> CompileResult<Token> {
        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Ok(Token::new(kind, Span::new(span.start, span.end)))
            }
            Some(Err(())) => {
                let span = self.inner.span();
                Err(CompileError::lexer(
                    format!("unexpected character '{}'", self.inner.slice()),
                    Span::new(span.start, span.end),
                ))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len)))
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CompileResult<&Token> {
        self.peek_at(0)
    }

    /// Peek at the token at offset (0 = next, 1 = after next, etc.)
    pub fn peek_at(&mut self, offset: usize) -> CompileResult<&Token> {
        while self.peeked.len() <= offset {
            let token = self.scan_token()?;
            self.peeked.push(token);
        }
        Ok(&self.peeked[offset])
    }

    /// Check if the next token matches the expected kind
    pub fn check(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        self.check_at(0, expected)
    }

    /// Check the token at `offset` against the expected kind
    pub fn check_at(&mut self, offset: usize, expected: &TokenKind) -> CompileResult<bool> {
        let token = self.peek_at(offset)?;
        Ok(std::mem::discriminant(&token.kind) == std::mem::discriminant(expected))
    }

    /// Expect a specific token kind, error if not found
    pub fn expect(&mut self, expected: TokenKind) -> CompileResult<Token> {
        let token = self.next_token()?;
        if std::mem::discriminant(&token.kind) == std::mem::discriminant(&expected) {
            Ok(token)
        } else {
            Err(CompileError::parser(
                format!("expected {}, found {}", expected, token.kind),
                token.span,
            ))
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let source = "let mut const def anon if else while return";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Let));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Mut));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Const));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Def));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Anon));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::If));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Else));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::While));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Return));
    }

    #[test]
    fn test_primitive_names_are_identifiers() {
        let source = "u8 i32 bool char anonymous";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "u8"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "i32"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "bool"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "char"));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "anonymous"
        ));
    }

    #[test]
    fn test_integer_literals() {
        let source = "42 0xFF 0b1010 1_000";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::IntLiteral(s) if s == "42"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::HexLiteral(s) if s == "0xFF"));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::BinaryLiteral(s) if s == "0b1010"
        ));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::IntLiteral(s) if s == "1_000"));
    }

    #[test]
    fn test_reference_and_function_type_tokens() {
        let tokens = Lexer::new("^mut u8 def(u8) -> u8 => p^").tokenize_all().unwrap();

        assert!(matches!(tokens[0].kind, TokenKind::Caret));
        assert!(matches!(tokens[1].kind, TokenKind::Mut));
        assert!(matches!(tokens[3].kind, TokenKind::Def));
        assert!(matches!(tokens[4].kind, TokenKind::LParen));
        assert!(matches!(tokens[6].kind, TokenKind::RParen));
        assert!(matches!(tokens[7].kind, TokenKind::Arrow));
        assert!(matches!(tokens[9].kind, TokenKind::FatArrow));
        assert!(matches!(tokens[11].kind, TokenKind::Caret));
        assert!(matches!(tokens[12].kind, TokenKind::Eof));
    }

    #[test]
    fn test_string_and_char_literals() {
        let source = r#""hello world" 'a' '\n'"#;
        let mut lexer = Lexer::new(source);

        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::StringLiteral(s) if s == "\"hello world\""
        ));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::CharLiteral(s) if s == "'a'"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::CharLiteral(s) if s == "'\\n'"));
    }

    #[test]
    fn test_comments_and_lookahead() {
        let source = "let // line comment\nx /* block */ = 1;";
        let mut lexer = Lexer::new(source);

        assert!(lexer.check_at(2, &TokenKind::Eq).unwrap());
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Let));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "x"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eq));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("let $x");
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Let));
        assert!(matches!(lexer.next_token(), Err(CompileError::Lexer { .. })));
    }
}
