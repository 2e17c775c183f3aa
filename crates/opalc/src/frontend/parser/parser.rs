//! Opal recursive descent parser

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};

/// Opal parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// End offset of the last consumed token
    prev_end: usize,
    next_id: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            prev_end: 0,
            next_id: 0,
        }
    }

    /// Parse a complete compilation unit
    pub fn parse_module(&mut self) -> CompileResult<Module> {
        let start = self.lexer.peek()?.span;
        let mut items = Vec::new();

        while !self.check(&TokenKind::Eof)? {
            items.push(self.parse_item()?);
        }

        Ok(Module::new(items, self.span_from(start)))
    }

    fn node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    // ==================== Items ====================

    fn parse_item(&mut self) -> CompileResult<Item> {
        let start = self.lexer.peek()?.span;

        let kind = if self.check(&TokenKind::Let)? {
            self.parse_let()?
        } else if self.check(&TokenKind::Const)? {
            self.parse_const()?
        } else if self.check(&TokenKind::Def)? {
            self.parse_def()?
        } else {
            let token = self.advance()?;
            return Err(CompileError::parser(
                format!("expected declaration, found {}", token.kind),
                token.span,
            ));
        };

        Ok(Item::new(kind, self.span_from(start)))
    }

    fn parse_let(&mut self) -> CompileResult<ItemKind> {
        let start = self.expect(TokenKind::Let)?.span;
        let mutable = self.match_token(&TokenKind::Mut)?;
        let (name, name_span) = self.expect_binding_name()?;

        let ty = if self.match_token(&TokenKind::Colon)? {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(TokenKind::Eq)?;
        let init = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;

        Ok(ItemKind::Let(VarDecl {
            id: self.node_id(),
            name,
            name_span,
            mutable,
            ty,
            init,
            span: self.span_from(start),
        }))
    }

    fn parse_const(&mut self) -> CompileResult<ItemKind> {
        let start = self.expect(TokenKind::Const)?.span;
        let (name, name_span) = self.expect_binding_name()?;

        let ty = if self.match_token(&TokenKind::Colon)? {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;

        Ok(ItemKind::Const(ConstDecl {
            id: self.node_id(),
            name,
            name_span,
            ty,
            value,
            span: self.span_from(start),
        }))
    }

    fn parse_def(&mut self) -> CompileResult<ItemKind> {
        let start = self.expect(TokenKind::Def)?.span;
        let (name, name_span) = self.expect_binding_name()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen)? {
            params.push(self.parse_param()?);
            while self.match_token(&TokenKind::Comma)? {
                if self.check(&TokenKind::RParen)? {
                    break;
                }
                params.push(self.parse_param()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        let return_type = if self.match_token(&TokenKind::Arrow)? {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(ItemKind::Def(FnDecl {
            id: self.node_id(),
            name,
            name_span,
            params,
            return_type,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_param(&mut self) -> CompileResult<Param> {
        let start = self.lexer.peek()?.span;
        let anonymous = self.match_token(&TokenKind::Anon)?;
        let mutable = self.match_token(&TokenKind::Mut)?;
        let (name, _) = self.expect_binding_name()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;

        Ok(Param {
            name,
            anonymous,
            mutable,
            ty,
            span: self.span_from(start),
        })
    }

    // ==================== Statements ====================

    fn parse_block(&mut self) -> CompileResult<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();

        while !self.check(&TokenKind::RBrace)? && !self.check(&TokenKind::Eof)? {
            stmts.push(self.parse_stmt()?);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Block::new(stmts, self.span_from(start)))
    }

    fn parse_stmt(&mut self) -> CompileResult<Stmt> {
        let start = self.lexer.peek()?.span;

        let is_item = self.check(&TokenKind::Let)?
            || self.check(&TokenKind::Const)?
            || (self.check(&TokenKind::Def)? && !self.lexer.check_at(1, &TokenKind::LParen)?);
        if is_item {
            let item = self.parse_item()?;
            let span = item.span;
            return Ok(Stmt::new(StmtKind::Item(item), span));
        }

        if self.match_token(&TokenKind::Return)? {
            let value = if self.check(&TokenKind::Semi)? {
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.expect(TokenKind::Semi)?;
            return Ok(Stmt::new(StmtKind::Return(value), self.span_from(start)));
        }

        if self.check(&TokenKind::If)? {
            return self.parse_if();
        }

        if self.match_token(&TokenKind::While)? {
            let condition = self.parse_expr()?;
            let body = self.parse_block()?;
            return Ok(Stmt::new(
                StmtKind::While { condition, body },
                self.span_from(start),
            ));
        }

        if self.check(&TokenKind::LBrace)? {
            let block = self.parse_block()?;
            return Ok(Stmt::new(StmtKind::Block(block), self.span_from(start)));
        }

        let expr = self.parse_expr()?;
        if self.match_token(&TokenKind::Eq)? {
            let value = self.parse_expr()?;
            self.expect(TokenKind::Semi)?;
            return Ok(Stmt::new(
                StmtKind::Assign { target: expr, value },
                self.span_from(start),
            ));
        }

        self.expect(TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Expr(expr), self.span_from(start)))
    }

    fn parse_if(&mut self) -> CompileResult<Stmt> {
        let start = self.expect(TokenKind::If)?.span;
        let condition = self.parse_expr()?;
        let then_block = self.parse_block()?;

        let else_branch = if self.match_token(&TokenKind::Else)? {
            if self.check(&TokenKind::If)? {
                Some(Box::new(self.parse_if()?))
            } else {
                let else_start = self.lexer.peek()?.span;
                let block = self.parse_block()?;
                Some(Box::new(Stmt::new(StmtKind::Block(block), self.span_from(else_start))))
            }
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If { condition, then_block, else_branch },
            self.span_from(start),
        ))
    }

    // ==================== Types ====================

    fn parse_type(&mut self) -> CompileResult<TypeExpr> {
        let start = self.lexer.peek()?.span;

        let kind = if self.match_token(&TokenKind::LBracket)? {
            // Array: [T, N]
            let element = self.parse_type()?;
            self.expect(TokenKind::Comma)?;
            let size = self.parse_expr()?;
            self.expect(TokenKind::RBracket)?;
            TypeExprKind::Array {
                element: Box::new(element),
                size: Box::new(size),
            }
        } else if self.match_token(&TokenKind::Caret)? {
            // Reference
            let mutable = self.match_token(&TokenKind::Mut)?;
            let target = self.parse_type()?;
            TypeExprKind::Reference { mutable, target: Box::new(target) }
        } else if self.match_token(&TokenKind::Def)? {
            // Function pointer
            self.expect(TokenKind::LParen)?;
            let mut params = Vec::new();
            if !self.check(&TokenKind::RParen)? {
                params.push(self.parse_type()?);
                while self.match_token(&TokenKind::Comma)? {
                    if self.check(&TokenKind::RParen)? {
                        break;
                    }
                    params.push(self.parse_type()?);
                }
            }
            self.expect(TokenKind::RParen)?;
            let ret = if self.match_token(&TokenKind::Arrow)? {
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            TypeExprKind::Function { params, ret }
        } else {
            // Named type; literal keywords are kept so sema can reject them
            let token = self.advance()?;
            match token.kind {
                TokenKind::Identifier(name) => TypeExprKind::Named(name),
                TokenKind::True => TypeExprKind::Named("true".to_string()),
                TokenKind::False => TypeExprKind::Named("false".to_string()),
                other => {
                    return Err(CompileError::parser(
                        format!("expected type, found {}", other),
                        token.span,
                    ));
                }
            }
        };

        Ok(TypeExpr::new(kind, self.span_from(start)))
    }

    // ==================== Expressions ====================

    fn parse_expr(&mut self) -> CompileResult<Expr> {
        self.parse_expr_with_precedence(0)
    }

    fn parse_expr_with_precedence(&mut self, min_prec: u8) -> CompileResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op()? {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }

            self.advance()?; // consume operator
            let right = self.parse_expr_with_precedence(prec + 1)?;

            let span = left.span.to(right.span);
            left = self.expr(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn peek_binary_op(&mut self) -> CompileResult<Option<BinOp>> {
        Ok(match &self.lexer.peek()?.kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Percent => Some(BinOp::Rem),
            TokenKind::AmpAmp => Some(BinOp::And),
            TokenKind::PipePipe => Some(BinOp::Or),
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::NotEq => Some(BinOp::Ne),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::LtEq => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::GtEq => Some(BinOp::Ge),
            _ => None,
        })
    }

    fn parse_unary_expr(&mut self) -> CompileResult<Expr> {
        let start = self.lexer.peek()?.span;

        if self.match_token(&TokenKind::Minus)? {
            let operand = self.parse_unary_expr()?;
            let span = start.to(operand.span);
            return Ok(self.expr(
                ExprKind::Unary { op: UnaryOp::Neg, operand: Box::new(operand) },
                span,
            ));
        }

        if self.match_token(&TokenKind::Bang)? {
            let operand = self.parse_unary_expr()?;
            let span = start.to(operand.span);
            return Ok(self.expr(
                ExprKind::Unary { op: UnaryOp::Not, operand: Box::new(operand) },
                span,
            ));
        }

        if self.match_token(&TokenKind::Amp)? {
            let operand = self.parse_unary_expr()?;
            let span = start.to(operand.span);
            return Ok(self.expr(ExprKind::AddressOf(Box::new(operand)), span));
        }

        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> CompileResult<Expr> {
        let mut expr = self.parse_primary_expr()?;

        loop {
            if self.match_token(&TokenKind::LParen)? {
                // Function call
                let args = self.parse_call_args()?;
                self.expect(TokenKind::RParen)?;
                let span = self.span_from(expr.span);
                expr = self.expr(
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                );
            } else if self.match_token(&TokenKind::LBracket)? {
                // Index
                let index = self.parse_expr()?;
                self.expect(TokenKind::RBracket)?;
                let span = self.span_from(expr.span);
                expr = self.expr(
                    ExprKind::Index {
                        base: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else if self.match_token(&TokenKind::Caret)? {
                // Dereference
                let span = self.span_from(expr.span);
                expr = self.expr(ExprKind::Deref(Box::new(expr)), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_call_args(&mut self) -> CompileResult<Vec<Arg>> {
        let mut args = Vec::new();

        if !self.check(&TokenKind::RParen)? {
            args.push(self.parse_call_arg()?);
            while self.match_token(&TokenKind::Comma)? {
                if self.check(&TokenKind::RParen)? {
                    break;
                }
                args.push(self.parse_call_arg()?);
            }
        }

        Ok(args)
    }

    fn parse_call_arg(&mut self) -> CompileResult<Arg> {
        let start = self.lexer.peek()?.span;

        let name = if self.check(&TokenKind::Identifier(String::new()))?
            && self.lexer.check_at(1, &TokenKind::Colon)?
        {
            let name = self.expect_identifier()?;
            self.expect(TokenKind::Colon)?;
            Some(name)
        } else {
            None
        };

        let value = self.parse_expr()?;
        Ok(Arg {
            name,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_primary_expr(&mut self) -> CompileResult<Expr> {
        let start = self.lexer.peek()?.span;

        if self.check(&TokenKind::LParen)? {
            if self.is_lambda_start()? {
                return self.parse_lambda();
            }
            self.advance()?;
            let inner = self.parse_expr()?;
            self.expect(TokenKind::RParen)?;
            let span = self.span_from(start);
            return Ok(self.expr(ExprKind::Paren(Box::new(inner)), span));
        }

        if self.match_token(&TokenKind::LBracket)? {
            let mut elements = Vec::new();
            if !self.check(&TokenKind::RBracket)? {
                elements.push(self.parse_expr()?);
                while self.match_token(&TokenKind::Comma)? {
                    if self.check(&TokenKind::RBracket)? {
                        break;
                    }
                    elements.push(self.parse_expr()?);
                }
            }
            self.expect(TokenKind::RBracket)?;
            let span = self.span_from(start);
            return Ok(self.expr(ExprKind::Array(elements), span));
        }

        let token = self.advance()?;
        let kind = match token.kind {
            TokenKind::IntLiteral(text)
            | TokenKind::HexLiteral(text)
            | TokenKind::BinaryLiteral(text) => ExprKind::IntLiteral(text),
            TokenKind::True => ExprKind::BoolLiteral(true),
            TokenKind::False => ExprKind::BoolLiteral(false),
            TokenKind::CharLiteral(text) => {
                let value = unescape(&text[1..text.len() - 1], token.span)?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => ExprKind::CharLiteral(c),
                    _ => {
                        return Err(CompileError::parser("invalid character literal", token.span));
                    }
                }
            }
            TokenKind::StringLiteral(text) => {
                ExprKind::StringLiteral(unescape(&text[1..text.len() - 1], token.span)?)
            }
            TokenKind::Identifier(name) => ExprKind::Identifier(name),
            other => {
                return Err(CompileError::parser(
                    format!("expected expression, found {}", other),
                    token.span,
                ));
            }
        };

        Ok(self.expr(kind, token.span))
    }

    /// Whether the `(` ahead opens a lambda rather than a grouped expression
    fn is_lambda_start(&mut self) -> CompileResult<bool> {
        // `()` is never a valid expression
        if self.lexer.check_at(1, &TokenKind::RParen)? {
            return Ok(true);
        }
        if !self.lexer.check_at(1, &TokenKind::Identifier(String::new()))? {
            return Ok(false);
        }
        if self.lexer.check_at(2, &TokenKind::Colon)? || self.lexer.check_at(2, &TokenKind::Comma)? {
            return Ok(true);
        }
        // (x) => ... or (x) -> T => ...
        Ok(self.lexer.check_at(2, &TokenKind::RParen)?
            && (self.lexer.check_at(3, &TokenKind::FatArrow)?
                || self.lexer.check_at(3, &TokenKind::Arrow)?))
    }

    fn parse_lambda(&mut self) -> CompileResult<Expr> {
        let start = self.expect(TokenKind::LParen)?.span;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen)? {
            params.push(self.parse_lambda_param()?);
            while self.match_token(&TokenKind::Comma)? {
                if self.check(&TokenKind::RParen)? {
                    break;
                }
                params.push(self.parse_lambda_param()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        let return_type = if self.match_token(&TokenKind::Arrow)? {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(TokenKind::FatArrow)?;
        let body = if self.check(&TokenKind::LBrace)? {
            LambdaBody::Block(self.parse_block()?)
        } else {
            LambdaBody::Expr(Box::new(self.parse_expr()?))
        };

        let span = self.span_from(start);
        Ok(self.expr(
            ExprKind::Lambda(Lambda { params, return_type, body }),
            span,
        ))
    }

    fn parse_lambda_param(&mut self) -> CompileResult<LambdaParam> {
        let start = self.lexer.peek()?.span;
        let name = self.expect_identifier()?;
        let ty = if self.match_token(&TokenKind::Colon)? {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(LambdaParam {
            name,
            ty,
            span: self.span_from(start),
        })
    }

    // ==================== Helpers ====================

    fn expr(&mut self, kind: ExprKind, span: Span) -> Expr {
        let id = self.node_id();
        Expr::new(id, kind, span)
    }

    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end.max(start.end))
    }

    fn advance(&mut self) -> CompileResult<Token> {
        let token = self.lexer.next_token()?;
        self.prev_end = token.span.end;
        Ok(token)
    }

    fn check(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        self.lexer.check(expected)
    }

    fn match_token(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        if self.check(expected)? {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, expected: TokenKind) -> CompileResult<Token> {
        let token = self.lexer.expect(expected)?;
        self.prev_end = token.span.end;
        Ok(token)
    }

    fn expect_identifier(&mut self) -> CompileResult<String> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Identifier(name) => Ok(name),
            _ => Err(CompileError::parser(
                format!("expected identifier, found {}", token.kind),
                token.span,
            )),
        }
    }

    /// Name in a declaration position
    ///
    /// `true` and `false` are accepted here so that the semantic pass reports
    /// them as reserved identifiers.
    fn expect_binding_name(&mut self) -> CompileResult<(String, Span)> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Identifier(name) => Ok((name, token.span)),
            TokenKind::True => Ok(("true".to_string(), token.span)),
            TokenKind::False => Ok(("false".to_string(), token.span)),
            _ => Err(CompileError::parser(
                format!("expected identifier, found {}", token.kind),
                token.span,
            )),
        }
    }
}

/// Resolve backslash escapes in a char or string literal body
fn unescape(body: &str, span: Span) -> CompileResult<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('\'') => '\'',
            Some('"') => '"',
            Some(other) => {
                return Err(CompileError::parser(format!("unknown escape '\\{}'", other), span));
            }
            None => return Err(CompileError::parser("unterminated escape", span)),
        };
        out.push(escaped);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Module {
        Parser::new(source).parse_module().unwrap()
    }

    fn first_fn(module: &Module) -> &FnDecl {
        match &module.items[0].kind {
            ItemKind::Def(f) => f,
            _ => panic!("expected function"),
        }
    }

    #[test]
    fn test_parse_let_and_const() {
        let module = parse("let mut x: u8 = 5; const N: u32 = 0x10;");

        assert_eq!(module.items.len(), 2);
        match &module.items[0].kind {
            ItemKind::Let(v) => {
                assert_eq!(v.name, "x");
                assert!(v.mutable);
                assert!(matches!(&v.ty, Some(TypeExpr { kind: TypeExprKind::Named(n), .. }) if n == "u8"));
                assert!(matches!(&v.init.kind, ExprKind::IntLiteral(s) if s == "5"));
            }
            _ => panic!("expected let"),
        }
        match &module.items[1].kind {
            ItemKind::Const(c) => {
                assert_eq!(c.name, "N");
                assert!(matches!(&c.value.kind, ExprKind::IntLiteral(s) if s == "0x10"));
            }
            _ => panic!("expected const"),
        }
    }

    #[test]
    fn test_parse_function_with_anon_param() {
        let module = parse("def f(anon x: u8, mut y: ^mut u8) -> u8 { return x; }");
        let f = first_fn(&module);

        assert_eq!(f.name, "f");
        assert_eq!(f.params.len(), 2);
        assert!(f.params[0].anonymous);
        assert!(!f.params[1].anonymous);
        assert!(f.params[1].mutable);
        assert!(matches!(
            &f.params[1].ty.kind,
            TypeExprKind::Reference { mutable: true, .. }
        ));
        assert!(f.return_type.is_some());
        assert_eq!(f.body.stmts.len(), 1);
    }

    #[test]
    fn test_parse_composite_types() {
        let module = parse("let p: def([u8, 4], ^u8) -> bool = f;");
        match &module.items[0].kind {
            ItemKind::Let(v) => match &v.ty.as_ref().unwrap().kind {
                TypeExprKind::Function { params, ret } => {
                    assert_eq!(params.len(), 2);
                    assert!(matches!(params[0].kind, TypeExprKind::Array { .. }));
                    assert!(matches!(params[1].kind, TypeExprKind::Reference { mutable: false, .. }));
                    assert!(ret.is_some());
                }
                _ => panic!("expected function type"),
            },
            _ => panic!("expected let"),
        }
    }

    #[test]
    fn test_parse_lambda_forms() {
        let module = parse(
            "let a: def(u8) -> u8 = (x: u8) -> u8 => x; \
             let b: def(u8) -> u8 = (x) => x; \
             let c: def() = () => { return; }; \
             let d: u8 = (x);",
        );

        let inits: Vec<&Expr> = module
            .items
            .iter()
            .map(|item| match &item.kind {
                ItemKind::Let(v) => &v.init,
                _ => panic!("expected let"),
            })
            .collect();

        assert!(matches!(&inits[0].kind, ExprKind::Lambda(l) if l.params[0].ty.is_some() && l.return_type.is_some()));
        assert!(matches!(&inits[1].kind, ExprKind::Lambda(l) if l.params[0].ty.is_none()));
        assert!(matches!(&inits[2].kind, ExprKind::Lambda(l) if matches!(l.body, LambdaBody::Block(_))));
        assert!(matches!(&inits[3].kind, ExprKind::Paren(_)));
    }

    #[test]
    fn test_parse_named_and_positional_args() {
        let module = parse("def main() { f(x: 5, 6); }");
        let f = first_fn(&module);

        match &f.body.stmts[0].kind {
            StmtKind::Expr(Expr { kind: ExprKind::Call { args, .. }, .. }) => {
                assert_eq!(args.len(), 2);
                assert_eq!(args[0].name.as_deref(), Some("x"));
                assert!(args[1].name.is_none());
            }
            _ => panic!("expected call statement"),
        }
    }

    #[test]
    fn test_parse_assignment_through_reference() {
        let module = parse("def main() { p^ = 1; a[0] = 2; }");
        let f = first_fn(&module);

        assert!(matches!(
            &f.body.stmts[0].kind,
            StmtKind::Assign { target: Expr { kind: ExprKind::Deref(_), .. }, .. }
        ));
        assert!(matches!(
            &f.body.stmts[1].kind,
            StmtKind::Assign { target: Expr { kind: ExprKind::Index { .. }, .. }, .. }
        ));
    }

    #[test]
    fn test_parse_precedence() {
        let module = parse("const X: u8 = 1 + 2 * 3;");
        match &module.items[0].kind {
            ItemKind::Const(c) => match &c.value.kind {
                ExprKind::Binary { op, right, .. } => {
                    assert_eq!(*op, BinOp::Add);
                    assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
                }
                _ => panic!("expected binary"),
            },
            _ => panic!("expected const"),
        }
    }

    #[test]
    fn test_parse_control_flow() {
        let module = parse(
            "def main() { if a < 1 { } else if a > 2 { } else { } while true { { } } }",
        );
        let f = first_fn(&module);

        match &f.body.stmts[0].kind {
            StmtKind::If { else_branch: Some(else_branch), .. } => {
                assert!(matches!(else_branch.kind, StmtKind::If { else_branch: Some(_), .. }));
            }
            _ => panic!("expected if/else"),
        }
        assert!(matches!(f.body.stmts[1].kind, StmtKind::While { .. }));
    }

    #[test]
    fn test_parse_literals() {
        let module = parse(r#"def main() { 'a'; '\n'; "hi\t"; true; }"#);
        let f = first_fn(&module);

        assert!(matches!(&f.body.stmts[0].kind, StmtKind::Expr(Expr { kind: ExprKind::CharLiteral('a'), .. })));
        assert!(matches!(&f.body.stmts[1].kind, StmtKind::Expr(Expr { kind: ExprKind::CharLiteral('\n'), .. })));
        assert!(matches!(&f.body.stmts[2].kind, StmtKind::Expr(Expr { kind: ExprKind::StringLiteral(s), .. }) if s == "hi\t"));
        assert!(matches!(&f.body.stmts[3].kind, StmtKind::Expr(Expr { kind: ExprKind::BoolLiteral(true), .. })));
    }

    #[test]
    fn test_reserved_names_reach_the_ast() {
        let module = parse("let true: u8 = 1;");
        assert_eq!(module.items[0].name().0, "true");
    }

    #[test]
    fn test_node_ids_are_unique() {
        let module = parse("let a: u8 = 1 + 2; let b: u8 = a;");
        let mut ids = Vec::new();
        for item in &module.items {
            if let ItemKind::Let(v) = &item.kind {
                ids.push(v.id);
                ids.push(v.init.id);
            }
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_parse_error() {
        let result = Parser::new("let = 5;").parse_module();
        assert!(matches!(result, Err(CompileError::Parser { .. })));
    }
}
