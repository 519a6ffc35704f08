use crate::parser::ast::{BinOp, Expression, PrefixOp, Value};
use crate::parser::lexer::{Lexer, Token};
use anyhow::{Result, anyhow};

/// Binding powers for binary operators, used by the Pratt loop to decide
/// when to stop absorbing a right-hand operand
fn binding_power(op: BinOp) -> (u8, u8) {
    match op {
        BinOp::And | BinOp::Or => (0, 1),
        BinOp::Lt | BinOp::Gt | BinOp::Eq => (2, 3),
        BinOp::Add | BinOp::Sub => (4, 5),
        BinOp::Mul | BinOp::Div | BinOp::Mod => (6, 7),
    }
}

/// Prefix operators bind tighter than every binary operator
fn prefix_binding_power(_op: PrefixOp) -> u8 {
    10
}

/// Pratt parser for the rill language
///
/// Precedence climbing over the flat token stream, with recursive-descent
/// routines for the compound forms (`if`, `let`, `fn`, lists, call
/// arguments).
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a new parser from input string
    pub fn new(input: &str) -> Result<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
        })
    }

    /// Peek at the current token without advancing
    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    /// Consume and return the current token
    fn eat(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token if it matches the expected kind
    fn expect(&mut self, expected: &Token) -> bool {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consume the current token, failing if it doesn't match the expected
    /// kind
    fn assert_next(&mut self, expected: &Token) -> Result<()> {
        let next = self.eat();
        if std::mem::discriminant(&next) == std::mem::discriminant(expected) {
            Ok(())
        } else {
            Err(anyhow!("Expected {}, found {}", expected, next))
        }
    }

    /// Parse the input into a single root expression
    pub fn parse(&mut self) -> Result<Expression> {
        self.expr_bp(0)
    }

    /// The Pratt loop: parse a left-hand side, then fold in binary operators
    /// whose left binding power is at least `min_bp`
    fn expr_bp(&mut self, min_bp: u8) -> Result<Expression> {
        let token = self.eat();
        let mut lhs = match token {
            Token::Number(text) => {
                let n: i64 = text
                    .parse()
                    .map_err(|_| anyhow!("Invalid number literal '{}'", text))?;
                Expression::Atomic(Value::Int(n))
            }
            Token::True => Expression::Atomic(Value::Bool(true)),
            Token::False => Expression::Atomic(Value::Bool(false)),
            Token::CharLit(c) => Expression::Atomic(Value::Char(c)),
            Token::StrLit(s) => {
                // a string is a list of char atoms
                let chars = s
                    .chars()
                    .map(|c| Expression::Atomic(Value::Char(c)))
                    .collect();
                Expression::Atomic(Value::List(chars))
            }
            Token::Ident(name) => {
                if matches!(self.peek(), Token::LParen) {
                    let args = self.parse_call_args()?;
                    Expression::Call { name, args }
                } else {
                    Expression::Atomic(Value::Ident(name))
                }
            }
            Token::Let => self.parse_let()?,
            Token::Fn => self.parse_lambda()?,
            Token::If => self.parse_if()?,
            Token::LBracket => self.parse_list()?,
            Token::LParen => {
                let inner = self.expr_bp(0)?;
                self.assert_next(&Token::RParen)?;
                inner
            }
            Token::Minus | Token::Caret | Token::Dollar => {
                let op = match token {
                    Token::Minus => PrefixOp::Negate,
                    Token::Caret => PrefixOp::Head,
                    _ => PrefixOp::Tail,
                };
                let rhs = self.expr_bp(prefix_binding_power(op))?;
                Expression::prefix(op, rhs)
            }
            other => return Err(anyhow!("Expected an expression, found {}", other)),
        };

        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Mod,
                Token::Lt => BinOp::Lt,
                Token::Gt => BinOp::Gt,
                Token::EqEq => BinOp::Eq,
                Token::AmpAmp => BinOp::And,
                Token::PipePipe => BinOp::Or,
                _ => break,
            };

            let (left_bp, right_bp) = binding_power(op);
            if left_bp < min_bp {
                break;
            }
            self.eat();

            let rhs = self.expr_bp(right_bp)?;
            lhs = Expression::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    /// Parse `if <expr> then <expr> else <expr>`; the `if` keyword is
    /// already consumed
    fn parse_if(&mut self) -> Result<Expression> {
        let cond = self.expr_bp(0)?;
        self.assert_next(&Token::Then)?;
        let then_branch = self.expr_bp(0)?;
        self.assert_next(&Token::Else)?;
        let else_branch = self.expr_bp(0)?;
        Ok(Expression::conditional(cond, then_branch, else_branch))
    }

    /// Parse `let <ident> = <expr>`; the `let` keyword is already consumed
    fn parse_let(&mut self) -> Result<Expression> {
        let name = match self.eat() {
            Token::Ident(name) => name,
            other => {
                return Err(anyhow!(
                    "Invalid let expression, expected an identifier, found {}",
                    other
                ));
            }
        };

        self.assert_next(&Token::Assign)?;
        let value = self.expr_bp(0)?;
        Ok(Expression::assign(name, value))
    }

    /// Parse `fn (<ident>, ...) => <expr>`; the `fn` keyword is already
    /// consumed. The parameter list may be empty.
    fn parse_lambda(&mut self) -> Result<Expression> {
        self.assert_next(&Token::LParen)?;

        let mut params = Vec::new();
        if !matches!(self.peek(), Token::RParen) {
            loop {
                match self.eat() {
                    Token::Ident(name) => params.push(name),
                    other => {
                        return Err(anyhow!("Expected a parameter name, found {}", other));
                    }
                }
                if !self.expect(&Token::Comma) {
                    break;
                }
            }
        }
        self.assert_next(&Token::RParen)?;
        self.assert_next(&Token::Arrow)?;

        let body = self.expr_bp(0)?;
        Ok(Expression::Atomic(Value::Lambda {
            params,
            body: Box::new(body),
        }))
    }

    /// Parse what follows a `[`: an empty list, a range literal, a list
    /// comprehension, or a plain list literal.
    ///
    /// Ranges and comprehensions are desugared here into calls to the
    /// standard library: `[a..b]` becomes `range(a, b)`, and
    /// `[e for x in ls]` becomes `fmap(fn(x) => e, ls)`, wrapped in
    /// `filter(fn(x) => c, ...)` when a trailing `if c` is present.
    fn parse_list(&mut self) -> Result<Expression> {
        if self.expect(&Token::RBracket) {
            return Ok(Expression::Atomic(Value::List(Vec::new())));
        }

        let first = self.expr_bp(0)?;

        match self.peek() {
            Token::For => {
                self.eat();
                let name = match self.eat() {
                    Token::Ident(name) => name,
                    other => {
                        return Err(anyhow!(
                            "Invalid list comprehension, expected an identifier after 'for', found {}",
                            other
                        ));
                    }
                };
                self.assert_next(&Token::In)?;
                let source = self.expr_bp(0)?;

                let mapper = Expression::Atomic(Value::Lambda {
                    params: vec![name.clone()],
                    body: Box::new(first),
                });
                let mut out = Expression::call("fmap", vec![mapper, source]);

                if self.expect(&Token::If) {
                    let cond = self.expr_bp(0)?;
                    let predicate = Expression::Atomic(Value::Lambda {
                        params: vec![name],
                        body: Box::new(cond),
                    });
                    out = Expression::call("filter", vec![predicate, out]);
                }

                self.assert_next(&Token::RBracket)?;
                Ok(out)
            }
            Token::DotDot => {
                self.eat();
                let end = self.expr_bp(0)?;
                self.assert_next(&Token::RBracket)?;
                Ok(Expression::call("range", vec![first, end]))
            }
            _ => {
                let mut items = vec![first];
                while self.expect(&Token::Comma) {
                    items.push(self.expr_bp(0)?);
                }
                self.assert_next(&Token::RBracket)?;
                Ok(Expression::Atomic(Value::List(items)))
            }
        }
    }

    /// Parse a parenthesized, comma-separated argument list
    fn parse_call_args(&mut self) -> Result<Vec<Expression>> {
        self.assert_next(&Token::LParen)?;

        let mut args = Vec::new();
        if !matches!(self.peek(), Token::RParen) {
            loop {
                args.push(self.expr_bp(0)?);
                if !self.expect(&Token::Comma) {
                    break;
                }
            }
        }

        self.assert_next(&Token::RParen)?;
        Ok(args)
    }
}

/// Convenience function to parse a string into an expression
pub fn parse(input: &str) -> Result<Expression> {
    let mut parser = Parser::new(input)?;
    parser.parse()
}
