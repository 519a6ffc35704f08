use anyhow::{Result, anyhow};
use std::fmt;

/// Prefix operators: `-` (negate), `^` (head), `$` (tail)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Negate,
    Head,
    Tail,
}

/// Binary operators, loosest-binding first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    And,
    Or,
    Lt,
    Gt,
    Eq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// The result of evaluating an expression
///
/// A string has no variant of its own: it is a `List` whose elements are all
/// `Char` atoms, and rendering detects that shape. List elements are stored
/// as expression nodes, but every path that builds a list wraps
/// already-evaluated values back into `Expression::Atomic`, so the elements
/// behave like memoized values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Char(char),
    List(Vec<Expression>),
    /// A bare identifier; only lives inside expression trees, resolved away
    /// by evaluation
    Ident(String),
    /// A lambda captures nothing: free variables in the body resolve against
    /// the caller's environment at every call
    Lambda {
        params: Vec<String>,
        body: Box<Expression>,
    },
    /// The result of an assignment; suppressed from REPL output
    Unit,
}

/// Represents different types of expressions in the rill language
///
/// Everything is an expression, assignments included; there are no
/// statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal or identifier: 42, true, 'a', [1, 2], x
    Atomic(Value),

    /// Prefix operation: -n, ^ls, $ls
    Prefix {
        op: PrefixOp,
        rhs: Box<Expression>,
    },

    /// Binary operation: a + b, a == b, a && b
    Binary {
        op: BinOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    /// Conditional: if c then a else b (all three parts required)
    If {
        cond: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },

    /// Call by name: fib(10), fmap(f, ls)
    Call {
        name: String,
        args: Vec<Expression>,
    },

    /// Assignment: let x = expr (evaluates to unit)
    Assign {
        name: String,
        value: Box<Expression>,
    },
}

impl Expression {
    /// Helper constructor for atomic expressions
    pub fn atom(val: Value) -> Self {
        Expression::Atomic(val)
    }

    /// Helper constructor for prefix expressions
    pub fn prefix(op: PrefixOp, rhs: Expression) -> Self {
        Expression::Prefix {
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Helper constructor for binary expressions
    pub fn binary(op: BinOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Helper constructor for conditional expressions
    pub fn conditional(cond: Expression, then_branch: Expression, else_branch: Expression) -> Self {
        Expression::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Helper constructor for call expressions
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    /// Helper constructor for assignment expressions
    pub fn assign(name: impl Into<String>, value: Expression) -> Self {
        Expression::Assign {
            name: name.into(),
            value: Box::new(value),
        }
    }
}

impl Value {
    /// Integer addition, or concatenation when both sides are lists
    pub fn add(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
            (Value::List(mut a), Value::List(b)) => {
                a.extend(b);
                Ok(Value::List(a))
            }
            (lhs, rhs) => Err(anyhow!("can't add {} and {}", lhs, rhs)),
        }
    }

    pub fn sub(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_sub(b))),
            (lhs, rhs) => Err(anyhow!("can't subtract {} from {}", rhs, lhs)),
        }
    }

    pub fn mul(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_mul(b))),
            (lhs, rhs) => Err(anyhow!("can't multiply {} and {}", lhs, rhs)),
        }
    }

    /// Integer division, truncating toward zero
    pub fn div(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(_), Value::Int(0)) => Err(anyhow!("division by zero")),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_div(b))),
            (lhs, rhs) => Err(anyhow!("can't divide {} by {}", lhs, rhs)),
        }
    }

    pub fn rem(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(_), Value::Int(0)) => Err(anyhow!("modulo by zero")),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_rem(b))),
            (lhs, rhs) => Err(anyhow!("can't take {} modulo {}", lhs, rhs)),
        }
    }

    pub fn lt(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
            (lhs, rhs) => Err(anyhow!("can't compare {} and {}", lhs, rhs)),
        }
    }

    pub fn gt(self, rhs: Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
            (lhs, rhs) => Err(anyhow!("can't compare {} and {}", lhs, rhs)),
        }
    }

    /// Equality on two integers; if either side is a boolean, both sides are
    /// coerced to their truthiness first (so `true == [1]` is permitted)
    pub fn eq(self, rhs: Value) -> Result<Value> {
        match (&self, &rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a == b)),
            (Value::Bool(_), _) | (_, Value::Bool(_)) => {
                Ok(Value::Bool(self.truthy()? == rhs.truthy()?))
            }
            _ => Err(anyhow!("can't compare {} and {}", self, rhs)),
        }
    }

    pub fn and(self, rhs: Value) -> Result<Value> {
        match (&self, &rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            _ => Err(anyhow!("can't apply '&&' to {} and {}", self, rhs)),
        }
    }

    pub fn or(self, rhs: Value) -> Result<Value> {
        match (&self, &rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
            _ => Err(anyhow!("can't apply '||' to {} and {}", self, rhs)),
        }
    }

    /// `-` flips the sign of an integer or the truth of a boolean
    pub fn negate(self) -> Result<Value> {
        match self {
            Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(anyhow!("can't negate {}", other)),
        }
    }

    /// Truthiness coercion: booleans are themselves, lists are true iff
    /// non-empty, everything else is an error
    pub fn truthy(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::List(items) => Ok(!items.is_empty()),
            other => Err(anyhow!("can't coerce {} to a boolean", other)),
        }
    }
}

/// True when every element of the list is a `Char` atom, i.e. the list is a
/// string
fn is_string_shaped(items: &[Expression]) -> bool {
    !items.is_empty()
        && items
            .iter()
            .all(|e| matches!(e, Expression::Atomic(Value::Char(_))))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::List(items) if is_string_shaped(items) => {
                write!(f, "\"")?;
                for item in items {
                    if let Expression::Atomic(Value::Char(c)) = item {
                        write!(f, "{}", c)?;
                    }
                }
                write!(f, "\"")
            }
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Ident(name) => write!(f, "{}", name),
            Value::Lambda { params, body } => {
                write!(f, "fn({}) => {}", params.join(", "), body)
            }
            Value::Unit => write!(f, "()"),
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Negate => write!(f, "-"),
            PrefixOp::Head => write!(f, "^"),
            PrefixOp::Tail => write!(f, "$"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::And => write!(f, "&&"),
            BinOp::Or => write!(f, "||"),
            BinOp::Lt => write!(f, "<"),
            BinOp::Gt => write!(f, ">"),
            BinOp::Eq => write!(f, "=="),
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::Mod => write!(f, "%"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Atomic(val) => write!(f, "{}", val),
            Expression::Prefix { op, rhs } => write!(f, "{}{}", op, rhs),
            Expression::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            Expression::If {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "if {} then {} else {}", cond, then_branch, else_branch),
            Expression::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expression::Assign { name, value } => write!(f, "let {} = {}", name, value),
        }
    }
}
