use crate::parser::ast::{BinOp, Expression, PrefixOp, Value};
use crate::parser::environment::Environment;
use anyhow::{Result, anyhow};

/// Evaluate an expression against an environment
///
/// Assignments mutate the environment in place and yield `Unit`. Calls give
/// the callee a clone of the caller's environment extended with the bound
/// parameters, so a lambda body sees whatever is visible at the call site at
/// call time.
pub fn eval(expr: &Expression, env: &mut Environment) -> Result<Value> {
    match expr {
        Expression::Atomic(value) => eval_atom(value, env),
        Expression::Prefix { op, rhs } => {
            let value = eval(rhs, env)?;
            match op {
                PrefixOp::Negate => value.negate(),
                PrefixOp::Head => head(value, env),
                PrefixOp::Tail => tail(value),
            }
        }
        Expression::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, env)?;
            let rhs = eval(rhs, env)?;
            match op {
                BinOp::Add => lhs.add(rhs),
                BinOp::Sub => lhs.sub(rhs),
                BinOp::Mul => lhs.mul(rhs),
                BinOp::Div => lhs.div(rhs),
                BinOp::Mod => lhs.rem(rhs),
                BinOp::Lt => lhs.lt(rhs),
                BinOp::Gt => lhs.gt(rhs),
                BinOp::Eq => lhs.eq(rhs),
                BinOp::And => lhs.and(rhs),
                BinOp::Or => lhs.or(rhs),
            }
        }
        Expression::If {
            cond,
            then_branch,
            else_branch,
        } => {
            if eval(cond, env)?.truthy()? {
                eval(then_branch, env)
            } else {
                eval(else_branch, env)
            }
        }
        Expression::Call { name, args } => eval_call(name, args, env),
        Expression::Assign { name, value } => {
            let value = eval(value, env)?;
            env.define(name.clone(), value);
            Ok(Value::Unit)
        }
    }
}

fn eval_atom(value: &Value, env: &mut Environment) -> Result<Value> {
    match value {
        Value::Ident(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("tried to access nonexistent variable '{}'", name)),
        Value::List(items) => {
            // Evaluate each element once, rewrapping the results as atoms
            let mut evaluated = Vec::with_capacity(items.len());
            for item in items {
                evaluated.push(Expression::Atomic(eval(item, env)?));
            }
            Ok(Value::List(evaluated))
        }
        other => Ok(other.clone()),
    }
}

fn eval_call(name: &str, args: &[Expression], env: &mut Environment) -> Result<Value> {
    let (params, body) = match env.get(name) {
        Some(Value::Lambda { params, body }) => (params.clone(), (**body).clone()),
        Some(other) => {
            return Err(anyhow!("tried to call '{}', which is {}, not a function", name, other));
        }
        None => return Err(anyhow!("tried to call nonexistent function '{}'", name)),
    };

    if params.len() != args.len() {
        return Err(anyhow!(
            "function '{}' expects {} arguments, found {}",
            name,
            params.len(),
            args.len()
        ));
    }

    // Arguments are evaluated eagerly against the caller's environment
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval(arg, env)?);
    }

    // The callee runs in a snapshot of the caller's environment, so free
    // variables in the body resolve at the call site, not the definition
    // site
    let mut local = env.clone();
    for (param, value) in params.into_iter().zip(values) {
        local.define(param, value);
    }

    eval(&body, &mut local)
}

/// The first element is re-evaluated against the current environment; lists
/// built by evaluation hold atoms, so this is usually a no-op
fn head(value: Value, env: &mut Environment) -> Result<Value> {
    match value {
        Value::List(items) => match items.into_iter().next() {
            Some(first) => eval(&first, env),
            None => Err(anyhow!("can't take the head of an empty list")),
        },
        other => Err(anyhow!("can't take the head of {}", other)),
    }
}

fn tail(value: Value) -> Result<Value> {
    match value {
        Value::List(items) => {
            if items.is_empty() {
                Err(anyhow!("can't take the tail of an empty list"))
            } else {
                Ok(Value::List(items[1..].to_vec()))
            }
        }
        other => Err(anyhow!("can't take the tail of {}", other)),
    }
}
