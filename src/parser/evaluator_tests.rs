//! Language-level integration tests: whole programs run through the
//! interpreter, stdlib included.

use crate::parser::ast::{Expression, Value};
use crate::parser::interpreter::Interpreter;

fn interp() -> Interpreter {
    Interpreter::new().unwrap()
}

fn int_list(items: &[i64]) -> Value {
    Value::List(
        items
            .iter()
            .map(|&n| Expression::Atomic(Value::Int(n)))
            .collect(),
    )
}

#[test]
fn test_arithmetic_precedence() {
    let mut i = interp();
    assert_eq!(i.eval("5 + 12 * 3 - 2").unwrap(), Value::Int(39));
}

#[test]
fn test_parenthesized_negation() {
    let mut i = interp();
    assert_eq!(i.eval("(5 + -12) * (3 - -2)").unwrap(), Value::Int(-35));
}

#[test]
fn test_recursive_fibonacci() {
    let mut i = interp();
    i.eval("let fib = fn (n) => if (n < 2) then (1) else (fib(n - 1) + fib(n - 2))")
        .unwrap();
    assert_eq!(i.eval("fib(10)").unwrap(), Value::Int(89));
}

#[test]
fn test_range() {
    let mut i = interp();
    assert_eq!(i.eval("range(5, 10)").unwrap(), int_list(&[5, 6, 7, 8, 9]));
    assert_eq!(i.eval("[5..10]").unwrap(), int_list(&[5, 6, 7, 8, 9]));
}

#[test]
fn test_fmap() {
    let mut i = interp();
    assert_eq!(
        i.eval("fmap(fn (n) => n * n, [1..5])").unwrap(),
        int_list(&[1, 4, 9, 16])
    );
}

#[test]
fn test_filter() {
    let mut i = interp();
    assert_eq!(
        i.eval("filter(fn (n) => n % 3 == 0, [0..10])").unwrap(),
        int_list(&[0, 3, 6, 9])
    );
}

#[test]
fn test_fold_sum_of_thousand() {
    let mut i = interp();
    assert_eq!(
        i.eval("fold(fn (acc, n) => acc + n, 0, [0..1000])").unwrap(),
        Value::Int(499500)
    );
    assert_eq!(i.eval("sum([0..1000])").unwrap(), Value::Int(499500));
}

#[test]
fn test_product() {
    let mut i = interp();
    assert_eq!(i.eval("product([1..5])").unwrap(), Value::Int(24));
}

#[test]
fn test_reverse() {
    let mut i = interp();
    assert_eq!(i.eval("reverse([1..4])").unwrap(), int_list(&[3, 2, 1]));
}

#[test]
fn test_comprehension_matches_fmap() {
    let mut i = interp();
    let comprehension = i.eval("[n * 2 for n in [1..5]]").unwrap();
    let fmapped = i.eval("fmap(fn (n) => n * 2, [1..5])").unwrap();
    assert_eq!(comprehension, fmapped);
    assert_eq!(comprehension, int_list(&[2, 4, 6, 8]));
}

#[test]
fn test_comprehension_with_condition() {
    let mut i = interp();
    assert_eq!(
        i.eval("[n for n in [0..10] if n % 3 == 0]").unwrap(),
        int_list(&[0, 3, 6, 9])
    );
}

#[test]
fn test_strings_are_char_lists() {
    let mut i = interp();
    assert_eq!(i.eval("\"abc\"").unwrap().to_string(), "\"abc\"");
    assert_eq!(i.eval("'a'").unwrap().to_string(), "'a'");
    assert_eq!(i.eval("\"ab\" + \"cd\"").unwrap().to_string(), "\"abcd\"");
    assert_eq!(i.eval("^\"abc\"").unwrap(), Value::Char('a'));
    assert_eq!(i.eval("reverse(\"abc\")").unwrap().to_string(), "\"cba\"");
}

#[test]
fn test_higher_order_functions_as_values() {
    let mut i = interp();
    i.eval("let twice = fn (f, x) => f(f(x))").unwrap();
    i.eval("let inc = fn (n) => n + 1").unwrap();
    assert_eq!(i.eval("twice(inc, 5)").unwrap(), Value::Int(7));
}

#[test]
fn test_fold_based_fibonacci() {
    let mut i = interp();
    i.eval("let fib_step = fn (pair, n) => [^$pair, ^pair + ^$pair]")
        .unwrap();
    i.eval("let efficient_fib = fn (n) => ^fold(fib_step, [1, 1], [0..n])")
        .unwrap();
    assert_eq!(i.eval("efficient_fib(10)").unwrap(), Value::Int(89));
}

// The language resolves a lambda's free variables against the caller's
// environment at call time. This pins down that behavior so a change to
// lexical capture would be caught.
#[test]
fn test_call_site_scoping_characterization() {
    let mut i = interp();
    i.eval("let add_n = fn (x) => x + n").unwrap();
    i.eval("let n = 10").unwrap();
    assert_eq!(i.eval("add_n(1)").unwrap(), Value::Int(11));
    i.eval("let n = 20").unwrap();
    assert_eq!(i.eval("add_n(1)").unwrap(), Value::Int(21));
}

#[test]
fn test_arity_mismatch_is_an_error() {
    let mut i = interp();
    i.eval("let f = fn (a, b) => a + b").unwrap();
    let err = i.eval("f(1, 2, 3)").unwrap_err();
    assert!(err.to_string().contains("expects 2 arguments, found 3"));
}

#[test]
fn test_undefined_variable_is_an_error() {
    let mut i = interp();
    let err = i.eval("undefined_thing").unwrap_err();
    assert!(err.to_string().contains("nonexistent variable"));
}

#[test]
fn test_head_of_empty_list_is_an_error() {
    let mut i = interp();
    let err = i.eval("^[]").unwrap_err();
    assert!(err.to_string().contains("head of an empty list"));
}

#[test]
fn test_non_boolean_logic_is_an_error() {
    let mut i = interp();
    let err = i.eval("1 && true").unwrap_err();
    assert!(err.to_string().contains("can't apply '&&'"));
}

#[test]
fn test_errors_do_not_poison_the_session() {
    let mut i = interp();
    assert!(i.eval("1 +").is_err());
    assert!(i.eval("^[]").is_err());
    assert_eq!(i.eval("2 + 2").unwrap(), Value::Int(4));
}

// Rendering an integer or boolean result and feeding the text back in
// yields the same value
#[test]
fn test_rendered_scalars_reparse_to_themselves() {
    let mut i = interp();
    for input in ["5 + 12 * 3 - 2", "-(3 * 4)", "1 < 2 && 3 > 2", "false"] {
        let value = i.eval(input).unwrap();
        assert!(matches!(value, Value::Int(_) | Value::Bool(_)));
        let reparsed = i.eval(&value.to_string()).unwrap();
        assert_eq!(reparsed, value, "{} did not round-trip", input);
    }
}

#[test]
fn test_pure_expressions_evaluate_the_same_twice() {
    let mut i = interp();
    for source in ["fmap(fn (n) => n * 2, [0..10])", "sum([0..100]) % 7"] {
        let first = i.eval(source).unwrap();
        let second = i.eval(source).unwrap();
        assert_eq!(first, second, "{} was not stable", source);
    }
}

#[test]
fn test_nested_list_rendering() {
    let mut i = interp();
    assert_eq!(i.eval("[[1, 2], [3]]").unwrap().to_string(), "[[1, 2], [3]]");
    assert_eq!(i.eval("[]").unwrap().to_string(), "[]");
}
