use crate::environment::prelude::{Environment, Value, ValueType};

use super::prelude::{evaluate_int, EvalError};

fn eval(expr: &str) -> Result<i64, EvalError> {
    evaluate_int(expr, &Environment::new())
}

#[test]
fn test_precedence() -> Result<(), EvalError> {
    assert_eq!(eval("(2+3)*4")?, 20);
    assert_eq!(eval("2+3*4")?, 14);
    assert_eq!(eval("10-4-3")?, 3);
    assert_eq!(eval("100/10/5")?, 2);
    assert_eq!(eval(" ( 1 + 2 ) * ( 3 + 4 ) ")?, 21);

    Ok(())
}

#[test]
fn test_truncating_division() -> Result<(), EvalError> {
    assert_eq!(eval("7/2")?, 3);
    assert_eq!(eval("-7/2")?, -3);
    assert_eq!(eval("1/3")?, 0);

    Ok(())
}

#[test]
fn test_unary_minus() -> Result<(), EvalError> {
    assert_eq!(eval("-5+2")?, -3);
    assert_eq!(eval("3--5")?, 8);
    assert_eq!(eval("2*-3")?, -6);
    assert_eq!(eval("-0")?, 0);

    Ok(())
}

#[test]
fn test_errors() {
    let cases = [
        ("4/0", EvalError::DivisionByZero),
        ("(1+2", EvalError::UnbalancedParentheses),
        ("1+2)", EvalError::UnbalancedParentheses),
        ("", EvalError::UnexpectedEnd),
        ("1+", EvalError::UnexpectedEnd),
        ("1 2", EvalError::UnexpectedChar { found: '2', position: 2 }),
        ("2.5", EvalError::UnexpectedChar { found: '.', position: 1 }),
        ("+1", EvalError::UnexpectedChar { found: '+', position: 0 }),
        ("-(1)", EvalError::UnexpectedChar { found: '(', position: 1 }),
        ("9223372036854775807+1", EvalError::Overflow),
        ("99999999999999999999", EvalError::Overflow),
    ];

    for (expr, expected) in cases {
        assert_eq!(eval(expr), Err(expected), "{expr:?}");
    }
}

#[test]
fn test_variables() -> Result<(), EvalError> {
    let mut env = Environment::new();

    env.declare("a", Value::from(5_i64));
    env.declare("ab", Value::from(7_i64));
    env.declare("neg", Value::from(-2_i64));

    assert_eq!(evaluate_int("a + 1", &env)?, 6);
    // `a` must not be substituted inside `ab`.
    assert_eq!(evaluate_int("ab * 2", &env)?, 14);
    assert_eq!(evaluate_int("a-neg", &env)?, 7);
    assert_eq!(evaluate_int("-a", &env)?, -5);
    assert_eq!(evaluate_int("(a+ab)/neg", &env)?, -6);

    Ok(())
}

#[test]
fn test_variable_errors() {
    let mut env = Environment::new();

    env.declare("d", Value::from(2.5));
    env.declare("s", Value::text("x"));

    assert_eq!(
        evaluate_int("d + 1", &env),
        Err(EvalError::NotAnInteger { name: "d".into(), found: ValueType::Double })
    );
    assert_eq!(
        evaluate_int("1 + s", &env),
        Err(EvalError::NotAnInteger { name: "s".into(), found: ValueType::Text })
    );
    assert_eq!(
        evaluate_int("missing * 2", &env),
        Err(EvalError::UndefinedVariable { name: "missing".into() })
    );
}
