use once_cell::sync::Lazy;
use regex::Regex;

use crate::environment::prelude::ValueType;

static FUNCTION_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(int|double)\s+([A-Za-z0-9_]+)\s*=\s*([A-Za-z0-9_]+\s*\(.*\))\s*;$")
        .expect("function declaration pattern")
});
static BOOLEAN_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^boolean\s+([A-Za-z0-9_]+)\s*=\s*(true|false)\s*;$")
        .expect("boolean declaration pattern")
});
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(int|double|String)\s+([A-Za-z0-9_]+)\s*=\s*(.+);$")
        .expect("declaration pattern")
});
static PRINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:System\.out\.println|print)\s*\((.*)\)\s*;$").expect("print pattern")
});
static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+\s*\(.*\))\s*;$").expect("call pattern")
});
static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)\s*=\s*(.+);$").expect("assignment pattern")
});

/// What a single trimmed, comment-free line asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// `int x = f(...);` or `double x = f(...);`
    FunctionDeclaration {
        declared: ValueType,
        name: &'a str,
        call: &'a str,
    },
    BooleanDeclaration {
        name: &'a str,
        value: bool,
    },
    Declaration {
        declared: ValueType,
        name: &'a str,
        value: &'a str,
    },
    Print {
        argument: &'a str,
    },
    Call {
        call: &'a str,
    },
    Assignment {
        name: &'a str,
        value: &'a str,
    },
    Unsupported,
}

/// Patterns are tried in a fixed order; the first match wins.
pub fn classify(line: &str) -> Shape<'_> {
    if let Some(captures) = FUNCTION_DECLARATION.captures(line) {
        let (_, [declared, name, call]) = captures.extract();

        if let Some(declared) = ValueType::from_keyword(declared) {
            return Shape::FunctionDeclaration { declared, name, call };
        }
    }

    if let Some(captures) = BOOLEAN_DECLARATION.captures(line) {
        let (_, [name, value]) = captures.extract();

        return Shape::BooleanDeclaration { name, value: value == "true" };
    }

    if let Some(captures) = DECLARATION.captures(line) {
        let (_, [declared, name, value]) = captures.extract();

        if let Some(declared) = ValueType::from_keyword(declared) {
            return Shape::Declaration { declared, name, value: value.trim() };
        }
    }

    if let Some(captures) = PRINT.captures(line) {
        let (_, [argument]) = captures.extract();

        return Shape::Print { argument: argument.trim() };
    }

    if let Some(captures) = CALL.captures(line) {
        let (_, [call]) = captures.extract();

        return Shape::Call { call };
    }

    if let Some(captures) = ASSIGNMENT.captures(line) {
        let (_, [name, value]) = captures.extract();

        return Shape::Assignment { name, value: value.trim() };
    }

    Shape::Unsupported
}
