use std::{path::{Path, PathBuf}, rc::Rc};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    bridge::prelude::{invoke, parse_call},
    catalog::prelude::Catalog,
    environment::prelude::{Environment, EnvironmentError, Value, ValueType, FALSE, TRUE},
    eval::prelude::evaluate_int,
    lexer::prelude::strip_comments,
    utils::prelude::{
        line_spans, Error, NullWarningEmitterIO, SourceWarningEmitter, SrcSpan, WarningEmitter,
        WarningEmitterIO,
    },
};

use super::{
    error::{Problem, SessionWarning, StatementError},
    shape::{classify, Shape},
};

static DOUBLE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("double pattern")
});
static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("decimal pattern")
});
static QUOTED_PLUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""[^"]*\+[^"]*""#).expect("quoted plus pattern")
});

const DEFAULT_PATH: &str = "<input>";

/// Text between a leading and a trailing `"`.
fn unquote(text: &str) -> Option<&str> {
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Everything one execution pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub lines: Vec<String>,
    pub problems: Vec<Problem>,
}

impl Report {
    /// Output lines joined with `\n`, trailing whitespace removed.
    pub fn output(&self) -> String {
        self.lines.join("\n").trim_end().to_string()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Bundles the problems with their source for rendering.
    pub fn to_error(&self, path: &Path, src: &str) -> Option<Error> {
        self.has_problems().then(|| Error::Statements {
            path: path.to_path_buf(),
            src: src.to_string(),
            problems: self.problems.clone(),
        })
    }
}

/// State of one line being executed.
struct Line<'a> {
    text: &'a str,
    span: SrcSpan,
    warnings: &'a SourceWarningEmitter<'a>,
    /// Errors rendered into the output without failing the statement.
    rendered: Vec<StatementError>,
}

impl Line<'_> {
    fn render_error(&mut self, error: StatementError) -> String {
        let text = error.to_string();
        self.rendered.push(error);
        text
    }
}

/// An interpreter instance. Variables persist across `execute` calls until
/// [`Session::reset`] or drop.
pub struct Session {
    env: Environment,
    catalog: Catalog,
    warnings: WarningEmitter,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_warnings(Rc::new(NullWarningEmitterIO))
    }

    pub fn with_warnings(warnings: Rc<dyn WarningEmitterIO>) -> Self {
        tracing::info!("starting a new session");

        Self {
            env: Environment::new(),
            catalog: Catalog::standard(),
            warnings: WarningEmitter::new(warnings),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.count()
    }

    /// Drops every binding.
    pub fn reset(&mut self) {
        tracing::info!("resetting session with {} binding(s)", self.env.len());

        self.env.clear();
        self.warnings.reset_count();
    }

    /// Runs `src` and returns its output text.
    pub fn execute(&mut self, src: &str) -> String {
        self.run(src).output()
    }

    pub fn run(&mut self, src: &str) -> Report {
        self.run_named(src, DEFAULT_PATH)
    }

    /// Runs `src` line by line. A failing line is reported inline and never
    /// stops the lines after it.
    pub fn run_named(&mut self, src: &str, path: impl Into<PathBuf>) -> Report {
        let path = path.into();
        let warnings = SourceWarningEmitter::new(&path, src, self.warnings.clone());
        let mut report = Report::default();

        for (idx, (span, raw)) in line_spans(src).enumerate() {
            let stripped = strip_comments(raw);
            let text = stripped.trim();

            if text.is_empty() {
                continue;
            }

            let mut line = Line { text, span, warnings: &warnings, rendered: vec![] };

            let outcome = self.execute_line(&mut line);

            let mut errors = std::mem::take(&mut line.rendered);

            match outcome {
                Ok(Some(output)) => report.lines.push(output),
                Ok(None) => {},
                Err(error) => {
                    report.lines.push(error.to_string());
                    errors.push(error);
                },
            }

            report.problems.extend(errors.iter().map(|error| Problem::new(error, idx + 1, span)));
        }

        report
    }

    fn execute_line(&mut self, line: &mut Line) -> Result<Option<String>, StatementError> {
        let shape = classify(line.text);

        tracing::debug!("{}: {:?}", line.span, shape);

        match shape {
            Shape::FunctionDeclaration { declared, name, call } => {
                self.declare_from_call(line, declared, name, call).map(|_| None)
            },
            Shape::BooleanDeclaration { name, value } => {
                self.bind(line, name, Value::from(value));
                Ok(None)
            },
            Shape::Declaration { declared, name, value } => {
                let value = self.parse_declaration(declared, value)?;
                self.bind(line, name, value);
                Ok(None)
            },
            Shape::Print { argument } => Ok(Some(self.render_print(line, argument))),
            Shape::Call { call } => self.call_for_effect(call),
            Shape::Assignment { name, value } => self.assign(name, value).map(|_| None),
            Shape::Unsupported => Err(StatementError::Unsupported { line: line.text.to_string() }),
        }
    }

    /// Binds `name`, warning when it used to hold another type.
    fn bind(&mut self, line: &Line, name: &str, value: Value) {
        let declared = value.value_type();

        if let Some(previous) = self.env.declare(name, value) {
            if previous.value_type() != declared {
                line.warnings.emit(SessionWarning::Redeclaration {
                    location: line.span,
                    name: name.to_string(),
                    previous: previous.value_type(),
                    declared,
                });
            }
        }
    }

    fn declare_from_call(
        &mut self,
        line: &Line,
        declared: ValueType,
        name: &str,
        call: &str,
    ) -> Result<(), StatementError> {
        let unsupported = || StatementError::Unsupported { line: line.text.to_string() };
        let call = parse_call(call).ok_or_else(unsupported)?;

        let result = invoke(&self.catalog, call.name, call.args, &self.env)?;

        let value = match (declared, result) {
            (ValueType::Integer, Some(value @ Value::Integer { .. })) => value,
            (ValueType::Integer, Some(Value::Double { .. })) => {
                return Err(StatementError::NotAnInteger)
            },
            (ValueType::Double, Some(value)) if value.is_numeric() => value.widen(),
            _ => return Err(StatementError::NotANumber { declared }),
        };

        self.bind(line, name, value);

        Ok(())
    }

    fn parse_declaration(&self, declared: ValueType, value: &str) -> Result<Value, StatementError> {
        match declared {
            ValueType::Integer => {
                let literal = unquote(value).is_some()
                    || DECIMAL_LITERAL.is_match(value)
                    || value == "true"
                    || value == "false";

                if literal {
                    return Err(StatementError::InvalidInteger { value: value.to_string() });
                }

                self.evaluate(value).map(Value::from)
            },
            ValueType::Double => self.parse_double(value),
            ValueType::Text => unquote(value)
                .map(Value::text)
                .ok_or_else(|| StatementError::InvalidString { value: value.to_string() }),
            ValueType::Boolean => self.parse_boolean(value),
        }
    }

    fn evaluate(&self, expression: &str) -> Result<i64, StatementError> {
        evaluate_int(expression, &self.env)
            .map_err(|source| StatementError::Evaluation { expression: expression.to_string(), source })
    }

    fn parse_double(&self, value: &str) -> Result<Value, StatementError> {
        let invalid = || StatementError::InvalidDouble { value: value.to_string() };

        if !DOUBLE_LITERAL.is_match(value) {
            return Err(invalid());
        }

        value.parse::<f64>()
            .map(Value::from)
            .map_err(|_| invalid())
    }

    fn parse_boolean(&self, value: &str) -> Result<Value, StatementError> {
        match value {
            "true" => Ok(TRUE),
            "false" => Ok(FALSE),
            _ => Err(StatementError::InvalidBoolean { value: value.to_string() }),
        }
    }

    fn assign(&mut self, name: &str, value: &str) -> Result<(), StatementError> {
        let current = self.env.get(name)
            .map(Value::value_type)
            .ok_or_else(|| EnvironmentError::Undefined { name: name.to_string() })?;

        let value = match current {
            ValueType::Integer => Value::from(self.evaluate(value)?),
            ValueType::Double => self.parse_double(value)?,
            ValueType::Text => unquote(value)
                .map(Value::text)
                .ok_or(StatementError::InvalidStringAssignment)?,
            ValueType::Boolean => self.parse_boolean(value)?,
        };

        Ok(self.env.set(name, value)?)
    }

    fn call_for_effect(&self, call: &str) -> Result<Option<String>, StatementError> {
        let Some(call) = parse_call(call) else {
            return Err(StatementError::Unsupported { line: call.to_string() });
        };

        let result = invoke(&self.catalog, call.name, call.args, &self.env)?;

        Ok(result
            .map(|value| value.to_string())
            .filter(|text| !text.is_empty()))
    }

    /// Renders a print argument. Failures become part of the printed text.
    fn render_print(&self, line: &mut Line, expression: &str) -> String {
        if expression.is_empty() {
            return line.render_error(StatementError::InvalidPrint);
        }

        if let Some(text) = unquote(expression) {
            return text.to_string();
        }

        if expression.contains('+') {
            if QUOTED_PLUS.is_match(expression) {
                line.warnings.emit(SessionWarning::SplitQuotedLiteral { location: line.span });
            }

            return expression.split('+')
                .map(|piece| self.render_print(line, piece.trim()))
                .collect();
        }

        if let Some(call) = parse_call(expression) {
            return match invoke(&self.catalog, call.name, call.args, &self.env) {
                Ok(Some(value)) => value.to_string(),
                Ok(None) => "null".to_string(),
                Err(error) => line.render_error(error.into()),
            };
        }

        if let Some(value) = self.env.get(expression) {
            return value.to_string();
        }

        if expression == "true" || expression == "false" {
            return expression.to_string();
        }

        match evaluate_int(expression, &self.env) {
            Ok(value) => value.to_string(),
            Err(_) => line.render_error(StatementError::CannotEvaluate {
                expression: expression.to_string(),
            }),
        }
    }
}
