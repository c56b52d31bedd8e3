use std::fmt::Display;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer {
        value: i64
    },
    Double {
        value: f64,
    },
    Text {
        value: String,
    },
    Boolean {
        value: bool
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Double { value } => write!(f, "{}", format_double(*value)),
            Value::Text { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}")
        }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Double { .. } => ValueType::Double,
            Self::Text { .. } => ValueType::Text,
            Self::Boolean { .. } => ValueType::Boolean
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer { .. } | Self::Double { .. })
    }

    /// Promotes an integer to a double; every other value is returned as is.
    pub fn widen(self) -> Value {
        match self {
            Self::Integer { value } => Self::Double { value: value as f64 },
            other => other,
        }
    }

    pub fn text(value: impl Into<String>) -> Value {
        Self::Text { value: value.into() }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double { value }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text { value: value.to_string() }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text { value }
    }
}

/// Formats a double the way the surface language prints it: always with a
/// fractional part, and in `1.0E7` notation outside `[1e-3, 1e7)`.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }

    let magnitude = value.abs();

    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = value.to_string();

        return if plain.contains('.') { plain } else { format!("{plain}.0") };
    }

    let scientific = format!("{value:e}");

    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Double,
    Text,
    Boolean
}

impl ValueType {
    /// Parses a declaration keyword (`int`, `double`, `String`, `boolean`).
    pub fn from_keyword(keyword: &str) -> Option<ValueType> {
        Some(match keyword {
            "int" => ValueType::Integer,
            "double" => ValueType::Double,
            "String" => ValueType::Text,
            "boolean" => ValueType::Boolean,
            _ => return None
        })
    }

    pub fn as_keyword(&self) -> &'static str {
        match self {
            ValueType::Integer => "int",
            ValueType::Double => "double",
            ValueType::Text => "String",
            ValueType::Boolean => "boolean",
        }
    }

    pub fn widen(self) -> ValueType {
        match self {
            ValueType::Integer => ValueType::Double,
            other => other,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_keyword())
    }
}
