use std::fmt::Display;

/// Reserved words. They are tokenized but never executed.
pub const KEYWORDS: &[&str] = &[
    "int", "String", "double", "boolean", "if", "else", "while", "return",
];

/// Names classified as `FUNCTION` when a `(` follows them.
///
/// This mirrors the builtin catalog names plus `print`, which the
/// interpreter handles itself.
pub const FUNCTION_NAMES: &[&str] = &[
    "print", "concat", "len", "toUpperCase", "toLowerCase", "replace",
    "charAt", "equals", "equalsIgnoreCase", "contains", "startsWith",
    "endsWith", "split", "toString", "add", "subtract", "multiply",
    "divide", "modulus", "max", "min", "power", "absoluteValue", "round",
    "floor", "ceil", "log", "sqrt", "cbrt", "sin", "cos", "tan", "exists",
    "readFile", "fileWriter", "openFile", "closeFile", "isEmpty", "fileLength",
    "listFiles", "getProperty", "setReadable", "setWritable", "availableProcessors",
    "destroy",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_function_name(word: &str) -> bool {
    FUNCTION_NAMES.contains(&word)
}

pub fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|')
}

pub fn is_separator_char(ch: char) -> bool {
    matches!(ch, '(' | ')' | '{' | '}' | ';' | ',')
}

pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Function,
    Keyword,
    Literal,
    Identifier,
    Operator,
    Separator,
    Unknown,
}

impl TokenKind {
    pub fn as_literal(&self) -> &'static str {
        match self {
            TokenKind::Function => "FUNCTION",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Literal => "LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_literal())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<12}: {}", self.kind, self.text)
    }
}
