use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::{
    is_function_name, is_keyword, is_operator_char, is_separator_char, is_word_char, Token,
    TokenKind,
};

// Block comments never span lines.
static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^\n]*|/\*[^\n]*?\*/").expect("comment pattern"));

const BOOLEAN_LITERALS: [&str; 2] = ["true", "false"];

pub fn strip_comments(source: &str) -> Cow<'_, str> {
    COMMENT.replace_all(source, "")
}

/// Strips comments and classifies the rest of `source`.
///
/// Never fails: characters that fit no class become [`TokenKind::Unknown`].
pub fn tokenize(source: &str) -> Vec<Token> {
    let stripped = strip_comments(source);
    let tokens = Lexer::new(&stripped).collect::<Vec<Token>>();

    tracing::trace!(count = tokens.len(), "tokenized source");

    tokens
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    position: usize,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            position: 0,
            ch: src.chars().next(),
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        while let Some(ch) = self.ch {
            if !is_whitespace(ch) {
                break;
            }
            self.next_char();
        }

        let token = match self.ch? {
            '"' => self.lex_string(),
            '0'..='9' => self.lex_number(),
            'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
            ch if is_operator_char(ch) => self.lex_operator(),
            ch if is_separator_char(ch) => self.eat_one_char(TokenKind::Separator),
            _ => self.eat_one_char(TokenKind::Unknown),
        };

        Some(token)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.position..]
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.ch?;

        self.position += ch.len_utf8();
        self.ch = self.rest().chars().next();

        Some(ch)
    }

    fn take(&mut self, len: usize, kind: TokenKind) -> Token {
        let text = &self.src[self.position..self.position + len];

        self.position += len;
        self.ch = self.rest().chars().next();

        Token::new(kind, text)
    }

    fn eat_one_char(&mut self, kind: TokenKind) -> Token {
        let len = self.ch.map(char::len_utf8).unwrap_or_default();

        self.take(len, kind)
    }

    fn at_word_boundary(&self) -> bool {
        !self.src[..self.position]
            .chars()
            .next_back()
            .is_some_and(is_word_char)
    }

    fn lex_string(&mut self) -> Token {
        match self.rest()[1..].find('"') {
            Some(end) => self.take(end + 2, TokenKind::Literal),
            None => self.eat_one_char(TokenKind::Unknown),
        }
    }

    fn lex_number(&mut self) -> Token {
        let rest = self.rest();
        let digits = |s: &str| s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

        let mut len = digits(rest);

        if rest[len..].starts_with('.') {
            let fraction = digits(&rest[len + 1..]);

            if fraction > 0 {
                len += 1 + fraction;
            }
        }

        self.take(len, TokenKind::Literal)
    }

    fn lex_word(&mut self) -> Token {
        let rest = self.rest();
        let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
        let word = &rest[..len];

        if self.at_word_boundary() {
            let followed_by_paren = rest[len..]
                .trim_start_matches(is_whitespace)
                .starts_with('(');

            if followed_by_paren && is_function_name(word) {
                return self.take(len, TokenKind::Function);
            }
            if is_keyword(word) {
                return self.take(len, TokenKind::Keyword);
            }
        }

        // `true`/`false` match as a prefix, without a trailing word boundary.
        if let Some(literal) = BOOLEAN_LITERALS.iter().find(|lit| word.starts_with(**lit)) {
            return self.take(literal.len(), TokenKind::Literal);
        }

        self.take(len, TokenKind::Identifier)
    }

    fn lex_operator(&mut self) -> Token {
        let rest = self.rest();
        let len = rest.find(|c: char| !is_operator_char(c)).unwrap_or(rest.len());

        self.take(len, TokenKind::Operator)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
