use super::prelude::{strip_comments, tokenize, DisplayTable, Token, TokenKind, FUNCTION_NAMES};

fn assert_tokens(input: &str, expected: &[(TokenKind, &str)]) {
    let tokens = tokenize(input);

    assert_eq!(
        tokens.len(), expected.len(),
        "Token count mismatch for {input:?}: {tokens:?}"
    );

    for (idx, (token, (kind, text))) in tokens.iter().zip(expected).enumerate() {
        assert_eq!(
            *token, Token::new(*kind, *text),
            "Next token does not match expected token at {idx} in {input:?}"
        );
    }
}

#[test]
fn test_assignment() {
    assert_tokens("x = 1 + 2;", &[
        (TokenKind::Identifier, "x"),
        (TokenKind::Operator, "="),
        (TokenKind::Literal, "1"),
        (TokenKind::Operator, "+"),
        (TokenKind::Literal, "2"),
        (TokenKind::Separator, ";"),
    ]);
}

#[test]
fn test_declarations() {
    assert_tokens(r#"String s = "hello world"; double d = 2.5;"#, &[
        (TokenKind::Keyword, "String"),
        (TokenKind::Identifier, "s"),
        (TokenKind::Operator, "="),
        (TokenKind::Literal, "\"hello world\""),
        (TokenKind::Separator, ";"),
        (TokenKind::Keyword, "double"),
        (TokenKind::Identifier, "d"),
        (TokenKind::Operator, "="),
        (TokenKind::Literal, "2.5"),
        (TokenKind::Separator, ";"),
    ]);
}

#[test]
fn test_function_before_identifier() {
    // `len` is bound as a variable first, then called.
    assert_tokens("int len = 3; len (\"abc\"); len;", &[
        (TokenKind::Keyword, "int"),
        (TokenKind::Identifier, "len"),
        (TokenKind::Operator, "="),
        (TokenKind::Literal, "3"),
        (TokenKind::Separator, ";"),
        (TokenKind::Function, "len"),
        (TokenKind::Separator, "("),
        (TokenKind::Literal, "\"abc\""),
        (TokenKind::Separator, ")"),
        (TokenKind::Separator, ";"),
        (TokenKind::Identifier, "len"),
        (TokenKind::Separator, ";"),
    ]);
}

#[test]
fn test_unknown_name_call_is_identifier() {
    assert_tokens("foo(1)", &[
        (TokenKind::Identifier, "foo"),
        (TokenKind::Separator, "("),
        (TokenKind::Literal, "1"),
        (TokenKind::Separator, ")"),
    ]);
}

#[test]
fn test_greedy_operators() {
    assert_tokens("a == b != c && d || !e <= f", &[
        (TokenKind::Identifier, "a"),
        (TokenKind::Operator, "=="),
        (TokenKind::Identifier, "b"),
        (TokenKind::Operator, "!="),
        (TokenKind::Identifier, "c"),
        (TokenKind::Operator, "&&"),
        (TokenKind::Identifier, "d"),
        (TokenKind::Operator, "||"),
        (TokenKind::Operator, "!"),
        (TokenKind::Identifier, "e"),
        (TokenKind::Operator, "<="),
        (TokenKind::Identifier, "f"),
    ]);

    assert_tokens("x=-1", &[
        (TokenKind::Identifier, "x"),
        (TokenKind::Operator, "=-"),
        (TokenKind::Literal, "1"),
    ]);
}

#[test]
fn test_block_keywords_and_separators() {
    assert_tokens("if (flag) { return; } else while", &[
        (TokenKind::Keyword, "if"),
        (TokenKind::Separator, "("),
        (TokenKind::Identifier, "flag"),
        (TokenKind::Separator, ")"),
        (TokenKind::Separator, "{"),
        (TokenKind::Keyword, "return"),
        (TokenKind::Separator, ";"),
        (TokenKind::Separator, "}"),
        (TokenKind::Keyword, "else"),
        (TokenKind::Keyword, "while"),
    ]);
}

#[test]
fn test_numbers() {
    assert_tokens("10 1.5 1. 1.5.2 12abc", &[
        (TokenKind::Literal, "10"),
        (TokenKind::Literal, "1.5"),
        (TokenKind::Literal, "1"),
        (TokenKind::Unknown, "."),
        (TokenKind::Literal, "1.5"),
        (TokenKind::Unknown, "."),
        (TokenKind::Literal, "2"),
        (TokenKind::Literal, "12"),
        (TokenKind::Identifier, "abc"),
    ]);
}

#[test]
fn test_word_boundaries() {
    // No boundary between `12` and `int`, so it is not a keyword.
    assert_tokens("12int integer _print(", &[
        (TokenKind::Literal, "12"),
        (TokenKind::Identifier, "int"),
        (TokenKind::Identifier, "integer"),
        (TokenKind::Identifier, "_print"),
        (TokenKind::Separator, "("),
    ]);
}

#[test]
fn test_boolean_prefix() {
    assert_tokens("true false trueValue", &[
        (TokenKind::Literal, "true"),
        (TokenKind::Literal, "false"),
        (TokenKind::Literal, "true"),
        (TokenKind::Identifier, "Value"),
    ]);
}

#[test]
fn test_unknown_characters() {
    assert_tokens("a @ b # \"open", &[
        (TokenKind::Identifier, "a"),
        (TokenKind::Unknown, "@"),
        (TokenKind::Identifier, "b"),
        (TokenKind::Unknown, "#"),
        (TokenKind::Unknown, "\""),
        (TokenKind::Identifier, "open"),
    ]);

    assert_tokens("é", &[(TokenKind::Unknown, "é")]);
}

#[test]
fn test_comments() {
    let input = r#"
        int a = 1; // trailing comment
        /* block */ print(a);
        // whole line
    "#;

    assert_tokens(input, &[
        (TokenKind::Keyword, "int"),
        (TokenKind::Identifier, "a"),
        (TokenKind::Operator, "="),
        (TokenKind::Literal, "1"),
        (TokenKind::Separator, ";"),
        (TokenKind::Function, "print"),
        (TokenKind::Separator, "("),
        (TokenKind::Identifier, "a"),
        (TokenKind::Separator, ")"),
        (TokenKind::Separator, ";"),
    ]);
}

#[test]
fn test_strip_comments_keeps_lines() {
    let stripped = strip_comments("a; // x\n/* y */ b;\n/* open\nc;");

    assert_eq!(stripped, "a; \n b;\n/* open\nc;");
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \n\t// nothing").is_empty());
}

#[test]
fn test_function_names_are_not_keywords() {
    for name in FUNCTION_NAMES {
        let input = format!("{name}()");
        let tokens = tokenize(&input);

        assert_eq!(tokens[0], Token::new(TokenKind::Function, *name), "{name}");
    }
}

#[test]
fn test_listing() {
    let listing = tokenize("print(1);").get_table_listing();

    let expected = "\
=== LEXICAL ANALYSIS ===
TOKEN TYPE  : VALUE
----------------------------
FUNCTION    : print
SEPARATOR   : (
LITERAL     : 1
SEPARATOR   : )
SEPARATOR   : ;
";

    assert_eq!(listing, expected);
}
