use std::fmt::Write;

use super::token::Token;

pub const LISTING_TITLE: &str = "=== LEXICAL ANALYSIS ===";
pub const LISTING_RULE: &str = "----------------------------";

/// Renders tokens as the two-column report shown by front ends.
pub trait DisplayTable {
    fn get_table_listing(&self) -> String;
}

impl DisplayTable for [Token] {
    fn get_table_listing(&self) -> String {
        let mut listing = String::new();

        let _ = writeln!(listing, "{LISTING_TITLE}");
        let _ = writeln!(listing, "{:<12}: {}", "TOKEN TYPE", "VALUE");
        let _ = writeln!(listing, "{LISTING_RULE}");

        for token in self {
            let _ = writeln!(listing, "{token}");
        }

        listing
    }
}

impl DisplayTable for Vec<Token> {
    fn get_table_listing(&self) -> String {
        self.as_slice().get_table_listing()
    }
}
