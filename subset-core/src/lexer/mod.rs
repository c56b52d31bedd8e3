pub mod token;
pub mod lexer;
pub mod listing;

pub mod prelude {
	pub use super::{
		token::*,
		lexer::*,
		listing::*
	};
}

#[cfg(test)]
mod tests;
