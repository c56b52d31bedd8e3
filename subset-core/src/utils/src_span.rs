use std::fmt::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: usize, end: usize) -> Self {
		Self { start: start as u32, end: end as u32 }
	}

	pub fn len(&self) -> usize {
		(self.end - self.start) as usize
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

/// Splits `src` on `\n` and pairs every line with its byte span. A trailing
/// `\r` is excluded from both.
pub fn line_spans(src: &str) -> impl Iterator<Item = (SrcSpan, &str)> {
	let mut offset = 0;

	src.split('\n').map(move |line| {
		let start = offset;
		offset += line.len() + 1;

		let line = line.strip_suffix('\r').unwrap_or(line);

		(SrcSpan::from(start, start + line.len()), line)
	})
}
