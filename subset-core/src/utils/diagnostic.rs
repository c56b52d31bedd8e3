use std::path::{Path, PathBuf};

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity},
    files::SimpleFile,
    term::{self, Config},
};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    fn severity(self) -> Severity {
        match self {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan,
}

impl Label {
    fn to_codespan_label(&self, style: LabelStyle) -> CodespanLabel<()> {
        let label = CodespanLabel::new(style, (), self.span.start as usize..self.span.end as usize);

        match &self.text {
            None => label,
            Some(text) => label.with_message(text),
        }
    }
}

/// The source a diagnostic points into.
#[derive(Debug, Clone)]
pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

#[derive(Debug, Clone)]
pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>,
}

impl<'a> Diagnostic<'a> {
    /// A diagnostic labelling `span` of `src`.
    pub fn spanned(
        level: Level,
        title: impl Into<String>,
        src: &'a str,
        path: &Path,
        span: SrcSpan,
        label: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            level,
            location: Some(Location {
                src,
                path: path.to_path_buf(),
                label: Label { text: label, span },
            }),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn write(&self, buf: &mut Buffer) {
        use std::io::Write;

        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write")
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let file = SimpleFile::new(location.path.to_string_lossy(), location.src);

        let diagnostic = CodespanDiagnostic::new(self.level.severity())
            .with_message(&self.title)
            .with_labels(vec![location.label.to_codespan_label(LabelStyle::Primary)]);

        term::emit(buf, &Config::default(), &file, &diagnostic)
            .expect("write_diagnostic");
    }

    fn write_title(&self, buf: &mut Buffer) {
        use std::io::Write;

        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write_title_color");
        write!(buf, "{kind}").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_bold");
        write!(buf, ": {}\n\n", self.title).expect("write_title_title");

        buf.reset().expect("write_title_reset");
    }
}
