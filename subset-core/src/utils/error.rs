use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::interpreter::prelude::{Problem, ProblemKind};
use super::diagnostic::{Diagnostic, Level};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("IO operation failed on {}", path.display())]
    StdIo {
        path: PathBuf,
        err: std::io::ErrorKind
    },
    #[error("{} is not valid UTF-8", path.display())]
    Encoding {
        path: PathBuf
    },
    #[error("{} statement(s) failed", problems.len())]
    Statements {
        path: PathBuf,
        src: String,
        problems: Vec<Problem>
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::StdIo { path, err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{}: {err}", path.display()),
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::Encoding { path } => {
                vec![Diagnostic {
                    title: "Invalid encoding".into(),
                    text: format!("{} must be UTF-8 encoded.", path.display()),
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::Statements { path, src, problems } => {
                problems.iter()
                    .map(|problem| {
                        let title = match problem.kind {
                            ProblemKind::Syntax => "Unsupported statement",
                            ProblemKind::Declaration => "Invalid value",
                            ProblemKind::Evaluation => "Evaluation failed",
                            ProblemKind::Resolution => "Resolution failed",
                        };

                        let diagnostic = Diagnostic::spanned(
                            Level::Error,
                            title,
                            src,
                            path,
                            problem.span,
                            Some(problem.message.clone()),
                        );

                        match &problem.cause {
                            Some(cause) => diagnostic.with_text(format!("Caused by: {cause}")),
                            None => diagnostic,
                        }
                    })
                    .collect()
            }
        }
    }
}
