mod cli;
mod repl;
mod rlpl;

use std::{path::PathBuf, process::ExitCode, rc::Rc};

use clap::Parser;
use cli::{print_finished, print_lexing, print_running};
use subset_core::{
    interpreter::prelude::{read_source, Session},
    lexer::prelude::{tokenize, DisplayTable},
    utils::prelude::{Error, Warning, WarningEmitterIO},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
enum Command {
    /// Executes a source file line by line
    Run {
        /// Path of source file
        path: PathBuf,
        /// Render every reported problem as a diagnostic on stderr
        #[arg(short, long, default_value_t = false)]
        diagnostics: bool,
        /// Exit with a failure status if any statement reported a problem
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Prints the token listing of a source file
    Lex {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Execute Print Loop on one persistent session
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
}

fn main() -> ExitCode {
    install_tracing();

    match Command::parse() {
        Command::Run { path, diagnostics, strict } => run(path, diagnostics, strict),
        Command::Lex { path } => lex(path),
        Command::Repl => exit_code(repl::start()),
        Command::Rlpl => exit_code(rlpl::start()),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` filter.
fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(path: PathBuf, diagnostics: bool, strict: bool) -> ExitCode {
    let src = match read_source(&path) {
        Ok(src) => src,
        Err(err) => return report_error(&err),
    };

    print_running(&path.to_string_lossy());
    let start = std::time::Instant::now();

    let mut session = Session::with_warnings(Rc::new(ConsoleWarningEmitter));
    let report = session.run_named(&src, path.clone());

    let output = report.output();
    if !output.is_empty() {
        println!("{output}");
    }

    print_finished(start.elapsed());

    match report.to_error(&path, &src) {
        Some(err) => {
            if diagnostics {
                let _ = report_error(&err);
            }

            tracing::info!("{} problem(s) reported", report.problems().len());

            if strict { ExitCode::FAILURE } else { ExitCode::SUCCESS }
        },
        None => ExitCode::SUCCESS,
    }
}

fn lex(path: PathBuf) -> ExitCode {
    let src = match read_source(&path) {
        Ok(src) => src,
        Err(err) => return report_error(&err),
    };

    print_lexing(&path.to_string_lossy());
    let start = std::time::Instant::now();

    print!("{}", tokenize(&src).get_table_listing());

    print_finished(start.elapsed());

    ExitCode::SUCCESS
}

fn report_error(err: &Error) -> ExitCode {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    err.pretty(&mut buf);
    buf_writer
        .print(&buf)
        .expect("Writing error to stderr");

    ExitCode::FAILURE
}

fn exit_code(result: std::io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&Error::StdIo { path: PathBuf::from("<stdin>"), err: err.kind() }),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
