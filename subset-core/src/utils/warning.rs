use std::{path::{Path, PathBuf}, rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use once_cell::unsync::OnceCell;
use termcolor::Buffer;

use crate::interpreter::prelude::SessionWarning;
use super::diagnostic::{Diagnostic, Level};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn len(&self) -> usize {
        self.warnings.read().expect("Vector lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

/// Counts warnings and forwards them to the configured sink.
#[derive(Clone)]
pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn reset_count(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the source being run to each session warning. The source is
/// copied once, on the first warning, and shared by every later one.
pub struct SourceWarningEmitter<'a> {
    path: &'a Path,
    src: &'a str,
    shared_src: OnceCell<Rc<str>>,
    emitter: WarningEmitter,
}

impl<'a> SourceWarningEmitter<'a> {
    pub fn new(path: &'a Path, src: &'a str, emitter: WarningEmitter) -> Self {
        Self {
            path,
            src,
            shared_src: OnceCell::new(),
            emitter,
        }
    }

    pub fn emit(&self, warning: SessionWarning) {
        let src = self.shared_src.get_or_init(|| Rc::from(self.src));

        self.emitter.emit(Warning::Source {
            path: self.path.to_path_buf(),
            src: Rc::clone(src),
            warning,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Source {
        path: PathBuf,
        src: Rc<str>,
        warning: SessionWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Source { path, src, warning } => match warning {
                SessionWarning::Redeclaration { location, name, previous, declared } => {
                    Diagnostic::spanned(
                        Level::Warning,
                        "Variable redeclared with another type",
                        src,
                        path,
                        *location,
                        Some(format!("`{name}` is now `{declared}`")),
                    )
                    .with_text(format!("The previous `{previous}` value of `{name}` is discarded."))
                },
                SessionWarning::SplitQuotedLiteral { location } => {
                    Diagnostic::spanned(
                        Level::Warning,
                        "Quoted text split on `+`",
                        src,
                        path,
                        *location,
                        None,
                    )
                    .with_text("Every `+` in a print expression joins pieces, including those inside quotes.")
                },
            }
        }
    }
}
