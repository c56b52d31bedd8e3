pub mod error;
pub mod session;
pub mod shape;

pub mod prelude {
    pub use super::{
        error::*,
        session::*,
        shape::*,
        read_source
    };
}

#[cfg(test)]
mod tests;

use std::{io::ErrorKind, path::Path};

use utf8_chars::BufReadCharsExt;

use crate::utils::prelude::Error;

/// Reads a source file as a stream of UTF-8 characters.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let io_error = |err: std::io::Error| match err.kind() {
        ErrorKind::InvalidData => Error::Encoding { path: path.to_path_buf() },
        kind => Error::StdIo { path: path.to_path_buf(), err: kind },
    };

    let file = std::fs::File::open(path).map_err(io_error)?;

    let file_size = file.metadata().map_err(io_error)?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for ch in reader.chars() {
        src.push(ch.map_err(io_error)?);
    }

    tracing::debug!("read {} byte(s) from {}", src.len(), path.display());

    Ok(src)
}
