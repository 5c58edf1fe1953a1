//! Export functionality for Taxograph diagrams.
//!
//! This module provides the [`Exporter`] trait implemented by every rendering
//! backend, the [`OutputFormat`] picked from the output file name, and the
//! atomic file writer used for the final image.
//!
//! # Available Backends
//!
//! - [`svg`]: native SVG output via [`svg::SvgExporter`]
//! - `graphviz`: DOT text and Graphviz-rendered images (feature `graphviz`)
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`TaxographError::Export`] at the crate boundary.
//!
//! [`TaxographError::Export`]: crate::TaxographError::Export

#[cfg(feature = "graphviz")]
pub mod graphviz;
pub mod svg;

use std::{fmt, io::Write, path::Path, str::FromStr};

use log::{debug, error, info};

use taxograph_core::semantic::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `diagram` into the bytes of the output file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the backend fails, or [`Error::Io`] if an
    /// external renderer cannot be run.
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, Error>;
}

/// Image format of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
    Jpeg,
    /// Graphviz DOT source text.
    Dot,
}

impl OutputFormat {
    /// Picks the format from the extension of `path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for unknown or missing
    /// extensions, and for formats that need the `graphviz` feature when it
    /// is disabled.
    ///
    /// ```
    /// # use std::path::Path;
    /// # use taxograph::export::OutputFormat;
    /// assert_eq!(OutputFormat::from_path(Path::new("out/tree.SVG")).unwrap(), OutputFormat::Svg);
    /// assert!(OutputFormat::from_path(Path::new("tree.bmp")).is_err());
    /// assert!(OutputFormat::from_path(Path::new("tree")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!(
                    "`{}` has no file extension",
                    path.display()
                ))
            })?;
        let format: Self = extension.parse()?;

        if format.requires_graphviz() && !cfg!(feature = "graphviz") {
            return Err(Error::UnsupportedFormat(format!(
                "`{}` output requires the `graphviz` feature",
                format.extension()
            )));
        }
        Ok(format)
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Jpeg => "jpg",
            Self::Dot => "dot",
        }
    }

    /// Returns true if only the Graphviz backend can produce this format.
    pub fn requires_graphviz(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(Error::UnsupportedFormat(format!(
                "unsupported output format `{s}`"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes `bytes` to `path` all at once.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over `path`, so readers never observe a partial file and a failed
/// write leaves any previous file untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    info!(path:? = path, bytes = bytes.len(); "Writing output file");

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|err| {
        error!(dir:? = dir, err:err; "Failed to create temporary file");
        Error::Io(err)
    })?;
    temp_file.write_all(bytes).map_err(Error::Io)?;
    temp_file.flush().map_err(Error::Io)?;

    temp_file.persist(path).map_err(|err| {
        error!(path:? = path, err:err = err.error; "Failed to persist output file");
        Error::Io(err.error)
    })?;
    debug!("Output file persisted");
    Ok(())
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// The requested output format cannot be produced.
    UnsupportedFormat(String),
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while rendering or writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(msg) => write!(f, "Unsupported format: {msg}"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedFormat(_) | Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
