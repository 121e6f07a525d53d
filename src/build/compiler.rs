//! SCSS compilation.
//!
//! The pipeline talks to the compiler through [`StyleCompiler`] so the
//! engine can be swapped in tests. [`GrassCompiler`] is the production
//! implementation on top of [`grass`].

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use grass::{Fs, StdFs};
use thiserror::Error;

use crate::build::sourcemap::{mapping_url_comment, SourceMap, SourceMapOptions};

/// CSS output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Minified output
    #[default]
    Compressed,
    /// Indented, one declaration per line
    Expanded,
}

/// Everything the compiler needs for one run.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Root SCSS file; relative imports resolve from its directory
    pub entry: &'a Path,
    /// SCSS source text of the root file, used in place of reading `entry`
    pub source: &'a str,
    /// Directories searched for `@import`/`@use`
    pub import_paths: &'a [PathBuf],
    pub style: OutputStyle,
    /// Compiled CSS file, named in the source map
    pub css_file: &'a Path,
    /// Emit a source map with these options
    pub source_map: Option<&'a SourceMapOptions>,
}

/// Result of a successful compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub css: String,
    /// Source map JSON, when requested
    pub source_map: Option<String>,
    /// Files the compiler loaded, root file first
    pub loaded_files: Vec<PathBuf>,
}

/// Compilation failure, carrying the compiler's own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A style-sheet compiler.
pub trait StyleCompiler {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutput, CompileError>;
}

/// File system adapter that serves the root file from memory and remembers
/// every file grass reads.
#[derive(Debug)]
struct RecordingFs<'a> {
    entry: &'a Path,
    source: &'a str,
    loaded: RefCell<Vec<PathBuf>>,
}

impl<'a> RecordingFs<'a> {
    fn new(entry: &'a Path, source: &'a str) -> Self {
        Self { entry, source, loaded: RefCell::new(Vec::new()) }
    }
}

impl Fs for RecordingFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        StdFs.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path == self.entry || StdFs.is_file(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let bytes =
            if path == self.entry { self.source.as_bytes().to_vec() } else { StdFs.read(path)? };
        self.loaded.borrow_mut().push(path.to_path_buf());
        Ok(bytes)
    }
}

/// [`StyleCompiler`] backed by grass.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrassCompiler;

impl GrassCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl StyleCompiler for GrassCompiler {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutput, CompileError> {
        let fs = RecordingFs::new(request.entry, request.source);
        let style = match request.style {
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
        };
        let options =
            grass::Options::default().style(style).load_paths(request.import_paths).fs(&fs);

        // Relative imports resolve from the entry's directory, never the working directory.
        let mut css = grass::from_path(request.entry, &options)
            .map_err(|e| CompileError::new(e.to_string()))?;

        let loaded_files = fs.loaded.take();

        let source_map = match request.source_map {
            Some(map_options) => {
                let map = SourceMap::new(map_options, request.css_file, &loaded_files);
                let json = map.to_json().map_err(|e| CompileError::new(e.to_string()))?;
                if !css.ends_with('\n') {
                    css.push('\n');
                }
                css.push_str(&mapping_url_comment(&map_options.source_map_url));
                Some(json)
            }
            None => None,
        };

        Ok(CompileOutput { css, source_map, loaded_files })
    }
}
