//! Source map options and Source Map v3 document generation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the browser finds the map and how source paths are expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapOptions {
    /// Public URL of the map file, referenced from the compiled CSS
    pub source_map_url: String,
    /// Filesystem prefix stripped from every source path
    pub base_path: String,
    /// URL prefix the browser puts in front of every source path
    pub source_root: String,
}

impl SourceMapOptions {
    /// Derive options for `css_file` from the relative site URL and the
    /// site's install path.
    ///
    /// ```
    /// use std::path::Path;
    /// use bootscore_build::build::SourceMapOptions;
    ///
    /// let opts = SourceMapOptions::derive(
    ///     "",
    ///     Path::new("/var/www/html/"),
    ///     Path::new("/var/www/html/wp-content/themes/bootscore/css/main.css"),
    /// );
    /// assert_eq!(opts.source_map_url, "/wp-content/themes/bootscore/css/main.map");
    /// assert_eq!(opts.base_path, "/var/www/html");
    /// assert_eq!(opts.source_root, "/");
    /// ```
    pub fn derive(site_url: &str, abspath: &Path, css_file: &Path) -> Self {
        let abspath = to_slashes(abspath);
        let css = to_slashes(css_file);

        let relative = css.strip_prefix(abspath.as_str()).unwrap_or(&css).trim_start_matches('/');
        let map = match relative.strip_suffix("css") {
            Some(stem) => format!("{stem}map"),
            None => format!("{relative}.map"),
        };

        Self {
            source_map_url: format!("{site_url}/{map}"),
            base_path: abspath.strip_suffix('/').unwrap_or(&abspath).to_string(),
            source_root: format!("{site_url}/"),
        }
    }

    /// Express a loaded file relative to the base path.
    pub fn relative_source(&self, path: &Path) -> String {
        let path = to_slashes(path);
        path.strip_prefix(self.base_path.as_str()).unwrap_or(&path).trim_start_matches('/').to_string()
    }
}

fn to_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Source Map revision 3 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub source_root: String,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Build a map for `css_file` listing every loaded source once, in load
    /// order.
    ///
    /// The compiler exposes no position data, so `mappings` stays empty.
    pub fn new(options: &SourceMapOptions, css_file: &Path, loaded: &[PathBuf]) -> Self {
        let mut sources: Vec<String> = Vec::with_capacity(loaded.len());
        for path in loaded {
            let source = options.relative_source(path);
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        Self {
            version: 3,
            file: css_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source_root: options.source_root.clone(),
            sources,
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Comment appended to compiled CSS pointing at its map.
pub fn mapping_url_comment(url: &str) -> String {
    format!("/*# sourceMappingURL={url} */")
}
