//! Style build pipeline.
//!
//! Resolves the active source tree, compares its freshness signature with
//! the stored marker, and recompiles `scss/main.scss` into `css/main.css`
//! when needed. Nothing is written unless the compile succeeds.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::build::{
    compute_signature, rebuild_reason, BuildContext, BuildPlan, CompileError, CompileRequest,
    GrassCompiler, OutputStyle, RebuildReport, StyleBuildOutcome, StyleCompiler,
};
use crate::settings::{SettingsError, SettingsStore, MODIFIED_TIMESTAMP_KEY};

/// Error during a style build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The source `scss/` directory does not exist
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// The source directory path cannot be used as a glob pattern
    #[error("Source directory path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    /// The compiler rejected the sources
    #[error("SCSS compile failed: {0}")]
    Compile(#[from] CompileError),
    /// IO error
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading or writing the freshness marker failed
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
        move |source| BuildError::Io { path: path.to_path_buf(), source }
    }
}

/// Style build for one theme.
pub struct StyleBuild {
    context: BuildContext,
    compiler: Box<dyn StyleCompiler>,
}

impl StyleBuild {
    /// Create a style build using the grass compiler.
    pub fn new(context: BuildContext) -> Self {
        Self { context, compiler: Box::new(GrassCompiler::new()) }
    }

    /// Replace the compiler.
    pub fn with_compiler(mut self, compiler: impl StyleCompiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Work out whether a rebuild is needed, without writing anything.
    pub fn plan(&self, store: &dyn SettingsStore) -> Result<BuildPlan, BuildError> {
        let layout = self.context.layout();
        let signature = compute_signature(&layout.scss_dir(), &layout.framework_entry())?;
        let marker = store.get_int(MODIFIED_TIMESTAMP_KEY)?.unwrap_or(0);
        let css_path = layout.main_css();
        let artifact_exists = css_path.is_file();

        let reason = rebuild_reason(
            signature,
            marker,
            artifact_exists,
            self.context.is_development(),
            self.context.is_forced(),
        );

        debug!(
            source_root = %layout.source_root().display(),
            %signature,
            marker,
            artifact_exists,
            reason = ?reason,
            "planned style build"
        );

        Ok(BuildPlan {
            source_root: layout.source_root().to_path_buf(),
            css_path,
            signature,
            marker,
            artifact_exists,
            reason,
        })
    }

    /// Run the style build, updating the marker in `store` after a rebuild.
    pub fn run(&self, store: &mut dyn SettingsStore) -> Result<StyleBuildOutcome, BuildError> {
        let plan = self.plan(store)?;

        let reason = match plan.reason {
            Some(reason) => reason,
            None => {
                info!(signature = %plan.signature, "stylesheet up to date");
                return Ok(StyleBuildOutcome::UpToDate {
                    signature: plan.signature,
                    marker: plan.marker,
                });
            }
        };

        let start = Instant::now();
        let layout = self.context.layout();
        let entry = layout.main_scss();
        let import_paths = layout.import_paths();
        let map_options = self.context.source_map_options();

        info!(%reason, entry = %entry.display(), "compiling stylesheet");

        let source = fs::read_to_string(&entry).map_err(BuildError::io(&entry))?;
        let output = self.compiler.compile(&CompileRequest {
            entry: &entry,
            source: &source,
            import_paths: &import_paths,
            style: OutputStyle::Compressed,
            css_file: &plan.css_path,
            source_map: map_options.as_ref(),
        })?;

        if let Some(css_dir) = plan.css_path.parent() {
            if !css_dir.exists() {
                fs::create_dir_all(css_dir).map_err(BuildError::io(css_dir))?;
            }
        }

        fs::write(&plan.css_path, &output.css).map_err(BuildError::io(&plan.css_path))?;

        let map_path = match (&output.source_map, self.context.is_development()) {
            (Some(map), true) => {
                let map_path = layout.main_map();
                fs::write(&map_path, map).map_err(BuildError::io(&map_path))?;
                Some(map_path)
            }
            _ => None,
        };

        store.set_int(MODIFIED_TIMESTAMP_KEY, plan.signature.value())?;

        let report = RebuildReport {
            reason,
            css_path: plan.css_path,
            map_path,
            signature: plan.signature,
            previous_marker: plan.marker,
            files_loaded: output.loaded_files.len(),
            css_bytes: output.css.len(),
            duration: start.elapsed(),
        };

        info!(
            css = %report.css_path.display(),
            bytes = report.css_bytes,
            marker = report.signature.value(),
            "stylesheet written"
        );

        Ok(StyleBuildOutcome::Rebuilt(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::CompileOutput;
    use crate::environment::EnvironmentType;
    use crate::settings::MemorySettingsStore;
    use crate::theme::ThemeLayout;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Compiler stub that counts calls and echoes the source.
    #[derive(Clone, Default)]
    struct CountingCompiler {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl StyleCompiler for CountingCompiler {
        fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutput, CompileError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(CompileError::new("Expected expression."));
            }
            Ok(CompileOutput {
                css: format!("/*compiled*/{}", request.source),
                source_map: request.source_map.map(|_| "{\"version\":3}".to_string()),
                loaded_files: vec![request.entry.to_path_buf()],
            })
        }
    }

    fn theme() -> (TempDir, ThemeLayout) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bootscore");
        fs::create_dir_all(root.join("scss/bootstrap")).unwrap();
        fs::write(root.join("scss/main.scss"), "a{color:red}").unwrap();
        fs::write(root.join("scss/bootstrap/bootstrap.scss"), "").unwrap();
        (temp, ThemeLayout::new(root, None))
    }

    #[test]
    fn test_first_run_builds_and_stores_marker() {
        let (_temp, layout) = theme();
        let compiler = CountingCompiler::default();
        let build = StyleBuild::new(BuildContext::new(layout.clone())).with_compiler(compiler.clone());
        let mut store = MemorySettingsStore::new();

        let outcome = build.run(&mut store).unwrap();

        assert!(outcome.is_rebuilt());
        assert_eq!(compiler.calls.get(), 1);
        assert_eq!(fs::read_to_string(layout.main_css()).unwrap(), "/*compiled*/a{color:red}");
        assert!(!layout.main_map().exists());
        assert_eq!(store.get_int(MODIFIED_TIMESTAMP_KEY).unwrap(), Some(outcome.marker()));
    }

    #[test]
    fn test_second_run_is_noop() {
        let (_temp, layout) = theme();
        let compiler = CountingCompiler::default();
        let build = StyleBuild::new(BuildContext::new(layout)).with_compiler(compiler.clone());
        let mut store = MemorySettingsStore::new();

        let first = build.run(&mut store).unwrap();
        let second = build.run(&mut store).unwrap();

        assert!(!second.is_rebuilt());
        assert_eq!(second.marker(), first.marker());
        assert_eq!(compiler.calls.get(), 1);
    }

    #[test]
    fn test_compile_failure_writes_nothing() {
        let (_temp, layout) = theme();
        let compiler = CountingCompiler { fail: true, ..Default::default() };
        let build = StyleBuild::new(BuildContext::new(layout.clone())).with_compiler(compiler);
        let mut store = MemorySettingsStore::new();

        let err = build.run(&mut store).unwrap_err();

        assert!(matches!(err, BuildError::Compile(_)));
        assert!(err.to_string().contains("Expected expression."));
        assert!(!layout.main_css().exists());
        assert_eq!(store.get_int(MODIFIED_TIMESTAMP_KEY).unwrap(), None);
    }

    #[test]
    fn test_development_mode_writes_source_map() {
        let (_temp, layout) = theme();
        let compiler = CountingCompiler::default();
        let ctx = BuildContext::new(layout.clone()).with_environment(EnvironmentType::Development);
        let build = StyleBuild::new(ctx).with_compiler(compiler.clone());
        let mut store = MemorySettingsStore::new();

        build.run(&mut store).unwrap();
        let second = build.run(&mut store).unwrap();

        assert!(second.is_rebuilt());
        assert_eq!(compiler.calls.get(), 2);
        assert_eq!(fs::read_to_string(layout.main_map()).unwrap(), "{\"version\":3}");
    }

    #[test]
    fn test_plan_reports_missing_artifact() {
        let (_temp, layout) = theme();
        let build = StyleBuild::new(BuildContext::new(layout));
        let store = MemorySettingsStore::new();

        let plan = build.plan(&store).unwrap();
        assert!(!plan.artifact_exists);
        assert_eq!(plan.marker, 0);
        assert_eq!(plan.reason, Some(crate::build::RebuildReason::ArtifactMissing));
    }

    #[test]
    fn test_missing_scss_dir() {
        let temp = TempDir::new().unwrap();
        let build = StyleBuild::new(BuildContext::new(ThemeLayout::new(temp.path(), None)));
        let mut store = MemorySettingsStore::new();

        assert!(matches!(build.run(&mut store), Err(BuildError::SourceNotFound(_))));
    }
}
