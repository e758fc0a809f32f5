//! The compile pipeline entry points.
//!
//! `compile` preserves the reference tool's observable contract: it always
//! returns normally and reports every internal failure through the log.
//! `try_compile` is the typed failure channel for callers that need one.

use crate::config::CompileOptions;
use crate::core::PipelineState;
use crate::errors::CompileError;
use crate::extract::CssModulesExtractor;
use crate::io;
use crate::paths;
use crate::pipeline::{
    run_stages, CleanCssStage, ConcatenateCssStage, ExtractStage, PruneSelectorsStage,
    RewriteImportsStage, Stage,
};
use crate::rewrite::TreeSitterTransformer;
use colored::Colorize;
use std::path::Path;

/// Compile the CSS modules under `source_path`.
///
/// Never fails from the caller's perspective; failure detection happens
/// through side effects and logs, or through [`try_compile`].
pub fn compile(source_path: impl AsRef<Path>, options: CompileOptions) {
    if let Err(err) = try_compile(source_path, options) {
        log::error!("{err}");
    }
}

/// Fallible twin of [`compile`], returning the settled pipeline state.
pub fn try_compile(
    source_path: impl AsRef<Path>,
    options: CompileOptions,
) -> Result<PipelineState, CompileError> {
    options.validate()?;

    let cwd = std::env::current_dir()
        .map_err(|e| CompileError::io("resolve current dir", Path::new("."), e))?;
    let source_path = paths::resolve_source_path(source_path.as_ref(), &cwd);
    let target_path = paths::resolve_target_path(options.target_folder.as_deref(), &cwd);

    log::debug!("Compile with options:");
    log::debug!("-- {}: {}", "source".reversed().bold(), source_path.display());
    log::debug!(
        "-- {}: {}",
        "target".reversed().bold(),
        target_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "in-place".to_string())
    );
    log::debug!("-- {}: {}", "name".reversed().bold(), options.target_name);
    log::debug!(
        "-- {}: {:?}",
        "blacklist".reversed().bold(),
        options.blacklist
    );

    let working_dir = io::copy_source_folder(&source_path, target_path.as_deref())?;

    // Preserved legacy behavior: a failed existence check is reported but
    // the pipeline still proceeds into extraction against the unusable
    // directory.
    if !io::dir_exists(&working_dir) {
        log::error!("Folder '{}' doesn't exist.", working_dir.display());
    }

    let state = PipelineState::new(source_path).with_working_dir(&working_dir);
    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(ExtractStage {
            extractor: Box::new(CssModulesExtractor),
            blacklist: options.blacklist.clone(),
            plugins: options.plugins.clone(),
        }),
        Box::new(CleanCssStage),
        Box::new(ConcatenateCssStage {
            target_name: options.target_name.clone(),
        }),
        Box::new(PruneSelectorsStage),
        Box::new(RewriteImportsStage {
            transformer: Box::new(TreeSitterTransformer::new(&working_dir)),
        }),
    ];

    run_stages(&stages, state)
}
