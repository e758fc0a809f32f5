//! The concrete stages of the compile pipeline, in execution order.

use super::stage::Stage;
use crate::bundle;
use crate::core::{PipelineState, PluginRef};
use crate::css;
use crate::errors::CompileError;
use crate::extract::Extractor;
use crate::io;
use crate::prune;
use crate::rewrite::{self, ImportTransformer};

/// Run the extraction boundary and record its map, fragment list, and
/// concatenated styles.
pub struct ExtractStage {
    pub extractor: Box<dyn Extractor>,
    pub blacklist: Vec<String>,
    pub plugins: Vec<PluginRef>,
}

impl Stage for ExtractStage {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn run(&self, state: PipelineState) -> Result<PipelineState, CompileError> {
        let working_dir = state.working_dir()?;
        let extraction = self
            .extractor
            .extract(working_dir, &self.blacklist, &self.plugins)?;
        log::debug!(
            "extracted {} modules, {} fragment files",
            extraction.map.len(),
            extraction.files.len()
        );
        Ok(state.with_extraction(extraction))
    }
}

/// Delete the extracted fragment files.
pub struct CleanCssStage;

impl Stage for CleanCssStage {
    fn name(&self) -> &'static str {
        "clean-fragments"
    }

    fn run(&self, state: PipelineState) -> Result<PipelineState, CompileError> {
        bundle::clean_css(state.working_dir()?, state.files()?)?;
        Ok(state)
    }
}

/// Write the bundled stylesheet into the working directory.
pub struct ConcatenateCssStage {
    pub target_name: String,
}

impl Stage for ConcatenateCssStage {
    fn name(&self) -> &'static str {
        "concatenate"
    }

    fn run(&self, state: PipelineState) -> Result<PipelineState, CompileError> {
        let css_output =
            bundle::concatenate_css(state.working_dir()?, &self.target_name, state.styles()?)?;
        Ok(state.with_css_output(css_output))
    }
}

/// Narrow the class map to the selectors the bundle actually defines.
pub struct PruneSelectorsStage;

impl Stage for PruneSelectorsStage {
    fn name(&self) -> &'static str {
        "prune-selectors"
    }

    fn run(&self, state: PipelineState) -> Result<PipelineState, CompileError> {
        let bundle_text = io::read_file(state.css_output()?)?;
        let selectors = css::list_class_selectors(&bundle_text);
        let pruned = prune::prune_class_map(state.map()?, &selectors);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "pruned map: {}",
                serde_json::to_string(&pruned).unwrap_or_default()
            );
        }
        Ok(state.replace_map(pruned))
    }
}

/// Rewrite JavaScript imports against the pruned map.
pub struct RewriteImportsStage {
    pub transformer: Box<dyn ImportTransformer>,
}

impl Stage for RewriteImportsStage {
    fn name(&self) -> &'static str {
        "rewrite-imports"
    }

    fn run(&self, state: PipelineState) -> Result<PipelineState, CompileError> {
        let ast_map = rewrite::convert_css_map_to_ast_map(state.map()?);
        let changed =
            rewrite::rewrite_imports(state.working_dir()?, &ast_map, self.transformer.as_ref())?;
        log::debug!("rewrote {changed} JavaScript files");
        Ok(state)
    }
}
