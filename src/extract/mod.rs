//! The extraction boundary.
//!
//! Given a working directory, exclusion globs, and an ordered plugin list,
//! an extractor returns the fragment files, the class map, and the
//! concatenated CSS text. The pipeline never looks inside the plugin
//! tokens; interpretation belongs to the engine.

mod css_modules;

pub use css_modules::CssModulesExtractor;

use crate::core::{Extraction, PluginRef};
use crate::errors::CompileError;
use std::path::Path;

pub trait Extractor {
    /// Extract CSS modules referenced by the JavaScript tree under
    /// `working_dir`. Must not touch paths outside `working_dir`.
    fn extract(
        &self,
        working_dir: &Path,
        blacklist: &[String],
        plugins: &[PluginRef],
    ) -> Result<Extraction, CompileError>;
}
