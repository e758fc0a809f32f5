//! The `compile` command handler.
//!
//! Mirrors the reference CLI contract: a missing source reports exactly
//! one error with zero filesystem work, an unresolvable plugin name stops
//! before the compiler is invoked, and everything else is assembled into
//! `CompileOptions` field-by-field over the defaults.

use crate::compiler;
use crate::config::CompileOptions;
use crate::plugins;
use std::path::PathBuf;

pub struct CompileArgs {
    pub path: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub name: String,
    pub blacklist: Vec<String>,
    pub plugins: Vec<String>,
}

pub fn run(args: CompileArgs) {
    let Some(source) = args.source.or(args.path) else {
        log::error!("Error Compiling css Modules, a source folder must be defined!");
        return;
    };

    let plugin_refs = match plugins::get_plugins(&args.plugins) {
        Ok(refs) => refs,
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };

    let mut options = CompileOptions::default()
        .with_target_name(args.name)
        .with_blacklist(args.blacklist)
        .with_plugins(plugin_refs);
    if let Some(target) = args.target {
        options = options.with_target_folder(target);
    }

    compiler::compile(source, options);
}
