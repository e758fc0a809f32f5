//! Plugin name resolution.
//!
//! The CLI passes plugin names; the registry resolves them to opaque
//! [`PluginRef`] tokens before the compiler is ever invoked, so an
//! unresolvable name is reported with zero filesystem work done.

use crate::core::PluginRef;
use crate::errors::CompileError;

/// Collapse whitespace in the bundled stylesheet.
pub const PLUGIN_MINIFY: &str = "minify";
/// Scope class names as `<file-stem>__<local>` instead of keeping them.
pub const PLUGIN_SCOPED_NAMES: &str = "scoped-names";

const REGISTRY: &[&str] = &[PLUGIN_MINIFY, PLUGIN_SCOPED_NAMES];

/// Resolve plugin names in order. The first unknown name fails the whole
/// resolution.
pub fn get_plugins(names: &[String]) -> Result<Vec<PluginRef>, CompileError> {
    names
        .iter()
        .map(|name| {
            if REGISTRY.contains(&name.as_str()) {
                Ok(PluginRef::new(name))
            } else {
                Err(CompileError::Plugin(name.clone()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_plugins_in_order() {
        let plugins =
            get_plugins(&["minify".to_string(), "scoped-names".to_string()]).unwrap();
        let names: Vec<_> = plugins.iter().map(PluginRef::name).collect();
        assert_eq!(names, ["minify", "scoped-names"]);
    }

    #[test]
    fn unknown_plugin_fails_resolution() {
        let err = get_plugins(&["postcss-nested".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "Cannot load plugin 'postcss-nested'");
    }

    #[test]
    fn empty_list_resolves_to_nothing() {
        assert!(get_plugins(&[]).unwrap().is_empty());
    }
}
