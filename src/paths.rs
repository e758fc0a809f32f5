//! Pure path algebra. No filesystem access happens here.

use std::path::{Component, Path, PathBuf};

/// Resolve the source folder to an absolute path relative to `cwd`.
pub fn resolve_source_path(raw: &Path, cwd: &Path) -> PathBuf {
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        cwd.join(raw)
    }
}

/// Resolve the optional target folder to an absolute path relative to
/// `cwd`. Absent or empty input means in-place compilation and yields
/// `None`.
pub fn resolve_target_path(raw: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    let raw = raw.filter(|p| !p.as_os_str().is_empty())?;
    Some(resolve_source_path(raw, cwd))
}

/// Collapse `.` and `..` components without touching the filesystem, so
/// import specifiers like `../styles/app.css` resolve against a directory
/// that may not exist yet.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                None | Some(Component::ParentDir) => out.push(".."),
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => {
                    out.pop();
                }
            },
            other => out.push(other),
        }
    }
    out
}

/// Resolve an import specifier against the importing file's directory to a
/// working-dir-relative module identifier. `None` when the specifier
/// escapes the working directory.
pub fn module_id(js_file: &Path, specifier: &str, working_dir: &Path) -> Option<String> {
    let base = js_file.parent().unwrap_or(working_dir);
    let absolute = normalize(&base.join(specifier));
    let relative = pathdiff::diff_paths(&absolute, working_dir)?;
    if matches!(relative.components().next(), Some(Component::ParentDir)) {
        return None;
    }
    Some(relative.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_resolves_relative_to_the_importing_file() {
        let id = module_id(
            Path::new("/work/components/Button.js"),
            "Button.css",
            Path::new("/work"),
        );
        assert_eq!(id.as_deref(), Some("components/Button.css"));

        let id = module_id(
            Path::new("/work/components/Button.js"),
            "../styles/app.css",
            Path::new("/work"),
        );
        assert_eq!(id.as_deref(), Some("styles/app.css"));
    }

    #[test]
    fn module_id_rejects_escapes_from_the_working_dir() {
        let id = module_id(
            Path::new("/work/App.js"),
            "../outside.css",
            Path::new("/work"),
        );
        assert_eq!(id, None);
    }

    #[test]
    fn absolute_source_passes_through() {
        let resolved = resolve_source_path(Path::new("/app/src"), Path::new("/work"));
        assert_eq!(resolved, PathBuf::from("/app/src"));
    }

    #[test]
    fn relative_source_resolves_against_cwd() {
        let resolved = resolve_source_path(Path::new("./src"), Path::new("/work"));
        assert_eq!(resolved, PathBuf::from("/work/./src"));
        assert_eq!(normalize(&resolved), PathBuf::from("/work/src"));
    }

    #[test]
    fn absent_or_empty_target_is_none() {
        assert_eq!(resolve_target_path(None, Path::new("/work")), None);
        assert_eq!(
            resolve_target_path(Some(Path::new("")), Path::new("/work")),
            None
        );
    }

    #[test]
    fn relative_target_resolves_against_cwd() {
        assert_eq!(
            resolve_target_path(Some(Path::new(".build")), Path::new("/work")),
            Some(PathBuf::from("/work/.build"))
        );
    }

    #[test]
    fn normalize_collapses_parent_components() {
        assert_eq!(
            normalize(Path::new("/app/components/../styles/app.css")),
            PathBuf::from("/app/styles/app.css")
        );
        assert_eq!(normalize(Path::new("a/./b")), PathBuf::from("a/b"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize(Path::new("../../x")), PathBuf::from("../../x"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }
}
