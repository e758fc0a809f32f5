use crate::config::DEFAULT_TARGET_NAME;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cmc")]
#[command(about = "CSS Modules compiler", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the CSS modules of a source tree into one stylesheet
    Compile {
        /// Source folder to compile
        path: Option<PathBuf>,

        /// Source folder (takes precedence over the positional)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Target folder to copy the source tree into before compiling
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Name of the bundled stylesheet
        #[arg(short, long, default_value = DEFAULT_TARGET_NAME)]
        name: String,

        /// Glob patterns excluded from extraction
        #[arg(short, long, value_delimiter = ',')]
        blacklist: Vec<String>,

        /// Plugins applied during extraction
        #[arg(short, long, value_delimiter = ',')]
        plugins: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compile_with_defaults() {
        let cli = Cli::parse_from(["cmc", "compile", "./src"]);
        let Commands::Compile {
            path,
            source,
            target,
            name,
            blacklist,
            plugins,
        } = cli.command;
        assert_eq!(path, Some(PathBuf::from("./src")));
        assert_eq!(source, None);
        assert_eq!(target, None);
        assert_eq!(name, "styles.css");
        assert!(blacklist.is_empty());
        assert!(plugins.is_empty());
    }

    #[test]
    fn parses_all_options() {
        let cli = Cli::parse_from([
            "cmc",
            "compile",
            "--source",
            "./src",
            "--target",
            ".build",
            "--name",
            "my-styles.css",
            "--blacklist",
            "*.global.css,*.ignore.css",
            "--plugins",
            "minify",
        ]);
        let Commands::Compile {
            source,
            target,
            name,
            blacklist,
            plugins,
            ..
        } = cli.command;
        assert_eq!(source, Some(PathBuf::from("./src")));
        assert_eq!(target, Some(PathBuf::from(".build")));
        assert_eq!(name, "my-styles.css");
        assert_eq!(blacklist, ["*.global.css", "*.ignore.css"]);
        assert_eq!(plugins, ["minify"]);
    }
}
