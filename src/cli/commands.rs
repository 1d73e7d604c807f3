//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list/info: browse the registry
//! - run: run one tool
//! - last: show or re-open the last used tool
//! - detect/message/theme: side panel behaviors

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// oktools - developer utility tools from the command line
#[derive(Parser, Debug)]
#[command(name = "oktools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tools, grouped by category
    List {
        /// Only this category (developer, text, encryption, image, time, utilities)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Case-insensitive filter on name or description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a tool and its options
    Info {
        /// Tool id
        tool: String,
    },

    /// Run a tool on some input
    Run {
        /// Tool id
        tool: String,

        /// Input text; read from --file or stdin when omitted
        input: Option<String>,

        /// Read input from a file
        #[arg(short, long, conflicts_with = "input")]
        file: Option<PathBuf>,

        /// Tool option as key=value; key=@path reads the value from a file
        #[arg(short = 'o', long = "option", value_parser = parse_key_value)]
        options: Vec<(String, String)>,
    },

    /// Show the last used tool
    Last {
        /// Re-open it and run it on stdin
        #[arg(short, long)]
        run: bool,
    },

    /// Detect the kind of content and suggest a tool
    Detect {
        /// Text to inspect
        text: String,
    },

    /// Feed a host message (OPEN_TOOL / LOAD_TOOL JSON) to the side panel
    Message {
        /// Message JSON
        json: String,
    },

    /// Show or change the theme
    Theme {
        /// light, dark or toggle
        value: Option<String>,
    },
}

/// Split `key=value`
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["oktools"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["oktools", "-v"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["oktools", "-c", "/path/to/oktools.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/oktools.yml")));
    }

    #[test]
    fn test_list_filters() {
        let cli = Cli::try_parse_from(["oktools", "list", "-C", "text", "--search", "json"]).unwrap();
        match cli.command {
            Some(Commands::List { category, search }) => {
                assert_eq!(category.as_deref(), Some("text"));
                assert_eq!(search.as_deref(), Some("json"));
            }
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn test_run_with_options() {
        let cli = Cli::try_parse_from([
            "oktools",
            "run",
            "json-formatter",
            "{}",
            "-o",
            "indent=4",
            "--option",
            "mode=minify",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run {
                tool,
                input,
                file,
                options,
            }) => {
                assert_eq!(tool, "json-formatter");
                assert_eq!(input.as_deref(), Some("{}"));
                assert!(file.is_none());
                assert_eq!(
                    options,
                    vec![
                        ("indent".to_string(), "4".to_string()),
                        ("mode".to_string(), "minify".to_string())
                    ]
                );
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_run_input_conflicts_with_file() {
        let result = Cli::try_parse_from(["oktools", "run", "base64", "abc", "--file", "x.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_rejects_bad_option() {
        assert!(Cli::try_parse_from(["oktools", "run", "base64", "-o", "novalue"]).is_err());
    }

    #[test]
    fn test_last_run_flag() {
        let cli = Cli::try_parse_from(["oktools", "last", "--run"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Last { run: true })));
    }

    #[test]
    fn test_theme_optional_value() {
        let cli = Cli::try_parse_from(["oktools", "theme"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Theme { value: None })));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
        assert_eq!(parse_key_value("key=").unwrap(), ("key".to_string(), String::new()));
        assert!(parse_key_value("=x").is_err());
        assert!(parse_key_value("x").is_err());
    }
}
