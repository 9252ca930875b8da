//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::net::DEFAULT_ENDPOINT;

/// Browse a remote user directory with live search.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "user-directory", version, about)]
pub struct Args {
    /// Endpoint returning a JSON array of `{id, name}` records
    #[arg(long, env = "USER_DIRECTORY_URL", default_value = DEFAULT_ENDPOINT)]
    pub url: String,

    /// Initial search text
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Theme file (`key = #RRGGBB` lines)
    #[arg(long)]
    pub theme: Option<PathBuf>,

    /// Keybindings file (`Action = KeySpec` lines)
    #[arg(long)]
    pub keybinds: Option<PathBuf>,

    /// Write logs to this file; logging is off otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_fixed_endpoint() {
        let args = Args::try_parse_from(["user-directory"]).unwrap();
        assert_eq!(args.url, DEFAULT_ENDPOINT);
        assert_eq!(args.query, "");
        assert!(args.theme.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "user-directory",
            "--url",
            "http://127.0.0.1:9/users",
            "-q",
            "jo",
            "--log-file",
            "/tmp/ud.log",
        ])
        .unwrap();
        assert_eq!(args.url, "http://127.0.0.1:9/users");
        assert_eq!(args.query, "jo");
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/ud.log")));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
