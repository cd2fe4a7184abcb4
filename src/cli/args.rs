//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Sign in from the terminal and keep the session
    Login { username: Option<String> },
    /// Forget the stored session
    Logout,
    /// Print the stored profile; `verify` asks the backend first
    WhoAmI { verify: bool },
    /// Query the service health endpoint
    Health,
    /// Run the TUI application (default)
    RunTui,
}

pub const USAGE: &str = "\
Usage: minewatch [OPTION]

Without options the console starts in the terminal.

Options:
  --login [USERNAME]   sign in and store the session (prompts for the password)
  --logout             forget the stored session
  --whoami [--verify]  show the signed-in user; --verify checks the token with the backend
  --health             check that the backend is reachable
  -V, --version        print the version
  -h, --help           print this help

Environment:
  MINEWATCH_API_URL       backend base URL (default http://localhost:8000/api/v1)
  MINEWATCH_HOME          directory for the session file and log (default ~/.minewatch)
  MINEWATCH_TIMEOUT_SECS  request timeout in seconds (default: none)
  MINEWATCH_LOG           log filter (default info,minewatch=debug)";

/// Parse command-line arguments. The first item is the program name.
///
/// ```
/// use minewatch::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["minewatch".to_string(), "--login".to_string(), "op".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::Login { username: Some("op".to_string()) }
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();
    for (i, arg) in args.iter().enumerate() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--login" => {
                let username = args
                    .get(i + 1)
                    .filter(|next| !next.starts_with('-'))
                    .cloned();
                return CliCommand::Login { username };
            }
            "--logout" => return CliCommand::Logout,
            "--whoami" => {
                let verify = args.iter().any(|a| a == "--verify");
                return CliCommand::WhoAmI { verify };
            }
            "--health" => return CliCommand::Health,
            _ => {}
        }
    }
    CliCommand::RunTui
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["minewatch".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_login_with_and_without_username() {
        assert_eq!(
            parse(&["--login", "operator"]),
            CliCommand::Login {
                username: Some("operator".to_string())
            }
        );
        assert_eq!(parse(&["--login"]), CliCommand::Login { username: None });
        assert_eq!(
            parse(&["--login", "--verbose"]),
            CliCommand::Login { username: None }
        );
    }

    #[test]
    fn test_parse_whoami_verify_in_any_position() {
        assert_eq!(parse(&["--whoami"]), CliCommand::WhoAmI { verify: false });
        assert_eq!(parse(&["--whoami", "--verify"]), CliCommand::WhoAmI { verify: true });
        assert_eq!(parse(&["--verify", "--whoami"]), CliCommand::WhoAmI { verify: true });
    }

    #[test]
    fn test_parse_no_args_runs_tui() {
        assert_eq!(parse(&[]), CliCommand::RunTui);
    }

    #[test]
    fn test_parse_unknown_flag_runs_tui() {
        assert_eq!(parse(&["--unknown"]), CliCommand::RunTui);
    }

    #[test]
    fn test_usage_lists_every_flag() {
        for flag in ["--login", "--logout", "--whoami", "--health", "--version", "--help"] {
            assert!(USAGE.contains(flag), "{} missing from usage", flag);
        }
    }
}
