use crate::cli::actions::Action;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(5000),
        dsn: matches
            .get_one::<String>("dsn")
            .cloned()
            .context("missing required argument: --dsn")?,
        auth_url: matches
            .get_one::<String>("auth-url")
            .cloned()
            .context("missing required argument: --auth-url")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_matches_to_server_action() {
        temp_env::with_vars(
            [
                ("PORDISTO_DSN", Some("mongodb://localhost:27017/pordisto")),
                ("PORDISTO_AUTH_URL", Some("http://localhost:3000/api/auth")),
                ("PORDISTO_PORT", None::<&str>),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["pordisto"]);
                let action = handler(&matches).expect("action");

                let Action::Server {
                    port,
                    dsn,
                    auth_url,
                } = action;
                assert_eq!(port, 5000);
                assert_eq!(dsn, "mongodb://localhost:27017/pordisto");
                assert_eq!(auth_url, "http://localhost:3000/api/auth");
            },
        );
    }
}
