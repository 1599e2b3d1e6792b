use log::{debug, info, warn};

use podium_tally::booth::Booth;
use podium_tally::store::SnapshotStore;
use podium_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use crate::args::{Args, Command};
use crate::podium::auth::FixedCredentials;
use crate::podium::config_reader::*;
use crate::podium::io_json::JsonFileStore;

pub mod auth;
pub mod config_reader;
pub mod io_json;
pub mod report;

pub const DEFAULT_STATE_PATH: &str = "podium_state.json";

#[derive(Debug, Snafu)]
pub enum PodiumError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error producing the JSON summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("{source}"))]
    Voting { source: VotingError },
    #[snafu(display("Invalid username or password"))]
    LoginRejected {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PodiumResult<T> = Result<T, PodiumError>;

pub fn run(args: &Args) -> PodiumResult<()> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => PodiumConfig::default(),
    };
    let roster = config.roster()?;
    let credentials = config.credentials();
    info!("roster: {:?}", roster);

    let state_path = args
        .state
        .clone()
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());
    let mut booth = Booth::open(roster, JsonFileStore::new(&state_path));

    let text = execute(&mut booth, &args.command, &credentials, &config.title())?;
    println!("{}", text);

    if let Command::Results { out: Some(out) } = &args.command {
        write_standings(&booth.standings(), &config.title(), out)?;
    }
    Ok(())
}

/// Performs one command on the booth and returns what should be shown to the user.
pub fn execute<S: SnapshotStore>(
    booth: &mut Booth<S>,
    command: &Command,
    credentials: &FixedCredentials,
    title: &str,
) -> PodiumResult<String> {
    debug!("execute: {:?}", command);
    match command {
        Command::Login { username, password } => {
            let granted = credentials.login(username, password);
            if !booth.login(granted) {
                return LoginRejectedSnafu {}.fail();
            }
            Ok(format!("Welcome to {}.\n{}", title, report::status(booth.session())))
        }
        Command::Logout => {
            booth.logout();
            Ok("Logged out. The votes are kept.".to_string())
        }
        Command::Status => {
            ensure_logged_in(booth)?;
            Ok(report::status(booth.session()))
        }
        Command::Vote { candidate } => {
            booth.cast_vote(candidate).context(VotingSnafu {})?;
            Ok(format!(
                "Vote for {} recorded.\n{}",
                candidate,
                report::status(booth.session())
            ))
        }
        Command::Reset { force } => {
            ensure_logged_in(booth)?;
            if let Some((position, total)) = booth.session().progress() {
                if !force {
                    warn!("execute: reset refused, voter {} of {}", position, total);
                    whatever!(
                        "The session is still in progress (voter {} of {}), use --force to start a new one anyway",
                        position,
                        total
                    )
                }
            }
            booth.reset().context(VotingSnafu {})?;
            Ok(format!(
                "New session started.\n{}",
                report::status(booth.session())
            ))
        }
        Command::Results { .. } => {
            ensure_logged_in(booth)?;
            let standings = booth.standings();
            Ok(report::render_standings(
                &standings,
                booth.session().roster(),
                title,
            ))
        }
    }
}

fn ensure_logged_in<S: SnapshotStore>(booth: &Booth<S>) -> PodiumResult<()> {
    if booth.is_authenticated() {
        Ok(())
    } else {
        Err(VotingError::NotAuthenticated).context(VotingSnafu {})
    }
}

fn write_standings(standings: &Standings, title: &str, out: &str) -> PodiumResult<()> {
    let js = report::standings_to_json(standings, title);
    let pretty = serde_json::to_string_pretty(&js).context(SerializingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        info!("Writing standings to {:?}", out);
        fs::write(out, pretty).context(WritingJsonSnafu { path: out })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_tally::store::MemoryStore;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn booth() -> Booth<MemoryStore> {
        let roster = PodiumConfig::default().roster().unwrap();
        Booth::open(roster, MemoryStore::new())
    }

    fn creds() -> FixedCredentials {
        PodiumConfig::default().credentials()
    }

    fn login(booth: &mut Booth<MemoryStore>) {
        let cmd = Command::Login {
            username: "admin".to_string(),
            password: "password".to_string(),
        };
        execute(booth, &cmd, &creds(), "Test").unwrap();
    }

    fn vote(booth: &mut Booth<MemoryStore>, candidate: &str) -> PodiumResult<String> {
        let cmd = Command::Vote {
            candidate: candidate.to_string(),
        };
        execute(booth, &cmd, &creds(), "Test")
    }

    #[test]
    fn wrong_password() {
        init();
        let mut b = booth();
        let cmd = Command::Login {
            username: "admin".to_string(),
            password: "guess".to_string(),
        };
        let res = execute(&mut b, &cmd, &creds(), "Test");
        assert!(matches!(res, Err(PodiumError::LoginRejected {})));
        assert!(!b.is_authenticated());
        assert!(matches!(
            vote(&mut b, "Group B"),
            Err(PodiumError::Voting {
                source: VotingError::NotAuthenticated
            })
        ));
        assert!(matches!(
            execute(&mut b, &Command::Status, &creds(), "Test"),
            Err(PodiumError::Voting { .. })
        ));
    }

    #[test]
    fn full_session() {
        init();
        let mut b = booth();
        login(&mut b);
        let out = execute(&mut b, &Command::Status, &creds(), "Test").unwrap();
        assert!(out.contains("Voter 1 of 7"));

        let self_vote = vote(&mut b, "Group A");
        assert!(matches!(
            self_vote,
            Err(PodiumError::Voting {
                source: VotingError::InvalidSelfVote { .. }
            })
        ));

        for c in ["Group B", "Group C", "Group A", "Group A", "Group B", "Group B"] {
            vote(&mut b, c).unwrap();
        }
        let early = execute(&mut b, &Command::Reset { force: false }, &creds(), "Test");
        assert!(matches!(early, Err(PodiumError::Whatever { .. })));
        assert_eq!(b.session().votes().len(), 6);

        let last = vote(&mut b, "Group A").unwrap();
        assert!(last.contains("All the voters have voted"));
        assert!(b.is_complete());

        let results = execute(&mut b, &Command::Results { out: None }, &creds(), "Test").unwrap();
        assert!(results.contains("Winners Podium"));

        execute(&mut b, &Command::Reset { force: false }, &creds(), "Test").unwrap();
        assert!(b.session().votes().is_empty());
    }

    #[test]
    fn forced_reset() {
        init();
        let mut b = booth();
        login(&mut b);
        vote(&mut b, "Group C").unwrap();
        execute(&mut b, &Command::Reset { force: true }, &creds(), "Test").unwrap();
        assert_eq!(b.snapshot().current_index, 0);
        assert!(b.snapshot().votes.is_empty());

        execute(&mut b, &Command::Logout, &creds(), "Test").unwrap();
        assert!(!b.is_authenticated());
        assert!(b.store().snapshot().map(|s| !s.authenticated).unwrap_or(false));
    }
}
