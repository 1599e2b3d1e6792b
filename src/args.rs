use clap::{Parser, Subcommand};

/// This is a voting booth: voters are called one after the other, then the results are shown on a podium.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the voters, the candidates and the credentials.
    /// If not provided, the built-in roster is used.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default podium_state.json) The file in which the session is saved between commands.
    #[clap(short, long, value_parser)]
    pub state: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Opens the booth.
    Login {
        #[clap(short, long, value_parser)]
        username: String,
        #[clap(short, long, value_parser)]
        password: String,
    },
    /// Closes the booth. The votes are kept.
    Logout,
    /// Shows who votes next.
    Status,
    /// Casts the vote of the current voter.
    Vote {
        /// The candidate chosen by the current voter.
        #[clap(value_parser)]
        candidate: String,
    },
    /// Starts a new session. All the votes are discarded.
    Reset {
        /// Reset even if some voters have not voted yet.
        #[clap(long, takes_value = false)]
        force: bool,
    },
    /// Shows the live ranking, or the final podium once everybody has voted.
    Results {
        /// (file path or 'stdout') If specified, the standings will also be written in JSON format to the given location.
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
}
