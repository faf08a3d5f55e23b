pub mod generate;
pub mod sign;
pub mod verify;

use crate::cli::args::{Cli, Command};
use crate::interactive;

/// Route a parsed command line to its handler; returns the process exit
/// code. No subcommand drops into the interactive menu.
pub fn dispatch(cli: Cli) -> i32 {
    match cli.cmd {
        Some(Command::Sign(args)) => sign::cmd_sign(args),
        Some(Command::Verify(args)) => verify::cmd_verify(args),
        Some(Command::Generate(args)) => generate::cmd_generate(args),
        None => interactive::run(),
    }
}

/// Show only the last four characters of an identity number.
pub(crate) fn mask_identity(identity: &str) -> String {
    let chars: Vec<char> = identity.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("****{tail}")
}
