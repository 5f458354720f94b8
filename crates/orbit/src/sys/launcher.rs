use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

orbit_core::impl_name_newtype!(ExecCommand);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Empty command")]
    Empty,
    #[error("Malformed command line: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Splits `exec` into program and arguments.
pub fn command_line(exec: &ExecCommand) -> Result<Vec<String>, LaunchError> {
    let args = shell_words::split(exec.as_str())?;
    if args.is_empty() {
        return Err(LaunchError::Empty);
    }
    Ok(args)
}

/// Starts `exec` detached from the menu, without waiting for it.
pub fn launch(exec: &ExecCommand) -> Result<(), LaunchError> {
    let args = command_line(exec)?;
    log::info!("Launching '{}'", exec);
    Command::new(&args[0])
        .args(&args[1..])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_splitting() {
        let args = command_line(&ExecCommand::from("playerctl --player 'my player' next")).unwrap();
        assert_eq!(args, vec!["playerctl", "--player", "my player", "next"]);
    }

    #[test]
    fn test_bad_command_lines() {
        assert!(matches!(
            command_line(&ExecCommand::from("   ")),
            Err(LaunchError::Empty)
        ));
        assert!(matches!(
            command_line(&ExecCommand::from("echo 'unterminated")),
            Err(LaunchError::Parse(_))
        ));
    }
}
