use clap::{Parser, Subcommand};
use orbit::sys::server::SOCKET_PATH;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "orbitctl", version, about = "Control a running orbit menu", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Open the menu at the pointer
    Show,
    /// Hide the menu
    Hide,
    /// Go back one layer, closing the menu from the first one
    Back,
}

impl Commands {
    fn as_wire(self) -> &'static str {
        match self {
            Commands::Show => "show",
            Commands::Hide => "hide",
            Commands::Back => "back",
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(cli.command.as_wire())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to orbit daemon at {}: {}. Is orbit running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    log::debug!("Sent '{}'", cmd);
    Ok(())
}
