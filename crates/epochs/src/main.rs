use clap::{Parser, Subcommand};
use epochs::control::{self, Command};
use epochs::dial::Step;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "epochs", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Turn the dial to the next section (wraps around).
    Next,
    /// Turn the dial to the previous section (wraps around).
    Prev,
    /// Jump to a section by its number on the dial.
    Select {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        number: u8,
    },
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Next => Command::Step(Step::Next),
            Commands::Prev => Command::Step(Step::Previous),
            Commands::Select { number } => Command::Select(usize::from(number) - 1),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(Command::from(cli.command))
}

fn send_command(cmd: Command) -> anyhow::Result<()> {
    let path = control::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to timewheel at {}: {}. Is timewheel running?",
            path.display(),
            e
        )
    })?;

    log::debug!("sending '{}' to {}", cmd, path.display());
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
