use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "job-board", about = "Job board data service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Apply migrations and start the HTTP server (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

impl Cli {
    /// Subcommand to run; a bare invocation serves
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
