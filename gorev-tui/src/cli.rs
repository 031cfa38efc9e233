use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gorev-tui")]
#[command(about = "Terminal UI for the gorev task list")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the task list
    Run,
    /// Sign in with email and password
    Login,
    /// Create an account and sign in
    Register,
    /// Remove the locally saved session
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
