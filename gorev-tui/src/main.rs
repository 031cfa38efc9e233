mod app;
mod cli;
mod config;
mod login;
mod runtime;
mod session_store;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gorev_api::{ApiError, TodoClient};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use cli::{Cli, Commands};
use config::GorevConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run().await,
        Commands::Login => login::run_auth(false).await,
        Commands::Register => login::run_auth(true).await,
        Commands::Logout => {
            session_store::clear_token()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::ConfigPath => print_config_path(),
    }
}

fn print_config_path() -> Result<()> {
    let path = GorevConfig::config_path()?;
    if !path.exists() {
        GorevConfig::default().save()?;
    }
    println!("{}", path.display());
    Ok(())
}

async fn run() -> Result<()> {
    let config = GorevConfig::load()?;

    let Some(token) = session_store::load_token()? else {
        println!("Not signed in. Run `gorev-tui login` first.");
        return Ok(());
    };

    let mut client = TodoClient::new(&config.api_url)?;
    client.set_token(token);

    let mut app = App::new(app::calendar::local_today());

    // Entering the authenticated state loads the list wholesale.
    if let Err(e) = runtime::initialize_app_state(&mut app, &client).await {
        match e {
            ApiError::Unauthorized => {
                session_store::clear_token()?;
                anyhow::bail!("Session expired. Run `gorev-tui login` to sign in again.");
            }
            other => app.set_error(other.to_string()),
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &mut client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
