use std::io::{self, Write};

use anyhow::{Context, Result};
use gorev_api::TodoClient;

use crate::config::GorevConfig;
use crate::session_store;

/// Interactive sign-in (or account creation) at the terminal:
/// email on stdin, password without echo, token saved on success.
/// Only the token is kept; the password is dropped immediately.
pub async fn run_auth(register: bool) -> Result<()> {
    let config = GorevConfig::load()?;
    let client = TodoClient::new(&config.api_url)?;

    print!("Email: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin()
        .read_line(&mut email)
        .context("Failed to read email")?;
    let email = email.trim();

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let result = if register {
        client.register(email, &password).await
    } else {
        client.login(email, &password).await
    };

    match result {
        Ok(token) => {
            session_store::save_token(&token)?;
            println!("Signed in. Session saved.");
            println!("Run `gorev-tui run` to open your task list.");
            Ok(())
        }
        Err(e) => anyhow::bail!("{e}"),
    }
}
