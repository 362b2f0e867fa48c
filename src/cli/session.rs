//! Session CLI commands

use crate::console::Console;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::UserSession;

pub fn handle_login(console: &mut Console, email: &str, password: &str) -> CreatorFlowResult<()> {
    let session = console.login(email, password)?;
    println!("Signed in as {} ({})", session.display_name, session.email);
    Ok(())
}

pub fn handle_logout(console: &mut Console) -> CreatorFlowResult<()> {
    match console.logout()? {
        Some(session) => println!("Signed out {}", session.email),
        None => println!("Not signed in."),
    }
    Ok(())
}

pub fn handle_whoami(console: &Console) -> CreatorFlowResult<()> {
    let session = require_session(console)?;
    println!("{} <{}>", session.display_name, session.email);
    println!(
        "Signed in at {}",
        session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// Gate for every command that needs a signed-in user
pub fn require_session(console: &Console) -> CreatorFlowResult<&UserSession> {
    console.session().ok_or_else(|| {
        CreatorFlowError::Session("Not signed in. Run `creatorflow login` first".into())
    })
}
