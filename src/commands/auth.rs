//! Account commands: register, login, logout, whoami

use colored::Colorize;

use super::{output, Context};
use crate::error::{Result, StudyshareError};
use crate::models::{Credentials, Registration, Session, Year};

/// Create an account and store the returned session.
pub async fn register(
    ctx: &mut Context,
    email: String,
    password: String,
    display_name: String,
    group: String,
    year: Year,
) -> Result<()> {
    let registration = Registration {
        credentials: Credentials { email, password },
        display_name,
        group,
        year: year.to_string(),
    };
    let session = ctx
        .api
        .register(ctx.session(), &registration)
        .await
        .map_err(credentials_rejected)?;
    let name = session.display_name.clone();
    ctx.store.save(session)?;
    println!("{}", format!("Welcome, {}!", name).green());
    Ok(())
}

/// Log in and store the returned session.
pub async fn login(ctx: &mut Context, email: String, password: String) -> Result<()> {
    let session = login_session(ctx, Credentials { email, password }).await?;
    if session.display_name.is_empty() {
        println!("{}", "Logged in.".green());
        println!(
            "Finish your profile with {}",
            "studyshare profile setup".cyan()
        );
    } else {
        println!("{}", format!("Logged in as {}.", session.display_name).green());
    }
    Ok(())
}

/// Exchange credentials for a session and persist it. Returns the new session.
pub async fn login_session(ctx: &mut Context, credentials: Credentials) -> Result<Session> {
    let session = ctx
        .api
        .login(ctx.session(), &credentials)
        .await
        .map_err(credentials_rejected)?;
    ctx.store.save(session.clone())?;
    Ok(session)
}

/// A 4xx answer to login or register is about the submitted credentials,
/// not about a stored session.
fn credentials_rejected(err: anyhow::Error) -> anyhow::Error {
    let rejected = match err.downcast_ref::<StudyshareError>() {
        Some(StudyshareError::Api { status, message }) if (400..500).contains(status) => {
            Some(StudyshareError::CredentialsRejected {
                status: *status,
                message: message.clone(),
            })
        }
        _ => None,
    };
    rejected.map(anyhow::Error::from).unwrap_or(err)
}

/// Forget the stored session. Safe to run when not logged in.
pub fn logout(ctx: &mut Context) -> Result<()> {
    let was_logged_in = ctx.session().is_some();
    ctx.store.clear()?;
    if was_logged_in {
        println!("{}", "Logged out.".green());
    } else {
        println!("{}", "Not logged in.".yellow());
    }
    Ok(())
}

/// Show the stored session. Requires a session.
pub fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.require_session("view your profile")?;
    output::print_session(session, &ctx.store.location());
    Ok(())
}
