//! Profile setup and editing

use std::path::PathBuf;

use colored::Colorize;

use super::{output, Context};
use crate::error::Result;
use crate::models::{Session, Year};
use crate::profile::ProfileDraft;

/// Complete the profile after registering, optionally with a picture.
pub async fn setup(
    ctx: &mut Context,
    display_name: String,
    group: String,
    year: Year,
    picture: Option<PathBuf>,
) -> Result<()> {
    ctx.require_session("set up your profile")?;
    let draft = ProfileDraft::default()
        .with_display_name(Some(display_name))
        .with_group(Some(group))
        .with_year(Some(year))
        .with_picture(picture);

    let session = save_draft(ctx, draft).await?;
    println!("{}", "Profile saved.".green());
    output::print_session(&session, &ctx.store.location());
    Ok(())
}

/// Change some profile fields; the rest keep their current value.
pub async fn edit(
    ctx: &mut Context,
    display_name: Option<String>,
    group: Option<String>,
    year: Option<Year>,
    picture: Option<PathBuf>,
) -> Result<()> {
    let current = ctx.require_session("edit your profile")?;
    let draft = ProfileDraft::from_session(Some(current))
        .with_display_name(display_name)
        .with_group(group)
        .with_year(year)
        .with_picture(picture);

    if !draft.differs_from(current) {
        println!("{}", "Nothing to change.".yellow());
        return Ok(());
    }

    let session = save_draft(ctx, draft).await?;
    println!("{}", "Profile updated.".green());
    output::print_session(&session, &ctx.store.location());
    Ok(())
}

/// Send the draft and replace the stored session with the server's answer.
///
/// On failure the draft is dropped and the stored session is unchanged.
pub async fn save_draft(ctx: &mut Context, draft: ProfileDraft) -> Result<Session> {
    let update = draft.into_update()?;
    let session = ctx.api.update_profile(ctx.session(), &update).await?;
    ctx.store.save(session.clone())?;
    Ok(session)
}
