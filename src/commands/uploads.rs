//! Browsing, saving, and managing uploads

use std::io::{BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use super::{output, Context};
use crate::collection::{remove_by_id, replace_by_id};
use crate::error::{Result, StudyshareError};
use crate::models::{NewUpload, Upload, UploadEdit, Year};

/// A list of uploads held locally and kept in step with server results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadList {
    pub items: Vec<Upload>,
}

impl UploadList {
    pub fn new(items: Vec<Upload>) -> Self {
        Self { items }
    }

    /// The logged-in user's uploads.
    pub async fn fetch_mine(ctx: &Context) -> Result<Self> {
        ctx.require_session("view your uploads")?;
        Ok(Self::new(ctx.api.my_uploads(ctx.session()).await?))
    }

    pub fn get(&self, id: &str) -> Option<&Upload> {
        self.items.iter().find(|upload| upload.id == id)
    }

    /// Delete on the server, then drop the item from the list.
    ///
    /// The list is untouched when the server call fails.
    pub async fn delete(&mut self, ctx: &Context, id: &str) -> Result<Option<Upload>> {
        ctx.api.delete_upload(ctx.session(), id).await?;
        Ok(remove_by_id(&mut self.items, id))
    }

    /// Submit the four editable fields, then swap in the server's version.
    pub async fn update(&mut self, ctx: &Context, id: &str, edit: &UploadEdit) -> Result<Upload> {
        let updated = ctx.api.update_upload(ctx.session(), id, edit).await?;
        if !replace_by_id(&mut self.items, updated.clone()) {
            tracing::debug!("Updated upload {} was not in the local list", updated.id);
        }
        Ok(updated)
    }
}

/// All uploads, optionally filtered client-side.
pub async fn list(ctx: &Context, search: Option<&str>) -> Result<()> {
    let uploads = ctx.api.list_uploads(ctx.session()).await?;
    let uploads: Vec<Upload> = match search {
        Some(term) => uploads.into_iter().filter(|u| u.matches(term)).collect(),
        None => uploads,
    };
    output::print_uploads("Uploads", &uploads);
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let upload = ctx.api.get_upload(ctx.session(), id).await?;
    output::print_upload(&upload);
    Ok(())
}

pub async fn create(
    ctx: &Context,
    file: PathBuf,
    subject: String,
    group: String,
    year: Year,
    semester: String,
) -> Result<()> {
    ctx.require_session("upload files")?;
    if !file.is_file() {
        return Err(StudyshareError::InvalidInput(format!(
            "{} is not a readable file",
            file.display()
        ))
        .into());
    }

    let new_upload = NewUpload {
        subject,
        group,
        year: year.to_string(),
        semester,
        file,
    };
    let created = ctx.api.create_upload(ctx.session(), &new_upload).await?;
    println!("{}", format!("Uploaded {}.", created.id).green());
    output::print_upload(&created);
    Ok(())
}

/// Overlay the given fields on the current upload and submit the result.
pub async fn edit(
    ctx: &Context,
    id: &str,
    subject: Option<String>,
    group: Option<String>,
    year: Option<Year>,
    semester: Option<String>,
) -> Result<()> {
    ctx.require_session("edit uploads")?;
    let mut list = UploadList::fetch_mine(ctx).await?;
    let current = match list.get(id) {
        Some(upload) => upload.clone(),
        None => ctx.api.get_upload(ctx.session(), id).await?,
    };

    let mut changes = UploadEdit::from(&current);
    if let Some(value) = subject {
        changes.subject = value;
    }
    if let Some(value) = group {
        changes.group = value;
    }
    if let Some(value) = year {
        changes.year = value.to_string();
    }
    if let Some(value) = semester {
        changes.semester = value;
    }

    if changes == UploadEdit::from(&current) {
        println!("{}", "Nothing to change.".yellow());
        return Ok(());
    }

    let updated = list.update(ctx, id, &changes).await?;
    println!("{}", "Upload updated.".green());
    output::print_upload(&updated);
    Ok(())
}

pub async fn delete(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    ctx.require_session("delete uploads")?;
    if !yes && !confirm("Are you sure you want to permanently delete this upload?")? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let mut list = UploadList::fetch_mine(ctx).await?;
    list.delete(ctx, id).await?;
    println!("{}", format!("Deleted {}.", id).green());
    output::print_uploads("Your Uploads", &list.items);
    Ok(())
}

/// Record the download and print where the file lives.
pub async fn download(ctx: &Context, id: &str) -> Result<()> {
    let upload = ctx.api.get_upload(ctx.session(), id).await?;
    ctx.api.track_download(ctx.session(), id).await?;
    if upload.file_ref.is_empty() {
        println!("{}", "This upload has no file link.".yellow());
    } else {
        println!("{}", upload.file_ref);
    }
    Ok(())
}

pub async fn mine(ctx: &Context) -> Result<()> {
    let list = UploadList::fetch_mine(ctx).await?;
    output::print_uploads("Your Uploads", &list.items);
    Ok(())
}

pub async fn saved(ctx: &Context) -> Result<()> {
    ctx.require_session("see saved uploads")?;
    let uploads = ctx.api.saved_uploads(ctx.session()).await?;
    output::print_uploads("Saved Uploads", &uploads);
    Ok(())
}

pub async fn save(ctx: &Context, id: &str) -> Result<()> {
    ctx.require_session("save uploads")?;
    let confirmation = ctx.api.save_upload(ctx.session(), id).await?;
    output::print_confirmation(&confirmation, &format!("Saved {}.", id));
    Ok(())
}

pub async fn unsave(ctx: &Context, id: &str) -> Result<()> {
    ctx.require_session("manage saved uploads")?;
    let confirmation = ctx.api.unsave_upload(ctx.session(), id).await?;
    output::print_confirmation(&confirmation, &format!("Removed {} from saved.", id));
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
