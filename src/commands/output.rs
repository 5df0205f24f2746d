//! Terminal rendering for sessions and uploads

use colored::Colorize;
use prettytable::{format, Table};

use crate::models::{Confirmation, Session, Upload};

/// Print uploads as a table, or a notice when there are none.
pub fn print_uploads(title: &str, uploads: &[Upload]) {
    if uploads.is_empty() {
        println!("{}", format!("{}: nothing here yet.", title).yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Subject".bold(),
        "Group".bold(),
        "Year".bold(),
        "Semester".bold(),
        "Saved".bold(),
        "Added".bold()
    ]);

    for upload in uploads {
        let saved = upload
            .saved_by_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let added = upload
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(prettytable::row![
            upload.id.cyan(),
            truncate(&upload.subject, 40),
            upload.group,
            upload.year,
            upload.semester,
            saved,
            added
        ]);
    }

    println!("\n{} ({}):", title, uploads.len());
    table.printstd();
    println!();
}

/// Print every known field of one upload.
pub fn print_upload(upload: &Upload) {
    println!("{} {}", "Upload".bold(), upload.id.cyan());
    println!("  Subject:  {}", upload.subject);
    println!("  Group:    {}", upload.group);
    println!("  Year:     {}", upload.year);
    println!("  Semester: {}", upload.semester);
    if !upload.file_ref.is_empty() {
        println!("  File:     {}", upload.file_ref);
    }
    if let Some(owner) = &upload.owner_id {
        println!("  Owner:    {}", owner);
    }
    if let Some(count) = upload.saved_by_count {
        println!("  Saved by: {}", count);
    }
    if let Some(created) = upload.created_at {
        println!("  Added:    {}", created.format("%Y-%m-%d %H:%M"));
    }
}

/// Print the logged-in user. The token is never shown.
pub fn print_session(session: &Session, location: &str) {
    let name = if session.display_name.is_empty() {
        "(no display name)".to_string()
    } else {
        session.display_name.clone()
    };
    println!("{}", name.bold());
    if !session.group.is_empty() || !session.year.is_empty() {
        println!("  {} \u{2022} {}", session.group, session.year);
    }
    println!("  ID:      {}", session.id);
    if let Some(pic) = &session.profile_pic_url {
        println!("  Picture: {}", pic);
    }
    println!("  Session: {}", location.dimmed());
}

pub fn print_confirmation(confirmation: &Confirmation, fallback: &str) {
    let text = confirmation.message.as_deref().unwrap_or(fallback);
    println!("{}", text.green());
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Physics", 40), "Physics");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "Advanced Quantum Mechanics and Statistical Thermodynamics";
        let out = truncate(long, 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "\u{e9}tude \u{e9}tude \u{e9}tude";
        assert_eq!(truncate(text, 40), text);
    }
}
