use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use helio_core::models::{NotificationId, NotificationKind, NotificationRecord, Priority};
use helio_core::store::{KeyValueStore, NotificationStore};
use helio_core::time_format::format_relative_time;

#[derive(Parser)]
#[command(name = "helio-tui")]
#[command(about = "Patient notifications and accessibility tools in the terminal")]
pub(crate) struct Cli {
    /// Directory holding notifications and preferences
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Page to display: an http(s) URL or a local HTML file
    #[arg(long)]
    pub page: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List all notifications, newest first
    List,

    /// Add a notification
    Add {
        #[arg(long, short = 't')]
        title: String,
        #[arg(long, short = 'm')]
        message: String,
        /// appointment, reminder, result, alert, info or success
        #[arg(long, short = 'k', default_value = "info")]
        kind: NotificationKind,
        /// low, medium or high
        #[arg(long, short = 'p', default_value = "medium")]
        priority: Priority,
    },

    /// Mark one notification as read
    MarkRead {
        id: NotificationId,
    },

    /// Mark every notification as read
    MarkAllRead,

    /// Print the unread count
    Unread,
}

fn write_record(out: &mut impl Write, record: &NotificationRecord, now: DateTime<Utc>) -> Result<()> {
    writeln!(
        out,
        "{} {} {} [{}] {} - {} ({})",
        if record.read { " " } else { "*" },
        record.id,
        record.kind.icon(),
        record.priority.label(),
        record.title,
        record.message,
        format_relative_time(record.created_at, now),
    )?;
    Ok(())
}

/// Run a one-shot subcommand against the store
pub(crate) fn run_command<S: KeyValueStore>(
    command: Commands,
    store: &mut NotificationStore<S>,
    out: &mut impl Write,
) -> Result<()> {
    let now = Utc::now();
    match command {
        Commands::List => {
            if store.is_empty() {
                writeln!(out, "No notifications")?;
            }
            for record in store.records() {
                write_record(out, record, now)?;
            }
        }
        Commands::Add {
            title,
            message,
            kind,
            priority,
        } => {
            let record = store.add_with(title, message, kind, priority)?;
            writeln!(out, "Added notification {}", record.id)?;
        }
        Commands::MarkRead { id } => {
            if !store.mark_read(id)? {
                bail!("No notification with id {}", id);
            }
            writeln!(out, "Marked {} as read", id)?;
        }
        Commands::MarkAllRead => {
            store.mark_all_read()?;
            writeln!(out, "Marked {} notifications as read", store.len())?;
        }
        Commands::Unread => {
            writeln!(out, "{}", store.unread_count())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_core::store::MemoryStore;

    fn run(command: Commands, store: &mut NotificationStore<MemoryStore>) -> Result<String> {
        let mut out = Vec::new();
        run_command(command, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "helio-tui", "add", "--title", "Lab", "--message", "Ready", "--kind", "result", "-p", "high",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { title, kind, priority, .. }) => {
                assert_eq!(title, "Lab");
                assert_eq!(kind, NotificationKind::Result);
                assert_eq!(priority, Priority::High);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["helio-tui", "add", "-t", "a", "-m", "b", "-k", "memo"]).is_err());
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["helio-tui", "--page", "https://example.org"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.page.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn test_commands_against_seeded_store() {
        let mut store = NotificationStore::open(MemoryStore::new());

        assert_eq!(run(Commands::Unread, &mut store).unwrap(), "2\n");

        let listing = run(Commands::List, &mut store).unwrap();
        assert_eq!(listing.lines().count(), 3);
        assert!(listing.contains("Appointment Confirmed"));

        run(Commands::MarkRead { id: 1 }, &mut store).unwrap();
        assert_eq!(run(Commands::Unread, &mut store).unwrap(), "1\n");

        assert!(run(Commands::MarkRead { id: 999 }, &mut store).is_err());

        run(Commands::MarkAllRead, &mut store).unwrap();
        assert_eq!(run(Commands::Unread, &mut store).unwrap(), "0\n");
    }

    #[test]
    fn test_add_prepends() {
        let mut store = NotificationStore::open(MemoryStore::new());
        let out = run(
            Commands::Add {
                title: "Lab".into(),
                message: "Ready".into(),
                kind: NotificationKind::Result,
                priority: Priority::Low,
            },
            &mut store,
        )
        .unwrap();
        assert!(out.starts_with("Added notification"));
        assert_eq!(store.records()[0].title, "Lab");
        assert_eq!(store.unread_count(), 3);
    }
}
