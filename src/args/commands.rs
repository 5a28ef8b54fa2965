//! Subcommand handlers for the recent-files binary.

use std::io::Write;

use recentfiles::RecentFiles;
use recentfiles::menu::{ExistingFileHandler, IconMap, MenuItem, MenuPresenter, Selection};
use recentfiles::recent::Touch;

use crate::args::Command;
use crate::args::utils::prompt_user_no_default;

/// Error type for command handlers.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Execute one subcommand against an opened store.
///
/// Inputs:
/// - `command`: Parsed subcommand.
/// - `store`: Opened recent-files store.
/// - `icons`: Icon rules for menu rendering.
/// - `out`: Destination for user-facing output.
///
/// Output:
/// - `Ok(())` on success; persistence, serialization and output errors are propagated.
///
/// Details:
/// - `open` uses [`ExistingFileHandler`]: picking a file that no longer exists drops it.
pub fn run(
    command: &Command,
    store: &mut RecentFiles,
    icons: IconMap,
    out: &mut impl Write,
) -> Result<()> {
    let mut presenter = MenuPresenter::new(icons, ExistingFileHandler);
    match command {
        Command::Add { path, attributes } => {
            let attributes = (!attributes.is_empty()).then(|| attributes.clone());
            match store.touch(path, attributes)? {
                Some(Touch::Evicted(old)) => {
                    writeln!(out, "Added {} (forgot {})", path.display(), old.path)?;
                }
                Some(_) => writeln!(out, "Added {}", path.display())?,
                None => writeln!(out, "Nothing to add: empty path")?,
            }
        }
        Command::List { json } => {
            let items = presenter.items(&store.snapshot());
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
            } else if items.is_empty() {
                writeln!(out, "No recent files")?;
            } else {
                for (i, item) in items.iter().enumerate() {
                    writeln!(out, "{}", format_item(i, item))?;
                }
            }
        }
        Command::Remove { path } => match store.remove(path)? {
            Some(entry) => writeln!(out, "Removed {}", entry.path)?,
            None => writeln!(out, "Not in the list: {}", path.display())?,
        },
        Command::Open { index } => {
            let selection = presenter.select(&store.snapshot(), *index);
            store.apply(&selection)?;
            match selection {
                Selection::Accepted { path } => writeln!(out, "{path}")?,
                Selection::Rejected { path } => {
                    writeln!(out, "Cannot open {path}; removed from the list")?;
                }
                Selection::OutOfRange { index } => {
                    writeln!(out, "No entry at position {index} ({} stored)", store.len())?;
                }
            }
        }
        Command::Clear { yes } => {
            if *yes || prompt_user_no_default("Forget all recent files?") {
                store.clear()?;
                writeln!(out, "Cleared")?;
            }
        }
        Command::Migrate { to } => {
            store.migrate(*to)?;
            writeln!(
                out,
                "Rewrote {} with the {to} key scheme",
                store.storage_path().display()
            )?;
        }
    }
    Ok(())
}

/// What: Render one menu item as a plain-text line.
///
/// Output:
/// - `"<index>. [icon] label  path  (attr, attr)"`; icon and attributes only when present.
fn format_item(index: usize, item: &MenuItem) -> String {
    let mut line = format!("{index}. ");
    if let Some(icon) = &item.icon {
        line.push_str(&format!("[{icon}] "));
    }
    line.push_str(&item.label);
    line.push_str("  ");
    line.push_str(&item.path);
    if let Some(attrs) = item.attributes.as_ref().filter(|a| !a.is_empty()) {
        line.push_str(&format!("  ({})", attrs.join(", ")));
    }
    line
}
