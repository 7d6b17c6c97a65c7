//! `theme [name]`

use super::{CommandContext, CommandHandler, CommandOutput};
use crate::models::OutputEntry;

pub struct ThemeHandler;

impl ThemeHandler {
    fn listing(names: &[String]) -> Vec<OutputEntry> {
        vec![
            OutputEntry::info("Available themes:"),
            OutputEntry::info(names.join(", ")),
            OutputEntry::blank(),
            OutputEntry::info("Usage:"),
            OutputEntry::info("theme [theme-name]"),
        ]
    }
}

impl CommandHandler for ThemeHandler {
    fn usage(&self) -> &str {
        "theme"
    }

    fn description(&self) -> &str {
        "Change terminal theme"
    }

    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let names = ctx.themes.palette_names();
        let Some(name) = args.first() else {
            return CommandOutput::from_entries(Self::listing(&names));
        };

        match ctx.themes.apply_palette(name) {
            Ok(()) => CommandOutput::from_entries(vec![OutputEntry::success(format!(
                "Theme changed to: {}",
                name
            ))]),
            Err(e) => {
                debug!("theme {}: {}", name, e);
                let mut entries = vec![OutputEntry::info(format!("Unknown theme: '{}'", name))];
                entries.extend(Self::listing(&names));
                CommandOutput::from_entries(entries)
            }
        }
    }
}
