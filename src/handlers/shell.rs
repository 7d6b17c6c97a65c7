//! Shell-flavoured built-ins: `echo`, `history`, `date`, `clear`, `help`

use super::{CommandContext, CommandHandler, CommandOutput, SessionAction};
use crate::content;
use crate::models::OutputEntry;

/// Format of the `date` output, e.g. `Tue Oct 20 2026 14:03:11 GMT+0200`
pub const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Acknowledgment left in the log after `clear`
pub const CLEAR_ACK: &str = "Terminal cleared. Type \"help\" for available commands.";

pub struct EchoHandler;

impl CommandHandler for EchoHandler {
    fn usage(&self) -> &str {
        "echo [text]"
    }

    fn description(&self) -> &str {
        "Display text"
    }

    fn execute(&self, args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::from_entries(vec![OutputEntry::plain(args.join(" "))])
    }
}

pub struct HistoryHandler;

impl CommandHandler for HistoryHandler {
    fn usage(&self) -> &str {
        "history"
    }

    fn description(&self) -> &str {
        "Show command history"
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let mut output = CommandOutput::new();
        output.push(OutputEntry::success("Command History:"));
        for (index, command) in ctx.history.iter().enumerate() {
            output.push(OutputEntry::plain(format!("  {}  {}", index + 1, command)));
        }
        output
    }
}

pub struct DateHandler;

impl CommandHandler for DateHandler {
    fn usage(&self) -> &str {
        "date"
    }

    fn description(&self) -> &str {
        "Show current date and time"
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::from_entries(vec![
            OutputEntry::success("Current Date & Time:"),
            OutputEntry::plain(ctx.now.format(DATE_FORMAT).to_string()),
        ])
    }
}

pub struct ClearHandler;

impl CommandHandler for ClearHandler {
    fn usage(&self) -> &str {
        "clear"
    }

    fn description(&self) -> &str {
        "Clear the terminal"
    }

    fn execute(&self, _args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::from_entries(vec![OutputEntry::plain(CLEAR_ACK)])
            .with_action(SessionAction::ClearLog)
    }
}

pub struct HelpHandler;

impl CommandHandler for HelpHandler {
    fn usage(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Show this help message"
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let mut output = CommandOutput::new();
        output.push(OutputEntry::success("Available Commands:"));
        output.push(OutputEntry::blank());
        for row in ctx.registry.help_rows() {
            output.push(OutputEntry::plain(row.to_string()));
        }
        output.push(OutputEntry::blank());
        output.entries.extend(content::entries(&ctx.content.help_tips));
        output
    }
}
