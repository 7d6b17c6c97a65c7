//! The fake file system: `ls`, `cat`, and `resume`

use super::{CommandContext, CommandHandler, CommandOutput};
use crate::content::{self, ContentStore};
use crate::models::OutputEntry;

/// Permission column shown by `ls`
const FILE_MODE: &str = "-rw-r--r--";

fn resume_output(content: &ContentStore) -> CommandOutput {
    let mut output = CommandOutput::new();
    output.push(OutputEntry::success(format!(
        "Contents of {}:",
        content.resume_file
    )));
    output.entries.extend(content::entries(&content.resume));
    output
}

/// `ls`: the listing plus pointers to `notes` and `cat`
pub struct LsHandler;

impl CommandHandler for LsHandler {
    fn usage(&self) -> &str {
        "ls"
    }

    fn description(&self) -> &str {
        "List directory contents"
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let mut entries: Vec<OutputEntry> = ctx
            .content
            .listing
            .iter()
            .map(|name| OutputEntry::plain(format!("{}  {}", FILE_MODE, name)))
            .collect();
        entries.extend(content::entries(&ctx.content.ls_hints));
        CommandOutput::from_entries(entries)
    }
}

/// `cat [file]`
pub struct CatHandler;

impl CommandHandler for CatHandler {
    fn usage(&self) -> &str {
        "cat [file]"
    }

    fn description(&self) -> &str {
        "Display file contents"
    }

    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let Some(name) = args.first() else {
            return CommandOutput::from_entries(vec![OutputEntry::info("Usage: cat [filename]")]);
        };

        if ctx.content.is_resume(name) {
            return resume_output(ctx.content);
        }

        match ctx.content.file(name) {
            Some(body) => CommandOutput::from_entries(vec![
                OutputEntry::success(format!("Contents of {}:", name)),
                OutputEntry::plain(body),
            ]),
            None => CommandOutput::from_entries(vec![OutputEntry::error(format!(
                "cat: {}: No such file or directory",
                name
            ))]),
        }
    }
}

/// `resume`: shortcut for `cat resume.pdf`
pub struct ResumeHandler;

impl CommandHandler for ResumeHandler {
    fn usage(&self) -> &str {
        "resume"
    }

    fn description(&self) -> &str {
        "View my resume"
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        resume_output(ctx.content)
    }
}
