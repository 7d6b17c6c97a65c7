//! `notes` (also `docs`, `knowledge`)
//!
//! Prints the knowledge-base blurb right away, then schedules a warning and,
//! after a further delay, the redirect to the notes site.

use std::time::Duration;

use super::{CommandContext, CommandHandler, CommandOutput, SessionAction};
use crate::content;
use crate::scheduler::{DeferredAction, DeferredTask};

pub struct NotesHandler {
    description: String,
    warn_delay: Duration,
    open_delay: Duration,
}

impl NotesHandler {
    pub fn new(description: String, warn_delay: Duration, open_delay: Duration) -> Self {
        Self {
            description,
            warn_delay,
            open_delay,
        }
    }
}

impl CommandHandler for NotesHandler {
    fn usage(&self) -> &str {
        "notes"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let notes = &ctx.content.notes;
        let redirect = DeferredTask::after(
            self.warn_delay,
            DeferredAction::Append(content::entries(&notes.warning)),
        )
        .then(DeferredTask::after(
            self.open_delay,
            DeferredAction::OpenResource {
                url: notes.url.clone(),
                confirmation: content::entries(&notes.confirmation),
            },
        ));

        CommandOutput::from_entries(content::entries(&notes.lines))
            .with_action(SessionAction::Schedule(redirect))
    }
}
