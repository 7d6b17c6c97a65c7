//! Static persona sections (`whoami`, `about`, `skills`, ...)

use super::{CommandContext, CommandHandler, CommandOutput};
use crate::content::{self, Section};

/// Prints one persona section verbatim
pub struct SectionHandler {
    section: Section,
}

impl SectionHandler {
    pub fn new(section: Section) -> Self {
        Self { section }
    }
}

impl CommandHandler for SectionHandler {
    fn usage(&self) -> &str {
        &self.section.name
    }

    fn description(&self) -> &str {
        &self.section.description
    }

    fn execute(&self, _args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::from_entries(content::entries(&self.section.lines))
    }
}
