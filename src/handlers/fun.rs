//! `art` and `matrix`

use rand::seq::SliceRandom;

use super::{CommandContext, CommandHandler, CommandOutput, SessionAction};
use crate::animation::MatrixRain;
use crate::models::OutputEntry;

/// One random ASCII-art piece
pub struct ArtHandler;

impl CommandHandler for ArtHandler {
    fn usage(&self) -> &str {
        "art"
    }

    fn description(&self) -> &str {
        "Display ASCII art"
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        match ctx.content.art.choose(&mut *ctx.rng) {
            Some(piece) => {
                debug!("art: {}", piece.title);
                CommandOutput::from_entries(vec![OutputEntry::plain(piece.body.clone())])
            }
            None => CommandOutput::from_entries(vec![OutputEntry::info("The gallery is empty.")]),
        }
    }
}

pub struct MatrixHandler;

impl CommandHandler for MatrixHandler {
    fn usage(&self) -> &str {
        "matrix"
    }

    fn description(&self) -> &str {
        "Enter the matrix..."
    }

    fn execute(&self, _args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
        let rain = MatrixRain::generate(&mut *ctx.rng);
        CommandOutput::from_entries(vec![
            OutputEntry::success("Entering the Matrix..."),
            OutputEntry::blank(),
            OutputEntry::error("Wake up, Neo..."),
        ])
        .with_action(SessionAction::PlayAnimation(rain))
    }
}
