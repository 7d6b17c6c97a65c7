//! Command registry and line tokenizing
//!
//! The registry maps lowercase command names to handlers. It is filled once
//! when a session is built and only read afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handlers::CommandHandler;

/// Width of the usage column in help output
pub const USAGE_WIDTH: usize = 12;

/// A submitted line split into a command name and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Split a submitted line into command and arguments
///
/// The whole line is lowercased before splitting, so arguments arrive in
/// lowercase too. `cat` and `theme` lookups depend on this. There is no
/// quoting or escaping. Returns `None` for a blank line.
pub fn tokenize(line: &str) -> Option<ParsedCommand> {
    let lowered = line.trim().to_lowercase();
    let mut tokens = lowered.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some(ParsedCommand {
        name,
        args: tokens.collect(),
    })
}

struct RegistryEntry {
    name: String,
    handler: Arc<dyn CommandHandler>,
    /// Primary name this entry aliases
    alias_of: Option<String>,
}

/// One row of `help` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRow {
    pub usage: String,
    pub description: String,
    pub aliases: Vec<String>,
}

impl fmt::Display for HelpRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<width$}- {}",
            self.usage,
            self.description,
            width = USAGE_WIDTH
        )?;
        if !self.aliases.is_empty() {
            write!(f, " (also: {})", self.aliases.join(", "))?;
        }
        Ok(())
    }
}

/// Ordered, case-insensitive command table
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(name: &str) -> Result<String> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidCommandName {
                name: name.to_string(),
            });
        }
        Ok(name.to_lowercase())
    }

    fn insert(&mut self, entry: RegistryEntry) {
        match self.index.get(&entry.name) {
            Some(&position) => {
                debug!("Replacing command '{}'", entry.name);
                self.entries[position] = entry;
            }
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Register a handler; re-registering a name replaces it in place
    ///
    /// Aliases of a replaced primary follow the new handler.
    pub fn register(&mut self, name: &str, handler: Arc<dyn CommandHandler>) -> Result<()> {
        let name = Self::normalize(name)?;
        for entry in &mut self.entries {
            if entry.alias_of.as_deref() == Some(name.as_str()) {
                entry.handler = Arc::clone(&handler);
            }
        }
        self.insert(RegistryEntry {
            name,
            handler,
            alias_of: None,
        });
        Ok(())
    }

    /// Bind `alias` to the handler already registered as `target`
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let alias = Self::normalize(alias)?;
        let target = target.to_lowercase();
        let entry = self
            .index
            .get(&target)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| Error::CommandNotFound {
                command: target.clone(),
            })?;

        // Aliasing an alias points at the same primary
        let primary = entry.alias_of.clone().unwrap_or(target);
        let handler = Arc::clone(&entry.handler);
        self.insert(RegistryEntry {
            name: alias,
            handler,
            alias_of: Some(primary),
        });
        Ok(())
    }

    /// Exact, case-insensitive lookup
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => *self.index.get(&name.to_lowercase())?,
        };
        Some(Arc::clone(&self.entries[position].handler))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// All registered names, aliases included, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// One row per primary command, in insertion order
    pub fn help_rows(&self) -> Vec<HelpRow> {
        self.entries
            .iter()
            .filter(|entry| entry.alias_of.is_none())
            .map(|entry| HelpRow {
                usage: entry.handler.usage().to_string(),
                description: entry.handler.description().to_string(),
                aliases: self
                    .entries
                    .iter()
                    .filter(|other| other.alias_of.as_deref() == Some(entry.name.as_str()))
                    .map(|other| other.name.clone())
                    .collect(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
