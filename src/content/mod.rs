//! Persona content
//!
//! Everything the visitor reads (section texts, the fake files, the resume,
//! ASCII art, the notes blurb) is data. A persona is a TOML document; the
//! default one is compiled into the binary and a config may point at
//! another file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{OutputEntry, StyleClass};

/// The persona compiled into the binary
const BUILTIN_PERSONA: &str = include_str!("../../assets/persona.toml");

/// Problems loading or validating persona content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read persona file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse persona: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("section name '{0}' must be a single lowercase word")]
    InvalidSectionName(String),

    #[error("section '{0}' is defined more than once")]
    DuplicateSection(String),

    #[error("file name '{0}' can never be typed: names are matched in lowercase")]
    UnreachableFile(String),

    #[error("persona defines no {0}")]
    Missing(&'static str),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLine {
    Text(String),
    Styled {
        text: String,
        #[serde(default)]
        style: StyleClass,
    },
}

/// One line of persona text and how to style it
///
/// In TOML either a bare string (plain) or `{ text = "...", style = "info" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLine")]
pub struct ContentLine {
    pub text: String,
    pub style: StyleClass,
}

impl From<RawLine> for ContentLine {
    fn from(raw: RawLine) -> Self {
        match raw {
            RawLine::Text(text) => Self {
                text,
                style: StyleClass::Plain,
            },
            RawLine::Styled { text, style } => Self { text, style },
        }
    }
}

impl ContentLine {
    pub fn to_entry(&self) -> OutputEntry {
        OutputEntry::new(self.text.clone(), self.style)
    }
}

/// Render a run of content lines as log entries
pub fn entries(lines: &[ContentLine]) -> Vec<OutputEntry> {
    lines.iter().map(ContentLine::to_entry).collect()
}

/// A command whose whole output is static text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub lines: Vec<ContentLine>,
}

/// The notes command: a blurb, a countdown warning, and a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesContent {
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub lines: Vec<ContentLine>,
    #[serde(default)]
    pub warning: Vec<ContentLine>,
    #[serde(default)]
    pub confirmation: Vec<ContentLine>,
}

/// One ASCII-art piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtPiece {
    pub title: String,
    pub body: String,
}

fn default_resume_file() -> String {
    "resume.pdf".to_string()
}

/// All persona content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStore {
    /// Name under which `cat` and `ls` expose the resume
    #[serde(default = "default_resume_file")]
    pub resume_file: String,

    /// Rows shown by `ls`, in order
    #[serde(default)]
    pub listing: Vec<String>,

    /// Lines printed after the `ls` rows
    #[serde(default)]
    pub ls_hints: Vec<ContentLine>,

    /// Lines closing the `help` output
    #[serde(default)]
    pub help_tips: Vec<ContentLine>,

    /// Greeting printed when an interactive session starts
    #[serde(default)]
    pub welcome: Vec<ContentLine>,

    /// Static sections, registered as commands in this order
    #[serde(default)]
    pub sections: Vec<Section>,

    pub notes: NotesContent,

    /// Files readable with `cat`
    #[serde(default)]
    pub files: BTreeMap<String, String>,

    #[serde(default)]
    pub resume: Vec<ContentLine>,

    #[serde(default)]
    pub art: Vec<ArtPiece>,
}

impl ContentStore {
    /// The persona shipped with the binary
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml_str(BUILTIN_PERSONA)
    }

    /// Parse and validate a persona document
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let store: Self = toml::from_str(source)?;
        store.validate()?;
        Ok(store)
    }

    /// Load a persona file from disk
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let source = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_toml_str(&source)?;
        info!(
            "Loaded persona from {} ({} sections)",
            path.display(),
            store.sections.len()
        );
        Ok(store)
    }

    /// Check the invariants the dispatcher relies on
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            let name = section.name.as_str();
            let valid = !name.is_empty()
                && !name.chars().any(char::is_whitespace)
                && name.to_lowercase() == name;
            if !valid {
                return Err(ContentError::InvalidSectionName(section.name.clone()));
            }
            if seen.contains(&name) {
                return Err(ContentError::DuplicateSection(section.name.clone()));
            }
            seen.push(name);
        }

        // Arguments are lowercased before lookup
        let reachable = |name: &str| name.to_lowercase() == name && !name.contains(char::is_whitespace);
        if let Some(name) = self.files.keys().find(|name| !reachable(name)) {
            return Err(ContentError::UnreachableFile(name.clone()));
        }
        if !reachable(&self.resume_file) {
            return Err(ContentError::UnreachableFile(self.resume_file.clone()));
        }

        if self.notes.url.trim().is_empty() {
            return Err(ContentError::Missing("notes url"));
        }
        if self.art.is_empty() {
            return Err(ContentError::Missing("art pieces"));
        }

        Ok(())
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Body of a `cat`-able file
    pub fn file(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Whether `name` refers to the resume document
    pub fn is_resume(&self, name: &str) -> bool {
        self.resume_file == name
    }
}
