//! Theme and Palette Configuration
//!
//! Named color palettes and the surface the `theme` command switches them
//! through. The active palette is the only global visual state; it lives
//! inside the [`ThemeSurface`] implementation and nowhere else.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").expect("hex color pattern"));

/// Alpha of the glow variant
pub const GLOW_ALPHA: f32 = 0.1;
/// Alpha of the border variant
pub const BORDER_ALPHA: f32 = 0.3;
/// Alpha of the dim variant
pub const DIM_ALPHA: f32 = 0.05;
/// Alpha of the bright variant
pub const BRIGHT_ALPHA: f32 = 0.2;

/// Name of the palette active at startup
pub const DEFAULT_PALETTE: &str = "default";

/// An RGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb`
    pub fn parse_hex(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            value: value.to_string(),
        };
        let caps = HEX_COLOR.captures(value.trim()).ok_or_else(invalid)?;
        let channel = |i: usize| u8::from_str_radix(&caps[i], 16).map_err(|_| invalid());
        Ok(Self::from_rgb(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Same color at a different opacity
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// `#rrggbb`, ignoring alpha
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS-style `rgba(r, g, b, a)`
    pub fn rgba(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "{}", self.hex())
        } else {
            write!(f, "{}", self.rgba())
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

/// A palette as written in config: a name and a primary color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSpec {
    pub name: String,
    pub primary: Color,
}

/// A named palette: one primary color and its translucent variants
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: String,
    pub primary: Color,
    pub glow: Color,
    pub border: Color,
    pub dim: Color,
    pub bright: Color,
}

impl Palette {
    /// Derive the variants from a primary color
    pub fn from_primary(name: impl Into<String>, primary: Color) -> Self {
        let primary = primary.with_alpha(1.0);
        Self {
            name: name.into(),
            primary,
            glow: primary.with_alpha(GLOW_ALPHA),
            border: primary.with_alpha(BORDER_ALPHA),
            dim: primary.with_alpha(DIM_ALPHA),
            bright: primary.with_alpha(BRIGHT_ALPHA),
        }
    }
}

impl From<&PaletteSpec> for Palette {
    fn from(spec: &PaletteSpec) -> Self {
        Self::from_primary(spec.name.to_lowercase(), spec.primary)
    }
}

/// What the `theme` command needs from the display
pub trait ThemeSurface {
    /// Switch to a named palette; unknown names leave the active one alone
    fn apply_palette(&mut self, name: &str) -> Result<()>;

    /// Names accepted by [`ThemeSurface::apply_palette`], in display order
    fn palette_names(&self) -> Vec<String>;

    fn active_palette(&self) -> Option<&Palette>;
}

/// Built-in palette set plus any custom palettes from config
#[derive(Debug, Clone)]
pub struct ThemeManager {
    palettes: Vec<Palette>,
    active: usize,
}

impl ThemeManager {
    /// Create a manager with the built-in palettes, `default` active
    pub fn new() -> Self {
        let palettes = [
            ("matrix", (0x00, 0xff, 0x00)),
            ("cyberpunk", (0xff, 0x00, 0xff)),
            ("ocean", (0x00, 0xff, 0xff)),
            ("fire", (0xff, 0x45, 0x00)),
            ("amber", (0xff, 0xb0, 0x00)),
            (DEFAULT_PALETTE, (0x00, 0xff, 0x00)),
        ]
        .into_iter()
        .map(|(name, (r, g, b))| Palette::from_primary(name, Color::from_rgb(r, g, b)))
        .collect::<Vec<_>>();

        let active = palettes.len() - 1;
        Self { palettes, active }
    }

    /// Add a palette, replacing a built-in or earlier one of the same name
    pub fn add_palette(&mut self, palette: Palette) {
        match self.index_of(&palette.name) {
            Some(index) => {
                debug!("Overriding palette '{}'", palette.name);
                self.palettes[index] = palette;
            }
            None => {
                debug!("Adding palette '{}'", palette.name);
                self.palettes.push(palette);
            }
        }
    }

    /// Add every palette from config
    pub fn with_custom(mut self, specs: &[PaletteSpec]) -> Self {
        for spec in specs {
            self.add_palette(Palette::from(spec));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.index_of(name).map(|index| &self.palettes[index])
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.palettes.iter().position(|palette| palette.name == name)
    }

    /// The active palette; always present for a manager
    pub fn active(&self) -> &Palette {
        &self.palettes[self.active]
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeSurface for ThemeManager {
    fn apply_palette(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name).ok_or_else(|| Error::PaletteNotFound {
            name: name.to_string(),
        })?;
        self.active = index;
        info!("Palette switched to '{}'", name);
        Ok(())
    }

    fn palette_names(&self) -> Vec<String> {
        self.palettes.iter().map(|palette| palette.name.clone()).collect()
    }

    fn active_palette(&self) -> Option<&Palette> {
        Some(self.active())
    }
}
