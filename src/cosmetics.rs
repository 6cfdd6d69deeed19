//! Snake cosmetics: solid colours and named patterned skins
//!
//! Serialized in the same shapes the save file has always used: a colour is a
//! `[r, g, b]` array and a named skin is its id string.

use serde::{Deserialize, Serialize};

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Scale every channel by `factor`, clamped to [0, 255]
    pub fn darken(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }

    /// Add `amount` to every channel, saturating at 255
    pub fn lighten(self, amount: u8) -> Self {
        Rgb(
            self.0.saturating_add(amount),
            self.1.saturating_add(amount),
            self.2.saturating_add(amount),
        )
    }
}

/// Default snake colour, always unlocked
pub const GREEN: Rgb = Rgb(0, 255, 0);

/// Colours that can be unlocked at apple milestones (index 0 is the default)
pub const PALETTE: [Rgb; 12] = [
    GREEN,
    Rgb(0, 0, 255),     // Blue
    Rgb(255, 255, 0),   // Yellow
    Rgb(255, 165, 0),   // Orange
    Rgb(128, 0, 128),   // Purple
    Rgb(0, 255, 255),   // Cyan
    Rgb(255, 192, 203), // Pink
    Rgb(165, 42, 42),   // Brown
    Rgb(255, 215, 0),   // Gold
    Rgb(0, 128, 128),   // Teal
    Rgb(255, 105, 180), // Hot Pink
    Rgb(64, 224, 208),  // Turquoise
];

/// Head darkening factor for solid colours
const HEAD_DARKEN: f32 = 0.7;

/// Named skins unlocked by games-played milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinId {
    YellowHollow,
    RedHollow,
    PurpleHollow,
}

impl SkinId {
    pub const ALL: [SkinId; 3] = [SkinId::YellowHollow, SkinId::RedHollow, SkinId::PurpleHollow];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinId::YellowHollow => "yellow_hollow",
            SkinId::RedHollow => "red_hollow",
            SkinId::PurpleHollow => "purple_hollow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        SkinId::ALL.into_iter().find(|skin| skin.as_str() == s)
    }

    /// Human-readable name for menus
    pub fn display_name(&self) -> &'static str {
        match self {
            SkinId::YellowHollow => "Yellow Hollow",
            SkinId::RedHollow => "Red Hollow",
            SkinId::PurpleHollow => "Purple Hollow",
        }
    }

    /// Colour of the hollow outline drawn for body segments
    pub fn outline_color(&self) -> Rgb {
        match self {
            SkinId::YellowHollow => Rgb(255, 255, 0),
            SkinId::RedHollow => Rgb(255, 0, 0),
            SkinId::PurpleHollow => Rgb(128, 0, 128),
        }
    }

    /// Base colour for the patterned head
    pub fn head_base(&self) -> Rgb {
        match self {
            SkinId::RedHollow => Rgb(255, 0, 0).darken(0.6),
            other => other.outline_color(),
        }
    }

    /// Skin awarded when the games-played counter reaches `milestone`
    pub fn for_games_played(milestone: u32) -> Option<Self> {
        match milestone {
            5 => Some(SkinId::YellowHollow),
            10 => Some(SkinId::RedHollow),
            15 => Some(SkinId::PurpleHollow),
            _ => None,
        }
    }
}

/// How body segments are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// Filled cell
    Filled(Rgb),
    /// Cell outline only
    Outline(Rgb),
}

/// A snake skin the player can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cosmetic {
    SolidColor(Rgb),
    NamedSkin(SkinId),
}

impl Default for Cosmetic {
    fn default() -> Self {
        Cosmetic::SolidColor(GREEN)
    }
}

impl Cosmetic {
    /// Fill colour of the head cell; the scale pattern is drawn lighter on top
    pub fn head_color(&self) -> Rgb {
        match self {
            Cosmetic::SolidColor(rgb) => rgb.darken(HEAD_DARKEN),
            Cosmetic::NamedSkin(skin) => skin.head_base().darken(HEAD_DARKEN),
        }
    }

    /// Colour of the scale pattern on the head
    pub fn head_pattern_color(&self) -> Rgb {
        self.head_color().lighten(40)
    }

    pub fn body_style(&self) -> BodyStyle {
        match self {
            Cosmetic::SolidColor(rgb) => BodyStyle::Filled(*rgb),
            Cosmetic::NamedSkin(skin) => BodyStyle::Outline(skin.outline_color()),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Cosmetic::SolidColor(Rgb(r, g, b)) => format!("RGB({}, {}, {})", r, g, b),
            Cosmetic::NamedSkin(skin) => skin.display_name().to_string(),
        }
    }
}

/// Menu label for a selection slot: `1`..`9`, then `A`..`Z`
pub fn selection_label(index: usize) -> Option<char> {
    match index {
        0..=8 => char::from_digit(index as u32 + 1, 10),
        9..=34 => Some((b'A' + (index - 9) as u8) as char),
        _ => None,
    }
}

/// Inverse of [`selection_label`] (letters are case-insensitive)
pub fn selection_index(key: char) -> Option<usize> {
    match key {
        '1'..='9' => Some(key as usize - '1' as usize),
        'a'..='z' => Some(key as usize - 'a' as usize + 9),
        'A'..='Z' => Some(key as usize - 'A' as usize + 9),
        _ => None,
    }
}
