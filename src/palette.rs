use std::fmt;

use hsl::HSL;
use itertools::Itertools;

use crate::Color;

/// Palette of colors, most dominant first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Palette of Colors
    pub palette: Vec<Color>,
}

impl Palette {
    /// Wrap colors that are already ordered by population
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette }
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.palette.len()
    }

    /// Whether no color was found
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// Iterate over the colors, most dominant first
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.palette.iter()
    }

    /// The most dominant color, if any
    pub fn dominant(&self) -> Option<Color> {
        self.palette.first().copied()
    }

    /// The colors as plain `[r, g, b]` triples
    pub fn rgb(&self) -> Vec<[u8; 3]> {
        self.palette.iter().map(|c| c.color.0).collect()
    }
}

impl IntoIterator for Palette {
    type Item = Color;
    type IntoIter = std::vec::IntoIter<Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.palette.into_iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.palette.iter()
    }
}

impl Color {
    /// `#RRGGBB` notation
    pub fn hex(&self) -> String {
        let [r, g, b] = self.color.0;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Hue, saturation and lightness of the color
    pub fn hsl(&self) -> HSL {
        HSL::from_rgb(&self.color.0)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color_list = self.palette.iter().map(Color::hex).join(", ");

        write!(f, "Color Palette {{ {} }}", color_list)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())?;

        write!(f, ", {} pixels", self.population)
    }
}
