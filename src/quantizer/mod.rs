use image::Rgb;

use crate::palette::Palette;

mod median_cut;

pub use median_cut::{MedianCut, SplitPriority};

/// Color with population
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Color {
    /// Color
    pub color: Rgb<u8>,
    /// Number of samples this color stands for
    pub population: usize,
}

/// Quantizer trait
pub trait Quantizer {
    /// Clusters `samples` into at most `max_colors` representative colors
    ///
    /// The result is ordered by descending population. An empty sample set
    /// gives an empty palette.
    fn quantize(&self, samples: &[Rgb<u8>], max_colors: usize) -> Palette;
}

/// Quantize with the default [`MedianCut`] settings
pub fn quantize(samples: &[Rgb<u8>], max_colors: usize) -> Palette {
    MedianCut::default().quantize(samples, max_colors)
}
