//! Shared image fixtures for the integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file.

#![allow(dead_code)]

use std::io::Cursor;

use color_thief::PixelBuffer;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const DARK: [u8; 4] = [10, 10, 10, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// 2x2 image with one red, green, blue and near-black pixel
pub fn four_color_image() -> RgbaImage {
    let data = [RED, GREEN, BLUE, DARK].concat();
    RgbaImage::from_raw(2, 2, data).unwrap()
}

/// Image filled with a single pixel value
pub fn solid_image(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(pixel))
}

/// Horizontal bands: `rows` rows per color, top to bottom
pub fn banded_image(width: u32, bands: &[([u8; 4], u32)]) -> RgbaImage {
    let height = bands.iter().map(|(_, rows)| rows).sum();
    let mut image = RgbaImage::new(width, height);
    let mut y = 0;
    for &(pixel, rows) in bands {
        for row in y..y + rows {
            for x in 0..width {
                image.put_pixel(x, row, Rgba(pixel));
            }
        }
        y += rows;
    }
    image
}

pub fn buffer(image: RgbaImage) -> PixelBuffer {
    PixelBuffer::try_from(DynamicImage::ImageRgba8(image)).unwrap()
}

/// Encode as PNG
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
