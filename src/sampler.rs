use image::Rgb;

use crate::source::PixelBuffer;

/// Pixels with less opacity than this are skipped
pub const MIN_ALPHA: u8 = 125;
/// Pixels with every channel above this are considered background white
pub const MAX_COLOR: u8 = 250;

/// Collect the interesting pixels of `buffer`, visiting every `stride`-th pixel
///
/// The stride counts pixels, not bytes: a stride of 1 visits every pixel, a
/// stride of `n` visits `ceil(pixel_count / n)` of them. Mostly transparent
/// and near-white pixels are dropped. Duplicates are kept so that frequent
/// colors weigh more during quantization. Samples come out in scan order.
pub fn sample(buffer: &PixelBuffer, stride: usize) -> Vec<Rgb<u8>> {
    let stride = stride.max(1);
    let samples: Vec<Rgb<u8>> = buffer
        .as_raw()
        .chunks_exact(4)
        .step_by(stride)
        .filter_map(|px| {
            let (r, g, b, a) = (px[0], px[1], px[2], Some(px[3]));
            if is_boring_pixel(r, g, b, a) {
                None
            } else {
                Some(Rgb([r, g, b]))
            }
        })
        .collect();

    tracing::debug!(
        pixels = buffer.pixel_count(),
        stride,
        samples = samples.len(),
        "Sampled pixel buffer"
    );
    samples
}

/// Whether a pixel is left out of the sample set
///
/// A missing alpha channel counts as opaque.
pub fn is_boring_pixel(r: u8, g: u8, b: u8, a: Option<u8>) -> bool {
    // If pixel is mostly opaque and not white
    let opaque = a.map_or(true, |a| a >= MIN_ALPHA);
    let interesting = opaque && !(r > MAX_COLOR && g > MAX_COLOR && b > MAX_COLOR);

    !interesting
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32, pixel: [u8; 4]) -> PixelBuffer {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_white_opaque_filtered() {
        assert!(sample(&buffer(4, 4, [255, 255, 255, 255]), 1).is_empty());
    }

    #[test]
    fn test_translucent_filtered() {
        assert!(sample(&buffer(4, 4, [255, 255, 255, 100]), 1).is_empty());
        assert!(sample(&buffer(4, 4, [10, 20, 30, 124]), 1).is_empty());
    }

    #[test]
    fn test_alpha_threshold_inclusive() {
        let samples = sample(&buffer(2, 1, [10, 20, 30, 125]), 1);
        assert_eq!(samples, vec![Rgb([10, 20, 30]); 2]);
    }

    #[test]
    fn test_near_white_needs_all_channels() {
        assert!(is_boring_pixel(251, 251, 251, Some(255)));
        assert!(!is_boring_pixel(250, 255, 255, Some(255)));
        assert!(!is_boring_pixel(255, 255, 0, Some(255)));
    }

    #[test]
    fn test_missing_alpha_is_opaque() {
        assert!(!is_boring_pixel(1, 2, 3, None));
        assert!(is_boring_pixel(255, 255, 255, None));
    }

    #[test]
    fn test_stride_sample_counts() {
        let image = buffer(7, 3, [5, 5, 5, 255]);
        assert_eq!(sample(&image, 1).len(), 21);
        assert_eq!(sample(&image, 2).len(), 11);
        assert_eq!(sample(&image, 10).len(), 3);
        assert_eq!(sample(&image, 21).len(), 1);
        assert_eq!(sample(&image, 1000).len(), 1);
    }

    #[test]
    fn test_zero_stride_treated_as_one() {
        assert_eq!(sample(&buffer(3, 1, [5, 5, 5, 255]), 0).len(), 3);
    }

    #[test]
    fn test_scan_order_preserved() {
        let data = vec![
            1, 0, 0, 255, //
            2, 0, 0, 255, //
            255, 255, 255, 255, //
            3, 0, 0, 255,
        ];
        let image = PixelBuffer::from_raw(2, 2, data).unwrap();
        assert_eq!(
            sample(&image, 1),
            vec![Rgb([1, 0, 0]), Rgb([2, 0, 0]), Rgb([3, 0, 0])]
        );
        assert_eq!(sample(&image, 2), vec![Rgb([1, 0, 0])]);
    }
}
