use image::imageops::{self, FilterType};
use image::RgbImage;
use kmeans_colors::{get_kmeans, Kmeans};
use log::debug;
use palette::Srgb;
use thiserror::Error;

use crate::color::Color;

const DOWNSAMPLE: u32 = 10;
const RESTARTS: u64 = 10;
const MAX_ITER: usize = 20;
const CONVERGE: f32 = 0.0025;
const SEED: u64 = 42;

/// Error returned when a sampling operation cannot produce a pixel.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The byte payload could not be decoded as an image.
    #[error("unsupported or corrupt image: {0}")]
    InvalidImage(#[from] image::ImageError),
    /// The requested coordinates lie outside the image.
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Clustering could not produce a centroid.
    #[error("dominant color unavailable: {reason}")]
    Unavailable { reason: String },
}

/// A decoded image fixed to 8-bit RGB. Alpha is discarded at decode time.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    pixels: RgbImage,
}

impl PixelGrid {
    /// Decode raw bytes (PNG, JPEG, WebP, ...) into an RGB grid.
    pub fn decode(bytes: &[u8]) -> Result<Self, SampleError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self {
            pixels: img.to_rgb8(),
        })
    }

    /// Wrap an already-decoded RGB buffer.
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Read the pixel at `(x, y)`. Coordinates are zero-based from the top left.
pub fn sample_at(image: &PixelGrid, x: u32, y: u32) -> Result<Color, SampleError> {
    if x >= image.width() || y >= image.height() {
        return Err(SampleError::OutOfBounds {
            x,
            y,
            width: image.width(),
            height: image.height(),
        });
    }
    let p = image.pixels.get_pixel(x, y);
    Ok(Color::new(p[0], p[1], p[2]))
}

/// Read the center pixel, `(width / 2, height / 2)` by integer division.
///
/// `None` means no image could be produced for this sample; the documented
/// fallback for that case is opaque black, not an error.
pub fn sample_center(image: Option<&PixelGrid>) -> Color {
    match image {
        Some(image) if image.width() > 0 && image.height() > 0 => {
            let p = image.pixels.get_pixel(image.width() / 2, image.height() / 2);
            Color::new(p[0], p[1], p[2])
        }
        _ => Color::new(0, 0, 0),
    }
}

/// Reduce the image to its dominant color.
///
/// Downsamples both dimensions by 10 (floored at one pixel), clusters the
/// remaining pixels into `k` groups in sRGB space, and returns the first
/// centroid of the best of ten seeded k-means runs.
pub fn sample_dominant(image: &PixelGrid, k: usize) -> Result<Color, SampleError> {
    if k == 0 {
        return Err(SampleError::Unavailable {
            reason: "cluster count must be at least 1".to_owned(),
        });
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(SampleError::Unavailable {
            reason: "image has no pixels".to_owned(),
        });
    }

    let small = downsample(&image.pixels);
    let buffer: Vec<Srgb<f32>> = small
        .pixels()
        .map(|p| Srgb::new(p[0], p[1], p[2]).into_format())
        .collect();
    if buffer.len() < k {
        return Err(SampleError::Unavailable {
            reason: format!("{} pixels cannot form {} clusters", buffer.len(), k),
        });
    }
    debug!(
        "clustering {} downsampled pixels into {} groups",
        buffer.len(),
        k
    );

    let mut best = Kmeans::new();
    for run in 0..RESTARTS {
        let result = get_kmeans(k, MAX_ITER, CONVERGE, false, &buffer, SEED + run);
        if result.score < best.score {
            best = result;
        }
    }

    let centroid = best
        .centroids
        .first()
        .ok_or_else(|| SampleError::Unavailable {
            reason: format!("clustering produced no centroids for k = {k}"),
        })?;
    Ok(Color::from_srgb_f32_clamped(*centroid))
}

/// Shrink both dimensions by the downsampling factor, keeping at least
/// one pixel per axis so small images still cluster.
fn downsample(pixels: &RgbImage) -> RgbImage {
    let width = (pixels.width() / DOWNSAMPLE).max(1);
    let height = (pixels.height() / DOWNSAMPLE).max(1);
    imageops::resize(pixels, width, height, FilterType::Lanczos3)
}
