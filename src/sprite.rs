//! Sprite decoding and half-block downsampling for the detail modal

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SpriteError;

/// Alpha below this counts as transparent when cropping and sampling.
const ALPHA_CUTOFF: u8 = 16;

/// Decoded RGBA pixels, cropped to the visible bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// One terminal cell: upper and lower pixel, `None` when transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfBlock {
    pub top: Option<[u8; 3]>,
    pub bottom: Option<[u8; 3]>,
}

impl SpriteData {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = self.rgba.get(offset..offset + 4)?;
        if px[3] < ALPHA_CUTOFF {
            return None;
        }
        Some([px[0], px[1], px[2]])
    }

    /// Pixel grid size that fits `cols` x `rows` cells, two pixels per cell.
    /// Never upscales.
    pub fn fit(&self, cols: u16, rows: u16) -> (u32, u32) {
        if self.width == 0 || self.height == 0 || cols == 0 || rows == 0 {
            return (0, 0);
        }
        let max_w = f64::from(cols);
        let max_h = f64::from(rows) * 2.0;
        let scale = (max_w / f64::from(self.width))
            .min(max_h / f64::from(self.height))
            .min(1.0);
        let w = ((f64::from(self.width) * scale).floor() as u32).max(1);
        let h = ((f64::from(self.height) * scale).floor() as u32).max(1);
        (w, h)
    }

    /// Nearest-neighbour downsample into rows of half-block cells.
    pub fn half_blocks(&self, cols: u16, rows: u16) -> Vec<Vec<HalfBlock>> {
        let (w, h) = self.fit(cols, rows);
        if w == 0 || h == 0 {
            return Vec::new();
        }
        let sample = |x: u32, y: u32| -> Option<[u8; 3]> {
            if y >= h {
                return None;
            }
            let src_x = x * self.width / w;
            let src_y = y * self.height / h;
            self.pixel(src_x, src_y)
        };

        (0..h.div_ceil(2))
            .map(|row| {
                (0..w)
                    .map(|x| HalfBlock {
                        top: sample(x, row * 2),
                        bottom: sample(x, row * 2 + 1),
                    })
                    .collect()
            })
            .collect()
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, SpriteError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, px) in image.enumerate_pixels() {
        if px[3] >= ALPHA_CUTOFF {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return Err(SpriteError::Empty);
    }

    let cropped = image::imageops::crop_imm(
        &image,
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    )
    .to_image();
    let (width, height) = cropped.dimensions();
    Ok(SpriteData {
        width,
        height,
        rgba: cropped.into_raw(),
    })
}
