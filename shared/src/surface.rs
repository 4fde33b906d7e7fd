use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
}

/// Fixed-size RGB bitmap that strokes are rasterized into.
///
/// Pixels are stored row-major, three bytes per pixel. The surface never
/// changes size after creation.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        };
        surface.clear(background);
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Rgb) {
        for pixel in self.pixels.chunks_exact_mut(3) {
            pixel.copy_from_slice(&color.0);
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let index = self.index(x, y)?;
        Some(Rgb([
            self.pixels[index],
            self.pixels[index + 1],
            self.pixels[index + 2],
        ]))
    }

    /// Fills the axis-aligned rectangle with top-left `(x, y)`, truncating
    /// whatever part of it lies outside the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize * 3;
        for row in y0 as usize..y1 as usize {
            let start = row * stride + x0 as usize * 3;
            let end = row * stride + x1 as usize * 3;
            for pixel in self.pixels[start..end].chunks_exact_mut(3) {
                pixel.copy_from_slice(&color.0);
            }
        }
    }

    pub fn as_rgb(&self) -> &[u8] {
        &self.pixels
    }

    /// Opaque RGBA copy of the pixels, the layout canvas `ImageData` expects.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for pixel in self.pixels.chunks_exact(3) {
            out.extend_from_slice(pixel);
            out.push(255);
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 3)
    }
}
