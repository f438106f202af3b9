//! CPU render surfaces for the bake pipeline.
//!
//! [`RenderSurface`] is the offscreen target a face pass renders into:
//! float RGBA pixels plus a depth buffer. [`Rgba8Canvas`] is the 2D drawing
//! surface side: the flipped, color-corrected readback and the atlas canvas
//! it is composited onto.

/// Offscreen float render target with a depth buffer
pub struct RenderSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order, each pixel is [r, g, b, a] as f32
    pixels: Vec<[f32; 4]>,
    /// Per-pixel view depth, cleared to infinity
    depth: Vec<f32>,
}

impl RenderSurface {
    /// Create a new surface, cleared to transparent black and far depth
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
            depth: vec![f32::INFINITY; pixel_count],
        }
    }

    /// Reset every pixel to transparent black and every depth to infinity
    pub fn clear(&mut self) {
        self.pixels.fill([0.0, 0.0, 0.0, 0.0]);
        self.depth.fill(f32::INFINITY);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel, ignoring out-of-bounds coordinates
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blend a color onto an existing pixel using alpha compositing
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels[i];

        let src_alpha = color[3] * opacity;
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[i] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Stored depth at the given coordinates, infinity when out of bounds
    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.index(x, y)
            .map(|i| self.depth[i])
            .unwrap_or(f32::INFINITY)
    }

    /// Overwrite the stored depth, ignoring out-of-bounds coordinates
    #[inline]
    pub fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = depth;
        }
    }

    /// Read back the float pixels as an 8-bit canvas.
    ///
    /// Channels clamp to [0, 1] and round to bytes; row order is preserved
    /// (the render target's bottom-up rows stay bottom-up until the caller
    /// flips).
    pub fn readback(&self) -> Rgba8Canvas {
        let pixels = self
            .pixels
            .iter()
            .map(|p| p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect();
        Rgba8Canvas {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// 8-bit RGBA canvas for readbacks and the atlas composite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgba8Canvas {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Rgba8Canvas {
    /// Create a canvas cleared to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Swap rows top-for-bottom in place (bottom-up readback to top-down)
    pub fn flip_vertical(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for row in 0..h / 2 {
            let (top, bottom) = self.pixels.split_at_mut((h - 1 - row) * w);
            top[row * w..row * w + w].swap_with_slice(&mut bottom[..w]);
        }
    }

    /// Scale-blit an entire source canvas into a destination rectangle.
    ///
    /// Nearest-neighbor sampling; destination pixels are overwritten, not
    /// blended (atlas cells never overlap).
    pub fn blit_scaled(
        &mut self,
        src: &Rgba8Canvas,
        dest_x: u32,
        dest_y: u32,
        dest_w: u32,
        dest_h: u32,
    ) {
        if dest_w == 0 || dest_h == 0 || src.width == 0 || src.height == 0 {
            return;
        }
        let x_scale = src.width as f32 / dest_w as f32;
        let y_scale = src.height as f32 / dest_h as f32;
        for dy in 0..dest_h {
            let sy = (((dy as f32 + 0.5) * y_scale) as u32).min(src.height - 1);
            for dx in 0..dest_w {
                let sx = (((dx as f32 + 0.5) * x_scale) as u32).min(src.width - 1);
                if let Some(color) = src.get_pixel(sx, sy) {
                    self.set_pixel(dest_x + dx, dest_y + dy, color);
                }
            }
        }
    }

    /// Raw bytes for encoding, row-major RGBA
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Mutable access to pixel data
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }
}
