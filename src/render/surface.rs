// The drawing target for the plaid. `Canvas` is a plain RGB raster the TUI
// downsamples onto terminal cells; anything else that can stroke lines and
// fill rectangles with alpha can stand in for it.

use crate::pipeline::line_style::Rgb;

pub type Point = (f32, f32);

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_antialias(&mut self, on: bool);
    fn fill(&mut self, color: Rgb);
    // Square-capped stroke centred on the segment.
    fn draw_line(&mut self, start: Point, end: Point, thickness: f32, color: Rgb, alpha: f32);
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb, alpha: f32);
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    antialias: bool,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            antialias: false,
            pixels: vec![Rgb::default(); width as usize * height as usize],
        }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    // source-over: dst = src * a + dst * (1 - a)
    fn blend(&mut self, x: u32, y: u32, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let idx = self.index(x, y);
        let dst = self.pixels[idx];
        let a = alpha.min(1.0);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        self.pixels[idx] = Rgb::new(mix(color.r, dst.r), mix(color.g, dst.g), mix(color.b, dst.b));
    }

    // Clamp a float span of pixel indices to the raster.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let lo = lo.floor().max(0.0) as u32;
        let hi = (hi.ceil().max(0.0) as u32).min(limit);
        lo.min(hi)..hi
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_antialias(&mut self, on: bool) {
        self.antialias = on;
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn draw_line(&mut self, start: Point, end: Point, thickness: f32, color: Rgb, alpha: f32) {
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 || thickness <= 0.0 {
            return;
        }
        let (ux, uy) = (dx / len, dy / len);
        let half = thickness / 2.0;
        let pad = half + 1.0;

        let xs = Self::span(start.0.min(end.0) - pad, start.0.max(end.0) + pad, self.width);
        let ys = Self::span(start.1.min(end.1) - pad, start.1.max(end.1) + pad, self.height);

        for y in ys {
            for x in xs.clone() {
                let (px, py) = (x as f32 + 0.5 - start.0, y as f32 + 0.5 - start.1);
                let along = px * ux + py * uy;
                let across = ux * py - uy * px;

                let coverage = if self.antialias {
                    let c_across = (half + 0.5 - across.abs()).clamp(0.0, 1.0);
                    let c_along = (len / 2.0 + half + 0.5 - (along - len / 2.0).abs()).clamp(0.0, 1.0);
                    c_across * c_along
                } else {
                    let inside = (-half..half).contains(&across) && (-half..len + half).contains(&along);
                    if inside { 1.0 } else { 0.0 }
                };
                self.blend(x, y, color, alpha * coverage);
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb, alpha: f32) {
        let xs = Self::span(x as f32, x as f32 + w as f32, self.width);
        let ys = Self::span(y as f32, y as f32 + h as f32, self.height);
        for py in ys {
            for px in xs.clone() {
                self.blend(px, py, color, alpha);
            }
        }
    }
}
