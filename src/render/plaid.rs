// Paints one frame: background, the two line sets, then the beat crosshair.

use crate::pipeline::line_style::Rgb;
use crate::pipeline::pattern::{Orientation, Pattern};
use crate::shared::GRID_SIZE;

use super::surface::Surface;

const CROSSHAIR_ALPHA: f32 = 100.0 / 255.0;
const CROSSHAIR_THICKNESS: f32 = 2.0;

// Expects a square surface; the crosshair cell is sized from the width alone.
pub fn render(surface: &mut impl Surface, pattern: &Pattern, beat: u8) {
    debug_assert_eq!(surface.width(), surface.height(), "plaid surface must be square");
    surface.set_antialias(true);
    surface.fill(pattern.background);
    paint_lines(surface, pattern, Orientation::Horizontal);
    paint_lines(surface, pattern, Orientation::Vertical);
    paint_crosshair(surface, pattern.background, beat);
}

// Number of parallel copies of a line type and the gap between them.
pub fn line_layout(extent: u32, thickness: u32) -> (u32, u32) {
    let count = (extent / (thickness * 8 + 10)).max(2);
    (count, extent / count)
}

fn paint_lines(surface: &mut impl Surface, pattern: &Pattern, orientation: Orientation) {
    let (width, height) = (surface.width() as f32, surface.height() as f32);
    let extent = match orientation {
        Orientation::Horizontal => surface.height(),
        Orientation::Vertical => surface.width(),
    };

    for line in pattern.lines(orientation) {
        let (count, spacing) = line_layout(extent, line.thickness);
        for j in 0..count {
            let offset = (j * spacing + spacing / 2) as f32;
            let (start, end) = match orientation {
                Orientation::Horizontal => ((0.0, offset), (width, offset)),
                Orientation::Vertical => ((offset, 0.0), (offset, height)),
            };
            surface.draw_line(start, end, line.thickness as f32, line.color, line.transparency);
        }
    }
}

fn paint_crosshair(surface: &mut impl Surface, background: Rgb, beat: u8) {
    let (width, height) = (surface.width(), surface.height());
    let cell = width / GRID_SIZE as u32;
    let color = background.inverted();
    // row and column are both the beat, so the highlight walks the diagonal
    let edge = beat as u32 * cell;
    let (near, far) = (edge as f32, (edge + cell) as f32);

    for x in [near, far] {
        surface.draw_line((x, 0.0), (x, height as f32), CROSSHAIR_THICKNESS, color, CROSSHAIR_ALPHA);
    }
    for y in [near, far] {
        surface.draw_line((0.0, y), (width as f32, y), CROSSHAIR_THICKNESS, color, CROSSHAIR_ALPHA);
    }
    surface.fill_rect(edge as i32, edge as i32, cell, cell, color, CROSSHAIR_ALPHA);
}
