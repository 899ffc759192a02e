use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

use crate::pipeline::line_style::Rgb;
use crate::render::{Canvas, Surface};
use crate::shared::{DisplayState, GRID_SIZE, NUM_SAMPLES, SAMPLE_NAMES};

const SIDE_PANEL_WIDTH: u16 = 56;

pub fn render(frame: &mut Frame, area: Rect, canvas: &Canvas, state: &DisplayState) {
    let sections = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(16),                  // plaid
            Constraint::Length(SIDE_PANEL_WIDTH), // info + keys
        ])
        .split(area);

    draw_plaid(frame, sections[0], canvas);
    draw_side_panel(frame, sections[1], state);
}

fn draw_plaid(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    let block = Block::default().borders(Borders::ALL).title(" plaid drum machine ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(PlaidWidget { canvas }, square_area(inner));
}

fn draw_side_panel(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let mut text = Text::from(state.info_text.as_str());
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "beat: {}/{}",
        state.current_beat as usize + 1,
        GRID_SIZE
    )));
    text.push_line(Line::from(sample_status(&state.loaded_samples)));
    text.push_line(Line::from(""));
    text.push_line(Line::styled(
        "g / enter / space: generate   q / esc: quit",
        Style::default().fg(Color::DarkGray),
    ));

    let para = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(format!(" pattern · {} bpm ", state.bpm)))
        .wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

fn sample_status(loaded: &[bool; NUM_SAMPLES]) -> String {
    let names: Vec<String> = SAMPLE_NAMES
        .iter()
        .zip(loaded)
        .map(|(name, ok)| if *ok { name.to_string() } else { format!("{name} (muted)") })
        .collect();
    format!("samples: {}", names.join(", "))
}

// Largest region that shows as a square: cells are about twice as tall as
// they are wide, and each one carries two pixel rows.
pub fn square_area(area: Rect) -> Rect {
    let side = area.width.min(area.height.saturating_mul(2));
    Rect {
        x: area.x,
        y: area.y,
        width: side,
        height: side / 2,
    }
}

// The canvas, box-filtered down to the widget area with upper-half blocks:
// foreground is the top pixel row of a cell, background the bottom one.
pub struct PlaidWidget<'a> {
    pub canvas: &'a Canvas,
}

impl Widget for PlaidWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = area.width as u32;
        let rows = area.height as u32 * 2;
        if cols == 0 || rows == 0 {
            return;
        }
        for cy in 0..area.height {
            for cx in 0..area.width {
                let top = average(self.canvas, cx as u32, cy as u32 * 2, cols, rows);
                let bottom = average(self.canvas, cx as u32, cy as u32 * 2 + 1, cols, rows);
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_char('▀').set_fg(to_color(top)).set_bg(to_color(bottom));
                }
            }
        }
    }
}

// Mean color of the canvas region under virtual pixel (vx, vy) of a cols x rows grid.
fn average(canvas: &Canvas, vx: u32, vy: u32, cols: u32, rows: u32) -> Rgb {
    let (w, h) = (canvas.width(), canvas.height());
    let x0 = vx * w / cols;
    let x1 = ((vx + 1) * w / cols).max(x0 + 1).min(w);
    let y0 = vy * h / rows;
    let y1 = ((vy + 1) * h / rows).max(y0 + 1).min(h);
    if x0 >= x1 || y0 >= y1 {
        return Rgb::default();
    }

    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = canvas.pixel(x, y);
            r += p.r as u32;
            g += p.g as u32;
            b += p.b as u32;
        }
    }
    let n = (x1 - x0) * (y1 - y0);
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}
