// Human-readable summary of a pattern for the side panel.

use std::fmt::Write;

use super::line_style::LineStyle;
use super::pattern::Pattern;

pub fn describe(pattern: &Pattern) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "bpm: {}", pattern.bpm);
    let _ = writeln!(out, "background color: #{:06x}", pattern.background.packed());

    out.push_str("\nhorizontal line types:\n");
    for line in &pattern.horizontal {
        describe_line(&mut out, line);
    }

    out.push_str("\nvertical line types:\n");
    for line in &pattern.vertical {
        describe_line(&mut out, line);
    }
    out
}

fn describe_line(out: &mut String, line: &LineStyle) {
    let _ = writeln!(
        out,
        "  - thickness: {}px, color: #{:06x}, transparency: {}%",
        line.thickness,
        line.color.packed(),
        (line.transparency * 100.0).round() as i32,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::line_style::Rgb;

    #[test]
    fn formats_fixed_pattern() {
        let p = Pattern {
            background: Rgb::new(0x0a, 0xff, 0x00),
            bpm: 113,
            horizontal: vec![LineStyle {
                color: Rgb::new(1, 2, 3),
                thickness: 7,
                transparency: 0.125,
                trigger_beats: vec![0, 1],
            }],
            vertical: vec![LineStyle {
                color: Rgb::new(0xff, 0xee, 0xdd),
                thickness: 20,
                transparency: 0.897,
                trigger_beats: vec![5, 6],
            }],
        };
        let expected = "bpm: 113\n\
                        background color: #0aff00\n\
                        \n\
                        horizontal line types:\n  - thickness: 7px, color: #010203, transparency: 13%\n\
                        \n\
                        vertical line types:\n  - thickness: 20px, color: #ffeedd, transparency: 90%\n";
        assert_eq!(describe(&p), expected);
    }

    #[test]
    fn repeated_calls_are_stable() {
        let p = crate::pipeline::pattern::generate(&mut fastrand::Rng::with_seed(3));
        assert_eq!(describe(&p), describe(&p));
    }
}
