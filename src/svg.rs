use std::fmt::Write;

use crate::scene::{Baseline, Primitive, Scene};
use crate::style::MapStyle;

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escapes markup characters and drops anything XML cannot carry, so feature names
/// taken verbatim from input never break the document.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_valid_xml_char(c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_primitive(out: &mut String, primitive: &Primitive, style: &MapStyle) {
    // Writing into a String cannot fail.
    let _ = match primitive {
        Primitive::Circle {
            cx,
            cy,
            r,
            stroke_width,
        } => write!(
            out,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{}" />"#,
            cx, cy, r, style.stroke_color, stroke_width
        ),
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
        } => write!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" />"#,
            x1, y1, x2, y2, style.stroke_color, stroke_width
        ),
        Primitive::Arc { span, stroke_width } => write!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            span.path_data(),
            style.stroke_color,
            stroke_width
        ),
        Primitive::Text {
            x,
            y,
            content,
            font_size,
            anchor,
            baseline,
        } => {
            let baseline_attr = match baseline {
                Baseline::Middle => r#" dominant-baseline="middle""#,
                Baseline::Alphabetic => "",
            };
            write!(
                out,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="{}"{} font-size="{:.2}px" font-family="{}" fill="{}">{}</text>"#,
                x,
                y,
                anchor.as_svg(),
                baseline_attr,
                font_size,
                escape_xml(&style.font_family),
                style.text_color,
                escape_xml(content),
            )
        }
    };
}

impl Scene {
    /// Serializes the scene as a standalone SVG document sized to the render bounds.
    pub fn to_svg(&self, style: &MapStyle) -> String {
        let mut body = String::new();
        for primitive in &self.primitives {
            write_primitive(&mut body, primitive, style);
            body.push('\n');
        }

        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width.max(0.0),
            h = self.height.max(0.0),
            body = body,
        )
    }
}
