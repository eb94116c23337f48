use std::path::Path;

use log::debug;
use resvg::usvg;
use tiny_skia::{Color, Pixmap, Transform};

use crate::error::{PlasmapError, Result};
use crate::scene::Scene;
use crate::style::MapStyle;

/// Whitespace kept around the cropped drawing in raster exports.
pub const EXPORT_PADDING: f32 = 20.0;
const LOCAL_FONTS_DIR: &str = "fonts";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub padding: f32,
    /// Raster scale multiplier, e.g. 2.0 for sharper output.
    pub scale: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            padding: EXPORT_PADDING,
            scale: 1.0,
        }
    }
}

impl ExportOptions {
    fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PlasmapError::InvalidOption(format!(
                "raster scale must be positive, got {}",
                self.scale
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(PlasmapError::InvalidOption(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PngExport {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PdfExport {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Rasterizes `scene` cropped to its drawn content plus padding on a background filled
/// with the style's background colour. Returns `None` for an empty scene.
pub fn export_png(
    scene: &Scene,
    name: &str,
    style: &MapStyle,
    options: &ExportOptions,
) -> Result<Option<PngExport>> {
    if scene.is_empty() {
        return Ok(None);
    }
    options.validate()?;

    let svg = scene.to_svg(style);
    let mut opts = usvg::Options::default();
    load_fonts(opts.fontdb_mut());

    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| PlasmapError::Export(format!("failed to parse SVG: {}", e)))?;

    let bbox = tree.root().abs_bounding_box();
    let pad = options.padding;
    let scale = options.scale;
    let width = canvas_extent(bbox.width(), pad, scale);
    let height = canvas_extent(bbox.height(), pad, scale);
    debug!(
        "Content bbox ({:.2}, {:.2}) {:.2}x{:.2}, canvas {}x{}",
        bbox.x(),
        bbox.y(),
        bbox.width(),
        bbox.height(),
        width,
        height
    );

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        PlasmapError::Export(format!("failed to allocate a {}x{} canvas", width, height))
    })?;
    let (r, g, b) = style.background_rgb();
    pixmap.fill(Color::from_rgba8(r, g, b, 255));

    let transform = Transform::from_row(
        scale,
        0.0,
        0.0,
        scale,
        (pad - bbox.x()) * scale,
        (pad - bbox.y()) * scale,
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let data = pixmap
        .encode_png()
        .map_err(|e| PlasmapError::Export(format!("failed to encode PNG: {}", e)))?;

    Ok(Some(PngExport {
        file_name: format!("{}_vector.png", name),
        width,
        height,
        data,
    }))
}

/// Canvas side covering `extent` plus padding on both ends, rounded up so partial
/// pixels on the right and bottom edges are kept.
fn canvas_extent(extent: f32, padding: f32, scale: f32) -> u32 {
    ((extent + padding * 2.0) * scale).ceil() as u32
}

/// Converts `scene` to a single-page PDF with text turned into outlines.
/// Returns `None` for an empty scene.
pub fn export_pdf(scene: &Scene, name: &str, style: &MapStyle) -> Result<Option<PdfExport>> {
    use svg2pdf::usvg::fontdb;

    if scene.is_empty() {
        return Ok(None);
    }

    // svg2pdf pins its own usvg/fontdb release, so the database type differs from
    // the one `load_fonts` configures for resvg.
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let local_fonts = Path::new(LOCAL_FONTS_DIR);
    if local_fonts.is_dir() {
        db.load_fonts_dir(local_fonts);
    }
    if let Some(family) = fallback_sans_family(
        db.faces()
            .flat_map(|face| face.families.iter().map(|(family, _)| family.as_str())),
    ) {
        db.set_sans_serif_family(&family);
        db.set_serif_family(&family);
    }

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };
    let tree = svg2pdf::usvg::Tree::from_str(&scene.to_svg(style), &opts)
        .map_err(|e| PlasmapError::Export(format!("failed to parse SVG: {}", e)))?;

    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };
    let data = svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| PlasmapError::Export(format!("failed to convert SVG to PDF: {}", e)))?;

    Ok(Some(PdfExport {
        file_name: format!("{}_vector.pdf", name),
        data,
    }))
}

fn load_fonts(fontdb: &mut usvg::fontdb::Database) {
    fontdb.load_system_fonts();

    let local_fonts = Path::new(LOCAL_FONTS_DIR);
    if local_fonts.is_dir() {
        fontdb.load_fonts_dir(local_fonts);
    }

    if let Some(family) = fallback_sans_family(
        fontdb
            .faces()
            .flat_map(|face| face.families.iter().map(|(family, _)| family.as_str())),
    ) {
        fontdb.set_sans_serif_family(&family);
        fontdb.set_serif_family(&family);
    }
}

/// Family standing in for the generic sans-serif and serif names. Prefers an Arial
/// look-alike, then any "sans" family, then the first family seen.
fn fallback_sans_family<'a>(families: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut metric_sans: Option<&str> = None;
    let mut sans: Option<&str> = None;
    let mut first: Option<&str> = None;

    for family in families {
        first.get_or_insert(family);

        let lower = family.to_ascii_lowercase();
        if metric_sans.is_none()
            && ["arial", "helvetica", "liberation sans"]
                .iter()
                .any(|name| lower.contains(name))
        {
            metric_sans = Some(family);
        }
        if sans.is_none() && lower.contains("sans") && !lower.contains("mono") {
            sans = Some(family);
        }
    }

    metric_sans.or(sans).or(first).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{canvas_extent, export_pdf, export_png, fallback_sans_family, ExportOptions};
    use crate::error::PlasmapError;
    use crate::scene::{Primitive, Scene};
    use crate::style::MapStyle;

    fn open_frame(width: f32, height: f32) -> Scene {
        let mut scene = Scene::empty(300.0, 300.0);
        scene.push(Primitive::line((10.0, 10.0), (10.0 + width, 10.0), 2.0));
        scene.push(Primitive::line((10.0, 10.0), (10.0, 10.0 + height), 2.0));
        scene
    }

    fn ring() -> Scene {
        let mut scene = Scene::empty(300.0, 300.0);
        scene.push(Primitive::Circle {
            cx: 100.0,
            cy: 100.0,
            r: 50.0,
            stroke_width: 3.0,
        });
        scene
    }

    #[test]
    fn png_is_cropped_to_content_plus_padding() {
        let export = export_png(
            &open_frame(100.0, 100.0),
            "pTest",
            &MapStyle::default(),
            &ExportOptions::default(),
        )
        .expect("export")
        .expect("non-empty scene");

        assert_eq!(export.file_name, "pTest_vector.png");
        assert_eq!((export.width, export.height), (140, 140));
        assert_eq!(&export.data[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn fractional_content_rounds_canvas_up() {
        let export = export_png(
            &open_frame(100.4, 60.6),
            "p",
            &MapStyle::default(),
            &ExportOptions::default(),
        )
        .expect("export")
        .expect("non-empty scene");
        // 140.4 x 100.6
        assert_eq!((export.width, export.height), (141, 101));
    }

    #[test]
    fn canvas_extent_rounds_up() {
        assert_eq!(canvas_extent(100.0, 20.0, 1.0), 140);
        assert_eq!(canvas_extent(100.25, 20.0, 1.0), 141);
        assert_eq!(canvas_extent(100.25, 20.0, 2.0), 281);
        assert_eq!(canvas_extent(0.0, 0.0, 1.0), 0);
    }

    #[test]
    fn png_scale_multiplies_canvas() {
        let options = ExportOptions {
            scale: 2.0,
            ..ExportOptions::default()
        };
        let export = export_png(&open_frame(100.0, 100.0), "p", &MapStyle::default(), &options)
            .expect("export")
            .expect("non-empty scene");
        assert_eq!((export.width, export.height), (280, 280));
    }

    #[test]
    fn empty_scene_exports_nothing() {
        let scene = Scene::empty(300.0, 300.0);
        let style = MapStyle::default();
        assert!(export_png(&scene, "p", &style, &ExportOptions::default())
            .expect("no-op")
            .is_none());
        assert!(export_pdf(&scene, "p", &style).expect("no-op").is_none());
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let options = ExportOptions {
            scale: 0.0,
            ..ExportOptions::default()
        };
        let err = export_png(&ring(), "p", &MapStyle::default(), &options).unwrap_err();
        assert!(matches!(err, PlasmapError::InvalidOption(_)));
    }

    #[test]
    fn export_leaves_scene_untouched() {
        let scene = ring();
        let before = scene.clone();
        let _ = export_png(&scene, "p", &MapStyle::default(), &ExportOptions::default());
        assert_eq!(scene, before);
    }

    #[test]
    fn fallback_prefers_arial_metrics() {
        let picked = fallback_sans_family(
            ["Noto Serif", "DejaVu Sans Mono", "DejaVu Sans", "Liberation Sans"].into_iter(),
        );
        assert_eq!(picked.as_deref(), Some("Liberation Sans"));
    }

    #[test]
    fn fallback_skips_monospace_sans() {
        let picked = fallback_sans_family(["Noto Serif", "DejaVu Sans Mono", "Noto Sans"].into_iter());
        assert_eq!(picked.as_deref(), Some("Noto Sans"));
    }

    #[test]
    fn fallback_uses_first_family_when_nothing_matches() {
        assert_eq!(
            fallback_sans_family(["Noto Serif"].into_iter()).as_deref(),
            Some("Noto Serif")
        );
        assert_eq!(fallback_sans_family(std::iter::empty()), None);
    }
}
