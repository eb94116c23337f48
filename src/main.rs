use clap::Parser;
use log::info;
use plasmap::export::{self, ExportOptions};
use plasmap::fonts::{CharWidthEstimate, CosmicTextMeasure};
use plasmap::record::SequenceRecord;
use plasmap::{MapStyle, PlasmapError};
use std::path::PathBuf;

/// A pure Rust circular plasmid map renderer
#[derive(Parser, Debug)]
#[command(name = "plasmap")]
#[command(version)]
#[command(about = "Render a circular plasmid map to SVG, PNG or PDF", long_about = None)]
struct Args {
    /// Input sequence record, JSON or YAML (use "-" for JSON on stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (extension determines format: .svg, .png or .pdf).
    /// Defaults to "<name>_vector.png"
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Layout width in pixels
    #[arg(long, default_value_t = 1500.0)]
    width: f32,

    /// Layout height in pixels
    #[arg(long, default_value_t = 500.0)]
    height: f32,

    /// Path to a style file (TOML or YAML)
    #[arg(short, long, value_name = "STYLE")]
    style: Option<PathBuf>,

    /// Whitespace around the cropped drawing in PNG output
    #[arg(long, default_value_t = export::EXPORT_PADDING)]
    padding: f32,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Fit label font size with shaped text instead of a character-count estimate
    #[arg(long)]
    shaped_text: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();
    run(args).map_err(|e| e.to_string())
}

fn run(args: Args) -> Result<(), PlasmapError> {
    let style = match args.style {
        Some(ref path) => MapStyle::from_path(path)?,
        None => MapStyle::default(),
    };

    let record = if args.input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
        SequenceRecord::from_json(&buffer)?
    } else {
        SequenceRecord::from_path(&args.input)?
    };

    let scene = if args.shaped_text {
        plasmap::render(&record, args.width, args.height, &mut CosmicTextMeasure::new())
    } else {
        plasmap::render(&record, args.width, args.height, &mut CharWidthEstimate)
    };
    info!(
        "Rendered '{}' ({} bp, {} features) into {} primitives",
        record.name,
        record.length,
        record.features.len(),
        scene.len()
    );

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(record.export_file_name("png")));
    let output_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| PlasmapError::InvalidOption("output file has no extension".to_string()))?
        .to_ascii_lowercase();

    match output_ext.as_str() {
        "svg" => {
            std::fs::write(&output, scene.to_svg(&style))?;
            eprintln!("SVG saved to: {}", output.display());
        }
        "png" => {
            let options = ExportOptions {
                padding: args.padding,
                scale: args.png_scale,
            };
            match export::export_png(&scene, &record.name, &style, &options)? {
                Some(png) => {
                    std::fs::write(&output, png.data)?;
                    eprintln!("PNG ({}x{}) saved to: {}", png.width, png.height, output.display());
                }
                None => eprintln!("Nothing to export for '{}'", record.name),
            }
        }
        "pdf" => match export::export_pdf(&scene, &record.name, &style)? {
            Some(pdf) => {
                std::fs::write(&output, pdf.data)?;
                eprintln!("PDF saved to: {}", output.display());
            }
            None => eprintln!("Nothing to export for '{}'", record.name),
        },
        _ => {
            return Err(PlasmapError::InvalidOption(format!(
                "unsupported output format: .{} (use .svg, .png or .pdf)",
                output_ext
            )));
        }
    }

    Ok(())
}
