//! ansiblocks - Render images as ANSI block art
//!
//! A command-line tool for displaying images in 16-color terminals using
//! block-shading glyphs.

use ansi_blocks::{render_to_string, Palette, RgbaFrame};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ansiblocks")]
#[command(version)]
#[command(about = "Render an image as ANSI block art", long_about = None)]
struct Cli {
    /// Input image file (PNG, JPEG, GIF, WebP)
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let palette = Palette::build();
    eprintln!("Palette contains {} colors.", palette.len());

    let img = image::open(&cli.input)
        .map_err(|e| format!("Failed to open '{}': {}", cli.input.display(), e))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    eprintln!("Rendering '{}' ({}x{})", cli.input.display(), width, height);

    let frame = RgbaFrame::new(rgba_img.into_raw(), width as usize, height as usize)?;
    let text = render_to_string(&frame, &palette)?;

    match cli.output {
        Some(path) => {
            fs::write(&path, &text)?;
            eprintln!("Written {} bytes to '{}'", text.len(), path.display());
        }
        None => {
            io::stdout().write_all(text.as_bytes())?;
        }
    }

    Ok(())
}
