use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use press_pass::card::{
    CardRenderer, CardRequest, DrawingSurface, ImageDecoder, PhotoDecoder, RasterSurface,
};

/// Render a press pass PNG without starting the server.
#[derive(Debug, Parser)]
#[command(name = "render-pass", version)]
struct Cli {
    /// Name printed on the pass
    #[arg(long, default_value = "")]
    name: String,

    /// Title printed under the organization
    #[arg(long, default_value = "")]
    title: String,

    /// Photo file (PNG, JPEG, GIF or WebP)
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Output path
    #[arg(long, short, default_value = "press-pass.png")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut request = CardRequest::new(cli.name, cli.title);
    if let Some(path) = &cli.photo {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading photo {}", path.display()))?;
        request = request.with_photo(ImageDecoder.decode(&bytes)?);
    }

    let renderer = CardRenderer::default();
    let mut surface = RasterSurface::default();
    let id = renderer
        .render(Some(&mut surface as &mut dyn DrawingSurface), &request)
        .context("drawing surface unavailable")?;

    let png = surface.encode_png()?;
    std::fs::write(&cli.out, png)
        .with_context(|| format!("writing {}", cli.out.display()))?;

    println!("{id} -> {}", cli.out.display());
    Ok(())
}
