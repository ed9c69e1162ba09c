use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_thief::{ColorThief, DEFAULT_QUALITY};

/// Print the most dominant color of an image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image path, or an http(s)/file URL
    image: String,

    /// Sample every n-th pixel
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "color_thief=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let args = Args::parse();
    let thief = ColorThief::new();
    let buffer = thief
        .load(&args.image)
        .await
        .with_context(|| format!("could not load image {:?}", args.image))?;

    match thief.color(&buffer, args.quality) {
        Some(color) => println!("{}", color),
        None => bail!("no opaque, non-white pixels in {:?}", args.image),
    }

    Ok(())
}
