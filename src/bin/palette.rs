use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_thief::{Color, ColorThief, Options, SplitPriority, DEFAULT_COLOR_COUNT, DEFAULT_QUALITY};

/// Print the dominant color palette of an image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image path, or an http(s)/file URL
    image: String,

    /// Maximum number of colors (2 to 20)
    #[arg(short, long, default_value_t = DEFAULT_COLOR_COUNT)]
    count: usize,

    /// Sample every n-th pixel
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: usize,

    /// Output notation
    #[arg(short, long, value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Split the box with the largest population times color volume first
    #[arg(long)]
    volume: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Hex,
    Rgb,
    Hsl,
}

fn render(color: &Color, format: Format) -> String {
    let [r, g, b] = color.color.0;
    let text = match format {
        Format::Hex => color.hex(),
        Format::Rgb => format!("rgb({}, {}, {})", r, g, b),
        Format::Hsl => {
            let hsl = color.hsl();
            format!(
                "hsl({:.0}, {:.0}%, {:.0}%)",
                hsl.h,
                hsl.s * 100.0,
                hsl.l * 100.0
            )
        }
    };

    #[cfg(feature = "print-truecolor")]
    let text = {
        use termion::color as term;
        format!(
            "{}███{} {}",
            term::Fg(term::Rgb(r, g, b)),
            term::Fg(term::Reset),
            text
        )
    };

    format!("{}\t{} pixels", text, color.population)
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
    let options = Options::new(args.count, args.quality)?;

    let mut thief = ColorThief::new();
    if args.volume {
        thief = thief.split_priority(SplitPriority::PopulationVolume);
    }

    let buffer = thief
        .load(&args.image)
        .await
        .with_context(|| format!("could not load image {:?}", args.image))?;

    for color in &thief.palette(&buffer, &options) {
        println!("{}", render(color, args.format));
    }

    Ok(())
}
