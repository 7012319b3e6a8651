use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdf_stamp::{stamp_pdf, PageSelection, Placement, StampOptions};

#[derive(Parser)]
#[command(
    name = "pdf-stamp",
    about = "Add a transparent image stamp to a PDF",
    version,
    after_help = "The stamp's dark background is made transparent; red marks and light \
                  content stay opaque.\n\n\
                  Placement: --right-box, else --x and --y together, else bottom-right."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input PDF path
    pdf: PathBuf,

    /// Stamp image path
    stamp: PathBuf,

    /// Output PDF path
    output: PathBuf,

    /// X coordinate in points from the left edge
    #[arg(long, allow_negative_numbers = true)]
    x: Option<i32>,

    /// Y coordinate in points from the bottom edge
    #[arg(long, allow_negative_numbers = true)]
    y: Option<i32>,

    /// Stamp height in points
    #[arg(long, default_value_t = 160, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Apply to all pages instead of the first page only
    #[arg(long)]
    all_pages: bool,

    /// Position in the right signature box (overrides --x/--y)
    #[arg(long)]
    right_box: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.right_box && cli.x.is_some() != cli.y.is_some() && !cli.quiet {
        eprintln!("WARNING: --x and --y must be given together; using default placement");
    }

    let opts = StampOptions {
        size: cli.size,
        placement: Placement::from_flags(cli.right_box, cli.x, cli.y),
        pages: if cli.all_pages {
            PageSelection::All
        } else {
            PageSelection::First
        },
        ..StampOptions::default()
    };

    match stamp_pdf(&cli.pdf, &cli.stamp, &cli.output, &opts) {
        Ok(report) => {
            if !cli.quiet {
                println!("Stamp size: {}x{} pt", report.stamp_width, report.stamp_height);
                println!("Position: X={}, Y={}", report.rect.left, report.rect.bottom);
                println!("Saved: {}", report.output.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
