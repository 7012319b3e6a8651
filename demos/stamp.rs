//! Stamp the first page of a PDF with the default bottom-right placement.
//!
//! Usage:
//! ```sh
//! cargo run --example stamp -- input.pdf seal.png output.pdf
//! ```

use std::env;
use std::path::Path;
use std::process;

use pdf_stamp::{stamp_pdf, StampOptions};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <input.pdf> <stamp> <output.pdf>", args[0]);
        process::exit(1);
    }

    let opts = StampOptions::default();
    match stamp_pdf(
        Path::new(&args[1]),
        Path::new(&args[2]),
        Path::new(&args[3]),
        &opts,
    ) {
        Ok(report) => println!(
            "Done: {}x{} pt stamp on page(s) {:?}",
            report.stamp_width, report.stamp_height, report.pages
        ),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
