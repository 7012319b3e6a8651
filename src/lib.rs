//! Overlay a transparency-masked image stamp onto PDF pages.
//!
//! A stamp (a seal or signature scanned on a dark background) is turned into
//! an RGBA bitmap by classifying each pixel as stamp or background, scaled to
//! a target height, and drawn onto the first page or every page of a PDF.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use pdf_stamp::{stamp_pdf, StampOptions};
//!
//! let report = stamp_pdf(
//!     Path::new("contract.pdf"),
//!     Path::new("seal.jpg"),
//!     Path::new("contract_stamped.pdf"),
//!     &StampOptions::default(),
//! )
//! .expect("stamping failed");
//! println!("{}x{} pt at {:?}", report.stamp_width, report.stamp_height, report.rect);
//! ```
//!
//! # Placement
//!
//! ```
//! use pdf_stamp::{placement_rect, scaled_dimensions, Placement};
//!
//! let (w, h) = scaled_dimensions(160, 400, 200);
//! let rect = placement_rect(612.0, w, h, Placement::Default);
//! assert_eq!((rect.left, rect.bottom), (242.0, 80.0));
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod pdf;
pub mod placement;
mod stamper;
pub mod transparency;

pub use error::{Error, Result};
pub use pdf::PageSelection;
pub use placement::{placement_rect, scaled_dimensions, Placement, Rect};
pub use stamper::{
    prepare_stamp, stamp_pdf, ScratchStamp, StampOptions, StampReport, SCRATCH_PREFIX,
};
pub use transparency::{apply_transparency, is_foreground};
