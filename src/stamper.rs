//! End-to-end stamping: load, mask, scale, place, composite, save.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use lopdf::Document;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::pdf::{self, PageSelection};
use crate::placement::{self, Placement, Rect, DEFAULT_SIZE};
use crate::transparency;

/// File name prefix of scratch stamps.
pub const SCRATCH_PREFIX: &str = "pdf-stamp-";

/// Options controlling a single stamping run.
#[derive(Debug, Clone)]
pub struct StampOptions {
    /// Stamp height in points; the width follows the image's aspect ratio.
    pub size: u32,
    /// Where the stamp goes on the page.
    pub placement: Placement,
    /// Which pages receive the stamp.
    pub pages: PageSelection,
    /// Directory for the scratch PNG; the system temp directory when `None`.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            placement: Placement::Default,
            pages: PageSelection::First,
            scratch_dir: None,
        }
    }
}

/// Outcome of a successful stamping run.
#[derive(Debug, Clone)]
pub struct StampReport {
    /// Path the stamped document was written to.
    pub output: PathBuf,
    /// Scaled stamp width in points.
    pub stamp_width: u32,
    /// Scaled stamp height in points.
    pub stamp_height: u32,
    /// Rectangle the stamp occupies on every stamped page.
    pub rect: Rect,
    /// 1-based numbers of the stamped pages.
    pub pages: Vec<u32>,
}

/// The processed stamp, written as PNG to a private temporary file.
///
/// The file is removed when this value is dropped, whether or not the run
/// that created it succeeded.
#[derive(Debug)]
pub struct ScratchStamp {
    file: NamedTempFile,
}

impl ScratchStamp {
    /// Write `stamp` to a fresh temporary PNG in the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created and
    /// [`Error::Image`] if encoding fails.
    pub fn write(stamp: &RgbaImage) -> Result<Self> {
        Self::write_in(&std::env::temp_dir(), stamp)
    }

    /// Write `stamp` to a fresh temporary PNG inside `dir`.
    ///
    /// # Errors
    ///
    /// Same as [`ScratchStamp::write`].
    pub fn write_in(dir: &Path, stamp: &RgbaImage) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(".png")
            .tempfile_in(dir)?;
        stamp.save_with_format(file.path(), ImageFormat::Png)?;
        debug!(path = %file.path().display(), "Scratch stamp written");
        Ok(Self { file })
    }

    /// Location of the temporary PNG.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Decode the temporary PNG back into an RGBA bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the file cannot be read.
    pub fn load(&self) -> Result<RgbaImage> {
        Ok(image::open(self.path())?.to_rgba8())
    }
}

/// Load a stamp image, mask its background, and scale it to `size` points tall.
///
/// # Errors
///
/// Returns [`Error::InvalidSize`] for a zero size and [`Error::Image`] if the
/// image cannot be decoded.
pub fn prepare_stamp(path: &Path, size: u32) -> Result<RgbaImage> {
    if size == 0 {
        return Err(Error::InvalidSize(size));
    }
    let masked = transparency::load_stamp(path)?;
    let (width, height) = placement::scaled_dimensions(size, masked.width(), masked.height());
    Ok(imageops::resize(&masked, width, height, FilterType::Lanczos3))
}

/// Stamp `stamp` onto `input` and write the result to `output`.
///
/// The placement rectangle is computed once from the first page's geometry
/// and reused for every selected page. `input` is never modified.
///
/// # Errors
///
/// Returns an error if either input cannot be read, the size is zero, the
/// document has no pages or unusable page geometry, or the output cannot be
/// written.
#[instrument(skip_all, fields(input = %input.display(), stamp = %stamp.display()))]
pub fn stamp_pdf(
    input: &Path,
    stamp: &Path,
    output: &Path,
    opts: &StampOptions,
) -> Result<StampReport> {
    let mut doc = Document::load(input)?;
    let targets = pdf::select_pages(&doc, opts.pages)?;
    let (first_number, first_id) = targets[0];
    let page = pdf::page_dimensions(&doc, first_number, first_id)?;
    info!(
        pages = doc.get_pages().len(),
        width = page.width,
        height = page.height,
        "PDF loaded"
    );

    let bitmap = prepare_stamp(stamp, opts.size)?;
    let (stamp_width, stamp_height) = bitmap.dimensions();
    let rect = placement::placement_rect(page.width, stamp_width, stamp_height, opts.placement);
    info!(
        stamp_width,
        stamp_height,
        x = rect.left,
        y = rect.bottom,
        placement = ?opts.placement,
        "Stamp placed"
    );

    let scratch = match &opts.scratch_dir {
        Some(dir) => ScratchStamp::write_in(dir, &bitmap)?,
        None => ScratchStamp::write(&bitmap)?,
    };
    let stamp_id = pdf::embed_stamp(&mut doc, &scratch.load()?);

    let mut stamped = Vec::with_capacity(targets.len());
    for (number, page_id) in targets {
        pdf::overlay_stamp(&mut doc, number, page_id, stamp_id, &rect)?;
        stamped.push(number);
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    doc.save(output)?;
    info!(output = %output.display(), pages = ?stamped, "Stamped PDF saved");

    Ok(StampReport {
        output: output.to_path_buf(),
        stamp_width,
        stamp_height,
        rect,
        pages: stamped,
    })
}
