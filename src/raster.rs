//! Document rasterization: PDF bytes to ordered page images.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::extract::PageImage;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 200;

/// Trait for turning a document into page images.
pub trait Rasterizer: Send + Sync {
    /// Render every page, in page order, numbered from 1.
    fn rasterize(&self, document: &[u8]) -> Result<Vec<PageImage>>;
}

/// Check whether bytes start with the PDF magic.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Rasterizer that shells out to poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    dpi: u32,
    program: String,
}

impl PdftoppmRasterizer {
    /// Create a rasterizer rendering at `dpi`.
    pub fn new(dpi: u32) -> Self {
        Self {
            dpi,
            program: "pdftoppm".to_string(),
        }
    }

    /// Use a different `pdftoppm` executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, document: &[u8]) -> Result<Vec<PageImage>> {
        if !is_pdf_bytes(document) {
            return Err(Error::UnknownFormat);
        }

        let work_dir = tempfile::tempdir()?;
        let input = work_dir.path().join("input.pdf");
        fs::write(&input, document)?;

        let output = Command::new(&self.program)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(work_dir.path().join("page"))
            .output()
            .map_err(|e| {
                Error::Rasterize(format!(
                    "failed to invoke {}; is poppler-utils installed? ({})",
                    self.program, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Rasterize(format!(
                "{} failed with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let pages = collect_rendered_pages(work_dir.path())?;
        log::debug!("rasterized {} pages at {} dpi", pages.len(), self.dpi);
        Ok(pages)
    }
}

/// Read `page-<n>.png` files from `dir`, ordered by page number.
///
/// `pdftoppm` zero-pads the page suffix to the width of the page count,
/// so the number is parsed rather than sorted as text.
fn collect_rendered_pages(dir: &Path) -> Result<Vec<PageImage>> {
    let mut numbered = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(number) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(page_number_from_name)
        {
            numbered.push((number, path));
        }
    }
    numbered.sort_by_key(|(number, _)| *number);

    numbered
        .into_iter()
        .enumerate()
        .map(|(idx, (_, path))| Ok(PageImage::new(idx as u32 + 1, fs::read(path)?)))
        .collect()
}

fn page_number_from_name(name: &str) -> Option<u32> {
    name.strip_prefix("page-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}
