//! Assembling the two-page PDF and writing it safely.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::agenda::YearAgenda;
use crate::error::{JcalError, JcalResult};
use crate::planner::Page;
use crate::render::{GridRenderer, PdfSurface, RenderOptions};
use crate::window::CalendarWindow;

/// Render both half-year pages into a finished PDF.
pub fn build_document(agenda: &YearAgenda, options: &RenderOptions) -> JcalResult<Vec<u8>> {
    let renderer = GridRenderer::new(agenda, options);
    let geometry = renderer.geometry();
    let mut surface = PdfSurface::new(geometry.page_width, geometry.page_height);

    for page in Page::ALL {
        renderer.render_page(&mut surface, page)?;
    }

    let bytes = surface.finish()?;
    info!(bytes = bytes.len(), "document rendered");
    Ok(bytes)
}

/// Write `bytes` to a scratch file next to `destination` and move it into
/// place only once the write succeeded.
pub fn persist_document(bytes: &[u8], destination: &Path) -> JcalResult<()> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut scratch = tempfile::NamedTempFile::new_in(dir)?;
    scratch.write_all(bytes)?;
    scratch.as_file().sync_all()?;
    scratch
        .persist(destination)
        .map_err(|e| JcalError::Io(e.error))?;

    info!(path = %destination.display(), "document saved");
    Ok(())
}

/// "jahreskalender_2024_8.pdf"
pub fn default_file_name(window: CalendarWindow) -> String {
    format!(
        "jahreskalender_{}_{}.pdf",
        window.start_year(),
        window.start_month()
    )
}
