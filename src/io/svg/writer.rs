use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Ok, Result};

use super::SvgCanvas;

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[svg::writer] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

impl SvgCanvas {
    /// Write the canvas to `path` as a standalone SVG file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        self.write_svg(&mut writer)
            .with_context(|| format!("[svg::writer] Failed to write {}", path.display()))?;
        writer.flush()?;
        Ok(())
    }
}
