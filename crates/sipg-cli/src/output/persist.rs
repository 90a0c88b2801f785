use anyhow::{Context, Result};
use sipg::Hit;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Projection, Sink};

/// Writes one line per hit to a file as it arrives.
///
/// Ip-only lines are `https://<ip>`; detailed lines are one JSON object each.
pub struct FileSink<W: Write = File> {
    writer: LineWriter<W>,
    projection: Projection,
    path: PathBuf,
    written: u64,
}

impl FileSink<File> {
    /// Create (or truncate) `path`.
    pub fn create(path: &Path, projection: Projection) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        Ok(Self::new(file, path.to_path_buf(), projection))
    }
}

impl<W: Write> FileSink<W> {
    fn new(inner: W, path: PathBuf, projection: Projection) -> Self {
        Self {
            writer: LineWriter::new(inner),
            projection,
            path,
            written: 0,
        }
    }
}

impl<W: Write> Sink for FileSink<W> {
    fn accept(&mut self, hit: &Hit) -> Result<()> {
        match self.projection {
            Projection::IpOnly => writeln!(self.writer, "{}", hit.url())?,
            Projection::Detailed => {
                serde_json::to_writer(&mut self.writer, &hit.record.details())?;
                self.writer.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        debug!(path = %self.path.display(), lines = self.written, "output file complete");
        Ok(())
    }
}
