//! Chart data export.
//!
//! One CSV row per period: the percentile band values followed by a handful
//! of individual simulated paths. A rerun replaces the previous file in one
//! step, via a temporary file in the same directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use tempfile::NamedTempFile;
use tradesim_core::model::{BAND_QUANTILES, PathMatrix, SAMPLE_PATHS};

/// Output location for chart data, replaced on every write
#[derive(Debug, Clone)]
pub struct ChartFile {
    path: PathBuf,
}

impl ChartFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Write the bands and sample paths, then move the result over the old file.
    /// On error the previous file is untouched and the temporary is removed.
    pub fn write(&self, paths: &PathMatrix) -> color_eyre::Result<()> {
        let bands = paths
            .bands(&BAND_QUANTILES)
            .wrap_err("Failed to compute percentile bands")?;
        let samples = paths.sample_paths(SAMPLE_PATHS);

        let mut tmp = NamedTempFile::new_in(self.dir())
            .wrap_err_with(|| format!("Failed to create temporary file in {}", self.dir().display()))?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());

            let mut header = vec!["period".to_string()];
            header.extend(bands.iter().map(|b| format!("p{}", b.quantile)));
            header.extend((1..=samples.len()).map(|i| format!("path_{i}")));
            writer.write_record(&header)?;

            for t in 0..paths.periods() {
                let mut record = vec![t.to_string()];
                record.extend(bands.iter().map(|b| b.values[t].to_string()));
                record.extend(samples.iter().map(|p| p[t].to_string()));
                writer.write_record(&record)?;
            }
            writer.flush()?;
        }
        tmp.as_file_mut().flush()?;

        tmp.persist(&self.path)
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;
        tracing::info!(
            path = %self.path.display(),
            periods = paths.periods(),
            samples = samples.len(),
            "chart data written"
        );
        Ok(())
    }
}
