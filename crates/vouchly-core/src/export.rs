// ── CSV export sink ──
//
// The download flow hands the raw CSV to an `ExportSink`. The default
// sink writes it into a directory under a name derived from the campaign.

use std::future::Future;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::info;

use crate::error::CoreError;
use crate::model::Campaign;

/// Where downloaded voucher exports end up.
pub trait ExportSink: Send + Sync + 'static {
    /// Persist `contents` under `file_name`, returning the final location.
    fn save(
        &self,
        file_name: &str,
        contents: Bytes,
    ) -> impl Future<Output = Result<PathBuf, CoreError>> + Send;
}

/// `vouchers-<campaign name>-<campaign id>.csv`, safe to use as a file name.
pub fn export_file_name(campaign: &Campaign) -> String {
    sanitize_file_name(&format!("vouchers-{}-{}.csv", campaign.name, campaign.id))
}

/// Replace path separators and control characters with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if matches!(c, '/' | '\\') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

// ── Directory sink ───────────────────────────────────────────────────

/// Writes exports into a fixed directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    async fn save(&self, file_name: &str, contents: Bytes) -> Result<PathBuf, CoreError> {
        let name = sanitize_file_name(file_name);
        let path = self.dir.join(&name);
        if name.is_empty() || name == "." || name == ".." {
            return Err(CoreError::Export {
                path,
                reason: "invalid file name".into(),
            });
        }

        let export_err = |path: &Path, e: std::io::Error| CoreError::Export {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| export_err(&self.dir, e))?;
        tokio::fs::write(&path, &contents)
            .await
            .map_err(|e| export_err(&path, e))?;

        info!(path = %path.display(), bytes = contents.len(), "voucher export saved");
        Ok(path)
    }
}
