//! Single-entry directory context memo

use std::path::{Path, PathBuf};

use ghosthist_client::{ContextInfo, ContextSource};
use tracing::debug;

/// Context for the most recently queried directory
///
/// One fetch per directory; last write wins. A failed fetch caches an empty
/// context so it is not retried until the directory changes.
#[derive(Debug, Default)]
pub struct ContextCache {
    entry: Option<(PathBuf, ContextInfo)>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<C: ContextSource + ?Sized>(
        &mut self,
        cwd: &Path,
        source: &C,
    ) -> ContextInfo {
        if let Some(info) = self.cached(cwd) {
            return info.clone();
        }

        let info = match source.context(cwd).await {
            Ok(info) => info,
            Err(e) => {
                debug!(cwd = %cwd.display(), error = %e, "Context lookup failed");
                ContextInfo::default()
            }
        };
        self.entry = Some((cwd.to_path_buf(), info.clone()));
        info
    }

    pub fn cached(&self, cwd: &Path) -> Option<&ContextInfo> {
        self.entry
            .as_ref()
            .filter(|(dir, _)| dir == cwd)
            .map(|(_, info)| info)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
