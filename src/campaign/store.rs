//! On-disk JSON stores: the cumulative archive and the current week.

use crate::campaign::types::{ArchiveStore, Campaign, CampaignDraft};
use crate::config::Settings;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The archive and current-week files.
///
/// Writes go to a sibling temp file and are renamed into place, so a reader
/// never sees a half-written file. There is no locking: two processes
/// saving at once can still lose an archive entry.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    archive_path: PathBuf,
    current_path: PathBuf,
}

impl CampaignStore {
    /// Creates a store over the given files.
    pub fn new(archive_path: impl Into<PathBuf>, current_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            current_path: current_path.into(),
        }
    }

    /// Creates a store from the configured paths.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.archive_path, &settings.current_path)
    }

    /// Path of the archive file.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Path of the current-week file.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Loads the archive, or an empty one if the file does not exist yet.
    pub fn load_archive(&self) -> Result<ArchiveStore> {
        if !self.archive_path.exists() {
            return Ok(ArchiveStore::default());
        }
        let content = std::fs::read_to_string(&self.archive_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the current-week campaign.
    pub fn load_current(&self) -> Result<Campaign> {
        load_campaign(&self.current_path)
    }

    /// Archives the draft and writes it as the current week.
    ///
    /// Both files are staged before either is renamed into place, so a
    /// failure while staging leaves the archive and the current week as
    /// they were. Only a failure between the two renames can split them.
    pub fn save(&self, draft: CampaignDraft) -> Result<Campaign> {
        let mut archive = self.load_archive()?;
        let campaign = archive.append(draft);

        let archive_tmp = stage_json(&self.archive_path, &archive)?;
        let current_tmp = match stage_json(&self.current_path, &campaign) {
            Ok(tmp) => tmp,
            Err(e) => {
                let _ = std::fs::remove_file(&archive_tmp);
                return Err(e);
            }
        };

        std::fs::rename(&archive_tmp, &self.archive_path)?;
        std::fs::rename(&current_tmp, &self.current_path)?;
        tracing::debug!(
            archive = %self.archive_path.display(),
            current = %self.current_path.display(),
            week = campaign.week,
            total = archive.campaigns.len(),
            "saved campaign"
        );
        Ok(campaign)
    }
}

/// Reads a campaign file. Missing fields take empty defaults.
pub fn load_campaign(path: &Path) -> Result<Campaign> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(serde_json::from_str(&content)?)
}

/// Writes `value` as pretty JSON (two-space indent, UTF-8 unescaped) to
/// `<path>.tmp`, creating parent directories, and returns the temp path.
fn stage_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, content)?;
    Ok(tmp)
}
