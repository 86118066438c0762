use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::log_warn;

const ENABLE_LOGS: bool = true;

const DEFAULT_REPORTS_DIR: &str = "reports";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSettings {
    /// Where session report folders are created. `None` uses the app data dir.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    #[serde(default)]
    report: ReportSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn report(&self) -> ReportSettings {
        match self.data.read() {
            Ok(guard) => guard.report.clone(),
            Err(poisoned) => poisoned.into_inner().report.clone(),
        }
    }

    pub fn update_report(&self, settings: ReportSettings) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        guard.report = settings;
        self.persist(&guard)
    }

    /// Resolved output root: the configured directory, else `<app_data_dir>/reports`.
    pub fn output_root(&self, app_data_dir: &Path) -> PathBuf {
        self.report()
            .output_dir
            .unwrap_or_else(|| app_data_dir.join(DEFAULT_REPORTS_DIR))
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
