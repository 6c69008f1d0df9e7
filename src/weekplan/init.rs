use crate::api::PlannerApi;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the data directory, e.g. `WEEKPLAN_HOME=/tmp/plan`.
pub const HOME_ENV: &str = "WEEKPLAN_HOME";

pub struct PlannerContext {
    pub api: PlannerApi<FileStore>,
    pub config: PlannerConfig,
    pub data_dir: PathBuf,
}

/// The directory holding `config.json` and the slot files.
pub fn data_dir(home_override: Option<&str>) -> Result<PathBuf> {
    if let Some(home) = home_override.map(str::trim).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "weekplan", "weekplan").ok_or_else(|| {
        PlannerError::Config(format!(
            "could not determine a data directory; set {}",
            HOME_ENV
        ))
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Loads config from `data_dir` and opens the planner on a file store there.
pub fn initialize(data_dir: &Path) -> Result<PlannerContext> {
    let config = PlannerConfig::load(data_dir)?;
    let store = FileStore::new(data_dir.to_path_buf());
    let api = PlannerApi::open(store, &config);
    log::debug!("planner opened at {}", data_dir.display());

    Ok(PlannerContext {
        api,
        config,
        data_dir: data_dir.to_path_buf(),
    })
}
