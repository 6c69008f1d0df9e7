use crate::error::{PlannerError, Result};
use crate::ids::normalize_label;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Planner configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Sections every new or unstored week starts with.
    #[serde(default = "default_sections")]
    pub default_sections: Vec<String>,

    /// Weeks shown when no planner index has been saved yet.
    #[serde(default = "default_weeks")]
    pub default_weeks: Vec<String>,
}

fn default_sections() -> Vec<String> {
    vec!["Monday".to_string(), "Tuesday".to_string()]
}

fn default_weeks() -> Vec<String> {
    vec![
        "week1".to_string(),
        "week2".to_string(),
        "week3".to_string(),
    ]
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_sections: default_sections(),
            default_weeks: default_weeks(),
        }
    }
}

impl PlannerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PlannerError::Io)?;
        let config: PlannerConfig =
            serde_json::from_str(&content).map_err(PlannerError::Serialization)?;
        config.validated()
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PlannerError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PlannerError::Serialization)?;
        fs::write(config_path, content).map_err(PlannerError::Io)?;
        Ok(())
    }

    /// Trims every label and refuses blank or repeated ones.
    fn validated(self) -> Result<Self> {
        Ok(Self {
            default_sections: clean_labels("default_sections", self.default_sections)?,
            default_weeks: clean_labels("default_weeks", self.default_weeks)?,
        })
    }
}

fn clean_labels(field: &str, raw: Vec<String>) -> Result<Vec<String>> {
    let mut labels: Vec<String> = Vec::with_capacity(raw.len());
    for label in raw {
        let Some(label) = normalize_label(&label) else {
            return Err(PlannerError::Config(format!("{} contains a blank entry", field)));
        };
        if labels.contains(&label) {
            return Err(PlannerError::Config(format!(
                "{} lists \"{}\" twice",
                field, label
            )));
        }
        labels.push(label);
    }
    Ok(labels)
}
