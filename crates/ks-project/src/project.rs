use std::fs;
use std::path::{Component, Path, PathBuf};

use ks_core::{
    scenario_file_name, KsError, ResourceCategory, ResourceLocator, ValidationReport,
    SCENARIO_EXTENSION,
};
use ks_validator::validate_scenario;
use tracing::debug;
use walkdir::WalkDir;

use crate::ProjectLayout;

/// An authoring project on disk. Resources live at
/// `<root>/<data_dir>/<subfolder>/<relative path>`.
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    root: PathBuf,
    layout: ProjectLayout,
}

impl ProjectRoot {
    /// Relative `dir` resolves against the current directory.
    pub fn open(dir: &str, layout: ProjectLayout) -> Result<Self, KsError> {
        let path = PathBuf::from(dir);
        let root = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()
                .map_err(|error| KsError::new("PROJECT_PATH", error.to_string()))?
                .join(path)
        };

        if !root.exists() {
            return Err(KsError::new(
                "PROJECT_NOT_FOUND",
                format!("project directory does not exist: {}", root.display()),
            ));
        }
        if !root.is_dir() {
            return Err(KsError::new(
                "PROJECT_NOT_DIR",
                format!("project path is not a directory: {}", root.display()),
            ));
        }

        debug!(root = %root.display(), "opened project");
        Ok(Self { root, layout })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: ResourceCategory) -> PathBuf {
        self.root
            .join(&self.layout.data_dir)
            .join(self.layout.subfolder(category))
    }

    /// `None` when `relative_path` is absolute or climbs out of the
    /// category folder with `..`.
    pub fn resolve(&self, category: ResourceCategory, relative_path: &str) -> Option<PathBuf> {
        let contained = Path::new(relative_path)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.category_dir(category).join(relative_path))
    }

    pub fn scenario_path(&self, name: &str) -> Option<PathBuf> {
        self.resolve(ResourceCategory::SubScript, &scenario_file_name(name))
    }

    pub fn read_scenario(&self, name: &str) -> Result<String, KsError> {
        let path = match self.scenario_path(name) {
            Some(path) if path.is_file() => path,
            _ => {
                return Err(KsError::new(
                    "PROJECT_SCENARIO_NOT_FOUND",
                    format!("scenario file '{}' not found", scenario_file_name(name)),
                ))
            }
        };
        fs::read_to_string(&path).map_err(|error| {
            KsError::new(
                "PROJECT_SCENARIO_READ",
                format!("Failed to read {}: {}", path.display(), error),
            )
        })
    }

    pub fn write_scenario(&self, name: &str, content: &str) -> Result<PathBuf, KsError> {
        let path = self.scenario_path(name).ok_or_else(|| {
            KsError::new(
                "PROJECT_SCENARIO_WRITE",
                format!(
                    "scenario '{}' is outside the scenario folder",
                    scenario_file_name(name)
                ),
            )
        })?;
        let write_error = |error: std::io::Error| {
            KsError::new(
                "PROJECT_SCENARIO_WRITE",
                format!("Failed to write {}: {}", path.display(), error),
            )
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&path, content).map_err(write_error)?;
        Ok(path)
    }

    /// Scenario files under the scenario folder, as sorted `/`-separated
    /// paths relative to it.
    pub fn list_scenarios(&self) -> Result<Vec<String>, KsError> {
        let scenario_dir = self.category_dir(ResourceCategory::SubScript);
        let mut scenarios = Vec::new();

        for entry in WalkDir::new(&scenario_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !path.to_string_lossy().ends_with(SCENARIO_EXTENSION) {
                continue;
            }
            let relative = path
                .strip_prefix(&scenario_dir)
                .map_err(|error| KsError::new("PROJECT_SCENARIO_SCAN", error.to_string()))?
                .to_string_lossy()
                .replace('\\', "/");
            scenarios.push(relative);
        }

        if scenarios.is_empty() {
            return Err(KsError::new(
                "PROJECT_SCENARIO_EMPTY",
                format!("No {} files under {}", SCENARIO_EXTENSION, scenario_dir.display()),
            ));
        }

        scenarios.sort();
        Ok(scenarios)
    }

    pub fn validate(&self, name: &str) -> Result<ValidationReport, KsError> {
        let source = self.read_scenario(name)?;
        Ok(validate_scenario(&source, self))
    }

    pub fn validate_all(&self) -> Result<Vec<(String, ValidationReport)>, KsError> {
        self.list_scenarios()?
            .into_iter()
            .map(|name| {
                let report = self.validate(&name)?;
                Ok((name, report))
            })
            .collect()
    }
}

impl ResourceLocator for ProjectRoot {
    fn exists(&self, category: ResourceCategory, relative_path: &str) -> bool {
        let found = self
            .resolve(category, relative_path)
            .is_some_and(|path| path.is_file());
        if !found {
            debug!(?category, path = relative_path, "resource missing");
        }
        found
    }
}
