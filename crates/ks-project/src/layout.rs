use std::fs;
use std::path::Path;

use ks_core::{KsError, ResourceCategory};
use serde::{Deserialize, Serialize};

/// Folder names inside a project. Every key is optional in a layout file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectLayout {
    pub data_dir: String,
    pub scenario_dir: String,
    pub background_image_dir: String,
    pub image_dir: String,
    pub character_image_dir: String,
    pub bgm_dir: String,
    pub sound_dir: String,
    pub video_dir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        let folder = |category: ResourceCategory| category.default_subfolder().to_string();
        Self {
            data_dir: "data".to_string(),
            scenario_dir: folder(ResourceCategory::SubScript),
            background_image_dir: folder(ResourceCategory::BackgroundImage),
            image_dir: folder(ResourceCategory::GenericImage),
            character_image_dir: folder(ResourceCategory::CharacterImage),
            bgm_dir: folder(ResourceCategory::Bgm),
            sound_dir: folder(ResourceCategory::SoundEffect),
            video_dir: folder(ResourceCategory::Video),
        }
    }
}

impl ProjectLayout {
    pub fn subfolder(&self, category: ResourceCategory) -> &str {
        match category {
            ResourceCategory::SubScript => &self.scenario_dir,
            ResourceCategory::BackgroundImage => &self.background_image_dir,
            ResourceCategory::GenericImage => &self.image_dir,
            ResourceCategory::CharacterImage => &self.character_image_dir,
            ResourceCategory::Bgm => &self.bgm_dir,
            ResourceCategory::SoundEffect => &self.sound_dir,
            ResourceCategory::Video => &self.video_dir,
        }
    }

    pub fn load(path: &Path) -> Result<Self, KsError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            KsError::new(
                "LAYOUT_READ",
                format!("Failed to read layout {}: {}", path.display(), error),
            )
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            KsError::new(
                "LAYOUT_INVALID",
                format!("Invalid layout {}: {}", path.display(), error),
            )
        })
    }
}
