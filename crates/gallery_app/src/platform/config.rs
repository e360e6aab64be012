use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use gallery_core::PagerSettings;
use gallery_engine::{FetchSettings, RenderSettings, SessionConfig};
use gallery_logging::gallery_info;
use serde::{Deserialize, Serialize};

use super::ui::constants::DEFAULT_VIEWPORT_ROWS;

/// User-facing settings, read from a RON file. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub manifest_url: Option<String>,
    pub initial_batch: usize,
    pub scroll_batch: usize,
    pub page_height_multiplier: u32,
    pub image_query: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: u64,
    pub viewport_rows: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let pager = PagerSettings::default();
        let images = FetchSettings::images();
        Self {
            manifest_url: None,
            initial_batch: pager.initial_batch,
            scroll_batch: pager.scroll_batch,
            page_height_multiplier: pager.page_height_multiplier,
            image_query: None,
            connect_timeout_secs: images.connect_timeout.as_secs(),
            request_timeout_secs: images.request_timeout.as_secs(),
            max_image_bytes: images.max_bytes,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
        }
    }
}

impl GalleryConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        gallery_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn pager_settings(&self) -> PagerSettings {
        PagerSettings {
            initial_batch: self.initial_batch,
            scroll_batch: self.scroll_batch,
            page_height_multiplier: self.page_height_multiplier,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        let connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        let request_timeout = Duration::from_secs(self.request_timeout_secs);
        SessionConfig {
            manifest: FetchSettings {
                connect_timeout,
                request_timeout,
                ..FetchSettings::manifest()
            },
            images: FetchSettings {
                connect_timeout,
                request_timeout,
                max_bytes: self.max_image_bytes,
                ..FetchSettings::images()
            },
            render: RenderSettings {
                base_url: None,
                image_query: self.image_query.clone(),
            },
        }
    }
}
