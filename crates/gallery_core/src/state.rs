use crate::view_model::AppViewModel;
use crate::{Effect, ScrollMetrics};

/// Identifies one batch-load episode so late completions can be told apart.
pub type Episode = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerSettings {
    /// Records loaded right after the manifest arrives and after a reshuffle.
    pub initial_batch: usize,
    /// Records loaded per scroll-triggered episode.
    pub scroll_batch: usize,
    /// Loading starts once the viewport is within this many viewport heights
    /// of the page bottom.
    pub page_height_multiplier: u32,
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            initial_batch: 10,
            scroll_batch: 10,
            page_height_multiplier: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: PagerSettings,
    manifest_url: Option<String>,
    photo_count: usize,
    /// Set while a batch episode is in flight, and for good once exhausted.
    latched: bool,
    exhausted: bool,
    load_error_visible: bool,
    /// Why the manifest could not be loaded, once it has failed.
    load_error: Option<String>,
    episode: Episode,
    batches_requested: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(PagerSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts latched: scrolling does nothing until the manifest has arrived.
    pub fn with_settings(settings: PagerSettings) -> Self {
        Self {
            settings,
            manifest_url: None,
            photo_count: 0,
            latched: true,
            exhausted: false,
            load_error_visible: false,
            load_error: None,
            episode: 0,
            batches_requested: 0,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &PagerSettings {
        &self.settings
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            manifest_url: self.manifest_url.clone(),
            photo_count: self.photo_count,
            loading: self.latched && !self.exhausted,
            exhausted: self.exhausted,
            load_error_visible: self.load_error_visible,
            load_error: self.load_error.clone(),
            batches_requested: self.batches_requested,
            dirty: self.dirty,
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_manifest_url(&mut self, url: String) {
        self.manifest_url = Some(url);
        self.mark_dirty();
    }

    pub(crate) fn set_photo_count(&mut self, count: usize) {
        self.photo_count = count;
        self.exhausted = false;
        self.load_error_visible = false;
        self.load_error = None;
        self.mark_dirty();
    }

    /// Empty dataset: nothing left to load, so the latch stays set.
    pub(crate) fn fail_manifest(&mut self, reason: String) {
        self.photo_count = 0;
        self.load_error_visible = true;
        self.load_error = Some(reason);
        self.latched = true;
        self.exhausted = true;
        self.mark_dirty();
    }

    pub(crate) fn scroll_crossed_threshold(&self, metrics: ScrollMetrics) -> bool {
        let threshold = i64::from(metrics.page_height)
            - i64::from(metrics.viewport_height) * i64::from(self.settings.page_height_multiplier);
        i64::from(metrics.scroll_y) > threshold
    }

    /// Sets the latch and opens a new episode. Any episode still in flight
    /// becomes stale.
    pub(crate) fn begin_episode(&mut self, count: usize) -> Effect {
        self.latched = true;
        self.exhausted = false;
        self.episode += 1;
        self.batches_requested += 1;
        self.mark_dirty();
        Effect::LoadBatch {
            episode: self.episode,
            count,
        }
    }

    /// Returns false when `episode` was superseded and the completion is ignored.
    pub(crate) fn finish_episode(&mut self, episode: Episode, exhausted: bool) -> bool {
        if episode != self.episode {
            return false;
        }
        self.exhausted = exhausted;
        self.latched = exhausted;
        self.mark_dirty();
        true
    }
}
