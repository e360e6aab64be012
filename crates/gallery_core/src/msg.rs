#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Distance from the top of the page to the top of the viewport.
    pub scroll_y: u32,
    pub viewport_height: u32,
    pub page_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host page finished loading; start fetching the manifest.
    PageLoaded { manifest_url: String },
    /// Manifest fetched and normalized into `count` records.
    ManifestLoaded { count: usize },
    /// Manifest fetch or parse failed; the session continues empty.
    ManifestFailed { reason: String },
    /// User scrolled the page.
    Scrolled(ScrollMetrics),
    /// A `LoadBatch` effect settled.
    BatchLoaded {
        episode: crate::Episode,
        exhausted: bool,
    },
    /// User clicked the shuffle control.
    ShuffleClicked,
    /// User clicked the scroll-to-top control.
    ScrollTopClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
