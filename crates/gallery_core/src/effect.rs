#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchManifest { url: String },
    /// Make the load-error indicator visible.
    ShowLoadError,
    ClearPhotos,
    ResetAndShuffle,
    LoadBatch { episode: crate::Episode, count: usize },
    ScrollToTop,
}
