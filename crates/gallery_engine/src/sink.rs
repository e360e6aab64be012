use gallery_core::{PhotoId, PhotoRecord, UserInfo};

use crate::LoadedImage;

/// Handle for one placeholder in the photo container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u64);

/// Everything a placeholder shows besides the image itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCard {
    pub photo_id: PhotoId,
    /// The URL actually requested, after base resolution and query suffix.
    pub image_url: String,
    /// Where clicking the photo leads.
    pub source_url: String,
    pub author: Option<UserInfo>,
    pub like_count: u64,
    pub created_at: String,
}

impl PhotoCard {
    pub fn new(record: &PhotoRecord, image_url: String, author: Option<UserInfo>) -> Self {
        Self {
            photo_id: record.id,
            image_url,
            source_url: record.source_url.clone(),
            author,
            like_count: record.like_count,
            created_at: record.created_at.clone(),
        }
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().and_then(|info| info.user_name.as_deref())
    }

    /// Profile link when the service is known, otherwise the raw source URL.
    pub fn author_link(&self) -> &str {
        self.author
            .as_ref()
            .map(|info| info.profile_url.as_str())
            .unwrap_or(&self.source_url)
    }
}

/// The host page's photo container and indicators.
///
/// Methods take `&self` because attach operations for one batch run
/// concurrently. `reveal` and `remove` may arrive for cards that `clear`
/// already discarded; implementations must treat those as no-ops.
pub trait PhotoSink: Send + Sync {
    /// Appends a hidden placeholder and returns its handle.
    fn append(&self, card: PhotoCard) -> CardId;
    /// Makes a placeholder visible once its image has decoded.
    fn reveal(&self, id: CardId, image: LoadedImage);
    fn remove(&self, id: CardId);
    /// Drops every placeholder.
    fn clear(&self);
    fn set_load_error_visible(&self, visible: bool);
    fn scroll_to_top(&self);
}
