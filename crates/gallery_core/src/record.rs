use crate::user::{extract_user_from_str, UrlParseError, UserInfo};

pub type PhotoId = u64;

/// One manifest entry. Immutable once built by the manifest normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub image_urls: Vec<String>,
    pub like_count: u64,
    pub created_at: String,
    pub source_url: String,
}

impl PhotoRecord {
    /// Derives the author from `source_url`. Recomputed on every call, never stored.
    pub fn user_info(&self) -> Result<Option<UserInfo>, UrlParseError> {
        extract_user_from_str(&self.source_url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("photo id {0} appears more than once")]
pub struct DuplicateIdError(pub PhotoId);

/// Records sorted strictly ascending by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    records: Vec<PhotoRecord>,
}

impl Dataset {
    /// Sorts by id and rejects duplicates, so the result never depends on
    /// the order the records arrived in.
    pub fn from_records(mut records: Vec<PhotoRecord>) -> Result<Self, DuplicateIdError> {
        records.sort_by_key(|record| record.id);
        if let Some(pair) = records.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(DuplicateIdError(pair[0].id));
        }
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PhotoRecord> {
        self.records
    }
}
