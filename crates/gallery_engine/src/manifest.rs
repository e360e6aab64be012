use std::collections::HashMap;

use gallery_core::{Dataset, PhotoId, PhotoRecord};
use gallery_logging::gallery_info;
use serde::Deserialize;

use crate::{Fetcher, ManifestError};

/// One value of the manifest object, keyed by its decimal id.
#[derive(Debug, Clone, Deserialize)]
struct RawPhotoItem {
    image: Vec<String>,
    like_count: u64,
    created_at: String,
    tweet_url: String,
}

/// Parses `{ "<id>": { image, like_count, created_at, tweet_url }, ... }`
/// into a dataset sorted ascending by id.
pub fn parse_manifest(bytes: &[u8]) -> Result<Dataset, ManifestError> {
    let raw: HashMap<String, RawPhotoItem> = serde_json::from_slice(bytes)?;

    let records = raw
        .into_iter()
        .map(|(key, item)| {
            let id = key
                .parse::<PhotoId>()
                .map_err(|_| ManifestError::InvalidId { key: key.clone() })?;
            Ok(PhotoRecord {
                id,
                image_urls: item.image,
                like_count: item.like_count,
                created_at: item.created_at,
                source_url: item.tweet_url,
            })
        })
        .collect::<Result<Vec<_>, ManifestError>>()?;

    Ok(Dataset::from_records(records)?)
}

pub async fn fetch_photo_data(fetcher: &dyn Fetcher, url: &str) -> Result<Dataset, ManifestError> {
    gallery_info!("Fetching manifest url={}", url);
    let output = fetcher.fetch(url).await?;
    let dataset = parse_manifest(&output.bytes)?;
    gallery_info!(
        "Manifest loaded url={} records={} bytes={}",
        output.metadata.final_url,
        dataset.len(),
        output.metadata.byte_len
    );
    Ok(dataset)
}
