use futures_util::future::join_all;
use gallery_core::{DataLoader, PhotoRecord, UserInfo};
use gallery_logging::{gallery_debug, gallery_warn};
use url::Url;

use crate::decode::decode_image;
use crate::{CardId, Fetcher, ImageLoadError, LoadedImage, PhotoCard, PhotoSink};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// Base for relative image URLs, normally the manifest URL.
    pub base_url: Option<Url>,
    /// Appended to every image request, e.g. `format=jpg&name=small`.
    pub image_query: Option<String>,
}

/// Resolves a manifest image entry into the URL that is actually requested.
pub fn resolve_image_url(raw: &str, settings: &RenderSettings) -> Result<Url, ImageLoadError> {
    let invalid = |source: url::ParseError| ImageLoadError::InvalidUrl {
        url: raw.to_string(),
        source,
    };
    let mut url = match (Url::parse(raw), settings.base_url.as_ref()) {
        (Ok(url), _) => url,
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => {
            base.join(raw).map_err(invalid)?
        }
        (Err(err), _) => return Err(invalid(err)),
    };

    if let Some(extra) = settings.image_query.as_deref().filter(|q| !q.is_empty()) {
        let merged = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{extra}"),
            _ => extra.to_string(),
        };
        url.set_query(Some(&merged));
    }
    Ok(url)
}

/// Pulls up to `count` records and fans out one attach operation per image.
///
/// Returns once every attach in the batch has settled, reporting whether the
/// cursor is exhausted. Already-exhausted cursors return `true` without
/// touching the sink.
pub async fn load_batch(
    loader: &mut DataLoader<PhotoRecord>,
    sink: &dyn PhotoSink,
    fetcher: &dyn Fetcher,
    settings: &RenderSettings,
    count: usize,
) -> bool {
    let batch = dispatch_batch(loader, sink, settings, count);
    let exhausted = batch.exhausted;
    settle_batch(batch, sink, fetcher).await;
    exhausted
}

/// Placeholders appended for one batch, waiting for their images.
#[derive(Debug)]
pub struct DispatchedBatch {
    pending: Vec<(CardId, Result<Url, ImageLoadError>)>,
    pub exhausted: bool,
}

impl DispatchedBatch {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Synchronous half of `load_batch`: dequeues records and appends one hidden
/// placeholder per image, so container order is dispatch order.
pub fn dispatch_batch(
    loader: &mut DataLoader<PhotoRecord>,
    sink: &dyn PhotoSink,
    settings: &RenderSettings,
    count: usize,
) -> DispatchedBatch {
    if loader.done() {
        return DispatchedBatch {
            pending: Vec::new(),
            exhausted: true,
        };
    }

    let start = loader.position();
    let mut pending = Vec::new();
    let mut exhausted = false;
    for _ in 0..count {
        let Ok((record, is_last)) = loader.next() else {
            exhausted = true;
            break;
        };
        let author = resolve_author(record);
        for raw in &record.image_urls {
            let target = resolve_image_url(raw, settings);
            let shown_url = target
                .as_ref()
                .map(Url::to_string)
                .unwrap_or_else(|_| raw.clone());
            let id = sink.append(PhotoCard::new(record, shown_url, author.clone()));
            pending.push((id, target));
        }
        if is_last {
            exhausted = true;
            break;
        }
    }

    gallery_debug!(
        "Batch dispatched records={} attaches={} exhausted={}",
        loader.position() - start,
        pending.len(),
        exhausted
    );
    DispatchedBatch { pending, exhausted }
}

/// Runs every attach of `batch` concurrently and returns when all have settled.
pub async fn settle_batch(batch: DispatchedBatch, sink: &dyn PhotoSink, fetcher: &dyn Fetcher) {
    let attaches = batch
        .pending
        .into_iter()
        .map(|(id, target)| attach(sink, fetcher, id, target));
    join_all(attaches).await;
}

fn resolve_author(record: &PhotoRecord) -> Option<UserInfo> {
    match record.user_info() {
        Ok(info) => info,
        Err(err) => {
            gallery_warn!(
                "Photo {} has unparseable source url {:?}: {}",
                record.id,
                record.source_url,
                err
            );
            None
        }
    }
}

async fn attach(
    sink: &dyn PhotoSink,
    fetcher: &dyn Fetcher,
    id: CardId,
    target: Result<Url, ImageLoadError>,
) {
    let result = match target {
        Ok(url) => load_image(fetcher, url).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(image) => sink.reveal(id, image),
        Err(err) => {
            gallery_warn!("Dropping card {:?}: {}", id, err);
            sink.remove(id);
        }
    }
}

async fn load_image(fetcher: &dyn Fetcher, url: Url) -> Result<LoadedImage, ImageLoadError> {
    let output = fetcher.fetch(url.as_str()).await?;
    let url = url.to_string();
    tokio::task::spawn_blocking(move || decode_image(&url, output.bytes))
        .await
        .map_err(|err| ImageLoadError::Decode(err.to_string()))?
}
