use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use gallery_core::{update, AppState, DataLoader, Effect, Episode, Msg, PhotoRecord};
use gallery_logging::{gallery_debug, gallery_error, gallery_info, gallery_warn};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::manifest::fetch_photo_data;
use crate::render::{dispatch_batch, settle_batch, RenderSettings};
use crate::PhotoSink;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub manifest: FetchSettings,
    pub images: FetchSettings,
    pub render: RenderSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            manifest: FetchSettings::manifest(),
            images: FetchSettings::images(),
            render: RenderSettings::default(),
        }
    }
}

/// Cursor and render settings; only touched between await points.
struct Cursor {
    loader: DataLoader<PhotoRecord>,
    render: RenderSettings,
}

/// Per-gallery context: the cursor, the container and the fetchers.
///
/// Effects run without blocking the caller. Work that awaits IO is spawned
/// on the current tokio runtime and reports back as a `Msg` on the channel
/// given to `new`, so input keeps flowing through `update` while a batch is
/// in flight.
pub struct GallerySession {
    cursor: Arc<Mutex<Cursor>>,
    manifest_fetcher: Arc<dyn Fetcher>,
    image_fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn PhotoSink>,
    msg_tx: UnboundedSender<Msg>,
    in_flight: Arc<AtomicUsize>,
}

impl GallerySession {
    pub fn new(sink: Arc<dyn PhotoSink>, config: SessionConfig, msg_tx: UnboundedSender<Msg>) -> Self {
        Self::with_fetchers(
            sink,
            Arc::new(ReqwestFetcher::new(config.manifest)),
            Arc::new(ReqwestFetcher::new(config.images)),
            config.render,
            msg_tx,
        )
    }

    pub fn with_fetchers(
        sink: Arc<dyn PhotoSink>,
        manifest_fetcher: Arc<dyn Fetcher>,
        image_fetcher: Arc<dyn Fetcher>,
        render: RenderSettings,
        msg_tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            cursor: Arc::new(Mutex::new(Cursor {
                loader: DataLoader::default(),
                render,
            })),
            manifest_fetcher,
            image_fetcher,
            sink,
            msg_tx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Cursor position, for status display and tests.
    pub fn position(&self) -> usize {
        lock(&self.cursor).loader.position()
    }

    pub fn photo_count(&self) -> usize {
        lock(&self.cursor).loader.len()
    }

    /// True when no spawned fetch or batch is still running. Every spawned
    /// task sends its message before it stops counting as in flight.
    pub fn is_idle(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) == 0
    }

    /// Runs `msg` through `update` and starts the resulting effects.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, state: AppState, msg: Msg) -> AppState {
        let (state, effects) = update(state, msg);
        self.enqueue(effects);
        state
    }

    /// Executes effects in order. Container and cursor effects apply before
    /// this returns; IO completes later on the message channel.
    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchManifest { url } => self.spawn_manifest_fetch(url),
                Effect::ShowLoadError => self.sink.set_load_error_visible(true),
                Effect::ClearPhotos => self.sink.clear(),
                Effect::ResetAndShuffle => {
                    let mut cursor = lock(&self.cursor);
                    cursor.loader.reset();
                    cursor.loader.shuffle();
                }
                Effect::LoadBatch { episode, count } => self.spawn_batch(episode, count),
                Effect::ScrollToTop => self.sink.scroll_to_top(),
            }
        }
    }

    fn spawn_manifest_fetch(&self, url: String) {
        {
            let mut cursor = lock(&self.cursor);
            if cursor.render.base_url.is_none() {
                cursor.render.base_url = Url::parse(&url).ok();
            }
        }

        let cursor = Arc::clone(&self.cursor);
        let fetcher = Arc::clone(&self.manifest_fetcher);
        let msg_tx = self.msg_tx.clone();
        let in_flight = self.begin_task();
        tokio::spawn(async move {
            let msg = match fetch_photo_data(fetcher.as_ref(), &url).await {
                Ok(dataset) => {
                    let count = dataset.len();
                    lock(&cursor).loader = DataLoader::new(dataset.into_records());
                    Msg::ManifestLoaded { count }
                }
                Err(err) => {
                    gallery_error!("Manifest {} unavailable: {}", url, err);
                    lock(&cursor).loader = DataLoader::default();
                    gallery_info!("Continuing with an empty gallery");
                    Msg::ManifestFailed {
                        reason: err.to_string(),
                    }
                }
            };
            send(&msg_tx, msg);
            in_flight.fetch_sub(1, Ordering::Release);
        });
    }

    fn spawn_batch(&self, episode: Episode, count: usize) {
        let batch = {
            let mut cursor = lock(&self.cursor);
            gallery_debug!(
                "LoadBatch episode={} count={} position={}",
                episode,
                count,
                cursor.loader.position()
            );
            let Cursor { loader, render } = &mut *cursor;
            dispatch_batch(loader, self.sink.as_ref(), render, count)
        };

        let sink = Arc::clone(&self.sink);
        let fetcher = Arc::clone(&self.image_fetcher);
        let msg_tx = self.msg_tx.clone();
        let in_flight = self.begin_task();
        tokio::spawn(async move {
            let exhausted = batch.exhausted;
            settle_batch(batch, sink.as_ref(), fetcher.as_ref()).await;
            send(&msg_tx, Msg::BatchLoaded { episode, exhausted });
            in_flight.fetch_sub(1, Ordering::Release);
        });
    }

    fn begin_task(&self) -> Arc<AtomicUsize> {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        Arc::clone(&self.in_flight)
    }
}

fn lock(cursor: &Mutex<Cursor>) -> MutexGuard<'_, Cursor> {
    cursor.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn send(msg_tx: &UnboundedSender<Msg>, msg: Msg) {
    if msg_tx.send(msg).is_err() {
        gallery_warn!("Message receiver closed; dropping completion");
    }
}
