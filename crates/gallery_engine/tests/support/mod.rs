#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, Once};

use gallery_core::{AppState, Msg};
use gallery_engine::{
    CardId, FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher, GallerySession,
    LoadedImage, PhotoCard, PhotoSink,
};
use tokio::sync::mpsc::UnboundedReceiver;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

/// Feeds completions back into the session until nothing is in flight and
/// the channel is drained.
pub async fn settle(
    session: &GallerySession,
    mut state: AppState,
    rx: &mut UnboundedReceiver<Msg>,
) -> AppState {
    loop {
        if let Ok(msg) = rx.try_recv() {
            state = session.dispatch(state, msg);
            continue;
        }
        if session.is_idle() {
            match rx.try_recv() {
                Ok(msg) => state = session.dispatch(state, msg),
                Err(_) => return state,
            }
            continue;
        }
        match rx.recv().await {
            Some(msg) => state = session.dispatch(state, msg),
            None => return state,
        }
    }
}

pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([200, 40, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Appended(CardId),
    Revealed(CardId),
    Removed(CardId),
    Cleared,
    LoadErrorVisible(bool),
    ScrolledToTop,
}

#[derive(Debug, Clone)]
pub struct CardEntry {
    pub card: PhotoCard,
    pub visible: bool,
}

/// Records every call and keeps the container contents.
#[derive(Default)]
pub struct TestSink {
    next_id: AtomicU64,
    events: Mutex<Vec<SinkEvent>>,
    cards: Mutex<BTreeMap<CardId, CardEntry>>,
    load_error_visible: Mutex<bool>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn take_events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }

    pub fn appended(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, SinkEvent::Appended(_)))
            .count()
    }

    pub fn cards(&self) -> Vec<CardEntry> {
        self.cards.lock().unwrap().values().cloned().collect()
    }

    pub fn visible_photo_ids(&self) -> Vec<u64> {
        self.cards()
            .into_iter()
            .filter(|entry| entry.visible)
            .map(|entry| entry.card.photo_id)
            .collect()
    }

    pub fn load_error_visible(&self) -> bool {
        *self.load_error_visible.lock().unwrap()
    }

    fn push(&self, event: SinkEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl PhotoSink for TestSink {
    fn append(&self, card: PhotoCard) -> CardId {
        let id = CardId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.cards.lock().unwrap().insert(
            id,
            CardEntry {
                card,
                visible: false,
            },
        );
        self.push(SinkEvent::Appended(id));
        id
    }

    fn reveal(&self, id: CardId, _image: LoadedImage) {
        if let Some(entry) = self.cards.lock().unwrap().get_mut(&id) {
            entry.visible = true;
        }
        self.push(SinkEvent::Revealed(id));
    }

    fn remove(&self, id: CardId) {
        self.cards.lock().unwrap().remove(&id);
        self.push(SinkEvent::Removed(id));
    }

    fn clear(&self) {
        self.cards.lock().unwrap().clear();
        self.push(SinkEvent::Cleared);
    }

    fn set_load_error_visible(&self, visible: bool) {
        *self.load_error_visible.lock().unwrap() = visible;
        self.push(SinkEvent::LoadErrorVisible(visible));
    }

    fn scroll_to_top(&self) {
        self.push(SinkEvent::ScrolledToTop);
    }
}

/// Serves fixed bodies by URL; anything else is a 404.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(body) => Ok(FetchOutput {
                bytes: body.clone(),
                metadata: FetchMetadata {
                    original_url: url.to_string(),
                    final_url: url.to_string(),
                    redirect_count: 0,
                    content_type: None,
                    byte_len: body.len() as u64,
                },
            }),
            None => Err(FetchError {
                kind: FailureKind::HttpStatus(404),
                message: "404 Not Found".to_string(),
            }),
        }
    }
}
