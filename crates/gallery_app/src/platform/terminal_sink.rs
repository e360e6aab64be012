use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use gallery_core::ScrollMetrics;
use gallery_engine::{CardId, LoadedImage, PhotoCard, PhotoSink};
use gallery_logging::gallery_debug;

use super::ui::constants::CARD_ROWS;
use super::ui::render::{card_lines, CardView};

enum Slot {
    /// Appended but not yet decoded; takes no rows.
    Pending(PhotoCard),
    Shown(CardView),
}

#[derive(Default)]
struct Page {
    slots: BTreeMap<CardId, Slot>,
    scroll_row: u32,
    load_error_visible: bool,
}

impl Page {
    fn shown(&self) -> impl Iterator<Item = &CardView> {
        self.slots.values().filter_map(|slot| match slot {
            Slot::Shown(view) => Some(view),
            Slot::Pending(_) => None,
        })
    }

    fn page_rows(&self) -> u32 {
        self.shown().count() as u32 * CARD_ROWS
    }
}

/// Photo container laid out as a scrollable column of text rows.
pub struct TerminalSink {
    next_id: AtomicU64,
    viewport_rows: u32,
    page: Mutex<Page>,
}

impl TerminalSink {
    pub fn new(viewport_rows: u32) -> Self {
        Self {
            next_id: AtomicU64::new(0),
            viewport_rows: viewport_rows.max(1),
            page: Mutex::new(Page::default()),
        }
    }

    fn page(&self) -> std::sync::MutexGuard<'_, Page> {
        // A panic while holding the lock leaves the page usable.
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn metrics(&self) -> ScrollMetrics {
        let page = self.page();
        ScrollMetrics {
            scroll_y: page.scroll_row,
            viewport_height: self.viewport_rows,
            page_height: page.page_rows(),
        }
    }

    /// Scrolls by `rows`, clamped to the page.
    pub fn scroll_by(&self, rows: i64) {
        let mut page = self.page();
        let max_row = page.page_rows().saturating_sub(self.viewport_rows);
        let target = (i64::from(page.scroll_row) + rows).clamp(0, i64::from(max_row));
        page.scroll_row = target as u32;
    }

    pub fn viewport_rows(&self) -> u32 {
        self.viewport_rows
    }

    pub fn shown_count(&self) -> usize {
        self.page().shown().count()
    }

    pub fn load_error_visible(&self) -> bool {
        self.page().load_error_visible
    }

    /// Lines currently inside the viewport.
    pub fn visible_lines(&self) -> Vec<String> {
        let page = self.page();
        page.shown()
            .flat_map(card_lines)
            .skip(page.scroll_row as usize)
            .take(self.viewport_rows as usize)
            .collect()
    }
}

impl PhotoSink for TerminalSink {
    fn append(&self, card: PhotoCard) -> CardId {
        let id = CardId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.page().slots.insert(id, Slot::Pending(card));
        id
    }

    fn reveal(&self, id: CardId, image: LoadedImage) {
        let mut page = self.page();
        let Some(slot) = page.slots.get_mut(&id) else {
            gallery_debug!("Ignoring reveal for discarded card {:?}", id);
            return;
        };
        if let Slot::Pending(card) = slot {
            let view = CardView {
                card: card.clone(),
                width: image.width,
                height: image.height,
            };
            *slot = Slot::Shown(view);
        }
    }

    fn remove(&self, id: CardId) {
        self.page().slots.remove(&id);
    }

    fn clear(&self) {
        let mut page = self.page();
        page.slots.clear();
        page.scroll_row = 0;
    }

    fn set_load_error_visible(&self, visible: bool) {
        self.page().load_error_visible = visible;
    }

    fn scroll_to_top(&self) {
        self.page().scroll_row = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64) -> PhotoCard {
        PhotoCard {
            photo_id: id,
            image_url: format!("https://cdn.example/{id}.png"),
            source_url: "https://unknown.example/x".to_string(),
            author: None,
            like_count: 0,
            created_at: "t".to_string(),
        }
    }

    fn image() -> LoadedImage {
        LoadedImage {
            url: "https://cdn.example/x.png".to_string(),
            width: 2,
            height: 2,
            bytes: Vec::new(),
        }
    }

    #[test]
    fn pending_cards_take_no_space_until_revealed() {
        let sink = TerminalSink::new(6);
        let id = sink.append(card(1));
        assert_eq!(sink.metrics().page_height, 0);

        sink.reveal(id, image());
        assert_eq!(sink.metrics().page_height, CARD_ROWS);
        assert_eq!(sink.visible_lines().len(), CARD_ROWS as usize);
    }

    #[test]
    fn stale_updates_after_clear_are_ignored() {
        let sink = TerminalSink::new(6);
        let id = sink.append(card(1));
        sink.clear();

        sink.reveal(id, image());
        sink.remove(id);
        assert_eq!(sink.shown_count(), 0);
    }

    #[test]
    fn scrolling_is_clamped_to_the_page() {
        let sink = TerminalSink::new(6);
        for n in 0..4 {
            let id = sink.append(card(n));
            sink.reveal(id, image());
        }
        // 4 cards * 3 rows = 12 rows, viewport 6 -> max scroll 6.
        sink.scroll_by(100);
        assert_eq!(sink.metrics().scroll_y, 6);
        sink.scroll_by(-2);
        assert_eq!(sink.metrics().scroll_y, 4);
        sink.scroll_to_top();
        assert_eq!(sink.metrics().scroll_y, 0);
        sink.scroll_by(-5);
        assert_eq!(sink.metrics().scroll_y, 0);
    }

    #[test]
    fn viewport_shows_lines_from_scroll_position() {
        let sink = TerminalSink::new(3);
        for n in 1..=2 {
            let id = sink.append(card(n));
            sink.reveal(id, image());
        }
        sink.scroll_by(3);
        let lines = sink.visible_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#2"));
    }

    #[test]
    fn load_error_indicator_toggles() {
        let sink = TerminalSink::new(3);
        assert!(!sink.load_error_visible());
        sink.set_load_error_visible(true);
        assert!(sink.load_error_visible());
    }
}
