/// Terminal rows taken by one revealed photo card.
pub const CARD_ROWS: u32 = 3;
pub const DEFAULT_VIEWPORT_ROWS: u32 = 24;

pub const KEY_SCROLL_DOWN: &str = "j";
pub const KEY_SCROLL_UP: &str = "k";
pub const KEY_SHUFFLE: &str = "s";
pub const KEY_TOP: &str = "t";
pub const KEY_QUIT: &str = "q";
pub const KEY_HELP: &str = "?";
