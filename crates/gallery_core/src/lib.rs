//! Gallery core: dataset types, the sequencing cursor and the pure pager state machine.
mod effect;
mod loader;
mod msg;
mod record;
mod shuffle;
mod state;
mod update;
mod user;
mod view_model;

pub use effect::Effect;
pub use loader::{DataLoader, ExhaustedError, LoaderState};
pub use msg::{Msg, ScrollMetrics};
pub use record::{Dataset, DuplicateIdError, PhotoId, PhotoRecord};
pub use shuffle::shuffle;
pub use state::{AppState, Episode, PagerSettings};
pub use update::update;
pub use user::{extract_user, extract_user_from_str, Service, UrlParseError, UserInfo};
pub use view_model::AppViewModel;
