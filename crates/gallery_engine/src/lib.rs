//! Gallery engine: manifest and image IO, batch rendering and effect execution.
mod decode;
mod fetch;
mod manifest;
mod render;
mod session;
mod sink;
mod types;

pub use decode::{decode_image, LoadedImage};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use manifest::{fetch_photo_data, parse_manifest};
pub use render::{
    dispatch_batch, load_batch, resolve_image_url, settle_batch, DispatchedBatch, RenderSettings,
};
pub use session::{GallerySession, SessionConfig};
pub use sink::{CardId, PhotoCard, PhotoSink};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ImageLoadError, ManifestError};
