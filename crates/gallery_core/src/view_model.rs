#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub manifest_url: Option<String>,
    pub photo_count: usize,
    pub loading: bool,
    pub exhausted: bool,
    pub load_error_visible: bool,
    pub load_error: Option<String>,
    pub batches_requested: u64,
    pub dirty: bool,
}
