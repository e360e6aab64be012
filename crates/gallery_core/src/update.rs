use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded { manifest_url } => {
            state.set_manifest_url(manifest_url.clone());
            vec![Effect::FetchManifest { url: manifest_url }]
        }
        Msg::ManifestLoaded { count } => {
            state.set_photo_count(count);
            let initial = state.settings().initial_batch;
            vec![state.begin_episode(initial)]
        }
        Msg::ManifestFailed { reason } => {
            state.fail_manifest(reason);
            vec![Effect::ShowLoadError]
        }
        Msg::Scrolled(metrics) => {
            // A scroll arriving while latched is dropped, not queued.
            if state.is_latched() || !state.scroll_crossed_threshold(metrics) {
                return (state, Vec::new());
            }
            let count = state.settings().scroll_batch;
            vec![state.begin_episode(count)]
        }
        Msg::BatchLoaded { episode, exhausted } => {
            state.finish_episode(episode, exhausted);
            Vec::new()
        }
        Msg::ShuffleClicked => {
            let initial = state.settings().initial_batch;
            vec![
                Effect::ClearPhotos,
                Effect::ResetAndShuffle,
                state.begin_episode(initial),
            ]
        }
        Msg::ScrollTopClicked => vec![Effect::ScrollToTop],
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
