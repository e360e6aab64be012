use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use gallery_core::{AppState, Msg};
use gallery_engine::GallerySession;
use gallery_logging::{gallery_info, gallery_warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::config::GalleryConfig;
use super::terminal_sink::TerminalSink;
use super::ui::constants::{
    KEY_HELP, KEY_QUIT, KEY_SCROLL_DOWN, KEY_SCROLL_UP, KEY_SHUFFLE, KEY_TOP,
};
use super::ui::render::{help_line, status_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    ScrollDown,
    ScrollUp,
    Shuffle,
    Top,
    Help,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "" | KEY_SCROLL_DOWN => Command::ScrollDown,
        KEY_SCROLL_UP => Command::ScrollUp,
        KEY_SHUFFLE => Command::Shuffle,
        KEY_TOP => Command::Top,
        KEY_HELP => Command::Help,
        KEY_QUIT => Command::Quit,
        _ => Command::Unknown,
    }
}

pub fn run_app(config: GalleryConfig, shuffle_on_start: bool) -> anyhow::Result<()> {
    let manifest_url = config
        .manifest_url
        .clone()
        .context("no manifest URL given on the command line or in the config file")?;

    // One cooperative event loop; image loads interleave at await points only.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let sink = Arc::new(TerminalSink::new(config.viewport_rows));
    let (msg_tx, msg_rx) = mpsc::unbounded_channel();
    let session = GallerySession::new(sink.clone(), config.session_config(), msg_tx);
    let state = AppState::with_settings(config.pager_settings());

    let (line_tx, line_rx) = mpsc::unbounded_channel();
    spawn_input_reader(line_tx);

    gallery_info!("Opening gallery {}", manifest_url);
    runtime.block_on(event_loop(
        &session,
        &sink,
        state,
        manifest_url,
        shuffle_on_start,
        msg_rx,
        line_rx,
    ))?;

    gallery_info!("Gallery closed");
    Ok(())
}

/// Blocking stdin reads live on their own thread so completions keep
/// arriving while the user is idle.
fn spawn_input_reader(line_tx: UnboundedSender<String>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    gallery_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });
}

async fn event_loop(
    session: &GallerySession,
    sink: &TerminalSink,
    mut state: AppState,
    manifest_url: String,
    shuffle_on_start: bool,
    mut msg_rx: UnboundedReceiver<Msg>,
    mut line_rx: UnboundedReceiver<String>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut shuffle_pending = shuffle_on_start;

    state = session.dispatch(state, Msg::PageLoaded { manifest_url });
    draw(&mut stdout.lock(), sink, &state)?;

    loop {
        tokio::select! {
            Some(msg) = msg_rx.recv() => {
                let manifest_ready = matches!(msg, Msg::ManifestLoaded { .. });
                state = session.dispatch(state, msg);
                if manifest_ready && shuffle_pending {
                    shuffle_pending = false;
                    state = session.dispatch(state, Msg::ShuffleClicked);
                }
            }
            line = line_rx.recv() => {
                // Input closed behaves like quit.
                let Some(line) = line else { break };
                let msg = match parse_command(&line) {
                    Command::Quit => break,
                    Command::ScrollDown => {
                        sink.scroll_by(i64::from(sink.viewport_rows()));
                        Msg::Scrolled(sink.metrics())
                    }
                    Command::ScrollUp => {
                        sink.scroll_by(-i64::from(sink.viewport_rows()));
                        Msg::Scrolled(sink.metrics())
                    }
                    Command::Shuffle => Msg::ShuffleClicked,
                    Command::Top => Msg::ScrollTopClicked,
                    Command::Help | Command::Unknown => {
                        writeln!(stdout.lock(), "{}", help_line())?;
                        continue;
                    }
                };
                state = session.dispatch(state, msg);
            }
        }
        draw(&mut stdout.lock(), sink, &state)?;
    }
    Ok(())
}

fn draw(out: &mut impl Write, sink: &TerminalSink, state: &AppState) -> io::Result<()> {
    for line in sink.visible_lines() {
        writeln!(out, "{line}")?;
    }
    let view = state.view();
    writeln!(out, "-- {} --", status_line(&view, sink.shown_count()))?;
    if sink.load_error_visible() {
        writeln!(out, "!! Failed to load photo data.")?;
    }
    out.flush()
}
