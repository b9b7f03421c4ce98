//! File system watcher for automatic re-rendering.
//!
//! Watches the slide file, the settings file and any custom base template,
//! and rebuilds the presentation after a debounce period. Parent directories
//! are watched rather than the files themselves so editors that save by
//! replacing the file are still noticed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::time::Duration;

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::Settings;
use crate::error::Result;
use crate::pipeline::{BuildOptions, Pipeline, do_build};
use crate::theme::ThemeTable;

/// Build once, then rebuild whenever a source changes.
///
/// Settings, template and theme are checked first; a failure there is
/// returned instead of being retried on every change. After that this
/// function blocks until the watcher disconnects.
pub fn watch(
    themes: &ThemeTable,
    options: &BuildOptions,
    input: &Path,
    output: &Path,
    debounce: Duration,
) -> Result<()> {
    Pipeline::load(themes, options)?;

    tracing::info!("performing initial build");
    rebuild(themes, options, input, output);

    let sources = sources(options, input)?;

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default(),
    )?;

    let dirs: BTreeSet<&Path> = sources.iter().filter_map(|p| p.parent()).collect();
    for dir in dirs {
        tracing::info!(path = %dir.display(), "watching directory");
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }

    tracing::info!(
        debounce_ms = debounce.as_millis() as u64,
        "watch mode active, press Ctrl+C to stop"
    );

    let mut needs_rebuild = false;

    loop {
        match rx.recv_timeout(debounce) {
            Ok(event) => {
                let _span = tracing::debug_span!(
                    "file_event",
                    kind = ?event.kind,
                    paths = ?event.paths,
                )
                .entered();

                if !is_relevant(&event, &sources) {
                    tracing::debug!("ignoring event (filtered)");
                    continue;
                }

                if !needs_rebuild {
                    tracing::info!("change detected, waiting for more changes...");
                }
                needs_rebuild = true;
            }
            Err(RecvTimeoutError::Timeout) => {
                if needs_rebuild {
                    rebuild(themes, options, input, output);
                    needs_rebuild = false;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("watcher disconnected, stopping");
                break;
            }
        }
    }

    Ok(())
}

fn rebuild(themes: &ThemeTable, options: &BuildOptions, input: &Path, output: &Path) {
    match do_build(themes, options, input, output) {
        Ok(summary) => tracing::info!(
            output = %summary.output.display(),
            theme = %summary.theme,
            slides = summary.slides,
            "generated presentation"
        ),
        Err(e) => tracing::error!(error = %e, "build failed"),
    }
}

/// Absolute paths whose changes trigger a rebuild.
///
/// The template named in the settings file is included, but only as it is
/// when watching starts.
fn sources(options: &BuildOptions, input: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = vec![absolute(input)?];

    if let Some(config) = &options.config {
        paths.push(absolute(config)?);
    }

    let template = match &options.template {
        Some(template) => Some(template.clone()),
        None => Settings::load_optional(options.config.as_deref())
            .ok()
            .and_then(|s| s.template),
    };
    if let Some(template) = template {
        paths.push(absolute(&template)?);
    }

    Ok(paths)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

/// Check if an event touches one of the watched sources.
pub fn is_relevant(event: &notify::Event, sources: &[PathBuf]) -> bool {
    use notify::EventKind;

    // Only care about create, modify, and remove events
    match &event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        other => {
            tracing::trace!(kind = ?other, "ignoring: non-content event");
            return false;
        }
    }

    event.paths.iter().any(|path| sources.contains(path))
}
