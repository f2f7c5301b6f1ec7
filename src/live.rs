use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, SyncSender, TrySendError},
    thread::JoinHandle,
};

use anyhow::Context as _;

use crate::{
    foundation::error::AnimateResult,
    render::{FrameScene, scene_to_svg},
};

// One scene in flight plus one queued; older scenes are dropped rather than blocking the engine.
const QUEUE_DEPTH: usize = 1;

/// Counters reported when the live display shuts down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveStats {
    pub shown: u64,
    pub dropped: u64,
}

/// Optional preview consumer. Receives owned scene snapshots over a bounded channel and keeps
/// rewriting one SVG file; it never sees engine state.
pub struct LiveDisplay {
    tx: Option<SyncSender<FrameScene>>,
    handle: Option<JoinHandle<u64>>,
    dropped: u64,
}

impl LiveDisplay {
    pub fn spawn(preview: PathBuf) -> AnimateResult<Self> {
        let (tx, rx) = mpsc::sync_channel::<FrameScene>(QUEUE_DEPTH);
        let handle = std::thread::Builder::new()
            .name("live-preview".to_string())
            .spawn(move || {
                let mut shown = 0u64;
                while let Ok(scene) = rx.recv() {
                    match write_preview(&preview, &scene_to_svg(&scene)) {
                        Ok(()) => shown += 1,
                        Err(e) => tracing::warn!(error = %e, "live preview write failed"),
                    }
                }
                shown
            })
            .context("spawn live preview thread")?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            dropped: 0,
        })
    }

    /// Hand a scene to the consumer without waiting.
    pub fn publish(&mut self, scene: FrameScene) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(scene) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => self.dropped += 1,
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("live preview consumer stopped; disabling preview");
                self.tx = None;
            }
        }
    }

    /// Close the channel and wait for the consumer to drain it.
    pub fn finish(mut self) -> LiveStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> LiveStats {
        self.tx = None;
        let shown = match self.handle.take().map(JoinHandle::join) {
            Some(Ok(shown)) => shown,
            Some(Err(_)) => {
                tracing::warn!("live preview thread panicked");
                0
            }
            None => 0,
        };
        LiveStats {
            shown,
            dropped: self.dropped,
        }
    }
}

impl Drop for LiveDisplay {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn write_preview(path: &Path, svg: &str) -> anyhow::Result<()> {
    let tmp = path.with_extension("svg.tmp");
    std::fs::write(&tmp, svg).with_context(|| format!("write '{}'", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("replace '{}'", path.display()))?;
    Ok(())
}
