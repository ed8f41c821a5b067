//! Background decoding of thumbnails and previews.
//!
//! Jobs run on a dedicated rayon pool. Every finished job is pushed into an
//! mpsc channel, then the waker is called so the UI thread knows to drain it.

use crate::error::Result;
use crate::image_loader;
use tiny_skia::Pixmap;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Finished decode job.
#[derive(Debug)]
pub enum LoadEvent {
    Thumbnail {
        generation: u64,
        index: usize,
        image: Option<Pixmap>,
    },
    Preview {
        ticket: u64,
        path: PathBuf,
        image: Option<Pixmap>,
    },
}

type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct ThumbnailLoader {
    pool: rayon::ThreadPool,
    sender: Sender<LoadEvent>,
    waker: Waker,
}

/// Logs and swallows decode errors; a failed image is just absent.
fn decode_or_skip(path: &Path, decode: impl FnOnce(&Path) -> Result<Pixmap>) -> Option<Pixmap> {
    match decode(path) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("skip {}: {}", path.display(), e);
            None
        }
    }
}

impl ThumbnailLoader {
    /// Starts a pool of `workers` decode threads.
    pub fn new(
        workers: usize,
        sender: Sender<LoadEvent>,
        waker: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("thumbnail-{}", i))
            .build()?;

        Ok(Self {
            pool,
            sender,
            waker: Arc::new(waker),
        })
    }

    fn deliver(sender: &Sender<LoadEvent>, waker: &Waker, event: LoadEvent) {
        // The receiver is gone once the window closed; nothing left to notify
        if sender.send(event).is_ok() {
            waker();
        }
    }

    /// Queues one cover-scale job per path. Results carry `generation` and
    /// the page-local index and arrive in completion order.
    pub fn load_page(&self, generation: u64, paths: Vec<PathBuf>, edge: u32) {
        debug!(
            "Queueing {} thumbnails for generation {}",
            paths.len(),
            generation
        );
        for (index, path) in paths.into_iter().enumerate() {
            let sender = self.sender.clone();
            let waker = self.waker.clone();
            self.pool.spawn(move || {
                let image = decode_or_skip(&path, |p| image_loader::load_cover_scaled(p, edge));
                Self::deliver(
                    &sender,
                    &waker,
                    LoadEvent::Thumbnail {
                        generation,
                        index,
                        image,
                    },
                );
            });
        }
    }

    /// Queues a preview decode fitted into a `bound` square.
    pub fn load_preview(&self, ticket: u64, path: PathBuf, bound: u32) {
        let sender = self.sender.clone();
        let waker = self.waker.clone();
        self.pool.spawn(move || {
            let image = decode_or_skip(&path, |p| image_loader::load_fitted(p, bound));
            Self::deliver(&sender, &waker, LoadEvent::Preview { ticket, path, image });
        });
    }
}
