//! Per-page thumbnail slots.
//!
//! Replaced wholesale whenever the page changes. Each reset bumps a
//! generation number so results for an earlier page can be recognised and
//! dropped.

use tiny_skia::Pixmap;

/// One sector's thumbnail.
#[derive(Debug, Clone, Default)]
pub enum Thumbnail {
    #[default]
    Loading,
    Ready(Pixmap),
    /// Decode failed; rendered as a plain placeholder.
    Failed,
}

impl Thumbnail {
    pub fn image(&self) -> Option<&Pixmap> {
        match self {
            Thumbnail::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Thumbnail::Loading)
    }
}

/// Load progress after a stored result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

#[derive(Debug, Default)]
pub struct ThumbnailCache {
    generation: u64,
    slots: Vec<Thumbnail>,
    loaded: usize,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops all slots and prepares `len` loading ones. Returns the new generation.
    pub fn reset(&mut self, len: usize) -> u64 {
        self.generation += 1;
        self.slots = vec![Thumbnail::Loading; len];
        self.loaded = 0;
        self.generation
    }

    /// Stores a decode result. `None` marks a failed decode.
    ///
    /// Results from another generation, out-of-range indices and repeated
    /// deliveries are ignored.
    pub fn store(
        &mut self,
        generation: u64,
        index: usize,
        image: Option<Pixmap>,
    ) -> Option<LoadProgress> {
        if generation != self.generation {
            return None;
        }
        let slot = self.slots.get_mut(index)?;
        if !slot.is_loading() {
            return None;
        }
        *slot = match image {
            Some(image) => Thumbnail::Ready(image),
            None => Thumbnail::Failed,
        };
        self.loaded += 1;
        Some(LoadProgress {
            loaded: self.loaded,
            total: self.slots.len(),
        })
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Thumbnail> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Thumbnail] {
        &self.slots
    }
}
