//! Shared progress value for callers that update the ring from elsewhere.

use std::{cell::Cell, rc::Rc};

/// A progress value shared between the caller and a ring.
///
/// Clones refer to the same cell; the last write wins. Not `Send`: updates
/// from other threads must be marshaled onto the rendering thread first.
#[derive(Debug, Clone, Default)]
pub struct ProgressBinding {
    value: Rc<Cell<f32>>,
}

impl ProgressBinding {
    pub fn new(progress: f32) -> Self {
        Self {
            value: Rc::new(Cell::new(progress)),
        }
    }

    pub fn get(&self) -> f32 {
        self.value.get()
    }

    pub fn set(&self, progress: f32) {
        self.value.set(progress);
    }
}
