//! Playback queue
//!
//! Owns the ordered list of items and the current position, and resolves
//! "next" and "previous" under shuffle and repeat. Pure state: nothing here
//! talks to the media adapter.
//!
//! ```text
//! items:    [A] [B] [C] [D] [E]     (never reordered)
//!                    ^
//!                 current
//! shuffle:  cycle {C, A} visited, next pick from {B, D, E}
//! ```

use crate::error::{PlaybackError, Result};
use crate::shuffle::ShuffleCycle;
use crate::types::{PlayableItem, RepeatMode};

/// Result of a forward or backward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMove {
    /// Current index changed (or wrapped onto itself in a one-item queue)
    Moved(usize),

    /// Current index left as is (repeat one, or floor of a backward step)
    Unchanged(usize),

    /// End of the queue reached without repeat; current index left as is
    Exhausted(usize),
}

impl QueueMove {
    /// Index that is current after the step
    pub fn index(self) -> usize {
        match self {
            QueueMove::Moved(i) | QueueMove::Unchanged(i) | QueueMove::Exhausted(i) => i,
        }
    }
}

/// Ordered queue with a current position
#[derive(Debug, Clone)]
pub struct Queue {
    items: Vec<PlayableItem>,

    /// `Some` exactly when `items` is non-empty
    current: Option<usize>,

    shuffle: bool,
    repeat: RepeatMode,
    cycle: ShuffleCycle,
}

impl Queue {
    /// Create an empty queue; `seed` fixes the shuffle sequence
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            shuffle: false,
            repeat: RepeatMode::Off,
            cycle: ShuffleCycle::new(seed),
        }
    }

    /// Replace the queue atomically
    ///
    /// `start_index` defaults to 0. An empty list with an explicit start index
    /// is rejected, as is a start index past the end.
    pub fn set_queue(&mut self, items: Vec<PlayableItem>, start_index: Option<usize>) -> Result<()> {
        if items.is_empty() {
            if let Some(index) = start_index {
                return Err(PlaybackError::InvalidArgument(format!(
                    "start index {} given for an empty queue",
                    index
                )));
            }
            self.clear();
            return Ok(());
        }

        let start = start_index.unwrap_or(0);
        if start >= items.len() {
            return Err(PlaybackError::InvalidArgument(format!(
                "start index {} out of range for {} items",
                start,
                items.len()
            )));
        }

        self.items = items;
        self.current = Some(start);
        if self.shuffle {
            self.cycle.restart(start);
        } else {
            self.cycle.clear();
        }
        Ok(())
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.items.clear();
        self.current = None;
        self.cycle.clear();
    }

    /// Step forward on natural end of the current item
    ///
    /// Honours `RepeatMode::One` by leaving the index unchanged.
    pub fn advance(&mut self) -> Result<QueueMove> {
        self.step_forward(true)
    }

    /// Step forward on an explicit skip; repeat-one does not pin the index
    pub fn skip_forward(&mut self) -> Result<QueueMove> {
        self.step_forward(false)
    }

    /// Mirror of [`Queue::advance`]
    pub fn retreat(&mut self) -> Result<QueueMove> {
        self.step_backward(true)
    }

    /// Mirror of [`Queue::skip_forward`]
    pub fn skip_backward(&mut self) -> Result<QueueMove> {
        self.step_backward(false)
    }

    /// Make `index` current
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(PlaybackError::InvalidArgument(format!(
                "index {} out of range for {} items",
                index,
                self.items.len()
            )));
        }

        self.current = Some(index);
        if self.shuffle {
            self.cycle.mark_played(index);
        }
        Ok(())
    }

    /// Flip the shuffle flag, returning the new value
    ///
    /// The current item stays current either way.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffle);
        self.shuffle
    }

    /// Set the shuffle flag
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle == enabled {
            return;
        }

        self.shuffle = enabled;
        match (enabled, self.current) {
            (true, Some(current)) => self.cycle.restart(current),
            _ => self.cycle.clear(),
        }
    }

    /// Set repeat mode; takes effect on the next step
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Currently selected item
    pub fn current(&self) -> Option<&PlayableItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&PlayableItem> {
        self.items.get(index)
    }

    /// Items in their original order
    pub fn items(&self) -> &[PlayableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn step_forward(&mut self, honor_repeat_one: bool) -> Result<QueueMove> {
        let current = self.current.ok_or(PlaybackError::NoCurrentItem)?;

        if honor_repeat_one && self.repeat == RepeatMode::One {
            return Ok(QueueMove::Unchanged(current));
        }

        let step = if self.shuffle {
            self.shuffle_forward(current)
        } else if current + 1 < self.items.len() {
            QueueMove::Moved(current + 1)
        } else if self.repeat == RepeatMode::All {
            QueueMove::Moved(0)
        } else {
            QueueMove::Exhausted(current)
        };

        self.current = Some(step.index());
        Ok(step)
    }

    fn step_backward(&mut self, honor_repeat_one: bool) -> Result<QueueMove> {
        let current = self.current.ok_or(PlaybackError::NoCurrentItem)?;

        if honor_repeat_one && self.repeat == RepeatMode::One {
            return Ok(QueueMove::Unchanged(current));
        }

        let step = if self.shuffle {
            match self.cycle.step_back() {
                Some(previous) => QueueMove::Moved(previous),
                None => QueueMove::Unchanged(current),
            }
        } else if current > 0 {
            QueueMove::Moved(current - 1)
        } else if self.repeat == RepeatMode::All && self.items.len() > 1 {
            QueueMove::Moved(self.items.len() - 1)
        } else {
            QueueMove::Unchanged(current)
        };

        self.current = Some(step.index());
        Ok(step)
    }

    fn shuffle_forward(&mut self, current: usize) -> QueueMove {
        let len = self.items.len();
        if let Some(next) = self.cycle.pick_next(len) {
            return QueueMove::Moved(next);
        }

        // Cycle complete
        if self.repeat == RepeatMode::All {
            QueueMove::Moved(self.cycle.start_new_cycle(len, current))
        } else {
            QueueMove::Exhausted(current)
        }
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new(None)
    }
}
