//! Testimonial carousel state machine
//!
//! Pure state; the timer that drives [`Carousel::tick`] lives in the server.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Index into a fixed, non-empty list plus the auto-play flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carousel {
    len: usize,
    index: usize,
    auto_play: bool,
}

impl Carousel {
    /// Starts at index 0 with auto-play on. `None` for an empty list.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self {
            len,
            index: 0,
            auto_play: true,
        })
    }

    /// Carousel over a fixed-size array; an empty array fails to compile
    pub const fn over<T, const N: usize>(_items: &[T; N]) -> Self {
        const { assert!(N > 0, "carousel needs at least one entry") };
        Self {
            len: N,
            index: 0,
            auto_play: true,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    /// Timer step. Advances only while auto-play is on; returns whether it did.
    pub fn tick(&mut self) -> bool {
        if !self.auto_play {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        true
    }

    pub fn next(&mut self) -> usize {
        self.auto_play = false;
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.auto_play = false;
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
        self.index
    }

    /// Jump to `index`. Out-of-range leaves the state untouched.
    pub fn select(&mut self, index: usize) -> Result<usize, CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.auto_play = false;
        self.index = index;
        Ok(index)
    }
}
