//! Replayable iteration over a one-shot source.
//!
//! [`BufferedIter`] wraps any iterator and caches each element the first
//! time some consumer pulls it. Every [`iter`](BufferedIter::iter) call
//! starts a fresh cursor that replays the cache and then keeps driving
//! the source, so the source is advanced at most once per element no
//! matter how many cursors exist or which threads they run on.
//!
//! # Examples
//!
//! ```
//! use nbayes::util::buffered::BufferedIter;
//!
//! let buffered = BufferedIter::new(vec![1, 2, 3]);
//!
//! let first: Vec<_> = buffered.iter().collect();
//! let second: Vec<_> = buffered.iter().collect();
//! assert_eq!(first, second);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

struct State<I: Iterator> {
    /// `None` once the source has returned `None`.
    source: Option<I>,
    cache: Vec<I::Item>,
}

/// A lazily filled, shareable cache in front of an iterator.
///
/// Clones share the same cache and source.
pub struct BufferedIter<I: Iterator> {
    state: Arc<Mutex<State<I>>>,
}

impl<I> BufferedIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Wrap `source`. Nothing is pulled until a cursor asks for it.
    pub fn new<S: IntoIterator<IntoIter = I>>(source: S) -> Self {
        BufferedIter {
            state: Arc::new(Mutex::new(State {
                source: Some(source.into_iter()),
                cache: Vec::new(),
            })),
        }
    }

    /// Start a new cursor at the first element.
    pub fn iter(&self) -> Cursor<I> {
        Cursor {
            state: Arc::clone(&self.state),
            position: 0,
        }
    }

    /// Number of elements pulled from the source so far.
    pub fn buffered_len(&self) -> usize {
        self.state.lock().cache.len()
    }

    /// Whether the source has been fully drained.
    pub fn is_exhausted(&self) -> bool {
        self.state.lock().source.is_none()
    }
}

impl<I: Iterator> Clone for BufferedIter<I> {
    fn clone(&self) -> Self {
        BufferedIter {
            state: Arc::clone(&self.state),
        }
    }
}

impl<I: Iterator> fmt::Debug for BufferedIter<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BufferedIter")
            .field("buffered", &state.cache.len())
            .field("exhausted", &state.source.is_none())
            .finish()
    }
}

impl<'a, I> IntoIterator for &'a BufferedIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;
    type IntoIter = Cursor<I>;

    fn into_iter(self) -> Cursor<I> {
        self.iter()
    }
}

/// One pass over a [`BufferedIter`].
pub struct Cursor<I: Iterator> {
    state: Arc<Mutex<State<I>>>,
    position: usize,
}

impl<I> Iterator for Cursor<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut state = self.state.lock();

        if let Some(item) = state.cache.get(self.position) {
            self.position += 1;
            return Some(item.clone());
        }

        let item = state.source.as_mut()?.next();
        match item {
            Some(item) => {
                state.cache.push(item.clone());
                self.position += 1;
                Some(item)
            }
            None => {
                state.source = None;
                None
            }
        }
    }
}
