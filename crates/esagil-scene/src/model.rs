//! Data models feeding repeaters.

/// A finite, indexable sequence owned by the host application.
///
/// There is no change notification: a repeater re-reads the whole model when
/// asked to, so a model is either replaced wholesale or polled.
pub trait Model {
    /// Per-element payload handed to generated components.
    type Data: ?Sized;

    fn count(&self) -> usize;

    /// Borrowed view of element `index`.
    ///
    /// # Panics
    ///
    /// When `index >= self.count()`.
    fn get(&self, index: usize) -> &Self::Data;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl<T> Model for [T] {
    type Data = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

// ── VecModel ──────────────────────────────────────────────────────────────

/// Model backed by an owned vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecModel<T>(Vec<T>);

impl<T> VecModel<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Replaces every element.
    pub fn set_vec(&mut self, data: impl Into<Vec<T>>) {
        self.0 = data.into();
    }

    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for VecModel<T> {
    fn from(data: Vec<T>) -> Self {
        Self(data)
    }
}

impl<T> FromIterator<T> for VecModel<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Model for VecModel<T> {
    type Data = T;

    fn count(&self) -> usize {
        self.0.len()
    }

    fn get(&self, index: usize) -> &T {
        &self.0[index]
    }
}

// ── IntModel ──────────────────────────────────────────────────────────────

/// `n` elements without payload; generated components only learn their index.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct IntModel(pub usize);

impl Model for IntModel {
    type Data = ();

    fn count(&self) -> usize {
        self.0
    }

    fn get(&self, index: usize) -> &() {
        assert!(index < self.0, "IntModel index {index} out of range 0..{}", self.0);
        &()
    }
}
