use std::num::NonZeroUsize;
use std::slice::Chunks;

/// Splits `items` into contiguous batches of at most `size` elements.
///
/// Order is preserved and every element appears in exactly one batch. The
/// final batch holds the remainder; an empty input yields no batches.
pub fn batches<T>(items: &[T], size: NonZeroUsize) -> Chunks<'_, T> {
    items.chunks(size.get())
}

/// Number of batches [`batches`] produces for `len` items, i.e.
/// `ceil(len / size)`.
#[must_use]
pub fn batch_count(len: usize, size: NonZeroUsize) -> usize {
    len.div_ceil(size.get())
}
