//! Chunked parallel reductions.
//!
//! Work over `0..len` is split into contiguous chunks whose boundaries depend
//! only on `len` and the rayon thread count. Each chunk reduces into its own
//! partial, and partials are merged on the calling thread in chunk order, so
//! results are reproducible for a fixed thread count.

use std::ops::Range;

use rayon::prelude::*;

#[cfg(test)]
mod tests;

/// Multiplier for number of chunks relative to CPU threads.
/// Using 3x threads provides good load balancing when some chunks finish faster.
const CHUNKS_PER_THREAD: usize = 3;

/// Inputs shorter than this are reduced on the calling thread.
pub const SERIAL_THRESHOLD: usize = 16 * 1024;

/// Compute chunk size for the given length.
#[inline]
pub fn auto_chunk_size(len: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    len.div_ceil(num_chunks).max(1)
}

/// Split `0..len` into the contiguous ranges used by [`par_chunked_fold`].
pub fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    assert!(chunk_size > 0, "chunk_size must be > 0");
    (0..len.div_ceil(chunk_size))
        .map(|i| i * chunk_size..((i + 1) * chunk_size).min(len))
        .collect()
}

/// Reduce `0..len` into an accumulator.
///
/// `init` creates an empty partial, `fold` adds one index range into a
/// partial, and `merge` combines a later partial into an earlier one.
pub fn par_chunked_fold<A, I, F, M>(len: usize, init: I, fold: F, merge: M) -> A
where
    A: Send,
    I: Fn() -> A + Sync,
    F: Fn(&mut A, Range<usize>) + Sync,
    M: Fn(&mut A, A),
{
    if len < SERIAL_THRESHOLD {
        let mut acc = init();
        fold(&mut acc, 0..len);
        return acc;
    }

    let partials: Vec<A> = chunk_ranges(len, auto_chunk_size(len))
        .into_par_iter()
        .map(|range| {
            let mut acc = init();
            fold(&mut acc, range);
            acc
        })
        .collect();

    let mut partials = partials.into_iter();
    let mut total = partials.next().unwrap_or_else(&init);
    for partial in partials {
        merge(&mut total, partial);
    }
    total
}
