use super::*;

#[test]
fn test_chunk_ranges_cover_input() {
    let ranges = chunk_ranges(10, 3);
    assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..10]);
    assert!(chunk_ranges(0, 4).is_empty());
}

#[test]
#[should_panic(expected = "chunk_size must be > 0")]
fn test_chunk_ranges_rejects_zero_chunk() {
    chunk_ranges(10, 0);
}

#[test]
fn test_auto_chunk_size_is_positive() {
    assert_eq!(auto_chunk_size(0), 1);
    assert!(auto_chunk_size(1) >= 1);
    let len = 1_000_000;
    let size = auto_chunk_size(len);
    assert!(size * rayon::current_num_threads() * CHUNKS_PER_THREAD >= len);
}

#[test]
fn test_fold_serial_path() {
    let data: Vec<u64> = (0..100).collect();
    let total = par_chunked_fold(
        data.len(),
        || 0u64,
        |acc, range| *acc += data[range].iter().sum::<u64>(),
        |acc, other| *acc += other,
    );
    assert_eq!(total, 4950);
}

#[test]
fn test_fold_parallel_path_matches_serial() {
    let len = SERIAL_THRESHOLD * 4 + 17;
    let data: Vec<u64> = (0..len as u64).collect();
    let total = par_chunked_fold(
        len,
        || 0u64,
        |acc, range| *acc += data[range].iter().sum::<u64>(),
        |acc, other| *acc += other,
    );
    assert_eq!(total, data.iter().sum::<u64>());
}

#[test]
fn test_fold_merges_in_chunk_order() {
    let len = SERIAL_THRESHOLD * 3;
    let order = par_chunked_fold(
        len,
        Vec::new,
        |acc: &mut Vec<usize>, range| acc.push(range.start),
        |acc, other| acc.extend(other),
    );
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(order, sorted);
    assert_eq!(order[0], 0);
}

#[test]
fn test_fold_is_reproducible() {
    let len = SERIAL_THRESHOLD * 2 + 5;
    let data: Vec<f64> = (0..len).map(|i| 1.0 / (i as f64 + 1.0)).collect();
    let run = || {
        par_chunked_fold(
            len,
            || 0.0f64,
            |acc, range| *acc += data[range].iter().sum::<f64>(),
            |acc, other| *acc += other,
        )
    };
    assert_eq!(run().to_bits(), run().to_bits());
}
