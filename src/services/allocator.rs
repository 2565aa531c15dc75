/// Distributes `total` questions across `chunk_count` chunks.
///
/// Every chunk gets `total / chunk_count`; the first `total % chunk_count`
/// chunks get one extra, so nothing is lost to rounding and the split is
/// deterministic in chunk order. A quota of zero means no request is issued
/// for that chunk.
pub fn allocate(total: u32, chunk_count: usize) -> Vec<u32> {
    assert!(chunk_count >= 1, "allocator requires at least one chunk");

    let base = total / chunk_count as u32;
    let remainder = (total % chunk_count as u32) as usize;

    (0..chunk_count)
        .map(|i| base + u32::from(i < remainder))
        .collect()
}
