//! Character-sequence similarity for fuzzy intent matching
//!
//! Implements the Ratcliff/Obershelp "ratio": twice the number of characters
//! in the longest common matching blocks, divided by the combined length of
//! both strings. This tolerates the transpositions and insertions that user
//! typos produce, which plain edit distance or token overlap do not.

use ahash::AHashMap;

/// Similarity ratio between two strings in `[0.0, 1.0]`.
///
/// Decomposes both strings into matching blocks by repeatedly taking the
/// longest common contiguous match and recursing on the unmatched pieces on
/// either side, then scores `2 * matched / (len_a + len_b)`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Positions of each char in b, ascending.
    let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut matched = 0usize;
    let mut pending = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(&a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            matched += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    2.0 * matched as f64 / total as f64
}

/// Longest contiguous matching block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)` with the match starting at `a[i]` and `b[j]`.
/// Earliest position in `a` (then `b`) wins among equal-length matches, so
/// the block decomposition is deterministic.
fn longest_match(
    a: &[char],
    b2j: &AHashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
    // j2len[j] = length of the common run ending at b[j] for the previous row.
    let mut j2len: AHashMap<usize, usize> = AHashMap::new();

    for (i, &c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: AHashMap<usize, usize> = AHashMap::new();
        if let Some(positions) = b2j.get(&c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_size)
}
