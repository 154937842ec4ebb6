//! Harmonic consonance scoring
//!
//! Scores a set of simultaneously sounding pitches in [0, 1] from the
//! pairwise pitch-class intervals between them.
//!
//! Every unordered pair of pitches is reduced to a pitch-class interval
//! (modulo 12) and mirrored onto 0-6 semitones, so an interval and its
//! inversion (e.g. a fourth and a fifth) weigh the same. Each mirrored
//! interval carries a fixed dissonance weight; the group's score is the mean
//! consonance `1 - dissonance` over all pairs.

/// Dissonance weight for a mirrored pitch-class interval (0-6 semitones).
///
/// Fixed table: unison/octave 0.0, seconds 0.6, thirds 0.2, fourth/fifth 0.1,
/// tritone 0.8. Intervals outside 0-6 cannot be produced by the mirroring,
/// but unmapped keys default to 0.4.
pub fn interval_weight(interval: u32) -> f64 {
    match interval {
        0 => 0.0,
        1 | 2 => 0.6,
        3 | 4 => 0.2,
        5 => 0.1,
        6 => 0.8,
        _ => 0.4,
    }
}

/// Reduce the distance between two pitches to a mirrored pitch-class
/// interval in 0-6 semitones.
fn mirrored_interval(p1: i32, p2: i32) -> u32 {
    let raw = (p1 - p2).unsigned_abs() % 12;
    raw.min(12 - raw)
}

/// Score the consonance of one group of simultaneous pitches.
///
/// Fewer than two pitches score 1.0: a single note (or silence) is trivially
/// consonant. Otherwise the result is the mean of `1 - dissonance` over all
/// n*(n-1)/2 unordered pairs, so it is invariant under permutation of the
/// group and under transposition of any pitch by whole octaves.
pub fn harmonic_score(pitches: &[i32]) -> f64 {
    if pitches.len() < 2 {
        return 1.0;
    }

    let mut total = 0.0;
    let mut pairs = 0u32;
    for (i, &p1) in pitches.iter().enumerate() {
        for &p2 in &pitches[i + 1..] {
            total += 1.0 - interval_weight(mirrored_interval(p1, p2));
            pairs += 1;
        }
    }

    total / pairs as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_note_and_empty_group_are_consonant() {
        assert_eq!(harmonic_score(&[]), 1.0);
        assert_eq!(harmonic_score(&[60]), 1.0);
    }

    #[test]
    fn test_unison_and_octave_score_one() {
        assert_eq!(harmonic_score(&[60, 60]), 1.0);
        assert_eq!(harmonic_score(&[60, 72]), 1.0);
        assert_eq!(harmonic_score(&[60, 36]), 1.0);
    }

    #[test]
    fn test_pair_scores_match_weight_table() {
        // Major second: dissonance 0.6 -> consonance 0.4
        assert!((harmonic_score(&[54, 56]) - 0.4).abs() < 1e-12);
        // Perfect fifth: dissonance 0.1 -> consonance 0.9
        assert!((harmonic_score(&[60, 67]) - 0.9).abs() < 1e-12);
        // Tritone: dissonance 0.8 -> consonance 0.2
        assert!((harmonic_score(&[60, 66]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_major_triad_mean_over_three_pairs() {
        // C-E (major third 0.2), E-G (minor third 0.2), C-G (fifth 0.1)
        let expected = ((1.0 - 0.2) + (1.0 - 0.2) + (1.0 - 0.1)) / 3.0;
        assert!((harmonic_score(&[60, 64, 67]) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored_interval_symmetry() {
        // An interval of k semitones and its inversion 12-k weigh the same
        for k in 1..12 {
            assert_eq!(
                harmonic_score(&[60, 60 + k]),
                harmonic_score(&[60, 60 + (12 - k)]),
                "interval {} and {} should mirror",
                k,
                12 - k
            );
        }
    }

    #[test]
    fn test_permutation_invariance() {
        let chord = [54, 56, 61, 67];
        let shuffled = [67, 54, 61, 56];
        assert_eq!(harmonic_score(&chord), harmonic_score(&shuffled));
    }

    #[test]
    fn test_octave_transposition_invariance() {
        assert_eq!(harmonic_score(&[54, 56]), harmonic_score(&[66, 68]));
        assert_eq!(harmonic_score(&[54, 56]), harmonic_score(&[54, 68]));
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let clusters: [&[i32]; 4] = [&[60, 61], &[60, 61, 62], &[0, 6, 13, 127], &[60, 66]];
        for pitches in clusters {
            let score = harmonic_score(pitches);
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}
