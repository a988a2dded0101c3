// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

pub const PUNCTUATION: &str = "$+-*/=%\"'#&_(),.;:?!\\|{}<>[]^~@";

/// Fixed pool of glyphs a falling drop may show.
#[derive(Clone, Debug)]
pub struct CharacterSet {
    chars: Vec<char>,
    pick: Uniform<usize>,
}

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

impl CharacterSet {
    /// Letters (both cases), decimal digits and the punctuation marks the
    /// banner font can render.
    pub fn standard() -> Self {
        let mut chars = Vec::with_capacity(93);
        push_range(&mut chars, 0x61, 0x7A);
        push_range(&mut chars, 0x41, 0x5A);
        push_range(&mut chars, 0x30, 0x39);
        chars.extend(PUNCTUATION.chars());
        Self::from_chars(chars)
    }

    fn from_chars(chars: Vec<char>) -> Self {
        let pick = Uniform::new(0usize, chars.len()).expect("valid range");
        Self { chars, pick }
    }

    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    #[cfg(test)]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars[self.pick.sample(rng)]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn standard_pool_has_ninety_three_distinct_glyphs() {
        let set = CharacterSet::standard();
        assert_eq!(PUNCTUATION.chars().count(), 31);
        assert_eq!(set.size(), 93);
        let uniq: HashSet<char> = set.chars.iter().copied().collect();
        assert_eq!(uniq.len(), 93);
        assert!(!set.contains(' '));
    }

    #[test]
    fn sample_stays_inside_pool() {
        let set = CharacterSet::standard();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5000 {
            let ch = set.sample(&mut rng);
            assert!(set.contains(ch), "sampled {:?} outside the pool", ch);
        }
    }

    #[test]
    fn sample_reaches_every_class() {
        let set = CharacterSet::standard();
        let mut rng = StdRng::seed_from_u64(11);
        let seen: Vec<char> = (0..5000).map(|_| set.sample(&mut rng)).collect();
        assert!(seen.iter().any(|c| c.is_ascii_lowercase()));
        assert!(seen.iter().any(|c| c.is_ascii_uppercase()));
        assert!(seen.iter().any(|c| c.is_ascii_digit()));
        assert!(seen.iter().any(|c| c.is_ascii_punctuation()));
    }
}
