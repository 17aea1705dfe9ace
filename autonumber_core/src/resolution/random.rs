//! Random string generation for `{rand}` placeholders

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const MIXED: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Source of uniformly distributed indices
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`; `upper` is never zero
    fn next_index(&self, upper: usize) -> usize;
}

/// Thread-local entropy, the production source
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible source for tests and dry runs
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..upper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomStyle {
    #[default]
    Upper,
    Lower,
    Mix,
}

impl RandomStyle {
    /// `mix` and `lower` (any case) select their pools; anything else is upper
    pub fn from_spec(style: &str) -> Self {
        match style.to_lowercase().as_str() {
            "mix" => RandomStyle::Mix,
            "lower" => RandomStyle::Lower,
            _ => RandomStyle::Upper,
        }
    }

    pub fn pool(&self) -> &'static [u8] {
        match self {
            RandomStyle::Upper => UPPER,
            RandomStyle::Lower => LOWER,
            RandomStyle::Mix => MIXED,
        }
    }
}

/// Parsed `length?style` formatter of a random placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSpec {
    /// `None` when the length text is missing or not a non-negative integer
    pub length: Option<usize>,
    pub style: RandomStyle,
}

impl RandomSpec {
    pub fn parse(formatter: &str) -> Self {
        let (length, style) = match formatter.split_once('?') {
            Some((length, rest)) => {
                let style = rest.split('?').next().unwrap_or_default();
                (length, RandomStyle::from_spec(style))
            }
            None => (formatter, RandomStyle::Upper),
        };

        Self {
            length: length.trim().parse().ok(),
            style,
        }
    }
}

/// Draw `length` characters independently from the style's pool
pub fn random_string(source: &dyn RandomSource, length: usize, style: RandomStyle) -> String {
    let pool = style.pool();
    (0..length)
        .map(|_| char::from(pool[source.next_index(pool.len())]))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Cycles through indices 0, 1, 2, ...
    #[derive(Debug, Default)]
    pub(crate) struct CountingRandom {
        next: AtomicUsize,
    }

    impl RandomSource for CountingRandom {
        fn next_index(&self, upper: usize) -> usize {
            self.next.fetch_add(1, Ordering::Relaxed) % upper
        }
    }

    #[test]
    fn test_spec_parsing() {
        assert_eq!(
            RandomSpec::parse("8"),
            RandomSpec {
                length: Some(8),
                style: RandomStyle::Upper
            }
        );
        assert_eq!(RandomSpec::parse("6?lower").style, RandomStyle::Lower);
        assert_eq!(RandomSpec::parse("4?MIX").style, RandomStyle::Mix);
        assert_eq!(RandomSpec::parse("4?other").style, RandomStyle::Upper);
        assert_eq!(RandomSpec::parse("").length, None);
        assert_eq!(RandomSpec::parse("abc?lower").length, None);
        assert_eq!(RandomSpec::parse("-3").length, None);
    }

    #[test]
    fn test_deterministic_source() {
        let source = CountingRandom::default();
        assert_eq!(random_string(&source, 4, RandomStyle::Upper), "ABCD");
        assert_eq!(random_string(&source, 2, RandomStyle::Lower), "ef");
    }

    #[test]
    fn test_thread_source_charsets() {
        let upper = random_string(&ThreadRandom, 8, RandomStyle::Upper);
        assert_eq!(upper.len(), 8);
        assert!(upper.chars().all(|c| c.is_ascii_uppercase()));

        let lower = random_string(&ThreadRandom, 6, RandomStyle::Lower);
        assert_eq!(lower.len(), 6);
        assert!(lower.chars().all(|c| c.is_ascii_lowercase()));

        let mixed = random_string(&ThreadRandom, 40, RandomStyle::Mix);
        assert!(mixed.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let first = random_string(&SeededRandom::new(42), 12, RandomStyle::Mix);
        let second = random_string(&SeededRandom::new(42), 12, RandomStyle::Mix);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(random_string(&ThreadRandom, 0, RandomStyle::Upper), "");
    }
}
