//! 제시어 선택

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 제시어 목록
pub const WORDS: &[&str] = &[
    "cat", "dog", "house", "tree", "car", "sun", "moon", "star", "fish", "bird", "apple",
    "banana", "pizza", "cake", "book", "phone", "computer", "chair", "table", "bed", "mountain",
    "ocean", "forest", "desert", "rainbow", "butterfly", "elephant", "guitar", "piano", "bicycle",
];

/// 제시어 공급원
pub trait WordSource: Send {
    fn next_word(&mut self) -> String;
}

/// 목록에서 균등 확률로 뽑는다. 라운드 간 중복 방지는 하지 않는다.
pub struct RandomWords {
    rng: StdRng,
}

impl RandomWords {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomWords {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSource for RandomWords {
    fn next_word(&mut self) -> String {
        WORDS
            .choose(&mut self.rng)
            .map(|w| w.to_string())
            .unwrap_or_default()
    }
}

/// 항상 같은 단어를 돌려주는 테스트용 공급원
#[cfg(test)]
pub struct FixedWord(pub &'static str);

#[cfg(test)]
impl WordSource for FixedWord {
    fn next_word(&mut self) -> String {
        self.0.to_string()
    }
}

/// 정해진 순서대로 단어를 돌려주는 테스트용 공급원 (마지막 단어 반복)
#[cfg(test)]
pub struct SequencedWords {
    words: Vec<&'static str>,
    next: usize,
}

#[cfg(test)]
impl SequencedWords {
    pub fn new(words: Vec<&'static str>) -> Self {
        Self { words, next: 0 }
    }
}

#[cfg(test)]
impl WordSource for SequencedWords {
    fn next_word(&mut self) -> String {
        let index = self.next.min(self.words.len().saturating_sub(1));
        self.next += 1;
        self.words.get(index).map(|w| w.to_string()).unwrap_or_default()
    }
}
