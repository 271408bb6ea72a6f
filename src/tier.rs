use serde::{Deserialize, Serialize};

/// Which corpus supplies the next target phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Tier {
    LongSentence,
    ShortSentence,
    TwoWords,
    OneWord,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::LongSentence,
        Tier::ShortSentence,
        Tier::TwoWords,
        Tier::OneWord,
    ];

    /// Base name of the embedded corpus file backing this tier
    pub fn corpus_name(&self) -> &'static str {
        match self {
            Tier::LongSentence => "long_sentences",
            Tier::ShortSentence => "short_sentences",
            Tier::TwoWords => "words_two",
            Tier::OneWord => "words_one",
        }
    }
}

/// Remaining-seconds brackets; a tier applies while remaining is strictly above its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub long_sentence: u32,
    pub short_sentence: u32,
    pub two_words: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            long_sentence: 40,
            short_sentence: 25,
            two_words: 10,
        }
    }
}

impl TierThresholds {
    pub fn tier_for(&self, remaining_secs: u32) -> Tier {
        if remaining_secs > self.long_sentence {
            Tier::LongSentence
        } else if remaining_secs > self.short_sentence {
            Tier::ShortSentence
        } else if remaining_secs > self.two_words {
            Tier::TwoWords
        } else {
            Tier::OneWord
        }
    }

    /// Whether a round of `duration_secs` starts inside the long-sentence bracket
    pub fn reaches_long_sentences(&self, duration_secs: u32) -> bool {
        duration_secs > self.long_sentence
    }

    /// Brackets must shrink from long sentences down to single words
    pub fn is_descending(&self) -> bool {
        self.long_sentence >= self.short_sentence && self.short_sentence >= self.two_words
    }
}
