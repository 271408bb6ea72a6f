use crate::tier::Tier;
use include_dir::{include_dir, Dir};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

static CORPUS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus");

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus file not found: {0}")]
    NotFound(String),
    #[error("corpus file {0} is not valid utf-8")]
    NotUtf8(String),
    #[error("unable to deserialize corpus {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("corpus {name} declares {declared} phrases but lists {listed}")]
    SizeMismatch {
        name: String,
        declared: u32,
        listed: usize,
    },
    #[error("corpus {0} has no phrases")]
    Empty(String),
}

/// One ordered collection of target phrases
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub size: u32,
    pub phrases: Vec<String>,
}

impl Corpus {
    /// Load an embedded corpus by file stem, e.g. `words_one`
    pub fn load(file_stem: &str) -> Result<Self, CorpusError> {
        let file_name = format!("{file_stem}.json");
        let file = CORPUS_DIR
            .get_file(&file_name)
            .ok_or_else(|| CorpusError::NotFound(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| CorpusError::NotUtf8(file_name.clone()))?;

        Self::from_json(file_stem, contents)
    }

    pub fn from_json(name: &str, json: &str) -> Result<Self, CorpusError> {
        let corpus: Corpus = serde_json::from_str(json).map_err(|source| CorpusError::Parse {
            name: name.to_string(),
            source,
        })?;

        corpus.validated()
    }

    fn validated(mut self) -> Result<Self, CorpusError> {
        if self.size as usize != self.phrases.len() {
            return Err(CorpusError::SizeMismatch {
                name: self.name,
                declared: self.size,
                listed: self.phrases.len(),
            });
        }
        self.phrases.retain(|p| !p.trim().is_empty());
        if self.phrases.is_empty() {
            return Err(CorpusError::Empty(self.name));
        }
        Ok(self)
    }
}

/// The four corpora backing the tiers
#[derive(Clone, Debug)]
pub struct Corpora {
    corpora: HashMap<Tier, Corpus>,
}

impl Corpora {
    pub fn embedded() -> Result<Self, CorpusError> {
        let mut corpora = HashMap::new();
        for tier in Tier::ALL {
            corpora.insert(tier, Corpus::load(tier.corpus_name())?);
        }
        Ok(Self { corpora })
    }

    pub fn get(&self, tier: Tier) -> &Corpus {
        // `embedded` fills every tier
        &self.corpora[&tier]
    }
}

/// Supplies target phrases per tier
pub trait PhraseSource: std::fmt::Debug {
    fn draw(&mut self, tier: Tier) -> String;
}

/// Uniform draws with replacement from the embedded corpora
#[derive(Debug)]
pub struct RandomPhrases {
    corpora: Corpora,
    rng: StdRng,
}

impl RandomPhrases {
    pub fn new(corpora: Corpora) -> Self {
        Self {
            corpora,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(corpora: Corpora, seed: u64) -> Self {
        Self {
            corpora,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PhraseSource for RandomPhrases {
    fn draw(&mut self, tier: Tier) -> String {
        self.corpora
            .get(tier)
            .phrases
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

/// Deterministic source for headless runs: cycles scripted phrases and records each tier drawn
#[derive(Debug, Clone, Default)]
pub struct FixedPhrases {
    phrases: HashMap<Tier, Vec<String>>,
    cursor: HashMap<Tier, usize>,
    pub draws: Vec<Tier>,
}

impl FixedPhrases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tier: Tier, phrases: &[&str]) -> Self {
        self.phrases
            .insert(tier, phrases.iter().map(|p| p.to_string()).collect());
        self
    }
}

impl PhraseSource for FixedPhrases {
    fn draw(&mut self, tier: Tier) -> String {
        self.draws.push(tier);
        match self.phrases.get(&tier) {
            Some(list) if !list.is_empty() => {
                let idx = self.cursor.entry(tier).or_insert(0);
                let phrase = list[*idx % list.len()].clone();
                *idx += 1;
                phrase
            }
            _ => tier.corpus_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_embedded_corpora_load() {
        let corpora = Corpora::embedded().unwrap();

        for tier in Tier::ALL {
            let corpus = corpora.get(tier);
            assert_eq!(corpus.name, tier.corpus_name());
            assert!(!corpus.phrases.is_empty());
            assert_eq!(corpus.size as usize, corpus.phrases.len());
        }
    }

    #[test]
    fn test_word_counts_match_tiers() {
        let corpora = Corpora::embedded().unwrap();

        assert!(corpora
            .get(Tier::OneWord)
            .phrases
            .iter()
            .all(|p| p.split_whitespace().count() == 1));
        assert!(corpora
            .get(Tier::TwoWords)
            .phrases
            .iter()
            .all(|p| p.split_whitespace().count() == 2));
    }

    #[test]
    fn test_missing_corpus() {
        assert_matches!(Corpus::load("nonexistent"), Err(CorpusError::NotFound(_)));
    }

    #[test]
    fn test_from_json_rejects_empty() {
        let json = r#"{ "name": "blank", "size": 2, "phrases": ["", "   "] }"#;
        assert_matches!(Corpus::from_json("blank", json), Err(CorpusError::Empty(name)) if name == "blank");
    }

    #[test]
    fn test_from_json_rejects_wrong_size() {
        let json = r#"{ "name": "short", "size": 3, "phrases": ["one", "two"] }"#;
        assert_matches!(
            Corpus::from_json("short", json),
            Err(CorpusError::SizeMismatch { declared: 3, listed: 2, .. })
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert_matches!(
            Corpus::from_json("bad", "{ not json"),
            Err(CorpusError::Parse { .. })
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{ "name": "test", "size": 3, "phrases": ["hello", "world", "test"] }"#;
        let corpus = Corpus::from_json("test", json).unwrap();

        assert_eq!(corpus.name, "test");
        assert_eq!(corpus.phrases, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_random_draw_comes_from_tier() {
        let corpora = Corpora::embedded().unwrap();
        let mut source = RandomPhrases::new(corpora.clone());

        for _ in 0..20 {
            let phrase = source.draw(Tier::TwoWords);
            assert!(corpora.get(Tier::TwoWords).phrases.contains(&phrase));
        }
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let corpora = Corpora::embedded().unwrap();
        let mut a = RandomPhrases::seeded(corpora.clone(), 7);
        let mut b = RandomPhrases::seeded(corpora, 7);

        for tier in Tier::ALL {
            assert_eq!(a.draw(tier), b.draw(tier));
        }
    }

    #[test]
    fn test_fixed_phrases_cycle_and_record() {
        let mut source = FixedPhrases::new().with(Tier::OneWord, &["a", "b"]);

        assert_eq!(source.draw(Tier::OneWord), "a");
        assert_eq!(source.draw(Tier::OneWord), "b");
        assert_eq!(source.draw(Tier::OneWord), "a");
        assert_eq!(source.draw(Tier::TwoWords), "words_two");
        assert_eq!(
            source.draws,
            vec![Tier::OneWord, Tier::OneWord, Tier::OneWord, Tier::TwoWords]
        );
    }
}
