use std::collections::HashSet;

/// Result of comparing one entry with its target phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryScore {
    pub exact: bool,
    pub words_offered: u32,
    pub words_matched: u32,
}

/// Compare `typed` against `target`.
///
/// The entry is correct only on an exact, case-sensitive match. Word credit is
/// membership based: each target word counts once if it occurs anywhere among
/// the typed words, regardless of position.
pub fn score_entry(target: &str, typed: &str) -> EntryScore {
    let typed_words: HashSet<&str> = typed.split_whitespace().collect();
    let target_words: Vec<&str> = target.split_whitespace().collect();

    let words_matched = target_words
        .iter()
        .filter(|w| typed_words.contains(*w))
        .count();

    EntryScore {
        exact: typed == target,
        words_offered: target_words.len() as u32,
        words_matched: words_matched as u32,
    }
}

/// `numerator / denominator` as a whole percentage, 0 when the denominator is 0.
/// Halves round to even.
pub fn percentage(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64 * 100.0).round_ties_even() as u32
}

/// Running per-round counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_submissions: u32,
    pub correct_submissions: u32,
    pub incorrect_submissions: u32,
    pub matched_words: u32,
    pub total_words_offered: u32,
}

impl Counters {
    pub fn record(&mut self, score: &EntryScore) {
        self.total_submissions += 1;
        if score.exact {
            self.correct_submissions += 1;
        } else {
            self.incorrect_submissions += 1;
        }
        self.total_words_offered += score.words_offered;
        self.matched_words += score.words_matched;
    }

    /// Entry accuracy to two decimals while the round is still going
    pub fn live_entry_accuracy(&self) -> f64 {
        if self.total_submissions == 0 {
            return 0.0;
        }
        let pct = self.correct_submissions as f64 / self.total_submissions as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// End-of-round snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub words_per_minute: u32,
    pub entry_accuracy: u32,
    pub word_accuracy: u32,
}

impl ScoreSummary {
    pub fn from_counters(counters: &Counters, duration_secs: u32) -> Self {
        let words_per_minute = if duration_secs == 0 || duration_secs == 60 {
            counters.matched_words
        } else {
            (counters.matched_words as f64 * 60.0 / duration_secs as f64).round() as u32
        };

        Self {
            words_per_minute,
            entry_accuracy: percentage(
                counters.correct_submissions,
                counters.total_submissions,
            ),
            word_accuracy: percentage(counters.matched_words, counters.total_words_offered),
        }
    }

    pub fn headline(&self) -> String {
        format!("{} words per minute.", self.words_per_minute)
    }

    pub fn detail(&self) -> String {
        format!(
            "{}% individual words correct.\n{}% total entries correct.",
            self.word_accuracy, self.entry_accuracy
        )
    }
}
