//! Lexical store: reference word lists, irregular forms, stopwords, and
//! abbreviations.
//!
//! The analysis pipeline only talks to the [`LexicalStore`] trait. The
//! built-in implementation, [`Lexicon`], is compiled from word lists embedded
//! in the binary and built at most once per process by [`initialize()`].
//! After that it is never mutated; every accessor hands out shared
//! references, so any number of concurrent assessments can read it.
//!
//! # Example
//!
//! ```
//! use cefr_lens_core::lexicon::{self, LexicalStore, WordList};
//!
//! let store = lexicon::initialize().expect("embedded word lists load");
//! assert!(store.level_of(WordList::Oxford, "cat").is_some());
//! assert_eq!(store.lemma_of("went"), Some("go"));
//! ```

mod parse;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::error::LexiconResult;
use crate::level::CefrLevel;

/// Read-only lookups the analysis pipeline needs from a lexical store.
///
/// Words are expected in lowercase.
pub trait LexicalStore: Send + Sync {
    /// Level of `word` in one reference list, if listed.
    fn level_of(&self, list: WordList, word: &str) -> Option<CefrLevel>;

    /// Base form of an irregular variant (`went` → `go`), if known.
    fn lemma_of(&self, variant: &str) -> Option<&str>;

    /// Whether `word` is a function word excluded from vocabulary scoring.
    fn is_stopword(&self, word: &str) -> bool;

    /// Whether `token` (including its trailing dot, e.g. `mr.`) is a known
    /// abbreviation.
    fn is_abbreviation(&self, token: &str) -> bool;

    /// Whether `word` is an irregular past participle (`taken`, `seen`).
    fn is_past_participle(&self, word: &str) -> bool;
}

/// The reference word lists, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordList {
    /// Leveled learner list (A1–C1).
    Oxford,
    /// Academic word list (B2–C1).
    Academic,
    /// General frequency list, banded by rank (A1–B2).
    General,
}

impl WordList {
    /// Lists in the order vocabulary lookups consult them.
    pub const LOOKUP_ORDER: [Self; 3] = [Self::Oxford, Self::Academic, Self::General];
}

/// Raw text of every word list a [`Lexicon`] is built from.
#[derive(Debug, Clone, Copy)]
pub struct LexiconSources<'a> {
    /// `word,level` rows.
    pub oxford: &'a str,
    /// `sublist,word` rows.
    pub academic: &'a str,
    /// `rank,word` rows.
    pub general: &'a str,
    /// `variant,lemma[,pp]` rows.
    pub irregulars: &'a str,
    /// One stopword per line.
    pub stopwords: &'a str,
    /// One abbreviation per line, trailing dot included.
    pub abbreviations: &'a str,
}

impl LexiconSources<'static> {
    /// Word lists compiled into the binary.
    pub const EMBEDDED: Self = Self {
        oxford: include_str!("../../data/oxford5000.csv"),
        academic: include_str!("../../data/awl.csv"),
        general: include_str!("../../data/ngsl.csv"),
        irregulars: include_str!("../../data/irregulars.csv"),
        stopwords: include_str!("../../data/stopwords.txt"),
        abbreviations: include_str!("../../data/abbreviations.txt"),
    };
}

/// The built-in lexical store.
#[derive(Debug, Clone)]
pub struct Lexicon {
    oxford: HashMap<String, CefrLevel>,
    academic: HashMap<String, CefrLevel>,
    general: HashMap<String, CefrLevel>,
    irregulars: HashMap<String, String>,
    past_participles: HashSet<String>,
    stopwords: HashSet<String>,
    abbreviations: HashSet<String>,
}

impl Lexicon {
    /// Builds a lexicon from the given word lists.
    #[tracing::instrument(skip_all)]
    pub fn from_sources(sources: &LexiconSources<'_>) -> LexiconResult<Self> {
        let oxford = parse::leveled_words("oxford5000.csv", sources.oxford)?;
        let academic = parse::sublist_words("awl.csv", sources.academic)?;
        let general = parse::ranked_words("ngsl.csv", sources.general)?;
        let (irregulars, past_participles) =
            parse::irregular_forms("irregulars.csv", sources.irregulars)?;
        let stopwords = parse::word_set("stopwords.txt", sources.stopwords)?;
        let abbreviations = parse::word_set("abbreviations.txt", sources.abbreviations)?;

        tracing::debug!(
            oxford = oxford.len(),
            academic = academic.len(),
            general = general.len(),
            irregulars = irregulars.len(),
            past_participles = past_participles.len(),
            stopwords = stopwords.len(),
            abbreviations = abbreviations.len(),
            "lexicon built"
        );

        Ok(Self {
            oxford,
            academic,
            general,
            irregulars,
            past_participles,
            stopwords,
            abbreviations,
        })
    }

    /// Builds a lexicon from the embedded word lists.
    pub fn embedded() -> LexiconResult<Self> {
        Self::from_sources(&LexiconSources::EMBEDDED)
    }

    /// All entries of one reference list.
    pub const fn entries(&self, list: WordList) -> &HashMap<String, CefrLevel> {
        match list {
            WordList::Oxford => &self.oxford,
            WordList::Academic => &self.academic,
            WordList::General => &self.general,
        }
    }

    /// Irregular variant → lemma table.
    pub const fn irregular_forms(&self) -> &HashMap<String, String> {
        &self.irregulars
    }

    /// Irregular past participles.
    pub const fn past_participles(&self) -> &HashSet<String> {
        &self.past_participles
    }

    /// Stopword set.
    pub const fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    /// Abbreviation set (entries keep their trailing dot).
    pub const fn abbreviations(&self) -> &HashSet<String> {
        &self.abbreviations
    }
}

impl LexicalStore for Lexicon {
    fn level_of(&self, list: WordList, word: &str) -> Option<CefrLevel> {
        self.entries(list).get(word).copied()
    }

    fn lemma_of(&self, variant: &str) -> Option<&str> {
        self.irregulars.get(variant).map(String::as_str)
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.contains(token)
    }

    fn is_past_participle(&self, word: &str) -> bool {
        self.past_participles.contains(word)
    }
}

static LEXICON: OnceLock<LexiconResult<Lexicon>> = OnceLock::new();

/// Returns the process-wide lexicon, building it on first call.
///
/// Concurrent first callers block until a single build finishes. A build
/// failure is cached and returned to every later caller.
pub fn initialize() -> LexiconResult<&'static Lexicon> {
    LEXICON
        .get_or_init(Lexicon::embedded)
        .as_ref()
        .map_err(Clone::clone)
}
