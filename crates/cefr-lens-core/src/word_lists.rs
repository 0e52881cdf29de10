//! Fixed linguistic tables used by sentence splitting and syntax scoring.
//!
//! Subordinators, be-verbs, connector categories, and title abbreviations.
//! These are small closed classes that don't vary with the lexical store.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;


/// Subordinating conjunctions and relative pronouns that open a dependent clause.
pub static SUBORDINATORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Adverbial clauses
    set.extend([
        "because", "although", "if", "when", "while", "unless", "though", "since", "whereas",
        "whereby", "whenever", "wherever", "after", "before", "until", "as", "once", "provided",
        "supposing", "lest",
    ]);

    // Relative and nominal clauses
    set.extend([
        "which", "who", "that", "where", "whose", "whom", "however", "whatever", "whichever",
        "whoever",
    ]);

    set
});

/// Forms of "to be" that can introduce a passive construction.
pub static BE_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["is", "am", "are", "was", "were", "been", "being", "be"]
        .into_iter()
        .collect()
});

/// Semantic category of a discourse connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorCategory {
    /// "and", "moreover", "likewise".
    Addition,
    /// "but", "however", "nevertheless".
    Contrast,
    /// "because", "therefore", "thus".
    Cause,
    /// "first", "then", "finally".
    Sequence,
    /// "overall", "briefly", "in conclusion".
    Summary,
}

/// Connector word → category.
pub static CONNECTORS: LazyLock<HashMap<&'static str, ConnectorCategory>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    let groups: [(ConnectorCategory, &[&'static str]); 5] = [
        (
            ConnectorCategory::Addition,
            &[
                "and",
                "also",
                "furthermore",
                "moreover",
                "besides",
                "additionally",
                "addition",
                "too",
                "likewise",
                "similarly",
                "equally",
            ],
        ),
        (
            ConnectorCategory::Contrast,
            &[
                "but",
                "however",
                "nevertheless",
                "nonetheless",
                "yet",
                "still",
                "conversely",
                "despite",
                "contrary",
            ],
        ),
        (
            ConnectorCategory::Cause,
            &[
                "because",
                "therefore",
                "consequently",
                "thus",
                "hence",
                "so",
                "accordingly",
            ],
        ),
        (
            ConnectorCategory::Sequence,
            &[
                "first",
                "second",
                "third",
                "finally",
                "then",
                "next",
                "subsequently",
                "previously",
                "meanwhile",
                "afterwards",
                "initially",
                "ultimately",
                "lastly",
            ],
        ),
        (
            ConnectorCategory::Summary,
            &["conclusion", "summary", "overall", "briefly", "conclude"],
        ),
    ];
    for (category, words) in groups {
        map.extend(words.iter().map(|w| (*w, category)));
    }
    map
});

/// Title abbreviations that stay attached to the capitalized name after them.
pub static TITLE_ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st."]
        .into_iter()
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subordinator_count() {
        assert_eq!(SUBORDINATORS.len(), 30);
        assert!(SUBORDINATORS.contains("although"));
        assert!(!SUBORDINATORS.contains("and"));
    }

    #[test]
    fn be_verbs() {
        assert!(BE_VERBS.contains("were"));
        assert!(!BE_VERBS.contains("has"));
    }

    #[test]
    fn connectors_cover_five_categories() {
        let categories: HashSet<_> = CONNECTORS.values().copied().collect();
        assert_eq!(categories.len(), 5);
        assert_eq!(CONNECTORS.get("however"), Some(&ConnectorCategory::Contrast));
        assert_eq!(CONNECTORS.get("because"), Some(&ConnectorCategory::Cause));
        assert_eq!(CONNECTORS.get("lastly"), Some(&ConnectorCategory::Sequence));
    }

    #[test]
    fn titles() {
        assert!(TITLE_ABBREVIATIONS.contains("dr."));
        assert!(!TITLE_ABBREVIATIONS.contains("etc."));
    }
}
