//! Parsers for the embedded word-list formats.
//!
//! All entries are trimmed and lowercased. Rows with too few fields, empty
//! words, or unrecognized levels/ranks are skipped; only a structurally
//! broken file is an error.

use std::collections::{HashMap, HashSet};

use crate::error::{LexiconError, LexiconResult};
use crate::level::CefrLevel;

/// Irregular-form table plus the subset of variants marked as past participles.
pub(crate) type IrregularTables = (HashMap<String, String>, HashSet<String>);

fn reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes())
}

fn parse_error(file: &'static str, err: &csv::Error) -> LexiconError {
    LexiconError::Parse {
        file,
        message: err.to_string(),
    }
}

/// Walks the two-column rows of a CSV list, handing each `(first, second)`
/// pair (lowercased) to `visit`.
fn for_each_pair(
    file: &'static str,
    content: &str,
    mut visit: impl FnMut(&csv::StringRecord, String, String),
) -> LexiconResult<()> {
    let mut rdr = reader(content);
    for record in rdr.records() {
        let record = record.map_err(|e| parse_error(file, &e))?;
        if record.len() < 2 {
            continue;
        }
        let first = record[0].to_lowercase();
        let second = record[1].to_lowercase();
        visit(&record, first, second);
    }
    Ok(())
}

/// Parses `word,level` rows where level is one of `a1`..`c1`.
pub(crate) fn leveled_words(
    file: &'static str,
    content: &str,
) -> LexiconResult<HashMap<String, CefrLevel>> {
    let mut words = HashMap::new();
    for_each_pair(file, content, |_, word, label| {
        let level = match label.as_str() {
            "a1" => CefrLevel::A1,
            "a2" => CefrLevel::A2,
            "b1" => CefrLevel::B1,
            "b2" => CefrLevel::B2,
            "c1" => CefrLevel::C1,
            _ => return,
        };
        if !word.is_empty() {
            words.insert(word, level);
        }
    })?;
    non_empty(file, words)
}

/// Parses `rank,word` rows of a frequency list, banding ranks into levels.
pub(crate) fn ranked_words(
    file: &'static str,
    content: &str,
) -> LexiconResult<HashMap<String, CefrLevel>> {
    let mut words = HashMap::new();
    for_each_pair(file, content, |_, rank, word| {
        let Ok(rank) = rank.parse::<u32>() else {
            return;
        };
        if word.is_empty() {
            return;
        }
        let level = match rank {
            0..=500 => CefrLevel::A1,
            501..=1200 => CefrLevel::A2,
            1201..=2000 => CefrLevel::B1,
            _ => CefrLevel::B2,
        };
        words.insert(word, level);
    })?;
    non_empty(file, words)
}

/// Parses `sublist,word` rows of the academic list. Sublists 1–5 are B2,
/// the rest C1.
pub(crate) fn sublist_words(
    file: &'static str,
    content: &str,
) -> LexiconResult<HashMap<String, CefrLevel>> {
    let mut words = HashMap::new();
    for_each_pair(file, content, |_, sublist, word| {
        let Ok(sublist) = sublist.parse::<u32>() else {
            return;
        };
        if word.is_empty() {
            return;
        }
        let level = if sublist <= 5 {
            CefrLevel::B2
        } else {
            CefrLevel::C1
        };
        words.insert(word, level);
    })?;
    non_empty(file, words)
}

/// Parses `variant,lemma[,pp]` rows.
pub(crate) fn irregular_forms(file: &'static str, content: &str) -> LexiconResult<IrregularTables> {
    let mut lemmas = HashMap::new();
    let mut participles = HashSet::new();
    for_each_pair(file, content, |record, variant, lemma| {
        if variant.is_empty() {
            return;
        }
        if record
            .get(2)
            .is_some_and(|kind| kind.eq_ignore_ascii_case("pp"))
        {
            participles.insert(variant.clone());
        }
        if !lemma.is_empty() {
            lemmas.insert(variant, lemma);
        }
    })?;
    let lemmas = non_empty(file, lemmas)?;
    Ok((lemmas, participles))
}

/// Parses a one-entry-per-line list. Blank lines and `#` comments are skipped.
pub(crate) fn word_set(file: &'static str, content: &str) -> LexiconResult<HashSet<String>> {
    let words: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();
    if words.is_empty() {
        return Err(LexiconError::Empty { file });
    }
    Ok(words)
}

fn non_empty<K, V>(file: &'static str, map: HashMap<K, V>) -> LexiconResult<HashMap<K, V>> {
    if map.is_empty() {
        return Err(LexiconError::Empty { file });
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leveled_words_skips_unknown_labels() {
        let words = leveled_words("t.csv", "Apple,A1\nbanana, b2\ncherry,z9\n,a1\nlonely\n").unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words["apple"], CefrLevel::A1);
        assert_eq!(words["banana"], CefrLevel::B2);
    }

    #[test]
    fn ranked_words_band_boundaries() {
        let csv = "500,a\n501,b\n1200,c\n1201,d\n2000,e\n2001,f\nrank,word\n";
        let words = ranked_words("t.csv", csv).unwrap();
        assert_eq!(words["a"], CefrLevel::A1);
        assert_eq!(words["b"], CefrLevel::A2);
        assert_eq!(words["c"], CefrLevel::A2);
        assert_eq!(words["d"], CefrLevel::B1);
        assert_eq!(words["e"], CefrLevel::B1);
        assert_eq!(words["f"], CefrLevel::B2);
        assert!(!words.contains_key("word"));
    }

    #[test]
    fn sublist_words_split_at_five() {
        let words = sublist_words("t.csv", "5,analyse\n6,adjacent\n").unwrap();
        assert_eq!(words["analyse"], CefrLevel::B2);
        assert_eq!(words["adjacent"], CefrLevel::C1);
    }

    #[test]
    fn irregular_forms_collect_participles() {
        let (lemmas, participles) =
            irregular_forms("t.csv", "went,go\ngone,go,pp\nMice,Mouse\n").unwrap();
        assert_eq!(lemmas["went"], "go");
        assert_eq!(lemmas["mice"], "mouse");
        assert!(participles.contains("gone"));
        assert!(!participles.contains("went"));
    }

    #[test]
    fn word_set_skips_comments_and_blanks() {
        let set = word_set("t.txt", "# header\nThe\n\n  a  \n").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("a"));
    }

    #[test]
    fn empty_lists_are_errors() {
        assert_eq!(
            word_set("t.txt", "# nothing\n"),
            Err(LexiconError::Empty { file: "t.txt" })
        );
        assert!(matches!(
            leveled_words("t.csv", "word,zz\n"),
            Err(LexiconError::Empty { file: "t.csv" })
        ));
    }
}
