//! Lemma command: base forms of words.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use cefr_lens_core::lexicon::{self, LexicalStore};
use cefr_lens_core::{CefrLevel, lemmatize, vocabulary};

/// Arguments for the `lemma` subcommand.
#[derive(Args, Debug, Default)]
pub struct LemmaArgs {
    /// Words to reduce to their base form.
    #[arg(required = true)]
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct LemmaEntry {
    pub word: String,
    pub lemma: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CefrLevel>,
}

pub(crate) fn lemma_entries(words: &[String], store: &dyn LexicalStore) -> Vec<LemmaEntry> {
    words
        .iter()
        .map(|word| {
            let word = word.trim().to_lowercase();
            let lemma = lemmatize(&word, store);
            let level = vocabulary::word_level(&word, store);
            LemmaEntry { word, lemma, level }
        })
        .collect()
}

/// Print the lemma of each word.
#[instrument(name = "cmd_lemma", skip_all, fields(words = args.words.len()))]
pub fn cmd_lemma(args: LemmaArgs, global_json: bool) -> anyhow::Result<()> {
    debug!("executing lemma command");
    let store = lexicon::initialize().context("failed to load word lists")?;
    let entries = lemma_entries(&args.words, store);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            let level = entry
                .level
                .map_or_else(|| "unknown".dimmed().to_string(), |l| l.cyan().to_string());
            println!("{} -> {} ({level})", entry.word, entry.lemma);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_lemmatizes() {
        let store = lexicon::initialize().unwrap();
        let words = vec!["Running".to_string(), "children".to_string(), "went".to_string()];
        let entries = lemma_entries(&words, store);
        let lemmas: Vec<&str> = entries.iter().map(|e| e.lemma.as_str()).collect();
        assert_eq!(lemmas, ["run", "child", "go"]);
        assert_eq!(entries[0].word, "running");
    }

    #[test]
    fn unknown_word_has_no_level() {
        let store = lexicon::initialize().unwrap();
        let entries = lemma_entries(&["zyxqv".to_string()], store);
        assert_eq!(entries[0].lemma, "zyxqv");
        assert_eq!(entries[0].level, None);
    }

    #[test]
    fn cmd_lemma_succeeds() {
        let args = LemmaArgs {
            words: vec!["studied".to_string()],
        };
        assert!(cmd_lemma(args, true).is_ok());
    }
}
