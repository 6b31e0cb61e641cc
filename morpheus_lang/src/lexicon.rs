// Lexicon store: verb entries keyed by infinitive.
//
// A `VerbEntry` carries everything the engine needs to know about one verb
// beyond the general rule table: its conjugation class, its stem-change
// pattern (stem-changing verbs only), extra spelling rule sets, and a sparse
// map of per-cell irregular overrides (a full surface form, or just a
// replacement stem).
//
// `Lexicon::new()` is the only way to build a store. It validates every
// entry and rejects duplicates, then freezes: there are no mutation methods,
// so a `Lexicon` can be shared across threads without locking. Entries keep
// their insertion order (file order) for deterministic iteration; a
// `BTreeMap` index provides lookup by infinitive.

use crate::error::{MorphError, Result};
use crate::orthography::ExtraSpelling;
use crate::types::{Cell, ConjugationClass, StemChange, SuffixGroup};
use std::collections::BTreeMap;

/// A lexicon-supplied exception for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// The complete surface form; bypasses stem resolution and endings.
    Form(String),
    /// A replacement stem; the regular ending is still applied.
    Stem(String),
}

/// One verb of the lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbEntry {
    infinitive: String,
    class: ConjugationClass,
    stem_change: Option<StemChange>,
    spelling: Vec<ExtraSpelling>,
    overrides: BTreeMap<Cell, Override>,
    gloss: Option<String>,
}

impl VerbEntry {
    pub fn new(infinitive: impl Into<String>, class: ConjugationClass) -> Self {
        VerbEntry {
            infinitive: infinitive.into(),
            class,
            stem_change: None,
            spelling: Vec::new(),
            overrides: BTreeMap::new(),
            gloss: None,
        }
    }

    pub fn with_stem_change(mut self, pattern: StemChange) -> Self {
        self.stem_change = Some(pattern);
        self
    }

    pub fn with_spelling(mut self, extra: ExtraSpelling) -> Self {
        if !self.spelling.contains(&extra) {
            self.spelling.push(extra);
        }
        self
    }

    /// Set the override for a cell, replacing any earlier one.
    pub fn with_override(mut self, cell: Cell, value: Override) -> Self {
        self.overrides.insert(cell, value);
        self
    }

    pub fn with_gloss(mut self, gloss: impl Into<String>) -> Self {
        self.gloss = Some(gloss.into());
        self
    }

    pub fn infinitive(&self) -> &str {
        &self.infinitive
    }

    pub fn class(&self) -> ConjugationClass {
        self.class
    }

    pub fn stem_change(&self) -> Option<StemChange> {
        self.stem_change
    }

    pub fn spelling(&self) -> &[ExtraSpelling] {
        &self.spelling
    }

    pub fn gloss(&self) -> Option<&str> {
        self.gloss.as_deref()
    }

    pub fn override_for(&self, cell: Cell) -> Option<&Override> {
        self.overrides.get(&cell)
    }

    /// All overrides in cell order.
    pub fn overrides(&self) -> impl Iterator<Item = (&Cell, &Override)> {
        self.overrides.iter()
    }

    /// Suffix group of the infinitive. Always `Some` for entries that passed
    /// `Lexicon::new()`.
    pub fn suffix_group(&self) -> Option<SuffixGroup> {
        SuffixGroup::from_infinitive(&self.infinitive)
    }

    /// The infinitive minus its two-letter suffix ("pens" for "pensar").
    pub fn root(&self) -> &str {
        let cut = self.infinitive.len().saturating_sub(2);
        self.infinitive.get(..cut).unwrap_or("")
    }

    /// Check the entry's internal consistency.
    pub(crate) fn validate(&self) -> Result<()> {
        let malformed = |reason: String| MorphError::MalformedEntry {
            infinitive: self.infinitive.clone(),
            reason,
        };

        if !self.infinitive.chars().all(|c| c.is_alphabetic() && c.is_lowercase()) {
            return Err(malformed("infinitive must be lowercase letters only".into()));
        }
        let Some(group) = self.suffix_group() else {
            return Err(malformed("infinitive must end in -ar, -er or -ir".into()));
        };
        // Only irregular verbs may have an empty root (ir).
        if self.root().is_empty() && self.class != ConjugationClass::Irregular {
            return Err(malformed(format!("{} verb has an empty root", self.class)));
        }
        if !self.class.admits(group) {
            return Err(malformed(format!(
                "class {} does not match the -{group} suffix",
                self.class
            )));
        }
        match (self.class, self.stem_change) {
            (ConjugationClass::StemChanging, None) => {
                return Err(malformed("stem-changing verb has no stem-change pattern".into()));
            }
            (class, Some(pattern)) if class != ConjugationClass::StemChanging => {
                return Err(malformed(format!(
                    "stem-change pattern {pattern} on a {class} verb"
                )));
            }
            _ => {}
        }
        if self.class.is_regular() && !self.spelling.is_empty() {
            return Err(malformed(format!(
                "extra spelling rules on a {} verb",
                self.class
            )));
        }
        if let Some((cell, _)) = self.overrides.iter().find(|(cell, _)| !cell.is_admitted()) {
            return Err(malformed(format!("override for non-existent cell {cell}")));
        }
        let empty = |value: &Override| match value {
            Override::Form(text) | Override::Stem(text) => text.is_empty(),
        };
        if let Some((cell, _)) = self.overrides.iter().find(|(_, value)| empty(*value)) {
            return Err(malformed(format!("empty override for {cell}")));
        }
        Ok(())
    }
}

/// The loaded, immutable verb store.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<VerbEntry>,
    index: BTreeMap<String, usize>,
}

impl Lexicon {
    /// Build a lexicon from parsed entries.
    ///
    /// Fails with `MalformedEntry` on the first invalid entry and with
    /// `DuplicateVerb` if an infinitive appears twice.
    pub fn new(entries: impl IntoIterator<Item = VerbEntry>) -> Result<Self> {
        let mut lexicon = Lexicon::default();
        for entry in entries {
            entry.validate()?;
            if lexicon.index.contains_key(entry.infinitive()) {
                return Err(MorphError::DuplicateVerb {
                    infinitive: entry.infinitive,
                });
            }
            lexicon
                .index
                .insert(entry.infinitive.clone(), lexicon.entries.len());
            lexicon.entries.push(entry);
        }
        tracing::debug!(verbs = lexicon.entries.len(), "lexicon built");
        Ok(lexicon)
    }

    /// Look up a verb by infinitive.
    pub fn lookup(&self, infinitive: &str) -> Result<&VerbEntry> {
        self.index
            .get(infinitive)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| MorphError::NotFound {
                infinitive: infinitive.to_string(),
            })
    }

    pub fn contains(&self, infinitive: &str) -> bool {
        self.index.contains_key(infinitive)
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[VerbEntry] {
        &self.entries
    }

    /// Entries of one conjugation class, in insertion order.
    pub fn by_class(&self, class: ConjugationClass) -> Vec<&VerbEntry> {
        self.entries.iter().filter(|e| e.class == class).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
