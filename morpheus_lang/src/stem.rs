// Stem resolver: picks the stem (or the whole surface form) for one cell.
//
// Resolution is an ordered lookup, first match wins:
// 1. A `Form` override for the cell: the finished word, endings skipped.
// 2. A `Stem` override for the cell: used as-is, no stem change. The stem is
//    a literal spelling (hag-, teng-), so the ending is joined without
//    boundary spelling rules.
// 3. The base stem: the root (infinitive minus -ar/-er/-ir), or the whole
//    infinitive when the rule says so (future, conditional).
// 4. For stem-changing verbs on a root-based cell: the stressed alternation
//    where the rule's `stem_trigger` is set, otherwise the raised -ir
//    alternation where `raise_trigger` is set and the pattern has one.
//
// The alternation rewrites the last occurrence of the pattern's vowel in the
// root (pens → piens, repet → repit). A stem-changing verb whose root lacks
// that vowel is a lexicon authoring error and fails with
// `InvalidStemChange` instead of quietly producing the unchanged stem.

use crate::error::{MorphError, Result};
use crate::lexicon::{Override, VerbEntry};
use crate::rules::{MorphologyRule, StemBase};
use crate::types::{Cell, ConjugationClass};

/// Outcome of stem resolution for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A complete surface form from the lexicon.
    Surface(String),
    /// A stem still waiting for its ending.
    Stem(String),
    /// A lexicon-supplied stem; its ending is appended verbatim.
    IrregularStem(String),
}

/// Resolve the stem of `entry` for `cell` under `rule`.
pub fn resolve(entry: &VerbEntry, cell: Cell, rule: &MorphologyRule) -> Result<Resolution> {
    match entry.override_for(cell) {
        Some(Override::Form(form)) => {
            tracing::trace!(verb = entry.infinitive(), %cell, form = form.as_str(), "form override");
            return Ok(Resolution::Surface(form.clone()));
        }
        Some(Override::Stem(stem)) => {
            tracing::trace!(verb = entry.infinitive(), %cell, stem = stem.as_str(), "stem override");
            return Ok(Resolution::IrregularStem(stem.clone()));
        }
        None => {}
    }

    let base = match rule.stem_base {
        StemBase::Infinitive => return Ok(Resolution::Stem(entry.infinitive().to_string())),
        StemBase::Root => entry.root(),
    };

    let pattern = match (entry.class(), entry.stem_change()) {
        (ConjugationClass::StemChanging, Some(pattern)) => pattern,
        _ => return Ok(Resolution::Stem(base.to_string())),
    };

    let replacement = if rule.stem_trigger {
        Some(pattern.stressed())
    } else if rule.raise_trigger {
        pattern.raised()
    } else {
        None
    };

    match replacement {
        None => Ok(Resolution::Stem(base.to_string())),
        Some(replacement) => replace_last(base, pattern.source(), replacement)
            .map(Resolution::Stem)
            .ok_or_else(|| MorphError::InvalidStemChange {
                infinitive: entry.infinitive().to_string(),
                cell,
                pattern,
                stem: base.to_string(),
            }),
    }
}

/// Replace the last occurrence of `vowel` in `stem`. `None` if absent.
fn replace_last(stem: &str, vowel: char, replacement: &str) -> Option<String> {
    let (idx, _) = stem.char_indices().rev().find(|&(_, c)| c == vowel)?;
    let mut out = String::with_capacity(stem.len() + replacement.len());
    out.push_str(&stem[..idx]);
    out.push_str(replacement);
    out.push_str(&stem[idx + vowel.len_utf8()..]);
    Some(out)
}
