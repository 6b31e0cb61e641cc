// Ending applier: stem + ending concatenation with spelling preservation.
//
// Spanish spells the same consonant differently depending on the vowel
// that follows it (c/qu, g/gu/gü, z/c, g/j). When an ending starting with
// a front vowel lands on a stem whose consonant was followed by a back vowel
// in the infinitive (or vice versa), the stem-final spelling has to change
// to keep the sound: toc-ar → toqu-é, venc-er → venz-o.
//
// The rules are data, not branches. Each `SpellingRule` names the stem tail
// it rewrites, the theme vowel it requires (the vowel after the stem in the
// infinitive), the onset the ending must start with, and the rewrite to
// perform. `combine()` walks the verb's extra rule sets first, then
// `DEFAULT_RULES`, and applies the first rule that matches. Exactly one rule
// fires per boundary; rules never stack.
//
// Extra rule sets (`ExtraSpelling`) are attached to individual verbs in the
// lexicon for alternations the default list does not cover: -cer/-cir verbs
// that insert a z (conozco) and -uir verbs that insert a y (construyo).

use crate::types::VowelClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition on the first characters of the ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Onset {
    /// e, é, i, í.
    FrontVowel,
    /// a, á, o, ó, u, ú.
    BackVowel,
    /// a, e, o (plain or accented).
    NonHighVowel,
    /// Unaccented i followed by another vowel (-ió, -iera, -iendo).
    GlideI,
}

impl Onset {
    fn matches(self, ending: &str) -> bool {
        let mut chars = ending.chars();
        let first = chars.next();
        match self {
            Onset::FrontVowel => first.and_then(VowelClass::of) == Some(VowelClass::Front),
            Onset::BackVowel => first.and_then(VowelClass::of) == Some(VowelClass::Back),
            Onset::NonHighVowel => matches!(first, Some('a' | 'á' | 'e' | 'é' | 'o' | 'ó')),
            Onset::GlideI => {
                first == Some('i') && chars.next().and_then(VowelClass::of).is_some()
            }
        }
    }
}

/// What a matching rule does to the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Replace the matched stem tail with this string.
    StemTail(&'static str),
    /// Turn the ending's leading i into y (le + ió → leyó).
    GlideY,
}

/// One orthographic boundary rule.
#[derive(Debug, Clone, Copy)]
pub struct SpellingRule {
    /// Short name, used in trace logs and tests (e.g., "c→qu").
    pub name: &'static str,
    /// Stem endings this rule applies to.
    pub stem_tails: &'static [&'static str],
    /// Required theme vowel class, or `None` for any.
    pub theme: Option<VowelClass>,
    /// Required ending onset.
    pub onset: Onset,
    pub rewrite: Rewrite,
}

impl SpellingRule {
    /// The stem tail this rule matches at this boundary, if any.
    fn matched_tail(&self, stem: &str, ending: &str, theme: VowelClass) -> Option<&'static str> {
        if self.theme.is_some_and(|t| t != theme) || !self.onset.matches(ending) {
            return None;
        }
        self.stem_tails
            .iter()
            .copied()
            .find(|tail| stem.ends_with(tail))
    }

    fn apply(&self, stem: &str, ending: &str, tail: &str) -> String {
        match self.rewrite {
            Rewrite::StemTail(replacement) => {
                let kept = &stem[..stem.len() - tail.len()];
                format!("{kept}{replacement}{ending}")
            }
            // The leading 'i' is one byte; `Onset::GlideI` guarantees it.
            Rewrite::GlideY => format!("{stem}y{}", &ending[1..]),
        }
    }
}

/// Default boundary rules, in firing order. They apply to every verb.
pub const DEFAULT_RULES: &[SpellingRule] = &[
    // toc-ar: toqué, toque
    SpellingRule {
        name: "c→qu",
        stem_tails: &["c"],
        theme: Some(VowelClass::Back),
        onset: Onset::FrontVowel,
        rewrite: Rewrite::StemTail("qu"),
    },
    // pag-ar: pagué, juegue
    SpellingRule {
        name: "g→gu",
        stem_tails: &["g"],
        theme: Some(VowelClass::Back),
        onset: Onset::FrontVowel,
        rewrite: Rewrite::StemTail("gu"),
    },
    // averigu-ar: averigüé
    SpellingRule {
        name: "gu→gü",
        stem_tails: &["gu"],
        theme: Some(VowelClass::Back),
        onset: Onset::FrontVowel,
        rewrite: Rewrite::StemTail("gü"),
    },
    // empez-ar: empecé, empiece
    SpellingRule {
        name: "z→c",
        stem_tails: &["z"],
        theme: Some(VowelClass::Back),
        onset: Onset::FrontVowel,
        rewrite: Rewrite::StemTail("c"),
    },
    // venc-er: venzo, venza
    SpellingRule {
        name: "c→z",
        stem_tails: &["c"],
        theme: Some(VowelClass::Front),
        onset: Onset::BackVowel,
        rewrite: Rewrite::StemTail("z"),
    },
    // segu-ir: sigo, siga
    SpellingRule {
        name: "gu→g",
        stem_tails: &["gu"],
        theme: Some(VowelClass::Front),
        onset: Onset::BackVowel,
        rewrite: Rewrite::StemTail("g"),
    },
    // cog-er: cojo, coja
    SpellingRule {
        name: "g→j",
        stem_tails: &["g"],
        theme: Some(VowelClass::Front),
        onset: Onset::BackVowel,
        rewrite: Rewrite::StemTail("j"),
    },
    // le-er: leyó, leyera, leyendo
    SpellingRule {
        name: "i→y",
        stem_tails: &["a", "e", "o"],
        theme: None,
        onset: Onset::GlideI,
        rewrite: Rewrite::GlideY,
    },
];

/// -cer/-cir after a vowel: conozco, conozca.
const ZC_RULES: &[SpellingRule] = &[SpellingRule {
    name: "c→zc",
    stem_tails: &["c"],
    theme: Some(VowelClass::Front),
    onset: Onset::BackVowel,
    rewrite: Rewrite::StemTail("zc"),
}];

/// -uir verbs: construyo, construye, construyó, construyendo.
const UY_RULES: &[SpellingRule] = &[
    SpellingRule {
        name: "u→uy",
        stem_tails: &["u"],
        theme: Some(VowelClass::Front),
        onset: Onset::NonHighVowel,
        rewrite: Rewrite::StemTail("uy"),
    },
    SpellingRule {
        name: "u+i→uy",
        stem_tails: &["u"],
        theme: Some(VowelClass::Front),
        onset: Onset::GlideI,
        rewrite: Rewrite::GlideY,
    },
];

/// Verb-specific rule sets consulted before `DEFAULT_RULES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraSpelling {
    /// c → zc before a back vowel (conocer, parecer, ofrecer).
    Zc,
    /// y inserted after stem-final u (construir, huir, incluir).
    Uy,
}

impl ExtraSpelling {
    pub const ALL: [ExtraSpelling; 2] = [ExtraSpelling::Zc, ExtraSpelling::Uy];

    pub fn rules(self) -> &'static [SpellingRule] {
        match self {
            ExtraSpelling::Zc => ZC_RULES,
            ExtraSpelling::Uy => UY_RULES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExtraSpelling::Zc => "zc",
            ExtraSpelling::Uy => "uy",
        }
    }

    pub fn from_label(label: &str) -> Option<ExtraSpelling> {
        ExtraSpelling::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for ExtraSpelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The rule that fires at this boundary, if any: extras first, then defaults.
pub fn boundary_rule(
    stem: &str,
    ending: &str,
    theme: VowelClass,
    extras: &[ExtraSpelling],
) -> Option<(&'static SpellingRule, &'static str)> {
    extras
        .iter()
        .flat_map(|extra| extra.rules())
        .chain(DEFAULT_RULES)
        .find_map(|rule| {
            rule.matched_tail(stem, ending, theme)
                .map(|tail| (rule, tail))
        })
}

/// Join a stem and an ending, applying at most one spelling rule.
///
/// `theme` is the vowel class of the verb's infinitive suffix (see
/// `SuffixGroup::theme()`), which tells us how the stem-final consonant
/// sounds.
pub fn combine(stem: &str, ending: &str, theme: VowelClass, extras: &[ExtraSpelling]) -> String {
    match boundary_rule(stem, ending, theme, extras) {
        Some((rule, tail)) => {
            tracing::trace!(rule = rule.name, stem, ending, "spelling rule applied");
            rule.apply(stem, ending, tail)
        }
        None => format!("{stem}{ending}"),
    }
}
