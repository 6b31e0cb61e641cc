// Morpheus: a data-driven Spanish verb conjugation engine.
//
// Given an infinitive, produces its full paradigm: every indicative and
// subjunctive tense across six persons, the affirmative imperative, the
// gerund and the past participle. Endings, stem-change triggers and the verb
// lexicon are data; the code only knows how to combine them.
//
// Architecture:
// - `types.rs`: Closed enums `Person`, `TenseMood`, `Cell`, `SuffixGroup`,
//   `ConjugationClass`, `StemChange`
// - `error.rs`: `MorphError` and the crate `Result` alias
// - `lexicon.rs`: `VerbEntry` (class, stem change, overrides) and the
//   immutable `Lexicon` store
// - `rules.rs`: `RuleTable`, one ending rule per (suffix group, cell),
//   checked for total coverage at construction
// - `stem.rs`: Stem resolver (overrides, base stem, alternation)
// - `orthography.rs`: Ending applier with spelling rules at the stem/ending
//   boundary (toqué, venzo, leyó)
// - `paradigm.rs`: `Paradigm`, the owned result of a query
// - `engine.rs`: `ConjugationEngine`, the query façade
// - `loader.rs`: JSON and `.lexicon` text loaders
// - `lib.rs` (this file): re-exports and `default_engine()`
//
// The default Spanish data lives in `data/es_lexicon.json` and
// `data/es_morphology.json` and is embedded with `include_str!`, so
// `default_engine()` needs no files at runtime.
//
// Determinism: all maps are `BTreeMap`s keyed on ordered enums. The same
// query always produces byte-identical output.

pub mod engine;
pub mod error;
pub mod lexicon;
pub mod loader;
pub mod orthography;
pub mod paradigm;
pub mod rules;
pub mod stem;
pub mod types;

// Re-export key types at crate root for convenience.
pub use engine::ConjugationEngine;
pub use error::{MorphError, Result};
pub use lexicon::{Lexicon, Override, VerbEntry};
pub use orthography::ExtraSpelling;
pub use paradigm::{Paradigm, PersonForms};
pub use rules::{MorphologyRule, RuleRecord, RuleTable, StemBase};
pub use types::{
    Cell, ConjugationClass, Mood, NonFinite, Person, StemChange, SuffixGroup, Tense, TenseMood,
};

/// Embedded default Spanish lexicon (JSON).
pub const DEFAULT_LEXICON_JSON: &str = include_str!("../../data/es_lexicon.json");

/// Embedded default Spanish morphology table (JSON).
pub const DEFAULT_MORPHOLOGY_JSON: &str = include_str!("../../data/es_morphology.json");

/// Load the default lexicon embedded at compile time.
pub fn default_lexicon() -> Lexicon {
    loader::lexicon_from_json(DEFAULT_LEXICON_JSON).expect("embedded es_lexicon.json is malformed")
}

/// Load the default rule table embedded at compile time.
pub fn default_rules() -> RuleTable {
    loader::rules_from_json(DEFAULT_MORPHOLOGY_JSON)
        .expect("embedded es_morphology.json is malformed")
}

/// Build an engine over the embedded Spanish data.
///
/// Panics if the embedded data is inconsistent (should never happen in a
/// released build; the tests load it).
pub fn default_engine() -> ConjugationEngine {
    ConjugationEngine::new(default_lexicon(), default_rules())
        .expect("embedded Spanish data is inconsistent")
}
