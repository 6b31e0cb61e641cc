// Conjugation engine: the query façade over a lexicon and a rule table.
//
// `ConjugationEngine` owns both stores and never mutates them, so it is
// `Send + Sync` and any number of threads may conjugate through a shared
// reference. Every query builds its result from scratch: same input, same
// output, byte for byte.
//
// For each cell the pipeline is fixed: the verb's suffix group selects the
// rule, the stem resolver picks a stem (or a finished irregular form), and
// the orthography module joins stem and ending (lexicon-supplied stems are
// joined verbatim). The first failing cell aborts the whole `conjugate()`
// call; callers never see a partial paradigm.
//
// `conjugate_all()` fans the lexicon out over rayon's thread pool. Results
// come back in lexicon order regardless of scheduling.

use crate::error::{MorphError, Result};
use crate::lexicon::{Lexicon, VerbEntry};
use crate::orthography;
use crate::paradigm::Paradigm;
use crate::rules::RuleTable;
use crate::stem::{self, Resolution};
use crate::types::{Cell, TenseMood};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct ConjugationEngine {
    lexicon: Lexicon,
    rules: RuleTable,
}

impl ConjugationEngine {
    /// Pair a lexicon with a rule table.
    ///
    /// Fails with `MalformedEntry` if any verb overrides a cell the rule
    /// table does not declare; such an override could never be reached.
    pub fn new(lexicon: Lexicon, rules: RuleTable) -> Result<Self> {
        for entry in lexicon.entries() {
            if let Some((cell, _)) = entry.overrides().find(|(cell, _)| !rules.supports(**cell)) {
                return Err(MorphError::MalformedEntry {
                    infinitive: entry.infinitive().to_string(),
                    reason: format!("override for {cell}, which the rule table does not declare"),
                });
            }
        }
        tracing::debug!(
            verbs = lexicon.len(),
            cells = rules.cells().len(),
            "conjugation engine ready"
        );
        Ok(ConjugationEngine { lexicon, rules })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Generate the full paradigm of a verb.
    pub fn conjugate(&self, infinitive: &str) -> Result<Paradigm> {
        let entry = self.lexicon.lookup(infinitive)?;
        tracing::debug!(verb = infinitive, class = %entry.class(), "conjugating");
        self.paradigm_of(entry)
    }

    /// Generate a single form. Cells the rule table does not declare fail
    /// with `MalformedRule`.
    pub fn conjugate_cell(&self, infinitive: &str, cell: Cell) -> Result<String> {
        let entry = self.lexicon.lookup(infinitive)?;
        self.form_of(entry, cell)
    }

    /// The six-person slots every paradigm contains, in conventional order.
    ///
    /// The imperative is left out even when the rule table declares it: it
    /// has no 1sg. Its forms are in `Paradigm::imperative()`, and
    /// `rules().tense_moods()` lists every declared slot.
    pub fn supported_cells(&self) -> Vec<TenseMood> {
        self.rules
            .tense_moods()
            .into_iter()
            .filter(|tm| tm.is_six_person())
            .collect()
    }

    /// Conjugate every verb of the lexicon in parallel, in lexicon order.
    pub fn conjugate_all(&self) -> Result<Vec<Paradigm>> {
        let paradigms: Vec<Paradigm> = self
            .lexicon
            .entries()
            .par_iter()
            .map(|entry| self.paradigm_of(entry))
            .collect::<Result<_>>()?;
        tracing::info!(verbs = paradigms.len(), "conjugated whole lexicon");
        Ok(paradigms)
    }

    fn paradigm_of(&self, entry: &VerbEntry) -> Result<Paradigm> {
        let mut paradigm = Paradigm::new(entry.infinitive());
        for &cell in self.rules.cells() {
            paradigm.insert(cell, self.form_of(entry, cell)?);
        }
        Ok(paradigm)
    }

    fn form_of(&self, entry: &VerbEntry, cell: Cell) -> Result<String> {
        let group = entry.suffix_group().ok_or_else(|| MorphError::MalformedEntry {
            infinitive: entry.infinitive().to_string(),
            reason: "infinitive must end in -ar, -er or -ir".into(),
        })?;
        let rule = self
            .rules
            .rule(group, cell)
            .ok_or_else(|| MorphError::MalformedRule(format!("no rule declared for {cell}")))?;
        match stem::resolve(entry, cell, rule)? {
            Resolution::Surface(form) => Ok(form),
            Resolution::IrregularStem(stem) => Ok(format!("{stem}{}", rule.ending)),
            Resolution::Stem(stem) => Ok(orthography::combine(
                &stem,
                &rule.ending,
                group.theme(),
                entry.spelling(),
            )),
        }
    }
}
