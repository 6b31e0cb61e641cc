// Morphology rule table: one ending rule per (suffix group, cell).
//
// Every verb conjugates against the rules of its infinitive's suffix group
// (-ar, -er, -ir); the conjugation class only decides how the stem is
// resolved, never which ending set applies. A rule carries the ending, the
// two stem-alternation triggers, and whether the ending attaches to the root
// or to the whole infinitive (future and conditional).
//
// `RuleTable::new()` checks coverage up front. The set of supported cells is
// whatever the records declare across all groups; every group must then
// cover every one of those cells exactly once. Gaps and duplicates are
// load-time errors, so a query can never reach a cell without a rule.

use crate::error::{MorphError, Result};
use crate::types::{Cell, NonFinite, SuffixGroup, TenseMood};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where the ending attaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemBase {
    /// The infinitive minus its suffix (habl-).
    #[default]
    Root,
    /// The whole infinitive (hablar-é).
    Infinitive,
}

/// How to build one cell for one suffix group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologyRule {
    /// Appended after the resolved stem.
    pub ending: String,
    /// The cell is stressed on the stem: stem-changing verbs apply their
    /// pattern here (piens-o, pued-a).
    pub stem_trigger: bool,
    /// The unstressed -ir cells where e/o raise to i/u (pid-ió, durm-amos).
    pub raise_trigger: bool,
    pub stem_base: StemBase,
}

impl MorphologyRule {
    pub fn new(ending: impl Into<String>) -> Self {
        MorphologyRule {
            ending: ending.into(),
            stem_trigger: false,
            raise_trigger: false,
            stem_base: StemBase::Root,
        }
    }

    pub fn stressed(mut self, on: bool) -> Self {
        self.stem_trigger = on;
        self
    }

    pub fn raised(mut self, on: bool) -> Self {
        self.raise_trigger = on;
        self
    }

    pub fn on(mut self, base: StemBase) -> Self {
        self.stem_base = base;
        self
    }
}

/// A single parsed morphology record, as delivered by a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub group: SuffixGroup,
    pub cell: Cell,
    pub rule: MorphologyRule,
}

/// The loaded, immutable rule table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: BTreeMap<SuffixGroup, BTreeMap<Cell, MorphologyRule>>,
    cells: Vec<Cell>,
}

impl RuleTable {
    /// Build the table and verify total coverage.
    pub fn new(records: impl IntoIterator<Item = RuleRecord>) -> Result<Self> {
        let mut rules: BTreeMap<SuffixGroup, BTreeMap<Cell, MorphologyRule>> = BTreeMap::new();
        let mut declared = BTreeSet::new();

        for RuleRecord { group, cell, rule } in records {
            if !cell.is_admitted() {
                return Err(MorphError::MalformedRule(format!(
                    "-{group} rule for non-existent cell {cell}"
                )));
            }
            if rule.ending.is_empty() {
                return Err(MorphError::MalformedRule(format!(
                    "-{group} rule for {cell} has an empty ending"
                )));
            }
            if rules.entry(group).or_default().insert(cell, rule).is_some() {
                return Err(MorphError::DuplicateRule { group, cell });
            }
            declared.insert(cell);
        }

        if declared.is_empty() {
            return Err(MorphError::MalformedRule("rule table is empty".into()));
        }

        // Any slot declared at all must be declared for all of its persons.
        let mut cells = BTreeSet::new();
        for cell in declared {
            match cell {
                Cell::Personal { tense_mood, .. } => {
                    cells.extend(tense_mood.persons().iter().map(|&p| Cell::personal(tense_mood, p)));
                }
                Cell::NonFinite(_) => {
                    cells.insert(cell);
                }
            }
        }

        for group in SuffixGroup::ALL {
            let group_rules = rules.get(&group);
            if let Some(&cell) = cells
                .iter()
                .find(|cell| group_rules.is_none_or(|r| !r.contains_key(*cell)))
            {
                return Err(MorphError::IncompleteRuleSet { group, cell });
            }
        }

        let cells: Vec<Cell> = cells.into_iter().collect();
        tracing::debug!(cells = cells.len(), "rule table built");
        Ok(RuleTable { rules, cells })
    }

    /// The rule for one cell. `None` only for cells the table does not
    /// declare; every declared cell has a rule in every group.
    pub fn rule(&self, group: SuffixGroup, cell: Cell) -> Option<&MorphologyRule> {
        self.rules.get(&group).and_then(|r| r.get(&cell))
    }

    /// All rules of one suffix group, in cell order. Covers every cell in
    /// `cells()`.
    pub fn rules_for(&self, group: SuffixGroup) -> impl Iterator<Item = (Cell, &MorphologyRule)> {
        self.rules
            .get(&group)
            .into_iter()
            .flat_map(|r| r.iter().map(|(&cell, rule)| (cell, rule)))
    }

    /// Every supported cell, in conventional order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn supports(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Declared personal slots, in conventional order (imperative included).
    pub fn tense_moods(&self) -> Vec<TenseMood> {
        let mut out: Vec<TenseMood> = self
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Personal { tense_mood, .. } => Some(*tense_mood),
                Cell::NonFinite(_) => None,
            })
            .collect();
        out.dedup();
        out
    }

    /// Declared non-finite forms, in conventional order.
    pub fn non_finite(&self) -> Vec<NonFinite> {
        self.cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::NonFinite(nf) => Some(*nf),
                Cell::Personal { .. } => None,
            })
            .collect()
    }
}
