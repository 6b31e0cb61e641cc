// Paradigm: the full set of forms of one verb, as returned by the engine.
//
// Forms are grouped the way a grammar table reads. The six-person slots
// (indicative and subjunctive) live in `tenses`, keyed by `TenseMood` and
// then `Person`; `BTreeMap` ordering gives conventional slot and person order
// for free. The affirmative imperative has no 1sg, so it is kept apart in
// `imperative`, and the gerund and past participle sit in `non_finite`.
//
// A `Paradigm` is built fresh by every `conjugate()` call and owned by the
// caller. It serializes to a JSON object keyed by the human-readable labels,
// in conventional order.

use crate::types::{Cell, NonFinite, Person, TenseMood};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Person → form for one slot, in conventional person order.
pub type PersonForms = BTreeMap<Person, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paradigm {
    infinitive: String,
    tenses: BTreeMap<TenseMood, PersonForms>,
    imperative: PersonForms,
    non_finite: BTreeMap<NonFinite, String>,
}

impl Paradigm {
    pub(crate) fn new(infinitive: impl Into<String>) -> Self {
        Paradigm {
            infinitive: infinitive.into(),
            tenses: BTreeMap::new(),
            imperative: BTreeMap::new(),
            non_finite: BTreeMap::new(),
        }
    }

    /// Store the form of one cell, replacing any previous value.
    pub(crate) fn insert(&mut self, cell: Cell, form: String) {
        match cell {
            Cell::Personal {
                tense_mood: TenseMood::Imperative,
                person,
            } => {
                self.imperative.insert(person, form);
            }
            Cell::Personal { tense_mood, person } => {
                self.tenses.entry(tense_mood).or_default().insert(person, form);
            }
            Cell::NonFinite(nf) => {
                self.non_finite.insert(nf, form);
            }
        }
    }

    pub fn infinitive(&self) -> &str {
        &self.infinitive
    }

    /// One form, or `None` if the cell is not part of this paradigm.
    pub fn get(&self, tense_mood: TenseMood, person: Person) -> Option<&str> {
        let forms = match tense_mood {
            TenseMood::Imperative => &self.imperative,
            _ => self.tenses.get(&tense_mood)?,
        };
        forms.get(&person).map(String::as_str)
    }

    /// Look up any cell, personal or non-finite.
    pub fn form(&self, cell: Cell) -> Option<&str> {
        match cell {
            Cell::Personal { tense_mood, person } => self.get(tense_mood, person),
            Cell::NonFinite(nf) => self.non_finite.get(&nf).map(String::as_str),
        }
    }

    /// All forms of a six-person slot.
    pub fn tense(&self, tense_mood: TenseMood) -> Option<&PersonForms> {
        self.tenses.get(&tense_mood)
    }

    /// Slot lookup by label ("present subjunctive", "imperative", ...).
    pub fn by_label(&self, label: &str) -> Option<&PersonForms> {
        match TenseMood::from_label(label)? {
            TenseMood::Imperative if !self.imperative.is_empty() => Some(&self.imperative),
            TenseMood::Imperative => None,
            tm => self.tenses.get(&tm),
        }
    }

    /// The six-person slots, in conventional order.
    pub fn tenses(&self) -> impl Iterator<Item = (TenseMood, &PersonForms)> {
        self.tenses.iter().map(|(&tm, forms)| (tm, forms))
    }

    /// Affirmative imperative (2sg..3pl); empty if the rule table has none.
    pub fn imperative(&self) -> &PersonForms {
        &self.imperative
    }

    pub fn non_finite(&self, form: NonFinite) -> Option<&str> {
        self.non_finite.get(&form).map(String::as_str)
    }

    pub fn gerund(&self) -> Option<&str> {
        self.non_finite(NonFinite::Gerund)
    }

    pub fn past_participle(&self) -> Option<&str> {
        self.non_finite(NonFinite::PastParticiple)
    }

    /// Every (cell, form) pair in conventional order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &str)> {
        let personal = self.tenses.iter().flat_map(|(&tm, forms)| {
            forms
                .iter()
                .map(move |(&p, form)| (Cell::personal(tm, p), form.as_str()))
        });
        let imperative = self
            .imperative
            .iter()
            .map(|(&p, form)| (Cell::personal(TenseMood::Imperative, p), form.as_str()));
        let non_finite = self
            .non_finite
            .iter()
            .map(|(&nf, form)| (Cell::NonFinite(nf), form.as_str()));
        personal.chain(imperative).chain(non_finite)
    }
}

impl Serialize for Paradigm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("infinitive", &self.infinitive)?;
        for (tense_mood, forms) in &self.tenses {
            map.serialize_entry(tense_mood.label(), forms)?;
        }
        if !self.imperative.is_empty() {
            map.serialize_entry(TenseMood::Imperative.label(), &self.imperative)?;
        }
        for (nf, form) in &self.non_finite {
            map.serialize_entry(nf.label(), form)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Paradigm {
        let mut p = Paradigm::new("hablar");
        let present = ["hablo", "hablas", "habla", "hablamos", "habláis", "hablan"];
        for (person, form) in Person::ALL.into_iter().zip(present) {
            p.insert(Cell::personal(TenseMood::PresentIndicative, person), form.into());
        }
        p.insert(
            Cell::personal(TenseMood::Imperative, Person::SecondSingular),
            "habla".into(),
        );
        p.insert(Cell::NonFinite(NonFinite::Gerund), "hablando".into());
        p
    }

    #[test]
    fn test_get() {
        let p = sample();
        assert_eq!(p.get(TenseMood::PresentIndicative, Person::FirstPlural), Some("hablamos"));
        assert_eq!(p.get(TenseMood::Imperative, Person::SecondSingular), Some("habla"));
        assert_eq!(p.get(TenseMood::Conditional, Person::FirstSingular), None);
        assert_eq!(p.gerund(), Some("hablando"));
        assert_eq!(p.past_participle(), None);
    }

    #[test]
    fn test_imperative_kept_out_of_tenses() {
        let p = sample();
        let slots: Vec<_> = p.tenses().map(|(tm, _)| tm).collect();
        assert_eq!(slots, vec![TenseMood::PresentIndicative]);
        assert_eq!(p.imperative().len(), 1);
    }

    #[test]
    fn test_by_label() {
        let p = sample();
        assert_eq!(p.by_label("present indicative").map(|f| f.len()), Some(6));
        assert_eq!(p.by_label("imperative").map(|f| f.len()), Some(1));
        assert!(p.by_label("conditional").is_none());
        assert!(p.by_label("nonsense").is_none());
    }

    #[test]
    fn test_cells_in_order() {
        let p = sample();
        let cells: Vec<Cell> = p.cells().map(|(c, _)| c).collect();
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
        assert_eq!(cells.len(), 8);
        assert_eq!(p.form(Cell::NonFinite(NonFinite::Gerund)), Some("hablando"));
    }

    #[test]
    fn test_serializes_in_conventional_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"infinitive":"hablar","#,
                r#""present indicative":{"1sg":"hablo","2sg":"hablas","3sg":"habla","#,
                r#""1pl":"hablamos","2pl":"habláis","3pl":"hablan"},"#,
                r#""imperative":{"2sg":"habla"},"#,
                r#""gerund":"hablando"}"#
            )
        );
    }
}
