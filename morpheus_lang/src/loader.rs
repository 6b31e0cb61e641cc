// Data loaders: JSON lexicon, JSON morphology table, and the plain-text
// `.lexicon` format.
//
// The on-disk shapes are private serde structs (`LexiconFile`, `VerbRecord`,
// `OverrideRecord`, `MorphologyFile`, `RuleRow`) that mirror the files one to
// one. Conversion into the validated stores happens here, so `Lexicon::new`
// and `RuleTable::new` never see the file layout.
//
// Lexicon override records come in four shapes:
// - `{"tense", "mood", "stem"}`: replacement stem for every person of a slot
// - `{"tense", "mood", "person", "stem" | "form"}`: one cell
// - `{"tense", "mood", "forms": {"1sg": ..}}`: several full forms at once
// - `{"non_finite", "stem" | "form"}`: gerund or past participle
// Slot-wide stems are laid down first, then person-specific overrides on top.
// Two overrides for the same cell at the same level are an authoring error.
//
// Morphology rows carry one ending per admitted person of the slot
// (5 for the imperative, 1 for a non-finite form). Triggers are either a
// boolean for the whole row or the list of persons they apply to.
//
// The text lexicon is the compact hand-written format:
//
//     lexicon spanish
//     # comment
//     verb hablar;
//     verb pensar (stem-change e→ie);
//     verb conocer (orthographic-changing, spelling zc);
//     end lexicon
//
// It carries no overrides; irregular verbs need the JSON format for those.

use crate::engine::ConjugationEngine;
use crate::error::{MorphError, Result};
use crate::lexicon::{Lexicon, Override, VerbEntry};
use crate::orthography::ExtraSpelling;
use crate::rules::{MorphologyRule, RuleRecord, RuleTable, StemBase};
use crate::types::{
    Cell, ConjugationClass, Mood, NonFinite, Person, StemChange, SuffixGroup, Tense, TenseMood,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// JSON lexicon
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconFile {
    verbs: Vec<VerbRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerbRecord {
    infinitive: String,
    class: ConjugationClass,
    #[serde(default)]
    stem_change: Option<StemChange>,
    #[serde(default)]
    spelling: Vec<ExtraSpelling>,
    #[serde(default)]
    gloss: Option<String>,
    #[serde(default)]
    overrides: Vec<OverrideRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideRecord {
    #[serde(default)]
    tense: Option<Tense>,
    #[serde(default)]
    mood: Option<Mood>,
    #[serde(default)]
    person: Option<Person>,
    #[serde(default)]
    non_finite: Option<NonFinite>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    stem: Option<String>,
    #[serde(default)]
    forms: BTreeMap<Person, String>,
}

/// Where an override record lands once its shape is known.
enum Placement {
    SlotStem(TenseMood, String),
    Cells(Vec<(Cell, Override)>),
}

impl OverrideRecord {
    fn place(self) -> std::result::Result<Placement, String> {
        let value = match (self.form, self.stem) {
            (Some(_), Some(_)) => return Err("override has both \"form\" and \"stem\"".into()),
            (Some(form), None) => Some(Override::Form(form)),
            (None, Some(stem)) => Some(Override::Stem(stem)),
            (None, None) => None,
        };

        if let Some(nf) = self.non_finite {
            if self.tense.is_some() || self.mood.is_some() || self.person.is_some() {
                return Err(format!("{nf} override must not name a tense, mood or person"));
            }
            if !self.forms.is_empty() {
                return Err(format!("{nf} override must not carry \"forms\""));
            }
            let value = value.ok_or_else(|| format!("{nf} override needs \"form\" or \"stem\""))?;
            return Ok(Placement::Cells(vec![(Cell::NonFinite(nf), value)]));
        }

        let (Some(tense), Some(mood)) = (self.tense, self.mood) else {
            return Err("override needs \"tense\" and \"mood\", or \"non_finite\"".into());
        };
        let tense_mood = TenseMood::from_parts(tense, mood)
            .ok_or_else(|| format!("no such slot: {tense:?} {mood:?}"))?;

        if !self.forms.is_empty() {
            if value.is_some() || self.person.is_some() {
                return Err(format!(
                    "{tense_mood} override mixes \"forms\" with \"person\", \"form\" or \"stem\""
                ));
            }
            let cells = self
                .forms
                .into_iter()
                .map(|(person, form)| (Cell::personal(tense_mood, person), Override::Form(form)))
                .collect();
            return Ok(Placement::Cells(cells));
        }

        match (self.person, value) {
            (Some(person), Some(value)) => {
                Ok(Placement::Cells(vec![(Cell::personal(tense_mood, person), value)]))
            }
            (None, Some(Override::Stem(stem))) => Ok(Placement::SlotStem(tense_mood, stem)),
            (None, Some(Override::Form(_))) => Err(format!(
                "{tense_mood} override gives a \"form\" without a \"person\""
            )),
            (_, None) => Err(format!("{tense_mood} override needs \"form\", \"stem\" or \"forms\"")),
        }
    }
}

impl VerbRecord {
    fn into_entry(self) -> Result<VerbEntry> {
        let malformed = |reason: String| MorphError::MalformedEntry {
            infinitive: self.infinitive.clone(),
            reason,
        };

        let mut slot_stems: BTreeMap<TenseMood, String> = BTreeMap::new();
        let mut specific: BTreeMap<Cell, Override> = BTreeMap::new();
        for record in self.overrides {
            match record.place().map_err(malformed)? {
                Placement::SlotStem(tense_mood, stem) => {
                    if slot_stems.insert(tense_mood, stem).is_some() {
                        return Err(malformed(format!("two slot-wide stems for {tense_mood}")));
                    }
                }
                Placement::Cells(cells) => {
                    for (cell, value) in cells {
                        if specific.insert(cell, value).is_some() {
                            return Err(malformed(format!("two overrides for {cell}")));
                        }
                    }
                }
            }
        }

        let mut entry = VerbEntry::new(self.infinitive.clone(), self.class);
        if let Some(pattern) = self.stem_change {
            entry = entry.with_stem_change(pattern);
        }
        for extra in self.spelling {
            entry = entry.with_spelling(extra);
        }
        if let Some(gloss) = self.gloss {
            entry = entry.with_gloss(gloss);
        }
        for (tense_mood, stem) in slot_stems {
            for &person in tense_mood.persons() {
                entry = entry.with_override(
                    Cell::personal(tense_mood, person),
                    Override::Stem(stem.clone()),
                );
            }
        }
        for (cell, value) in specific {
            entry = entry.with_override(cell, value);
        }
        Ok(entry)
    }
}

/// Parse a JSON lexicon (`{"verbs": [...]}`).
pub fn lexicon_from_json(json: &str) -> Result<Lexicon> {
    let file: LexiconFile = serde_json::from_str(json)?;
    let entries = file
        .verbs
        .into_iter()
        .map(VerbRecord::into_entry)
        .collect::<Result<Vec<_>>>()?;
    Lexicon::new(entries)
}

// ---------------------------------------------------------------------------
// JSON morphology
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MorphologyFile {
    rows: Vec<RuleRow>,
}

/// A trigger flag for a row: all-or-nothing, or per person.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Trigger {
    All(bool),
    Persons(Vec<Person>),
}

impl Default for Trigger {
    fn default() -> Self {
        Trigger::All(false)
    }
}

impl Trigger {
    fn applies(&self, person: Person) -> bool {
        match self {
            Trigger::All(on) => *on,
            Trigger::Persons(persons) => persons.contains(&person),
        }
    }

    /// First listed person the slot does not admit.
    fn stray(&self, admitted: &[Person]) -> Option<Person> {
        match self {
            Trigger::All(_) => None,
            Trigger::Persons(persons) => persons.iter().copied().find(|p| !admitted.contains(p)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleRow {
    group: SuffixGroup,
    #[serde(default)]
    tense: Option<Tense>,
    #[serde(default)]
    mood: Option<Mood>,
    #[serde(default)]
    non_finite: Option<NonFinite>,
    endings: Vec<String>,
    #[serde(default)]
    stem_trigger: Trigger,
    #[serde(default)]
    raise_trigger: Trigger,
    #[serde(default)]
    stem_base: StemBase,
}

impl RuleRow {
    fn into_records(self) -> Result<Vec<RuleRecord>> {
        let group = self.group;
        let malformed = |what: String| MorphError::MalformedRule(format!("-{group} row: {what}"));

        if let Some(nf) = self.non_finite {
            if self.tense.is_some() || self.mood.is_some() {
                return Err(malformed(format!("{nf} row must not name a tense or mood")));
            }
            let [ending] = <[String; 1]>::try_from(self.endings).map_err(|endings| {
                malformed(format!("{nf} row needs exactly 1 ending, got {}", endings.len()))
            })?;
            if matches!(self.stem_trigger, Trigger::Persons(_))
                || matches!(self.raise_trigger, Trigger::Persons(_))
            {
                return Err(malformed(format!("{nf} row triggers must be true or false")));
            }
            let rule = MorphologyRule::new(ending)
                .stressed(self.stem_trigger.applies(Person::FirstSingular))
                .raised(self.raise_trigger.applies(Person::FirstSingular))
                .on(self.stem_base);
            return Ok(vec![RuleRecord {
                group,
                cell: Cell::NonFinite(nf),
                rule,
            }]);
        }

        let (Some(tense), Some(mood)) = (self.tense, self.mood) else {
            return Err(malformed("row needs \"tense\" and \"mood\", or \"non_finite\"".into()));
        };
        let tense_mood = TenseMood::from_parts(tense, mood)
            .ok_or_else(|| malformed(format!("no such slot: {tense:?} {mood:?}")))?;
        let persons = tense_mood.persons();
        if self.endings.len() != persons.len() {
            return Err(malformed(format!(
                "{tense_mood} needs {} endings, got {}",
                persons.len(),
                self.endings.len()
            )));
        }
        if let Some(person) = self
            .stem_trigger
            .stray(persons)
            .or_else(|| self.raise_trigger.stray(persons))
        {
            return Err(malformed(format!("{tense_mood} has no {person} for a trigger")));
        }

        Ok(persons
            .iter()
            .zip(self.endings)
            .map(|(&person, ending)| RuleRecord {
                group,
                cell: Cell::personal(tense_mood, person),
                rule: MorphologyRule::new(ending)
                    .stressed(self.stem_trigger.applies(person))
                    .raised(self.raise_trigger.applies(person))
                    .on(self.stem_base),
            })
            .collect())
    }
}

/// Parse a JSON morphology table (`{"rows": [...]}`).
pub fn rules_from_json(json: &str) -> Result<RuleTable> {
    let file: MorphologyFile = serde_json::from_str(json)?;
    let mut records = Vec::new();
    for row in file.rows {
        records.extend(row.into_records()?);
    }
    RuleTable::new(records)
}

// ---------------------------------------------------------------------------
// Text lexicon
// ---------------------------------------------------------------------------

/// Parse the plain-text `.lexicon` format.
pub fn lexicon_from_text(text: &str) -> Result<Lexicon> {
    let mut entries = Vec::new();
    let mut framed = false;
    let mut closed = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let syntax = |message: String| MorphError::LexiconSyntax {
            line: line_no,
            message,
        };
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if closed {
            return Err(syntax("content after \"end lexicon\"".into()));
        }
        if line == "end lexicon" {
            if !framed {
                return Err(syntax("\"end lexicon\" without \"lexicon\"".into()));
            }
            closed = true;
            continue;
        }
        if let Some(name) = line.strip_prefix("lexicon ") {
            if framed || !entries.is_empty() {
                return Err(syntax("\"lexicon\" header must come first".into()));
            }
            tracing::debug!(name = name.trim(), "text lexicon header");
            framed = true;
            continue;
        }
        let entry = parse_verb_line(line).map_err(syntax)?;
        entry.validate().map_err(|e| syntax(e.to_string()))?;
        entries.push(entry);
    }

    if framed && !closed {
        return Err(MorphError::LexiconSyntax {
            line: text.lines().count(),
            message: "missing \"end lexicon\"".into(),
        });
    }
    Lexicon::new(entries)
}

/// One `verb <infinitive> [(<props>)];` statement.
fn parse_verb_line(line: &str) -> std::result::Result<VerbEntry, String> {
    let body = line
        .strip_prefix("verb ")
        .ok_or_else(|| format!("expected \"verb\", found {line:?}"))?
        .strip_suffix(';')
        .ok_or_else(|| "missing ';'".to_string())?
        .trim();

    let (infinitive, props) = match body.split_once('(') {
        None => (body, None),
        Some((head, rest)) => {
            let props = rest
                .trim_end()
                .strip_suffix(')')
                .ok_or_else(|| "unclosed '('".to_string())?;
            (head.trim(), Some(props))
        }
    };
    if infinitive.is_empty() || !infinitive.chars().all(char::is_alphabetic) {
        return Err(format!("bad infinitive {infinitive:?}"));
    }
    let group = SuffixGroup::from_infinitive(infinitive)
        .ok_or_else(|| format!("{infinitive:?} does not end in -ar, -er or -ir"))?;

    let mut class = None;
    let mut stem_change = None;
    let mut spelling = Vec::new();
    for prop in props.into_iter().flat_map(|p| p.split(',')).map(str::trim) {
        let (key, arg) = match prop.split_once(char::is_whitespace) {
            Some((key, arg)) => (key, Some(arg.trim())),
            None => (prop, None),
        };
        let new_class = match (key, arg) {
            ("stem-change", Some(arg)) => {
                let pattern = StemChange::from_label(arg)
                    .ok_or_else(|| format!("unknown stem-change pattern {arg:?}"))?;
                stem_change = Some(pattern);
                ConjugationClass::StemChanging
            }
            ("orthographic-changing", None) => ConjugationClass::OrthographicChanging,
            ("irregular", None) => ConjugationClass::Irregular,
            ("spelling", Some(arg)) => {
                let extra = ExtraSpelling::from_label(arg)
                    .ok_or_else(|| format!("unknown spelling set {arg:?}"))?;
                spelling.push(extra);
                continue;
            }
            _ => return Err(format!("unknown property {prop:?}")),
        };
        if class.is_some_and(|c| c != new_class) {
            return Err(format!("conflicting classes for {infinitive:?}"));
        }
        class = Some(new_class);
    }

    let class = class.unwrap_or(match group {
        SuffixGroup::Ar => ConjugationClass::RegularAr,
        SuffixGroup::Er => ConjugationClass::RegularEr,
        SuffixGroup::Ir => ConjugationClass::RegularIr,
    });
    let mut entry = VerbEntry::new(infinitive, class);
    if let Some(pattern) = stem_change {
        entry = entry.with_stem_change(pattern);
    }
    for extra in spelling {
        entry = entry.with_spelling(extra);
    }
    Ok(entry)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| MorphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a lexicon file. The `.lexicon` extension selects the text format;
/// anything else is read as JSON.
pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let data = read(path)?;
    let lexicon = if path.extension().is_some_and(|ext| ext == "lexicon") {
        lexicon_from_text(&data)?
    } else {
        lexicon_from_json(&data)?
    };
    tracing::info!(path = %path.display(), verbs = lexicon.len(), "loaded lexicon");
    Ok(lexicon)
}

/// Load a JSON morphology file.
pub fn load_rules(path: &Path) -> Result<RuleTable> {
    let rules = rules_from_json(&read(path)?)?;
    tracing::info!(path = %path.display(), cells = rules.cells().len(), "loaded morphology");
    Ok(rules)
}

/// Build an engine from JSON strings.
pub fn engine_from_json(lexicon_json: &str, morphology_json: &str) -> Result<ConjugationEngine> {
    ConjugationEngine::new(
        lexicon_from_json(lexicon_json)?,
        rules_from_json(morphology_json)?,
    )
}

/// Build an engine from a lexicon file and a morphology file.
pub fn load_engine(lexicon_path: &Path, morphology_path: &Path) -> Result<ConjugationEngine> {
    ConjugationEngine::new(load_lexicon(lexicon_path)?, load_rules(morphology_path)?)
}
