// Core Spanish morphology types: persons, tenses, moods, paradigm cells,
// suffix groups, conjugation classes, and stem-change patterns.
//
// These are closed enums shared by every other module. The loaders
// deserialize them straight out of the JSON data files, the rule table keys
// its map on them, and the engine iterates them in conventional order.
//
// The type hierarchy is:
// - `Person`: the six grammatical persons (1sg..3pl), in conventional order
// - `Tense`, `Mood`: the raw coordinates used in data files
// - `TenseMood`: a valid (tense, mood) slot of the paradigm, with its label
// - `NonFinite`: gerund and past participle
// - `Cell`: one addressable form, either a personal slot + person, or a non-finite form
// - `VowelClass`: front/back quality of a vowel, used at morpheme boundaries
// - `SuffixGroup`: -ar/-er/-ir, derived from the infinitive
// - `ConjugationClass`: the lexicon's classification of a verb
// - `StemChange`: the four stem-vowel alternation patterns
//
// Ordering matters: every enum derives `Ord` in conventional paradigm order
// so that `BTreeMap`s keyed on them iterate the way a grammar table reads.
// No `HashMap` anywhere in this crate; output must be byte-identical across
// calls and platforms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical person and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "1sg")]
    FirstSingular,
    #[serde(rename = "2sg")]
    SecondSingular,
    #[serde(rename = "3sg")]
    ThirdSingular,
    #[serde(rename = "1pl")]
    FirstPlural,
    #[serde(rename = "2pl")]
    SecondPlural,
    #[serde(rename = "3pl")]
    ThirdPlural,
}

impl Person {
    /// All persons in conventional order.
    pub const ALL: [Person; 6] = [
        Person::FirstSingular,
        Person::SecondSingular,
        Person::ThirdSingular,
        Person::FirstPlural,
        Person::SecondPlural,
        Person::ThirdPlural,
    ];

    /// Persons admitted by the affirmative imperative (no 1sg).
    pub const IMPERATIVE: [Person; 5] = [
        Person::SecondSingular,
        Person::ThirdSingular,
        Person::FirstPlural,
        Person::SecondPlural,
        Person::ThirdPlural,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Person::FirstSingular => "1sg",
            Person::SecondSingular => "2sg",
            Person::ThirdSingular => "3sg",
            Person::FirstPlural => "1pl",
            Person::SecondPlural => "2pl",
            Person::ThirdPlural => "3pl",
        }
    }

    pub fn from_label(label: &str) -> Option<Person> {
        Person::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tense coordinate as written in the morphology and lexicon files.
///
/// The two imperfect-subjunctive variants are separate tenses; they share
/// meaning but not endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Present,
    Preterite,
    Imperfect,
    Future,
    Conditional,
    ImperfectRa,
    ImperfectSe,
}

/// Mood coordinate as written in the data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Indicative,
    Subjunctive,
    Imperative,
}

/// A valid tense/mood slot of the paradigm.
///
/// Only combinations that exist in Spanish are representable; use
/// `from_parts()` to validate a (tense, mood) pair read from data. Variant
/// order is the conventional grouping: indicative tenses, then subjunctive,
/// then imperative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TenseMood {
    PresentIndicative,
    PreteriteIndicative,
    ImperfectIndicative,
    FutureIndicative,
    Conditional,
    PresentSubjunctive,
    ImperfectSubjunctiveRa,
    ImperfectSubjunctiveSe,
    Imperative,
}

impl TenseMood {
    /// Every slot in conventional order.
    pub const ALL: [TenseMood; 9] = [
        TenseMood::PresentIndicative,
        TenseMood::PreteriteIndicative,
        TenseMood::ImperfectIndicative,
        TenseMood::FutureIndicative,
        TenseMood::Conditional,
        TenseMood::PresentSubjunctive,
        TenseMood::ImperfectSubjunctiveRa,
        TenseMood::ImperfectSubjunctiveSe,
        TenseMood::Imperative,
    ];

    /// Validate a (tense, mood) pair. Returns `None` for combinations that
    /// do not exist (e.g. preterite subjunctive, future imperative).
    pub fn from_parts(tense: Tense, mood: Mood) -> Option<TenseMood> {
        TenseMood::ALL
            .into_iter()
            .find(|tm| tm.tense() == tense && tm.mood() == mood)
    }

    pub fn tense(self) -> Tense {
        match self {
            TenseMood::PresentIndicative
            | TenseMood::PresentSubjunctive
            | TenseMood::Imperative => Tense::Present,
            TenseMood::PreteriteIndicative => Tense::Preterite,
            TenseMood::ImperfectIndicative => Tense::Imperfect,
            TenseMood::FutureIndicative => Tense::Future,
            TenseMood::Conditional => Tense::Conditional,
            TenseMood::ImperfectSubjunctiveRa => Tense::ImperfectRa,
            TenseMood::ImperfectSubjunctiveSe => Tense::ImperfectSe,
        }
    }

    pub fn mood(self) -> Mood {
        match self {
            TenseMood::PresentIndicative
            | TenseMood::PreteriteIndicative
            | TenseMood::ImperfectIndicative
            | TenseMood::FutureIndicative
            | TenseMood::Conditional => Mood::Indicative,
            TenseMood::PresentSubjunctive
            | TenseMood::ImperfectSubjunctiveRa
            | TenseMood::ImperfectSubjunctiveSe => Mood::Subjunctive,
            TenseMood::Imperative => Mood::Imperative,
        }
    }

    /// Human-readable label, also used as the key in serialized paradigms.
    pub fn label(self) -> &'static str {
        match self {
            TenseMood::PresentIndicative => "present indicative",
            TenseMood::PreteriteIndicative => "preterite indicative",
            TenseMood::ImperfectIndicative => "imperfect indicative",
            TenseMood::FutureIndicative => "future indicative",
            TenseMood::Conditional => "conditional",
            TenseMood::PresentSubjunctive => "present subjunctive",
            TenseMood::ImperfectSubjunctiveRa => "imperfect subjunctive -ra",
            TenseMood::ImperfectSubjunctiveSe => "imperfect subjunctive -se",
            TenseMood::Imperative => "imperative",
        }
    }

    pub fn from_label(label: &str) -> Option<TenseMood> {
        TenseMood::ALL.into_iter().find(|tm| tm.label() == label)
    }

    /// Persons this slot admits, in conventional order.
    pub fn persons(self) -> &'static [Person] {
        match self {
            TenseMood::Imperative => &Person::IMPERATIVE,
            _ => &Person::ALL,
        }
    }

    /// Whether this slot carries the full six-person set.
    pub fn is_six_person(self) -> bool {
        self.persons().len() == Person::ALL.len()
    }
}

impl fmt::Display for TenseMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Non-finite (personless) verb forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinite {
    Gerund,
    PastParticiple,
}

impl NonFinite {
    pub const ALL: [NonFinite; 2] = [NonFinite::Gerund, NonFinite::PastParticiple];

    pub fn label(self) -> &'static str {
        match self {
            NonFinite::Gerund => "gerund",
            NonFinite::PastParticiple => "past participle",
        }
    }
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One coordinate of the paradigm.
///
/// Personal cells sort before non-finite cells; within personal cells the
/// order is slot first, then person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    Personal { tense_mood: TenseMood, person: Person },
    NonFinite(NonFinite),
}

impl Cell {
    pub fn personal(tense_mood: TenseMood, person: Person) -> Cell {
        Cell::Personal { tense_mood, person }
    }

    /// False for person/slot combinations the slot does not admit
    /// (imperative 1sg).
    pub fn is_admitted(self) -> bool {
        match self {
            Cell::Personal { tense_mood, person } => tense_mood.persons().contains(&person),
            Cell::NonFinite(_) => true,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Personal { tense_mood, person } => write!(f, "{tense_mood} {person}"),
            Cell::NonFinite(nf) => write!(f, "{nf}"),
        }
    }
}

/// Front/back quality of a vowel.
///
/// Spanish c and g are soft before front vowels and hard before back ones,
/// which is what the orthographic boundary rules have to preserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelClass {
    /// e, i (plain or accented).
    Front,
    /// a, o, u (plain or accented).
    Back,
}

impl VowelClass {
    /// Classify a character. Returns `None` for consonants.
    pub fn of(c: char) -> Option<VowelClass> {
        match c {
            'e' | 'é' | 'i' | 'í' => Some(VowelClass::Front),
            'a' | 'á' | 'o' | 'ó' | 'u' | 'ú' | 'ü' => Some(VowelClass::Back),
            _ => None,
        }
    }
}

/// The infinitive suffix group, which selects the ending set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixGroup {
    Ar,
    Er,
    Ir,
}

impl SuffixGroup {
    pub const ALL: [SuffixGroup; 3] = [SuffixGroup::Ar, SuffixGroup::Er, SuffixGroup::Ir];

    /// Classify an infinitive by its last two letters.
    pub fn from_infinitive(infinitive: &str) -> Option<SuffixGroup> {
        SuffixGroup::ALL
            .into_iter()
            .find(|g| infinitive.ends_with(g.suffix()))
    }

    pub fn suffix(self) -> &'static str {
        match self {
            SuffixGroup::Ar => "ar",
            SuffixGroup::Er => "er",
            SuffixGroup::Ir => "ir",
        }
    }

    /// Quality of the theme vowel that follows the stem in the infinitive.
    pub fn theme(self) -> VowelClass {
        match self {
            SuffixGroup::Ar => VowelClass::Back,
            SuffixGroup::Er | SuffixGroup::Ir => VowelClass::Front,
        }
    }
}

impl fmt::Display for SuffixGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Lexicon classification of a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConjugationClass {
    RegularAr,
    RegularEr,
    RegularIr,
    StemChanging,
    OrthographicChanging,
    Irregular,
}

impl ConjugationClass {
    /// Whether this class can belong to a verb of the given suffix group.
    /// Only the three regular classes are tied to a suffix.
    pub fn admits(self, group: SuffixGroup) -> bool {
        match self {
            ConjugationClass::RegularAr => group == SuffixGroup::Ar,
            ConjugationClass::RegularEr => group == SuffixGroup::Er,
            ConjugationClass::RegularIr => group == SuffixGroup::Ir,
            _ => true,
        }
    }

    pub fn is_regular(self) -> bool {
        matches!(
            self,
            ConjugationClass::RegularAr | ConjugationClass::RegularEr | ConjugationClass::RegularIr
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ConjugationClass::RegularAr => "regular-ar",
            ConjugationClass::RegularEr => "regular-er",
            ConjugationClass::RegularIr => "regular-ir",
            ConjugationClass::StemChanging => "stem-changing",
            ConjugationClass::OrthographicChanging => "orthographic-changing",
            ConjugationClass::Irregular => "irregular",
        }
    }
}

impl fmt::Display for ConjugationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stem-vowel alternation pattern of a stem-changing verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StemChange {
    #[serde(rename = "e→ie", alias = "e>ie")]
    EToIe,
    #[serde(rename = "o→ue", alias = "o>ue")]
    OToUe,
    #[serde(rename = "e→i", alias = "e>i")]
    EToI,
    #[serde(rename = "u→ue", alias = "u>ue")]
    UToUe,
}

impl StemChange {
    pub const ALL: [StemChange; 4] = [
        StemChange::EToIe,
        StemChange::OToUe,
        StemChange::EToI,
        StemChange::UToUe,
    ];

    /// The stem vowel that alternates.
    pub fn source(self) -> char {
        match self {
            StemChange::EToIe | StemChange::EToI => 'e',
            StemChange::OToUe => 'o',
            StemChange::UToUe => 'u',
        }
    }

    /// Replacement in stressed-stem cells.
    pub fn stressed(self) -> &'static str {
        match self {
            StemChange::EToIe => "ie",
            StemChange::OToUe | StemChange::UToUe => "ue",
            StemChange::EToI => "i",
        }
    }

    /// Replacement in the unstressed -ir cells that raise the vowel
    /// (sintió, durmamos). `None` when the pattern has no raised form.
    pub fn raised(self) -> Option<&'static str> {
        match self {
            StemChange::EToIe | StemChange::EToI => Some("i"),
            StemChange::OToUe => Some("u"),
            StemChange::UToUe => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StemChange::EToIe => "e→ie",
            StemChange::OToUe => "o→ue",
            StemChange::EToI => "e→i",
            StemChange::UToUe => "u→ue",
        }
    }

    /// Parse a pattern as written in the text lexicon; accepts `e→ie` and
    /// the ASCII spelling `e>ie`.
    pub fn from_label(label: &str) -> Option<StemChange> {
        let normalized = label.replace('>', "→");
        StemChange::ALL.into_iter().find(|p| p.label() == normalized)
    }
}

impl fmt::Display for StemChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
