// CLI entry point for the Morpheus conjugation engine.
//
// Prints conjugation tables for the verbs named on the command line, using
// the embedded Spanish data unless other data files are given. See
// `morpheus_lang` for the engine itself.
//
// Usage:
//   conjugate [VERB...] [OPTIONS]
//     --lexicon <PATH>       Lexicon file, JSON or .lexicon text (default: embedded)
//     --morphology <PATH>    Morphology JSON file (default: embedded)
//     --tense <LABEL>        Only print one slot, e.g. "present subjunctive"
//     --json                 Print paradigms as JSON instead of tables
//     --list                 List the verbs in the lexicon
//     --all                  Conjugate every verb in the lexicon
//
// With no verbs and no --list/--all, a short demo set is conjugated.
// Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=morpheus_lang=debug)
// for more detail.

use std::path::PathBuf;

use morpheus_lang::loader::{load_lexicon, load_rules};
use morpheus_lang::{
    ConjugationEngine, MorphError, Paradigm, Person, TenseMood, default_lexicon, default_rules,
};
use tracing_subscriber::EnvFilter;

/// Verbs shown when none are named: one per pattern worth seeing.
const DEMO_VERBS: [&str; 8] = [
    "hablar", "comer", "vivir", "pensar", "querer", "poder", "pedir", "jugar",
];

#[derive(Debug, Default)]
struct CliConfig {
    lexicon: Option<PathBuf>,
    morphology: Option<PathBuf>,
    tense: Option<TenseMood>,
    json: bool,
    list: bool,
    all: bool,
    verbs: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let config = parse_args();
    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Parse command-line arguments into a `CliConfig`. Uses simple
/// `std::env::args()` matching; no clap dependency.
fn parse_args() -> CliConfig {
    let mut config = CliConfig::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--lexicon" => {
                i += 1;
                config.lexicon = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--lexicon requires a path");
                    std::process::exit(1);
                }));
            }
            "--morphology" => {
                i += 1;
                config.morphology = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--morphology requires a path");
                    std::process::exit(1);
                }));
            }
            "--tense" => {
                i += 1;
                config.tense = Some(
                    args.get(i)
                        .and_then(|s| TenseMood::from_label(s))
                        .unwrap_or_else(|| {
                            eprintln!("--tense requires one of:");
                            for tm in TenseMood::ALL {
                                eprintln!("  {tm}");
                            }
                            std::process::exit(1);
                        }),
                );
            }
            "--json" => config.json = true,
            "--list" => config.list = true,
            "--all" => config.all = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
            verb => config.verbs.push(verb.to_string()),
        }
        i += 1;
    }

    config
}

/// `RUST_LOG` as given, or `warn` when it is unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn print_usage() {
    println!("Usage: conjugate [VERB...] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --lexicon <PATH>       Lexicon file, JSON or .lexicon text (default: embedded)");
    println!("  --morphology <PATH>    Morphology JSON file (default: embedded)");
    println!("  --tense <LABEL>        Only print one slot, e.g. \"present subjunctive\"");
    println!("  --json                 Print paradigms as JSON instead of tables");
    println!("  --list                 List the verbs in the lexicon");
    println!("  --all                  Conjugate every verb in the lexicon");
    println!("  --help, -h             Show this help");
}

fn build_engine(config: &CliConfig) -> Result<ConjugationEngine, MorphError> {
    let lexicon = match &config.lexicon {
        Some(path) => load_lexicon(path)?,
        None => default_lexicon(),
    };
    let rules = match &config.morphology {
        Some(path) => load_rules(path)?,
        None => default_rules(),
    };
    ConjugationEngine::new(lexicon, rules)
}

fn run(config: &CliConfig) -> Result<(), MorphError> {
    let engine = build_engine(config)?;

    if config.list {
        for entry in engine.lexicon().entries() {
            println!(
                "{:<14} {:<22} {}",
                entry.infinitive(),
                entry.class(),
                entry.gloss().unwrap_or("")
            );
        }
        return Ok(());
    }

    if config.all {
        let paradigms = engine.conjugate_all()?;
        if config.json {
            println!("{}", serde_json::to_string_pretty(&paradigms)?);
        } else {
            let forms: usize = paradigms.iter().map(|p| p.cells().count()).sum();
            println!("Conjugated {} verbs ({forms} forms).", paradigms.len());
        }
        return Ok(());
    }

    let verbs: Vec<&str> = if config.verbs.is_empty() {
        DEMO_VERBS.to_vec()
    } else {
        config.verbs.iter().map(String::as_str).collect()
    };

    if config.json {
        println!("{}", paradigms_json(&engine, &verbs)?);
        return Ok(());
    }

    for (n, verb) in verbs.iter().enumerate() {
        let paradigm = engine.conjugate(verb)?;
        if n > 0 {
            println!();
        }
        let entry = engine.lexicon().lookup(verb)?;
        match entry.gloss() {
            Some(gloss) => println!("{verb} ({gloss}) [{}]", entry.class()),
            None => println!("{verb} [{}]", entry.class()),
        }
        print_table(&paradigm, config.tense);
    }
    Ok(())
}

/// All requested paradigms as one pretty-printed JSON array.
fn paradigms_json(engine: &ConjugationEngine, verbs: &[&str]) -> Result<String, MorphError> {
    let paradigms = verbs
        .iter()
        .map(|verb| engine.conjugate(verb))
        .collect::<Result<Vec<Paradigm>, MorphError>>()?;
    Ok(serde_json::to_string_pretty(&paradigms)?)
}

/// Print each slot as two columns, singular beside plural.
fn print_table(paradigm: &Paradigm, only: Option<TenseMood>) {
    let imperative = (!paradigm.imperative().is_empty())
        .then_some((TenseMood::Imperative, paradigm.imperative()));
    let slots = paradigm
        .tenses()
        .chain(imperative)
        .filter(|(tm, _)| only.is_none_or(|wanted| wanted == *tm));

    for (tense_mood, forms) in slots {
        println!("  {tense_mood}");
        let width = forms.values().map(|f| f.chars().count()).max().unwrap_or(0);
        let rows = [
            (Person::FirstSingular, Person::FirstPlural),
            (Person::SecondSingular, Person::SecondPlural),
            (Person::ThirdSingular, Person::ThirdPlural),
        ];
        for (singular, plural) in rows {
            let left = forms.get(&singular).map(String::as_str).unwrap_or("-");
            let right = forms.get(&plural).map(String::as_str).unwrap_or("-");
            println!("    {singular}  {left:<width$}    {plural}  {right}");
        }
    }

    if only.is_some() {
        return;
    }
    if let Some(gerund) = paradigm.gerund() {
        println!("  gerund: {gerund}");
    }
    if let Some(participle) = paradigm.past_participle() {
        println!("  past participle: {participle}");
    }
}
