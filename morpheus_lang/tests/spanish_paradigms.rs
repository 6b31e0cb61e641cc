// Integration tests against the embedded Spanish data.
//
// Exercises the public API end to end: `default_engine()` builds from the
// JSON in `data/`, then paradigms are checked against reference forms for
// each conjugation class: regular, stem-changing (including the -ir raised
// alternation), orthographic-changing, and irregular. Also covers the
// file-based loaders, the JSON output shape, and parallel bulk conjugation.

use std::path::PathBuf;

use morpheus_lang::loader::{load_engine, load_lexicon};
use morpheus_lang::{
    Cell, ConjugationEngine, MorphError, NonFinite, Person, TenseMood, default_engine,
};

use Person::{FirstPlural, FirstSingular, SecondPlural, SecondSingular, ThirdPlural, ThirdSingular};

/// Helper: one form from the default engine.
fn form(engine: &ConjugationEngine, verb: &str, tm: TenseMood, person: Person) -> String {
    engine
        .conjugate_cell(verb, Cell::personal(tm, person))
        .unwrap_or_else(|e| panic!("{verb} {tm} {person}: {e}"))
}

/// Helper: all six forms of a slot, in person order.
fn slot(engine: &ConjugationEngine, verb: &str, tm: TenseMood) -> Vec<String> {
    let paradigm = engine.conjugate(verb).unwrap();
    paradigm.tense(tm).unwrap().values().cloned().collect()
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
}

#[test]
fn test_regular_present_is_stem_plus_ending() {
    let engine = default_engine();
    assert_eq!(form(&engine, "hablar", TenseMood::PresentIndicative, FirstSingular), "hablo");
    assert_eq!(form(&engine, "comer", TenseMood::PresentIndicative, FirstSingular), "como");
    assert_eq!(form(&engine, "vivir", TenseMood::PresentIndicative, FirstSingular), "vivo");
    assert_eq!(
        slot(&engine, "vivir", TenseMood::PresentIndicative),
        ["vivo", "vives", "vive", "vivimos", "vivís", "viven"]
    );
}

#[test]
fn test_regular_ar_full_paradigm() {
    let engine = default_engine();
    let expected: [(TenseMood, [&str; 6]); 8] = [
        (TenseMood::PresentIndicative, ["hablo", "hablas", "habla", "hablamos", "habláis", "hablan"]),
        (TenseMood::PreteriteIndicative, ["hablé", "hablaste", "habló", "hablamos", "hablasteis", "hablaron"]),
        (TenseMood::ImperfectIndicative, ["hablaba", "hablabas", "hablaba", "hablábamos", "hablabais", "hablaban"]),
        (TenseMood::FutureIndicative, ["hablaré", "hablarás", "hablará", "hablaremos", "hablaréis", "hablarán"]),
        (TenseMood::Conditional, ["hablaría", "hablarías", "hablaría", "hablaríamos", "hablaríais", "hablarían"]),
        (TenseMood::PresentSubjunctive, ["hable", "hables", "hable", "hablemos", "habléis", "hablen"]),
        (TenseMood::ImperfectSubjunctiveRa, ["hablara", "hablaras", "hablara", "habláramos", "hablarais", "hablaran"]),
        (TenseMood::ImperfectSubjunctiveSe, ["hablase", "hablases", "hablase", "hablásemos", "hablaseis", "hablasen"]),
    ];
    for (tm, forms) in expected {
        assert_eq!(slot(&engine, "hablar", tm), forms, "{tm}");
    }
    let paradigm = engine.conjugate("hablar").unwrap();
    assert_eq!(paradigm.gerund(), Some("hablando"));
    assert_eq!(paradigm.past_participle(), Some("hablado"));
}

#[test]
fn test_stem_alternation_only_in_stressed_cells() {
    let engine = default_engine();
    assert_eq!(
        slot(&engine, "pensar", TenseMood::PresentIndicative),
        ["pienso", "piensas", "piensa", "pensamos", "pensáis", "piensan"]
    );
    assert_eq!(
        slot(&engine, "volver", TenseMood::PresentSubjunctive),
        ["vuelva", "vuelvas", "vuelva", "volvamos", "volváis", "vuelvan"]
    );
    // Never in the preterite of -ar/-er verbs.
    assert_eq!(form(&engine, "pensar", TenseMood::PreteriteIndicative, FirstSingular), "pensé");
    assert_eq!(form(&engine, "pensar", TenseMood::FutureIndicative, FirstSingular), "pensaré");
}

#[test]
fn test_poder() {
    let engine = default_engine();
    assert_eq!(form(&engine, "poder", TenseMood::PresentSubjunctive, FirstSingular), "pueda");
    assert_eq!(form(&engine, "poder", TenseMood::ImperfectSubjunctiveRa, FirstSingular), "pudiera");
    assert_eq!(form(&engine, "poder", TenseMood::ImperfectSubjunctiveSe, FirstSingular), "pudiese");
    assert_eq!(
        slot(&engine, "poder", TenseMood::PreteriteIndicative),
        ["pude", "pudiste", "pudo", "pudimos", "pudisteis", "pudieron"]
    );
    assert_eq!(form(&engine, "poder", TenseMood::FutureIndicative, FirstPlural), "podremos");
    assert_eq!(engine.conjugate("poder").unwrap().gerund(), Some("pudiendo"));
}

#[test]
fn test_pedir() {
    let engine = default_engine();
    assert_eq!(form(&engine, "pedir", TenseMood::PresentIndicative, FirstSingular), "pido");
    assert_eq!(form(&engine, "pedir", TenseMood::PresentIndicative, FirstPlural), "pedimos");
    assert_eq!(
        slot(&engine, "pedir", TenseMood::PreteriteIndicative),
        ["pedí", "pediste", "pidió", "pedimos", "pedisteis", "pidieron"]
    );
    assert_eq!(engine.conjugate("pedir").unwrap().gerund(), Some("pidiendo"));
}

#[test]
fn test_raised_alternation() {
    let engine = default_engine();
    assert_eq!(form(&engine, "dormir", TenseMood::PreteriteIndicative, ThirdSingular), "durmió");
    assert_eq!(form(&engine, "dormir", TenseMood::PresentSubjunctive, FirstPlural), "durmamos");
    assert_eq!(form(&engine, "sentir", TenseMood::PresentSubjunctive, FirstPlural), "sintamos");
    assert_eq!(form(&engine, "sentir", TenseMood::ImperfectSubjunctiveRa, ThirdPlural), "sintieran");
    assert_eq!(form(&engine, "morir", TenseMood::PreteriteIndicative, ThirdPlural), "murieron");
    // -er stem changers never raise.
    assert_eq!(form(&engine, "volver", TenseMood::PresentSubjunctive, FirstPlural), "volvamos");
}

#[test]
fn test_jugar() {
    let engine = default_engine();
    assert_eq!(form(&engine, "jugar", TenseMood::PresentIndicative, FirstSingular), "juego");
    assert_eq!(form(&engine, "jugar", TenseMood::PresentIndicative, FirstPlural), "jugamos");
    assert_eq!(form(&engine, "jugar", TenseMood::PreteriteIndicative, FirstSingular), "jugué");
    assert_eq!(form(&engine, "jugar", TenseMood::PresentSubjunctive, ThirdSingular), "juegue");
}

#[test]
fn test_car_preterite_first_singular() {
    let engine = default_engine();
    for (verb, expected) in [
        ("tocar", "toqué"),
        ("buscar", "busqué"),
        ("sacar", "saqué"),
        ("explicar", "expliqué"),
        ("practicar", "practiqué"),
    ] {
        assert_eq!(form(&engine, verb, TenseMood::PreteriteIndicative, FirstSingular), expected);
    }
}

#[test]
fn test_orthographic_rules() {
    let engine = default_engine();
    let cases = [
        ("pagar", TenseMood::PreteriteIndicative, FirstSingular, "pagué"),
        ("averiguar", TenseMood::PreteriteIndicative, FirstSingular, "averigüé"),
        ("empezar", TenseMood::PreteriteIndicative, FirstSingular, "empecé"),
        ("empezar", TenseMood::PresentSubjunctive, FirstSingular, "empiece"),
        ("almorzar", TenseMood::PresentSubjunctive, ThirdSingular, "almuerce"),
        ("vencer", TenseMood::PresentIndicative, FirstSingular, "venzo"),
        ("coger", TenseMood::PresentIndicative, FirstSingular, "cojo"),
        ("dirigir", TenseMood::PresentSubjunctive, FirstPlural, "dirijamos"),
        ("seguir", TenseMood::PresentIndicative, FirstSingular, "sigo"),
        ("distinguir", TenseMood::PresentSubjunctive, ThirdSingular, "distinga"),
        ("elegir", TenseMood::PresentIndicative, FirstSingular, "elijo"),
        ("leer", TenseMood::PreteriteIndicative, ThirdSingular, "leyó"),
        ("caer", TenseMood::ImperfectSubjunctiveRa, FirstSingular, "cayera"),
        ("conocer", TenseMood::PresentIndicative, FirstSingular, "conozco"),
        ("ofrecer", TenseMood::PresentSubjunctive, SecondSingular, "ofrezcas"),
        ("construir", TenseMood::PresentIndicative, FirstSingular, "construyo"),
        ("construir", TenseMood::PreteriteIndicative, ThirdSingular, "construyó"),
        ("construir", TenseMood::PresentIndicative, FirstPlural, "construimos"),
    ];
    for (verb, tm, person, expected) in cases {
        assert_eq!(form(&engine, verb, tm, person), expected, "{verb} {tm} {person}");
    }
    assert_eq!(engine.conjugate("leer").unwrap().gerund(), Some("leyendo"));
    assert_eq!(engine.conjugate("huir").unwrap().gerund(), Some("huyendo"));
}

#[test]
fn test_soft_consonants_left_alone() {
    // -cer/-ger verbs keep c and g before front vowels.
    let engine = default_engine();
    assert_eq!(form(&engine, "vencer", TenseMood::PresentIndicative, SecondSingular), "vences");
    assert_eq!(form(&engine, "coger", TenseMood::PreteriteIndicative, FirstSingular), "cogí");
    assert_eq!(form(&engine, "conocer", TenseMood::ImperfectIndicative, FirstSingular), "conocía");
}

#[test]
fn test_irregular_verbs() {
    let engine = default_engine();
    assert_eq!(
        slot(&engine, "ser", TenseMood::PresentIndicative),
        ["soy", "eres", "es", "somos", "sois", "son"]
    );
    assert_eq!(
        slot(&engine, "ir", TenseMood::PresentSubjunctive),
        ["vaya", "vayas", "vaya", "vayamos", "vayáis", "vayan"]
    );
    assert_eq!(
        slot(&engine, "tener", TenseMood::PresentIndicative),
        ["tengo", "tienes", "tiene", "tenemos", "tenéis", "tienen"]
    );
    assert_eq!(
        slot(&engine, "hacer", TenseMood::PresentSubjunctive),
        ["haga", "hagas", "haga", "hagamos", "hagáis", "hagan"]
    );
    assert_eq!(
        slot(&engine, "decir", TenseMood::PreteriteIndicative),
        ["dije", "dijiste", "dijo", "dijimos", "dijisteis", "dijeron"]
    );
    assert_eq!(form(&engine, "estar", TenseMood::PresentIndicative, FirstSingular), "estoy");
    assert_eq!(form(&engine, "haber", TenseMood::FutureIndicative, ThirdSingular), "habrá");
    assert_eq!(form(&engine, "venir", TenseMood::Conditional, FirstPlural), "vendríamos");
    assert_eq!(form(&engine, "querer", TenseMood::ImperfectSubjunctiveRa, FirstSingular), "quisiera");

    let participles = [
        ("hacer", "hecho"),
        ("decir", "dicho"),
        ("ver", "visto"),
        ("poner", "puesto"),
        ("volver", "vuelto"),
        ("morir", "muerto"),
        ("abrir", "abierto"),
        ("escribir", "escrito"),
        ("romper", "roto"),
        ("leer", "leído"),
    ];
    for (verb, expected) in participles {
        assert_eq!(engine.conjugate(verb).unwrap().past_participle(), Some(expected), "{verb}");
    }
    assert_eq!(engine.conjugate("ir").unwrap().gerund(), Some("yendo"));
}

#[test]
fn test_imperative() {
    let engine = default_engine();
    let paradigm = engine.conjugate("pensar").unwrap();
    let imperative: Vec<&str> = paradigm.imperative().values().map(String::as_str).collect();
    assert_eq!(imperative, ["piensa", "piense", "pensemos", "pensad", "piensen"]);
    assert_eq!(paradigm.get(TenseMood::Imperative, FirstSingular), None);
    assert!(!engine.supported_cells().contains(&TenseMood::Imperative));
    assert!(engine.rules().tense_moods().contains(&TenseMood::Imperative));

    assert_eq!(form(&engine, "pedir", TenseMood::Imperative, FirstPlural), "pidamos");
    assert_eq!(form(&engine, "tener", TenseMood::Imperative, SecondSingular), "ten");
    assert_eq!(form(&engine, "tener", TenseMood::Imperative, SecondPlural), "tened");
    assert_eq!(form(&engine, "ser", TenseMood::Imperative, SecondSingular), "sé");

    let err = engine
        .conjugate_cell("pensar", Cell::personal(TenseMood::Imperative, FirstSingular))
        .unwrap_err();
    assert!(matches!(err, MorphError::MalformedRule(_)));
}

#[test]
fn test_completeness() {
    let engine = default_engine();
    let expected_slots = engine.supported_cells();
    assert_eq!(expected_slots.len(), 8);
    for entry in engine.lexicon().entries() {
        let paradigm = engine.conjugate(entry.infinitive()).unwrap();
        let slots: Vec<TenseMood> = paradigm.tenses().map(|(tm, _)| tm).collect();
        assert_eq!(slots, expected_slots, "{}", entry.infinitive());
        for (tm, forms) in paradigm.tenses() {
            let persons: Vec<Person> = forms.keys().copied().collect();
            assert_eq!(persons, Person::ALL, "{} {tm}", entry.infinitive());
            assert!(forms.values().all(|f| !f.is_empty()));
        }
        assert_eq!(paradigm.imperative().len(), 5);
        assert!(paradigm.gerund().is_some());
        assert!(paradigm.past_participle().is_some());
    }
}

#[test]
fn test_idempotent() {
    let engine = default_engine();
    for verb in ["hablar", "pensar", "ser", "construir"] {
        let first = serde_json::to_string(&engine.conjugate(verb).unwrap()).unwrap();
        let second = serde_json::to_string(&engine.conjugate(verb).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_unknown_infinitive() {
    let engine = default_engine();
    match engine.conjugate("florpar") {
        Err(MorphError::NotFound { infinitive }) => assert_eq!(infinitive, "florpar"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    let cell = Cell::NonFinite(NonFinite::Gerund);
    assert!(matches!(
        engine.conjugate_cell("florpar", cell),
        Err(MorphError::NotFound { .. })
    ));
}

#[test]
fn test_json_shape() {
    let engine = default_engine();
    let value = serde_json::to_value(engine.conjugate("comer").unwrap()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object["infinitive"], "comer");
    assert_eq!(object["present indicative"]["1sg"], "como");
    assert_eq!(object["imperfect subjunctive -se"]["3pl"], "comiesen");
    assert_eq!(object["imperative"]["2pl"], "comed");
    assert_eq!(object["gerund"], "comiendo");
    assert_eq!(object["past participle"], "comido");
    assert!(object["imperative"].get("1sg").is_none());

    let text = serde_json::to_string(&engine.conjugate("comer").unwrap()).unwrap();
    let keys = [
        "\"infinitive\"",
        "\"present indicative\"",
        "\"conditional\"",
        "\"imperfect subjunctive -se\"",
        "\"imperative\"",
        "\"gerund\"",
        "\"past participle\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "keys out of order: {text}");
}

#[test]
fn test_conjugate_all_default_lexicon() {
    let engine = default_engine();
    let all = engine.conjugate_all().unwrap();
    assert_eq!(all.len(), engine.lexicon().len());
    for (paradigm, entry) in all.iter().zip(engine.lexicon().entries()) {
        assert_eq!(paradigm.infinitive(), entry.infinitive());
        assert_eq!(*paradigm, engine.conjugate(entry.infinitive()).unwrap());
    }
}

#[test]
fn test_concurrent_queries_share_engine() {
    let engine = default_engine();
    let expected = engine.conjugate("dormir").unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(engine.conjugate("dormir").unwrap(), expected));
        }
    });
}

#[test]
fn test_load_engine_from_data_files() {
    let dir = data_dir();
    let engine = load_engine(&dir.join("es_lexicon.json"), &dir.join("es_morphology.json")).unwrap();
    assert_eq!(engine.lexicon().len(), default_engine().lexicon().len());
    assert_eq!(form(&engine, "poder", TenseMood::PresentSubjunctive, FirstSingular), "pueda");
}

#[test]
fn test_load_text_lexicon() {
    let path = std::env::temp_dir().join(format!("morpheus_{}.lexicon", std::process::id()));
    std::fs::write(
        &path,
        "lexicon es\nverb hablar;\nverb pedir (stem-change e→i);\nverb tocar (orthographic-changing);\nend lexicon\n",
    )
    .unwrap();
    let lexicon = load_lexicon(&path);
    let engine = load_engine(&path, &data_dir().join("es_morphology.json"));
    std::fs::remove_file(&path).unwrap();

    assert_eq!(lexicon.unwrap().len(), 3);
    let engine = engine.unwrap();
    assert_eq!(form(&engine, "pedir", TenseMood::PreteriteIndicative, ThirdPlural), "pidieron");
    assert_eq!(form(&engine, "tocar", TenseMood::PresentSubjunctive, FirstSingular), "toque");
}

#[test]
fn test_missing_file_reports_path() {
    let missing = data_dir().join("no_such_file.json");
    match load_engine(&missing, &data_dir().join("es_morphology.json")) {
        Err(MorphError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}
