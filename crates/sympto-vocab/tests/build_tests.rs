//! End-to-end builds over raw CSV files on disk.

use std::fs;
use std::path::Path;
use sympto_vocab::store::{
    DESCRIPTIONS_FILE, PAIRS_FILE, PRECAUTIONS_FILE, SEVERITY_FILE, SYMPTOM_IDS_FILE, VOCAB_FILE,
};
use sympto_vocab::{load_knowledge, save_knowledge, ColumnMode, VocabularyBuilder};

fn write_raw(dir: &Path) {
    fs::write(
        dir.join("dataset.csv"),
        "Disease,Symptom_1,Symptom_2,Symptom_3\n\
         Fungal infection, itching, skin_rash, fatigue\n\
         Fungal infection, itching, skin_rash,\n\
         Malaria, chills, vomiting, high_fever\n\
         Heart attack, chest_pain, breathlessness, sweating\n",
    )
    .unwrap();
    fs::write(
        dir.join("symptom_Description.csv"),
        "Disease,Description\n\
         Malaria,An infectious disease caused by protozoan parasites.\n\
         Fungal infection,\"In humans, fungal infections occur when an invading fungus takes over.\"\n",
    )
    .unwrap();
    fs::write(
        dir.join("symptom_precaution.csv"),
        "Disease,Precaution_1,Precaution_2,Precaution_3\n\
         Malaria,Consult nearest hospital,avoid oily food,keep mosquitos out\n\
         Fungal infection,bath twice,use detol or neem in bathing water,\n",
    )
    .unwrap();
    fs::write(
        dir.join("Symptom-severity.csv"),
        "Symptom,weight\n\
         itching,1\n\
         skin_rash,3\n\
         chest_pain,7\n\
         high_fever,seven\n",
    )
    .unwrap();
}

#[test]
fn build_from_disk_detects_text_mode() {
    let raw = tempfile::tempdir().unwrap();
    write_raw(raw.path());

    let output = VocabularyBuilder::from_dir(raw.path()).build().unwrap();
    assert_eq!(output.summary.mode, ColumnMode::Text);
    assert_eq!(output.summary.diseases, 3);
    assert_eq!(output.summary.pairs, 9);
    assert_eq!(output.summary.unknown_severity, 1);

    let kb = &output.knowledge;
    assert_eq!(kb.severity("chest pain"), Some(7.0));
    assert_eq!(kb.severity("high fever"), None);
    assert!(kb.vocabulary().contains("malaria"));
}

#[test]
fn rebuilding_is_byte_identical() {
    let raw = tempfile::tempdir().unwrap();
    write_raw(raw.path());
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let builder = VocabularyBuilder::from_dir(raw.path());
    save_knowledge(&builder.build().unwrap().knowledge, first.path()).unwrap();
    save_knowledge(&builder.build().unwrap().knowledge, second.path()).unwrap();

    for file in [
        PAIRS_FILE,
        VOCAB_FILE,
        SYMPTOM_IDS_FILE,
        DESCRIPTIONS_FILE,
        PRECAUTIONS_FILE,
        SEVERITY_FILE,
    ] {
        let a = fs::read(first.path().join(file)).unwrap();
        let b = fs::read(second.path().join(file)).unwrap();
        assert_eq!(a, b, "{} differs between builds", file);
    }
}

#[test]
fn stored_knowledge_loads_back_equal() {
    let raw = tempfile::tempdir().unwrap();
    write_raw(raw.path());
    let out = tempfile::tempdir().unwrap();

    let built = VocabularyBuilder::from_dir(raw.path()).build().unwrap().knowledge;
    save_knowledge(&built, out.path()).unwrap();
    let loaded = load_knowledge(out.path()).unwrap();

    assert_eq!(loaded, built);
    assert_eq!(
        loaded.precaution_text("malaria").as_deref(),
        Some("Consult nearest hospital; avoid oily food; keep mosquitos out")
    );
}

#[test]
fn each_missing_table_is_fatal() {
    for missing in [
        "dataset.csv",
        "symptom_Description.csv",
        "symptom_precaution.csv",
        "Symptom-severity.csv",
    ] {
        let raw = tempfile::tempdir().unwrap();
        write_raw(raw.path());
        fs::remove_file(raw.path().join(missing)).unwrap();

        let err = VocabularyBuilder::from_dir(raw.path()).build().unwrap_err();
        assert!(err.to_string().contains(missing), "{}: {}", missing, err);
    }
}

#[test]
fn overlong_rows_fail_the_build() {
    for (file, contents) in [
        ("dataset.csv", "Disease,Symptom_1\nMalaria,chills,vomiting,high_fever\n"),
        (
            "symptom_precaution.csv",
            "Disease,Precaution_1\nMalaria,rest,drink water,see doctor\n",
        ),
    ] {
        let raw = tempfile::tempdir().unwrap();
        write_raw(raw.path());
        fs::write(raw.path().join(file), contents).unwrap();

        let err = VocabularyBuilder::from_dir(raw.path()).build().unwrap_err();
        let message = err.to_string();
        assert!(message.contains(file), "{}", message);
        assert!(message.contains("expected 2 cells, found 4"), "{}", message);
    }
}
