use hanzi_core::loader::load_path;
use hanzi_core::persistence::{save_records, save_snapshot};
use hanzi_core::{Comparison, HanziConfig, HanziEngine, HanziError};
use std::cmp::Ordering;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = include_str!("../data/sample.csv");

#[test]
fn dictionary_is_read_on_first_use() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chinese.csv");
    fs::write(&path, SAMPLE).unwrap();

    let engine = HanziEngine::from_path(&path);
    assert!(!engine.is_loaded());
    assert_eq!(engine.to_traditional("头发和以后").unwrap(), "頭髮和以後");
    assert!(engine.is_loaded());
    assert_eq!(engine.registry().unwrap().len(), 26);
}

#[test]
fn missing_dictionary_is_reported_and_retried() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("later.csv");
    let engine = HanziEngine::from_path(&path);

    assert!(matches!(
        engine.to_simplified("萬"),
        Err(HanziError::DictionaryNotFound(_))
    ));
    assert!(!engine.is_loaded());

    fs::write(&path, "万萬,wan4\n").unwrap();
    assert_eq!(engine.to_simplified("萬").unwrap(), "万");
}

#[test]
fn snapshot_is_preferred_when_configured() {
    let dir = tempdir().unwrap();
    let dictionary = dir.path().join("chinese.csv");
    let snapshot = dir.path().join("chinese.bin");
    fs::write(&dictionary, SAMPLE).unwrap();

    let engine = HanziEngine::from_path(&dictionary);
    save_snapshot(engine.registry().unwrap(), &snapshot).unwrap();
    // the snapshot must be enough on its own
    fs::remove_file(&dictionary).unwrap();

    let config = HanziConfig {
        dictionary_path: Some(dictionary),
        snapshot_path: Some(snapshot),
        default_policy: Comparison::FoldForm,
    };
    let restored = HanziEngine::from_config(&config);
    assert_eq!(restored.to_traditional("饼干").unwrap(), "餅乾");
    assert_eq!(
        restored
            .compare_natural("第十章", "第9章", config.default_policy)
            .unwrap(),
        Ordering::Greater
    );
}

#[test]
fn saved_records_load_back_to_the_same_registry() {
    let dir = tempdir().unwrap();
    let dictionary = dir.path().join("chinese.csv");
    let copy = dir.path().join("nested").join("copy.csv");
    fs::write(&dictionary, SAMPLE).unwrap();

    let engine = HanziEngine::from_path(&dictionary);
    let registry = engine.registry().unwrap();
    save_records(registry, &copy).unwrap();

    let text = fs::read_to_string(&copy).unwrap();
    assert!(text.contains("后後,hou4,以後;後来;然後,後面\r\n"));
    assert_eq!(load_path(&copy).unwrap(), registry.records());
}

#[test]
fn convert_file_writes_crlf_lines() {
    let dir = tempdir().unwrap();
    let dictionary = dir.path().join("chinese.csv");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&dictionary, SAMPLE).unwrap();
    fs::write(&input, "以後再讀書\n頭髮\n").unwrap();

    let engine = HanziEngine::from_path(&dictionary);
    assert_eq!(engine.convert_file(&input, &output, false).unwrap(), 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), "以后再读书\r\n头发\r\n");
}

#[test]
fn sorting_lines_of_mixed_forms() {
    let engine = HanziEngine::from_records(
        hanzi_core::loader::read_records(std::io::Cursor::new(SAMPLE)).unwrap(),
    );
    let mut lines = vec!["萬國 2", "万国 10", "万国 1", "萬國 1"];
    engine.sort_natural(&mut lines, Comparison::IgnoreForm).unwrap();
    assert_eq!(lines, vec!["万国 1", "萬國 1", "萬國 2", "万国 10"]);
}
