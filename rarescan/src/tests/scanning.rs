use std::io::Cursor;

use crate::annotation::Segment;
use crate::dictionary::{Dictionary, DictionaryBuilder, LoadMode};
use crate::exclusion::ExclusionSet;
use crate::scanner::Scanner;

const WORDS: &str = "\
the\tthe\t1\n\
will\twill\t20\n\
went\tgo\t40\n\
kick\tkick\t800\n\
cafe\tcafe\t2000\n\
bucket\tbucket\t4000\n\
ameliorate\tameliorate\t9000\n";

const IDIOMS: &str = "kick the bucket\tdie\nby and large\n";

fn archived_scanner() -> Scanner {
    let inner =
        DictionaryBuilder::from_readers(Cursor::new(WORDS), Some(Cursor::new(IDIOMS))).unwrap();
    let mut buffer = Vec::new();
    inner.write(&mut buffer).unwrap();
    Scanner::new(Dictionary::read(buffer.as_slice()).unwrap())
}

#[test]
fn test_scan_with_archived_dictionary() {
    let scanner = archived_scanner().min_show_rank(100);
    let mut worker = scanner.new_worker();

    worker.reset_block("He will kick the bucket, by and large.");
    worker.scan(&ExclusionSet::new());

    let lemmas: Vec<_> = worker
        .annotation_iter()
        .map(|a| a.lemma().map(|s| s.to_string()))
        .collect();
    assert_eq!(
        lemmas,
        vec![
            Some("die".to_string()),
            Some("by and large".to_string()),
        ]
    );
}

#[test]
fn test_archived_matches_owned() {
    let inner =
        DictionaryBuilder::from_readers(Cursor::new(WORDS), Some(Cursor::new(IDIOMS))).unwrap();
    let owned = Scanner::new(Dictionary::from_inner(inner)).min_show_rank(100);
    let archived = archived_scanner().min_show_rank(100);

    let input = "The café’s bucket went and kicked; ameliorate kick the bucket!";
    let mut worker_owned = owned.new_worker();
    worker_owned.reset_block(input);
    worker_owned.scan(&ExclusionSet::new());

    let mut worker_archived = archived.new_worker();
    worker_archived.reset_block(input);
    worker_archived.scan(&ExclusionSet::new());

    assert_eq!(worker_owned.num_matches(), worker_archived.num_matches());
    for (a, b) in worker_owned
        .annotation_iter()
        .zip(worker_archived.annotation_iter())
    {
        assert_eq!(a.surface(), b.surface());
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.lemma(), b.lemma());
        assert_eq!(a.range_byte(), b.range_byte());
    }
}

#[test]
fn test_segments_reconstruct_input() {
    let scanner = archived_scanner();
    let mut worker = scanner.new_worker();

    for input in [
        "kick the bucket",
        "  He will kick the bucket.  ",
        "the café’s bucket went by and large",
    ] {
        worker.reset_block(input);
        worker.scan(&ExclusionSet::new());
        assert!(worker.num_matches() > 0, "{input}");

        let rebuilt: String = worker
            .segment_iter()
            .map(|seg| match seg {
                Segment::Plain(run) => run.text().to_string(),
                Segment::Annotated(a) => a.surface().to_string(),
            })
            .collect();
        assert_eq!(rebuilt, input);
    }
}

#[test]
fn test_plain_runs_rescan_clean() {
    let scanner = archived_scanner().min_show_rank(100);
    let mut worker = scanner.new_worker();

    let input = "He will kick the bucket, by and large; a bucket of café water.";
    worker.reset_block(input);
    worker.scan(&ExclusionSet::new());
    assert!(worker.num_matches() > 0);

    // 注釈されなかった区間をそのまま再スキャンしても新しい注釈は出ない
    let plain_runs: Vec<String> = worker
        .segment_iter()
        .filter_map(|seg| match seg {
            Segment::Plain(run) => Some(run.text().to_string()),
            Segment::Annotated(_) => None,
        })
        .collect();
    assert!(!plain_runs.is_empty());

    for run in &plain_runs {
        worker.reset_block(run);
        worker.scan(&ExclusionSet::new());
        assert_eq!(worker.num_matches(), 0, "{run:?}");
    }
}

#[test]
fn test_scan_from_path() {
    let inner =
        DictionaryBuilder::from_readers(Cursor::new(WORDS), Some(Cursor::new(IDIOMS))).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.dic");
    inner.write(&mut std::fs::File::create(&path).unwrap()).unwrap();

    let scanner = Scanner::new(Dictionary::from_path(&path, LoadMode::Validate).unwrap());
    let mut worker = scanner.new_worker();
    worker.reset_block("a bucket");
    worker.scan(&ExclusionSet::new());
    assert_eq!(worker.num_matches(), 1);
}

#[test]
fn test_density_gate_rejects_code() {
    let scanner = archived_scanner();
    let mut worker = scanner.new_worker();

    worker.reset_block("fn main() { let x = foo.bar(baz); qux(x)?; }");
    worker.scan(&ExclusionSet::new());
    assert_eq!(worker.num_matches(), 0);
    assert!(worker.segment_iter().next().is_none());
}
