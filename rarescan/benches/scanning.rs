use std::io::Cursor;
use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, Criterion, SamplingMode, Throughput,
};

use rarescan::{Dictionary, DictionaryBuilder, ExclusionSet, Scanner};

const SAMPLE_SIZE: usize = 50;
const WARM_UP_TIME: Duration = Duration::from_millis(500);
const MEASURE_TIME: Duration = Duration::from_secs(5);

fn synthetic_words() -> String {
    // 順位が線形に増える合成辞書
    let surfaces = [
        "the", "will", "have", "about", "people", "window", "bucket", "kick",
        "seldom", "gaunt", "placid", "ameliorate", "perfunctory", "obstreperous",
    ];
    let mut out = String::new();
    for (i, surface) in surfaces.iter().enumerate() {
        out.push_str(&format!("{surface}\t{surface}\t{}\n", (i + 1) * 500));
    }
    out
}

fn synthetic_corpus() -> String {
    let sentence =
        "People about the window will kick the bucket, and a placid gaunt figure \
         will seldom ameliorate the perfunctory obstreperous talk. ";
    sentence.repeat(200)
}

fn build_scanner() -> Scanner {
    let inner = DictionaryBuilder::from_readers(
        Cursor::new(synthetic_words()),
        Some(Cursor::new("kick the bucket\tdie\n")),
    )
    .unwrap();
    Scanner::new(Dictionary::from_inner(inner))
}

fn criterion_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let scanner = build_scanner();
    let corpus = synthetic_corpus();
    let exclusion = ExclusionSet::new();
    group.throughput(Throughput::Bytes(corpus.len() as u64));

    group.bench_function("scan_corpus", |b| {
        b.iter_with_setup(
            || scanner.new_worker(),
            |mut worker| {
                let mut num_matches = 0;
                for line in corpus.split('.') {
                    worker.reset_block(line);
                    worker.scan(&exclusion);
                    num_matches += worker.num_matches();
                }
                num_matches
            },
        );
    });
}

criterion_group!(benches, criterion_scan);
criterion_main!(benches);
