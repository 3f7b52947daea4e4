//! スキャンを実行するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだテキストを1行1ブロックとして
//! スキャンし、指定された出力形式(marker、detail、segments)で
//! 結果を出力します。

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use rarescan::{Dictionary, ExclusionSet, LoadMode, Scanner, Segment};

use clap::Parser;

/// 1回の実行で注釈する照合結果の上限。
///
/// 上限に達した後のブロックは注釈なしでそのまま出力されます。
const MAX_TOTAL_MATCHES: usize = 10_000;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Marker,
    Detail,
    Segments,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列("marker"、"detail"、"segments"のいずれか)
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `OutputMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "marker" => Ok(Self::Marker),
            "detail" => Ok(Self::Detail),
            "segments" => Ok(Self::Segments),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "scan", about = "Annotates rare words and idioms")]
struct Args {
    /// Compiled dictionary file.
    #[clap(short = 'i', long)]
    dict: PathBuf,

    /// Output mode. Choices are marker, detail, and segments.
    #[clap(short = 'O', long, default_value = "marker")]
    output_mode: OutputMode,

    /// Minimum word rank to annotate.
    #[clap(short = 'r', long)]
    min_show_rank: Option<u32>,

    /// Denominator for percentile computation (defaults to the maximum
    /// rank in the dictionary).
    #[clap(short = 'm', long)]
    word_max_rank: Option<u32>,

    /// Disables idiom matching.
    #[clap(long)]
    no_idioms: bool,

    /// Disables word matching.
    #[clap(long)]
    no_words: bool,

    /// Annotates out-of-dictionary lowercase words as well.
    #[clap(long)]
    all_words: bool,

    /// File of known lemmas to exclude, one per line.
    #[clap(short = 'k', long)]
    known: Option<PathBuf>,

    /// Skips dictionary validation when a proof file exists.
    #[clap(long)]
    trust_cache: bool,
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだテキストをスキャンして、
/// 指定された形式で結果を標準出力に出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let mode = if args.trust_cache {
        LoadMode::TrustCache
    } else {
        LoadMode::Validate
    };
    let dict = Dictionary::from_path(&args.dict, mode)?;

    let exclusion = match &args.known {
        Some(path) => ExclusionSet::from_reader(File::open(path)?)?,
        None => ExclusionSet::new(),
    };

    let scanner = Scanner::new(dict)
        .enable_idioms(!args.no_idioms)
        .enable_lemmas(!args.no_words)
        .enable_generic_words(args.all_words)
        .min_show_rank(args.min_show_rank.unwrap_or(1))
        .word_max_rank(args.word_max_rank.unwrap_or(0));
    let mut worker = scanner.new_worker();

    eprintln!("Ready to scan");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    let mut total_matches = 0;
    for line in lines {
        let line = line?;

        if total_matches >= MAX_TOTAL_MATCHES {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
            if is_tty {
                out.flush()?;
            }
            continue;
        }

        worker.reset_block(&line);
        worker.scan(&exclusion);
        total_matches += worker.num_matches();

        match args.output_mode {
            OutputMode::Marker => {
                if worker.num_matches() == 0 {
                    out.write_all(line.as_bytes())?;
                } else {
                    for seg in worker.segment_iter() {
                        match seg {
                            Segment::Plain(run) => out.write_all(run.text().as_bytes())?,
                            Segment::Annotated(a) => {
                                write!(&mut out, "[{}]", a.surface())?;
                            }
                        }
                    }
                }
                out.write_all(b"\n")?;
                if is_tty {
                    out.flush()?;
                }
            }
            OutputMode::Detail => {
                for a in worker.annotation_iter() {
                    let percentile = a
                        .lemma()
                        .and_then(|lemma| scanner.percentile(lemma))
                        .map_or_else(|| "-".to_string(), |p| p.to_string());
                    writeln!(
                        &mut out,
                        "{}\t{:?}\t{}\t{}..{}\t{}",
                        a.surface(),
                        a.kind(),
                        a.lemma().unwrap_or("-"),
                        a.range_char().start,
                        a.range_char().end,
                        percentile,
                    )?;
                }
                out.write_all(b"EOS\n")?;
                if is_tty {
                    out.flush()?;
                }
            }
            OutputMode::Segments => {
                for seg in worker.segment_iter() {
                    match seg {
                        Segment::Plain(run) => {
                            writeln!(&mut out, "P\t{}", run.text())?;
                        }
                        Segment::Annotated(a) => {
                            writeln!(&mut out, "A\t{}\t{}", a.class_key(), a.surface())?;
                        }
                    }
                }
                out.write_all(b"EOS\n")?;
                if is_tty {
                    out.flush()?;
                }
            }
        }
    }

    Ok(())
}
