//! 辞書のビルドモジュール
//!
//! このモジュールは、テキスト形式の辞書ソースファイルから
//! バイナリ形式の辞書を構築する機能を提供します。
//! 出力は一時ファイルに書き込んでから所定のパスへアトミックに移動します。

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use rarescan::errors::RarescanError;
use rarescan::DictionaryBuilder;

use clap::Parser;
use tempfile::NamedTempFile;

/// ビルドコマンドの引数
///
/// 辞書をビルドするために必要な入力ファイルと出力先を指定します。
#[derive(Parser, Debug)]
#[clap(name = "build", about = "A program to build the dictionary.")]
pub struct Args {
    /// Word source file (TSV with surface, lemma, and rank).
    #[clap(short = 'w', long)]
    words_in: PathBuf,

    /// Idiom source file (phrase and optional lemma per line).
    ///
    /// If this argument is not specified, the dictionary is built
    /// without idioms.
    #[clap(short = 'x', long)]
    idioms_in: Option<PathBuf>,

    /// File to which the binary dictionary is output.
    #[clap(short = 'o', long)]
    dict_out: PathBuf,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書構築エラー
    #[error("Dictionary building failed: {0}")]
    Rarescan(#[from] RarescanError),

    /// 一時ファイルの移動エラー
    #[error("Failed to persist the output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// ビルドコマンドを実行する
///
/// 指定されたソースファイルから辞書を構築し、バイナリ形式で出力します。
///
/// # 引数
///
/// * `args` - ビルドコマンドの引数
///
/// # 戻り値
///
/// 成功時は`Ok(())`
///
/// # エラー
///
/// ファイルの読み書きや辞書構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    println!("Compiling the dictionary...");
    let idiom_rdr = match &args.idioms_in {
        Some(path) => Some(File::open(path)?),
        None => None,
    };
    let dict = DictionaryBuilder::from_readers(File::open(&args.words_in)?, idiom_rdr)?;

    println!("Writing the dictionary...");
    let out_dir = args
        .dict_out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(out_dir)?;
    dict.write(&mut tmp)?;
    tmp.persist(&args.dict_out)?;

    println!(
        "Successfully built the dictionary to {}",
        args.dict_out.display()
    );
    Ok(())
}
