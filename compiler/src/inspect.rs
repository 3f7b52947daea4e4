//! 辞書の検査モジュール
//!
//! このモジュールは、構築済みのバイナリ辞書を読み込み、
//! その統計情報を表示する機能を提供します。

use std::io;
use std::path::PathBuf;

use rarescan::errors::RarescanError;
use rarescan::{Dictionary, LoadMode};

use clap::Parser;

/// 検査コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "inspect", about = "A program to inspect a built dictionary.")]
pub struct Args {
    /// Compiled dictionary file.
    #[clap(short = 'i', long)]
    dict: PathBuf,
}

/// 検査処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書読み込みエラー
    #[error("Dictionary loading failed: {0}")]
    Rarescan(#[from] RarescanError),
}

/// 検査コマンドを実行する
///
/// 辞書を完全検証付きで読み込み、統計情報を標準出力に表示します。
///
/// # エラー
///
/// 辞書の読み込みに失敗した場合、`InspectError`を返します。
pub fn run(args: Args) -> Result<(), InspectError> {
    let dict = Dictionary::from_path(&args.dict, LoadMode::Validate)?;

    println!("num_words: {}", dict.num_words());
    println!("word_max_rank: {}", dict.word_max_rank());
    println!("num_idiom_keys: {}", dict.num_idiom_keys());
    Ok(())
}
