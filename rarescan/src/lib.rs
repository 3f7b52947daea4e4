//! # Rarescan
//!
//! Rarescanは、英語テキストから稀少な単語と熟語を検出する高速なスキャナーです。
//!
//! ## 概要
//!
//! このライブラリは、頻度順位付きの単語辞書と熟語辞書に基づいて、
//! テキストブロックに注釈を付けるためのスキャナーを提供します。
//! rkyvシリアライゼーションフォーマットを使用することで、辞書の読み込みと
//! 初期化を高速化し、ゼロコピーでのデータアクセスを実現しています。
//!
//! ## 主な機能
//!
//! - **熟語照合**: 複数語からなる熟語の貪欲な最長一致
//! - **単語照合**: 頻度順位によるしきい値付きの辞書引き
//! - **密度ゲート**: コードや非英語テキストの自動棄却
//! - **ゼロコピーデシリアライゼーション**: rkyvを使用した高速な辞書読み込み
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::io::Cursor;
//! use rarescan::{Dictionary, DictionaryBuilder, ExclusionSet, Scanner};
//!
//! // 通常はコンパイル済みの辞書ファイルをDictionary::from_pathで読み込みます
//! let inner = DictionaryBuilder::from_readers(
//!     Cursor::new("ameliorate\tameliorate\t9000\nbucket\tbucket\t4000\n"),
//!     Some(Cursor::new("kick the bucket\tdie\n")),
//! )?;
//! let scanner = Scanner::new(Dictionary::from_inner(inner));
//! let mut worker = scanner.new_worker();
//!
//! worker.reset_block("He will kick the bucket.");
//! worker.scan(&ExclusionSet::new());
//!
//! assert_eq!(worker.num_matches(), 1);
//! assert_eq!(worker.annotation(0).lemma(), Some("die"));
//! # Ok(())
//! # }
//! ```

pub mod annotation;
mod block;
pub mod dictionary;
pub mod errors;
pub mod exclusion;
pub mod scanner;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::annotation::{
    Annotation, AnnotationBuf, AnnotationIter, MatchKind, PlainRun, Segment, SegmentIter,
};
pub use crate::dictionary::{Dictionary, DictionaryBuilder, DictionaryInner, LoadMode};
pub use crate::exclusion::ExclusionSet;
pub use crate::scanner::worker::Worker;
pub use crate::scanner::{ScanConfig, Scanner, MIN_GOOD_DENSITY};

/// このクレートのバージョン
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
