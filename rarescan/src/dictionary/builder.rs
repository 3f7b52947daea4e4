//! 辞書構築のためのビルダー
//!
//! このモジュールは、テキスト形式の辞書ソースファイルから
//! [`DictionaryInner`]を構築するためのビルダーを提供します。
//!
//! # ソースフォーマット
//!
//! - 単語ソース: 1行1レコードのTSVで、`語形 TAB 見出し語 TAB 順位`。
//!   語形は小文字化されて登録されます。順位は1以上の整数です。
//! - 熟語ソース: 1行1熟語で、`熟語句 [TAB 見出し語]`。
//!   見出し語を省略した場合は正規化済みの熟語句自体が見出し語になります。

use std::collections::HashMap;
use std::io::Read;

use crate::block::Block;
use crate::dictionary::idiom::{IdiomLexicon, IdiomValue};
use crate::dictionary::word::{WordEntry, WordLexicon};
use crate::dictionary::DictionaryInner;
use crate::errors::{RarescanError, Result};
use crate::utils;

/// 辞書ソースから[`DictionaryInner`]を構築するビルダー
pub struct DictionaryBuilder {}

impl DictionaryBuilder {
    /// リーダーから新しい[`DictionaryInner`]を作成します。
    ///
    /// # 引数
    ///
    ///  - `word_rdr`: 単語ソース(TSV)のリーダー
    ///  - `idiom_rdr`: 熟語ソースのリーダー。`None`の場合、熟語辞書なしで構築します。
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に[`RarescanError`]を返します。
    /// 具体的には以下の場合です:
    ///
    /// - レコードのフィールド数が不正な場合。
    /// - 順位が正の整数でない場合。
    /// - 語形が重複している場合。
    /// - ある完全な熟語が別の熟語の真の接頭辞になっている場合。
    pub fn from_readers<W, I>(mut word_rdr: W, idiom_rdr: Option<I>) -> Result<DictionaryInner>
    where
        W: Read,
        I: Read,
    {
        let mut word_buf = String::new();
        word_rdr.read_to_string(&mut word_buf)?;
        let words = Self::parse_words(&word_buf)?;

        let idioms = match idiom_rdr {
            Some(mut rdr) => {
                let mut idiom_buf = String::new();
                rdr.read_to_string(&mut idiom_buf)?;
                Some(Self::parse_idioms(&idiom_buf)?)
            }
            None => None,
        };

        Ok(DictionaryInner { words, idioms })
    }

    /// 単語ソースを解析して[`WordLexicon`]を構築します。
    fn parse_words(data: &str) -> Result<WordLexicon> {
        let mut map = HashMap::new();
        let mut max_rank = 0;
        for line in data.lines() {
            if line.is_empty() {
                continue;
            }
            let fields = utils::parse_tsv_row(line);
            if fields.len() != 3 {
                return Err(RarescanError::invalid_format(
                    "word_rdr",
                    format!("A record must consist of 3 fields: {line}"),
                ));
            }
            let surface = fields[0].to_lowercase();
            if surface.is_empty() {
                return Err(RarescanError::invalid_format(
                    "word_rdr",
                    format!("A surface form must not be empty: {line}"),
                ));
            }
            let rank: u32 = fields[2].parse()?;
            if rank == 0 {
                return Err(RarescanError::invalid_format(
                    "word_rdr",
                    format!("A rank must be a positive integer: {line}"),
                ));
            }
            max_rank = max_rank.max(rank);
            let entry = WordEntry {
                lemma: fields[1].clone(),
                rank,
            };
            if map.insert(surface, entry).is_some() {
                return Err(RarescanError::invalid_format(
                    "word_rdr",
                    format!("Duplicate surface form: {}", fields[0]),
                ));
            }
        }
        Ok(WordLexicon::new(map, max_rank))
    }

    /// 熟語ソースを解析して[`IdiomLexicon`]を構築します。
    ///
    /// 熟語句はスキャナー本体と同じ正規化器でトークン列に変換され、
    /// トークンの真の接頭辞列ごとに[`IdiomValue::Prefix`]、完全なキーに
    /// [`IdiomValue::Lemma`]が登録されます。
    fn parse_idioms(data: &str) -> Result<IdiomLexicon> {
        let mut map: HashMap<String, IdiomValue> = HashMap::new();
        let mut block = Block::new();

        for line in data.lines() {
            if line.is_empty() {
                continue;
            }
            let fields = utils::parse_tsv_row(line);
            if fields.is_empty() || fields.len() > 2 {
                return Err(RarescanError::invalid_format(
                    "idiom_rdr",
                    format!("A record must consist of 1 or 2 fields: {line}"),
                ));
            }

            block.reset(&fields[0]);
            let tokens: Vec<&str> = block.tokens().iter().map(|t| t.text()).collect();
            if tokens.is_empty() {
                return Err(RarescanError::invalid_format(
                    "idiom_rdr",
                    format!("A phrase must contain at least one token: {line}"),
                ));
            }

            let full_key = tokens.join(" ");
            let lemma = if fields.len() == 2 {
                fields[1].clone()
            } else {
                full_key.clone()
            };

            let mut key = String::new();
            for (i, token) in tokens.iter().enumerate() {
                if i != 0 {
                    key.push(' ');
                }
                key.push_str(token);

                if i + 1 == tokens.len() {
                    match map.get(&key) {
                        None => {
                            map.insert(key.clone(), IdiomValue::Lemma(lemma.clone()));
                        }
                        Some(IdiomValue::Prefix) => {
                            return Err(RarescanError::invalid_format(
                                "idiom_rdr",
                                format!("The idiom is a prefix of a longer idiom: {}", fields[0]),
                            ));
                        }
                        Some(IdiomValue::Lemma(_)) => {
                            return Err(RarescanError::invalid_format(
                                "idiom_rdr",
                                format!("Duplicate idiom: {}", fields[0]),
                            ));
                        }
                    }
                } else {
                    match map.get(&key) {
                        None => {
                            map.insert(key.clone(), IdiomValue::Prefix);
                        }
                        Some(IdiomValue::Prefix) => {}
                        Some(IdiomValue::Lemma(_)) => {
                            return Err(RarescanError::invalid_format(
                                "idiom_rdr",
                                format!(
                                    "A shorter idiom is a prefix of this idiom: {}",
                                    fields[0]
                                ),
                            ));
                        }
                    }
                }
            }
        }
        Ok(IdiomLexicon::new(map))
    }
}
