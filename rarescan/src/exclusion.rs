//! 既知語の除外集合
//!
//! このモジュールは、利用者が既に知っている見出し語の集合を提供します。
//! 集合に含まれる見出し語は、単語照合と熟語照合の両方で注釈の対象から
//! 除外されます。集合はスキャン間で共有・更新できます。

use std::io::{BufRead, BufReader, Read};

use hashbrown::HashSet;

use crate::errors::Result;

/// スキャンから除外する見出し語の集合
///
/// 照合は見出し語(語形ではない)に対して行われます。
/// 例えば見出し語`go`を登録すると、語形`went`や`gone`も除外されます。
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    lemmas: HashSet<String>,
}

impl ExclusionSet {
    /// 新しい空の除外集合を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// リーダーから除外集合を作成します。
    ///
    /// 1行につき1見出し語を読み込みます。空行は無視されます。
    ///
    /// # エラー
    ///
    /// リーダーからの読み込みに失敗した場合にエラーを返します。
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut lemmas = HashSet::new();
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            let lemma = line.trim();
            if !lemma.is_empty() {
                lemmas.insert(lemma.to_string());
            }
        }
        Ok(Self { lemmas })
    }

    /// 見出し語を既知として登録します。
    ///
    /// # 戻り値
    ///
    /// 新規に登録された場合は`true`、既に登録済みの場合は`false`。
    pub fn mark_known<S>(&mut self, lemma: S) -> bool
    where
        S: Into<String>,
    {
        self.lemmas.insert(lemma.into())
    }

    /// 見出し語の登録を解除します。
    ///
    /// # 戻り値
    ///
    /// 登録されていた場合は`true`。
    pub fn forget(&mut self, lemma: &str) -> bool {
        self.lemmas.remove(lemma)
    }

    /// 見出し語が登録されているかどうかを取得します。
    #[inline(always)]
    pub fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains(lemma)
    }

    /// 登録されている見出し語数を取得します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    /// 集合が空かどうかを取得します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl FromIterator<String> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            lemmas: iter.into_iter().collect(),
        }
    }
}
