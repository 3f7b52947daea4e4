//! 単語辞書
//!
//! このモジュールは、小文字化された語形をキーとして
//! 見出し語(lemma)と頻度順位(rank)を引くための語彙辞書を提供します。
//! rank 1が最頻出の単語を表します。

use std::collections::HashMap;

use rkyv::{Archive, Deserialize, Serialize};

/// 1単語分の辞書エントリ
///
/// 見出し語と頻度順位を保持します。
#[derive(Clone, Debug, Archive, Serialize, Deserialize)]
pub struct WordEntry {
    /// 見出し語
    pub lemma: String,

    /// 頻度順位(1が最頻出)
    pub rank: u32,
}

/// 単語の語彙辞書
///
/// 語形からエントリへのマップと、辞書中の最大順位を保持します。
/// 最大順位はパーセンタイル計算のデフォルト分母として使用されます。
#[derive(Archive, Serialize, Deserialize)]
pub struct WordLexicon {
    map: HashMap<String, WordEntry>,
    max_rank: u32,
}

impl WordLexicon {
    /// マップと最大順位から語彙辞書を作成します。
    pub(crate) fn new(map: HashMap<String, WordEntry>, max_rank: u32) -> Self {
        Self { map, max_rank }
    }

    /// 語形に対応する見出し語と順位を取得します。
    ///
    /// # 引数
    ///
    /// * `surface` - 小文字化された語形
    ///
    /// # 戻り値
    ///
    /// 見つかった場合は`Some((見出し語, 順位))`、見つからない場合は`None`。
    #[inline(always)]
    pub fn lookup(&self, surface: &str) -> Option<(&str, u32)> {
        self.map.get(surface).map(|e| (e.lemma.as_str(), e.rank))
    }

    /// 語形が辞書に含まれるかどうかを取得します。
    #[inline(always)]
    pub fn contains(&self, surface: &str) -> bool {
        self.map.contains_key(surface)
    }

    /// 辞書中の最大順位を取得します。
    #[inline(always)]
    pub const fn max_rank(&self) -> u32 {
        self.max_rank
    }

    /// 登録語数を取得します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// 辞書が空かどうかを取得します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl ArchivedWordLexicon {
    /// 語形に対応する見出し語と順位を取得します。
    ///
    /// アーカイブされたマップに対するゼロコピーの引きです。
    #[inline(always)]
    pub fn lookup(&self, surface: &str) -> Option<(&str, u32)> {
        self.map
            .get(surface)
            .map(|e| (e.lemma.as_str(), e.rank.to_native()))
    }

    /// 語形が辞書に含まれるかどうかを取得します。
    #[inline(always)]
    pub fn contains(&self, surface: &str) -> bool {
        self.map.get(surface).is_some()
    }

    /// 辞書中の最大順位を取得します。
    #[inline(always)]
    pub fn max_rank(&self) -> u32 {
        self.max_rank.to_native()
    }

    /// 登録語数を取得します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// 辞書が空かどうかを取得します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
