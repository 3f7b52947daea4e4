//! 熟語辞書
//!
//! このモジュールは、複数語からなる熟語(イディオム)の辞書を提供します。
//! キーは熟語を構成する小文字化済みトークンを半角スペース1個で連結した
//! 文字列で、値は2つの役割のいずれかを取ります:
//!
//! - [`IdiomValue::Prefix`]: より長い熟語の真の接頭辞。照合の継続を指示します。
//! - [`IdiomValue::Lemma`]: 完全な熟語。見出し語を保持します。
//!
//! 1つのキーが両方の役割を持つことはありません。役割の衝突は辞書の
//! 構築時に拒否されます。

use std::collections::HashMap;

use rkyv::{Archive, Deserialize, Serialize};

/// 熟語キーの役割
#[derive(Clone, Debug, Archive, Serialize, Deserialize)]
pub enum IdiomValue {
    /// より長い熟語の真の接頭辞
    Prefix,

    /// 完全な熟語とその見出し語
    Lemma(String),
}

/// 熟語引きの結果
///
/// 所有版・アーカイブ版のどちらの辞書から引いても同じ型で返すための
/// 軽量ビューです。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdiomKind<'a> {
    /// キーは接頭辞であり、照合を継続できます。
    Prefix,

    /// キーは完全な熟語であり、見出し語を持ちます。
    Lemma(&'a str),
}

/// 熟語の語彙辞書
#[derive(Archive, Serialize, Deserialize)]
pub struct IdiomLexicon {
    map: HashMap<String, IdiomValue>,
}

impl IdiomLexicon {
    /// マップから熟語辞書を作成します。
    pub(crate) fn new(map: HashMap<String, IdiomValue>) -> Self {
        Self { map }
    }

    /// スペース連結キーに対応する役割を取得します。
    ///
    /// # 戻り値
    ///
    /// 見つかった場合は`Some(IdiomKind)`、見つからない場合は`None`。
    #[inline(always)]
    pub fn lookup(&self, key: &str) -> Option<IdiomKind<'_>> {
        self.map.get(key).map(|v| match v {
            IdiomValue::Prefix => IdiomKind::Prefix,
            IdiomValue::Lemma(lemma) => IdiomKind::Lemma(lemma),
        })
    }

    /// 登録キー数(接頭辞を含む)を取得します。
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

impl ArchivedIdiomLexicon {
    /// スペース連結キーに対応する役割を取得します。
    ///
    /// アーカイブされたマップに対するゼロコピーの引きです。
    #[inline(always)]
    pub fn lookup(&self, key: &str) -> Option<IdiomKind<'_>> {
        self.map.get(key).map(|v| match v {
            ArchivedIdiomValue::Prefix => IdiomKind::Prefix,
            ArchivedIdiomValue::Lemma(lemma) => IdiomKind::Lemma(lemma.as_str()),
        })
    }

    /// 登録キー数(接頭辞を含む)を取得します。
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
