//! スキャン結果の注釈
//!
//! このモジュールは、スキャンによって検出された注釈([`Annotation`])と、
//! 注釈および注釈の間のプレーンな区間を順に辿るためのイテレータを提供します。

use std::fmt;
use std::ops::Range;

use crate::scanner::worker::Worker;

/// 見出し語を持たない注釈のクラスキー
const CLASS_KEY_NONE: &str = "rarescan_none_none";

/// 注釈の種類
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchKind {
    /// 複数語からなる熟語
    Idiom,

    /// 辞書中の単語(順位が表示しきい値以上)
    Lemma,

    /// 辞書外の小文字アルファベット語
    GenericWord,
}

/// 1件の照合結果の内部レコード
///
/// 元のテキスト中での位置(文字単位・バイト単位)と種類、
/// 見出し語(あれば)を保持します。
#[derive(Clone, Debug)]
pub(crate) struct MatchRecord {
    pub(crate) kind: MatchKind,
    pub(crate) lemma: Option<String>,
    pub(crate) begin_char: usize,
    pub(crate) end_char: usize,
    pub(crate) begin_byte: usize,
    pub(crate) end_byte: usize,
}

/// スキャンによって検出された1件の注釈
///
/// [`Worker`]が保持する結果への軽量なビューです。
pub struct Annotation<'w> {
    worker: &'w Worker,
    index: usize,
}

impl<'w> Annotation<'w> {
    pub(crate) fn new(worker: &'w Worker, index: usize) -> Self {
        Self { worker, index }
    }

    #[inline(always)]
    fn record(&self) -> &'w MatchRecord {
        &self.worker.matches[self.index]
    }

    /// 注釈の種類を取得します。
    #[inline(always)]
    pub fn kind(&self) -> MatchKind {
        self.record().kind
    }

    /// 注釈の見出し語を取得します。
    ///
    /// [`MatchKind::GenericWord`]の注釈は見出し語を持ちません。
    #[inline(always)]
    pub fn lemma(&self) -> Option<&'w str> {
        self.record().lemma.as_deref()
    }

    /// 元のテキスト中の注釈範囲(文字単位)を取得します。
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        let r = self.record();
        r.begin_char..r.end_char
    }

    /// 元のテキスト中の注釈範囲(バイト単位)を取得します。
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        let r = self.record();
        r.begin_byte..r.end_byte
    }

    /// 注釈が指す元のテキスト断片を取得します。
    #[inline(always)]
    pub fn surface(&self) -> &'w str {
        let r = self.record();
        &self.worker.block.input()[r.begin_byte..r.end_byte]
    }

    /// 注釈のクラスキーを取得します。
    ///
    /// クラスキーは`rarescan_`に見出し語の16進エンコードを連結した
    /// 文字列です。見出し語を持たない注釈には固定のキーを返します。
    /// 同じ見出し語を持つ注釈は同じクラスキーを共有します。
    pub fn class_key(&self) -> String {
        match self.lemma() {
            Some(lemma) => format!("rarescan_{}", hex::encode(lemma)),
            None => CLASS_KEY_NONE.to_string(),
        }
    }
}

impl fmt::Debug for Annotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotation")
            .field("surface", &self.surface())
            .field("kind", &self.kind())
            .field("lemma", &self.lemma())
            .field("range_char", &self.range_char())
            .field("range_byte", &self.range_byte())
            .finish()
    }
}

/// [`Annotation`]の所有版
///
/// [`Worker`]の寿命から切り離して注釈を保持したい場合に使用します。
#[derive(Clone, Debug)]
pub struct AnnotationBuf {
    /// 元のテキスト断片
    pub surface: String,

    /// 注釈の種類
    pub kind: MatchKind,

    /// 見出し語(あれば)
    pub lemma: Option<String>,

    /// 文字単位の範囲
    pub range_char: Range<usize>,

    /// バイト単位の範囲
    pub range_byte: Range<usize>,

    /// クラスキー
    pub class_key: String,
}

impl From<Annotation<'_>> for AnnotationBuf {
    fn from(a: Annotation<'_>) -> Self {
        Self {
            surface: a.surface().to_string(),
            kind: a.kind(),
            lemma: a.lemma().map(|s| s.to_string()),
            range_char: a.range_char(),
            range_byte: a.range_byte(),
            class_key: a.class_key(),
        }
    }
}

/// 注釈のイテレータ
pub struct AnnotationIter<'w> {
    worker: &'w Worker,
    front: usize,
    back: usize,
}

impl<'w> AnnotationIter<'w> {
    pub(crate) fn new(worker: &'w Worker) -> Self {
        Self {
            worker,
            front: 0,
            back: worker.matches.len(),
        }
    }
}

impl<'w> Iterator for AnnotationIter<'w> {
    type Item = Annotation<'w>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let a = Annotation::new(self.worker, self.front);
            self.front += 1;
            Some(a)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }
}

impl DoubleEndedIterator for AnnotationIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(Annotation::new(self.worker, self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for AnnotationIter<'_> {}

/// 注釈の間のプレーンな区間
#[derive(Clone, Debug)]
pub struct PlainRun<'w> {
    text: &'w str,
    range_char: Range<usize>,
    range_byte: Range<usize>,
}

impl<'w> PlainRun<'w> {
    /// 区間の元のテキスト断片を取得します。
    #[inline(always)]
    pub fn text(&self) -> &'w str {
        self.text
    }

    /// 文字単位の範囲を取得します。
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.range_char.clone()
    }

    /// バイト単位の範囲を取得します。
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.range_byte.clone()
    }
}

/// ブロックを左から右へ覆う1区間
///
/// [`SegmentIter`]が返す区間は、互いに重ならず、連結すると
/// 元の入力テキストと正確に一致します。
pub enum Segment<'w> {
    /// 注釈のない区間
    Plain(PlainRun<'w>),

    /// 注釈付きの区間
    Annotated(Annotation<'w>),
}

/// ブロック全体を覆う区間のイテレータ
///
/// スキャンが注釈を1件も生成しなかった場合(密度ゲートで棄却された
/// 場合を含む)、このイテレータは何も返しません。
pub struct SegmentIter<'w> {
    worker: &'w Worker,
    index: usize,
    cursor_char: usize,
    cursor_byte: usize,
    done: bool,
}

impl<'w> SegmentIter<'w> {
    pub(crate) fn new(worker: &'w Worker) -> Self {
        Self {
            worker,
            index: 0,
            cursor_char: 0,
            cursor_byte: 0,
            done: worker.matches.is_empty(),
        }
    }
}

impl<'w> Iterator for SegmentIter<'w> {
    type Item = Segment<'w>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(record) = self.worker.matches.get(self.index) {
            if self.cursor_byte < record.begin_byte {
                let run = PlainRun {
                    text: &self.worker.block.input()[self.cursor_byte..record.begin_byte],
                    range_char: self.cursor_char..record.begin_char,
                    range_byte: self.cursor_byte..record.begin_byte,
                };
                self.cursor_char = record.begin_char;
                self.cursor_byte = record.begin_byte;
                return Some(Segment::Plain(run));
            }

            let a = Annotation::new(self.worker, self.index);
            self.cursor_char = record.end_char;
            self.cursor_byte = record.end_byte;
            self.index += 1;
            return Some(Segment::Annotated(a));
        }

        self.done = true;
        if self.cursor_byte < self.worker.block.len_byte() {
            let run = PlainRun {
                text: &self.worker.block.input()[self.cursor_byte..],
                range_char: self.cursor_char..self.worker.block.len_char(),
                range_byte: self.cursor_byte..self.worker.block.len_byte(),
            };
            return Some(Segment::Plain(run));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_class_key_encoding() {
        assert_eq!(format!("rarescan_{}", hex::encode("die")), "rarescan_646965");
    }
}
