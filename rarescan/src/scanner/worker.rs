//! スキャンの作業領域
//!
//! このモジュールは、スキャン状態(入力ブロック、照合結果、統計)を
//! 保持する[`Worker`]を提供します。ワーカーはアロケーションを
//! 使い回すため、多数のブロックを順次スキャンする場合に効率的です。

use crate::annotation::{Annotation, AnnotationIter, MatchRecord, SegmentIter};
use crate::block::Block;
use crate::dictionary::DictionaryInnerRef;
use crate::exclusion::ExclusionSet;
use crate::scanner::{scan_block, Scanner, MIN_GOOD_DENSITY};

/// スキャンのための作業領域
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::io::Cursor;
/// use rarescan::{Dictionary, DictionaryBuilder, ExclusionSet, Scanner};
///
/// let inner = DictionaryBuilder::from_readers(
///     Cursor::new("ameliorate\tameliorate\t9000\n"),
///     None::<std::io::Empty>,
/// )?;
/// let scanner = Scanner::new(Dictionary::from_inner(inner));
/// let mut worker = scanner.new_worker();
///
/// worker.reset_block("It would ameliorate things.");
/// worker.scan(&ExclusionSet::new());
///
/// assert_eq!(worker.num_matches(), 1);
/// assert_eq!(worker.annotation(0).surface(), "ameliorate");
/// # Ok(())
/// # }
/// ```
pub struct Worker {
    pub(crate) scanner: Scanner,
    pub(crate) block: Block,
    pub(crate) matches: Vec<MatchRecord>,
    num_good: usize,
    num_nonempty: usize,
}

impl Worker {
    /// 新しいワーカーを作成します。
    ///
    /// [`Scanner::new_worker`]の使用を推奨します。
    pub(crate) fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            block: Block::new(),
            matches: vec![],
            num_good: 0,
            num_nonempty: 0,
        }
    }

    /// 入力テキストを設定します。
    ///
    /// 以前のスキャン結果はクリアされます。
    pub fn reset_block<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.block.reset(input);
        self.matches.clear();
        self.num_good = 0;
        self.num_nonempty = 0;
    }

    /// 現在のブロックをスキャンします。
    ///
    /// 照合の後、認識済みトークン密度が[`MIN_GOOD_DENSITY`]を下回る
    /// ブロックはコードや非英語テキストと見なし、すべての照合結果を
    /// 破棄します。密度がちょうどしきい値に等しい場合は受理されます。
    pub fn scan(&mut self, exclusion: &ExclusionSet) {
        self.matches.clear();

        let config = *self.scanner.config();
        let (num_good, num_nonempty) = match self.scanner.dictionary() {
            DictionaryInnerRef::Archived(lex) => {
                scan_block(lex, &self.block, &config, exclusion, &mut self.matches)
            }
            DictionaryInnerRef::Owned(lex) => {
                scan_block(lex, &self.block, &config, exclusion, &mut self.matches)
            }
        };
        self.num_good = num_good;
        self.num_nonempty = num_nonempty;

        if num_nonempty == 0
            || (num_good as f64) / (num_nonempty as f64) < MIN_GOOD_DENSITY
        {
            self.matches.clear();
        }
    }

    /// 検出された注釈数を取得します。
    #[inline(always)]
    pub fn num_matches(&self) -> usize {
        self.matches.len()
    }

    /// `i`番目の注釈を取得します。
    ///
    /// # Panics
    ///
    /// `i`が注釈数以上の場合にパニックします。
    #[inline(always)]
    pub fn annotation(&self, i: usize) -> Annotation<'_> {
        Annotation::new(self, i)
    }

    /// 注釈のイテレータを取得します。
    #[inline(always)]
    pub fn annotation_iter(&self) -> AnnotationIter<'_> {
        AnnotationIter::new(self)
    }

    /// ブロック全体を覆う区間のイテレータを取得します。
    ///
    /// 注釈が1件もない場合、イテレータは何も返しません。
    #[inline(always)]
    pub fn segment_iter(&self) -> SegmentIter<'_> {
        SegmentIter::new(self)
    }

    /// 認識済みトークン数を取得します。
    ///
    /// 注釈された熟語の構成語数と辞書に載っている語形の数の合計です。
    /// 注釈された辞書語は両方に数えられます。
    #[inline(always)]
    pub const fn num_good(&self) -> usize {
        self.num_good
    }

    /// スキャンが処理したカーソル位置の数を取得します。
    ///
    /// 熟語照合に消費された後続トークンは数えません。密度の分母には
    /// この値が使用されます。
    #[inline(always)]
    pub const fn num_tokens(&self) -> usize {
        self.num_nonempty
    }

    /// 認識済みトークン密度を取得します。
    ///
    /// トークンがない場合は`0.0`を返します。
    pub fn recognized_ratio(&self) -> f64 {
        if self.num_nonempty == 0 {
            0.0
        } else {
            (self.num_good as f64) / (self.num_nonempty as f64)
        }
    }
}
