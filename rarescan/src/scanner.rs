//! スキャナー本体
//!
//! このモジュールは、テキストブロックに対して熟語・単語・汎用単語の
//! 照合を行う[`Scanner`]を提供します。実際のスキャン状態は
//! [`Worker`](crate::scanner::worker::Worker)が保持します。

pub mod worker;

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::annotation::{MatchKind, MatchRecord};
use crate::block::Block;
use crate::dictionary::idiom::IdiomKind;
use crate::dictionary::{Dictionary, DictionaryInnerRef, LexiconAccess};
use crate::exclusion::ExclusionSet;
use crate::scanner::worker::Worker;

/// ブロックが注釈に値すると判断するための最小の認識済みトークン密度。
///
/// 認識済みトークン数を、照合ループが処理したカーソル位置数で割った
/// 値がこのしきい値を下回るブロックは、コードや非英語テキストと
/// 見なして棄却されます。ちょうどしきい値に等しい場合は受理されます。
pub const MIN_GOOD_DENSITY: f64 = 0.1;

/// 単語照合の対象となるトークンの最小文字数。
const MIN_TOKEN_LEN: usize = 3;

/// 汎用単語として注釈できるトークンのパターン。
///
/// 小文字アルファベットのみのトークンに限ります。プレースホルダや
/// 数字を含むトークンは一致しません。
static GENERIC_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z][a-z]*$").unwrap());

/// スキャンの動作設定
#[derive(Clone, Copy, Debug)]
pub struct ScanConfig {
    /// 熟語照合を有効にするかどうか(デフォルト: `true`)
    pub enable_idioms: bool,

    /// 単語照合を有効にするかどうか(デフォルト: `true`)
    pub enable_lemmas: bool,

    /// 辞書外の汎用単語の注釈を有効にするかどうか(デフォルト: `false`)
    pub enable_generic_words: bool,

    /// 注釈する単語の最小順位(デフォルト: `1`)
    ///
    /// この順位未満の(=より頻出の)単語は注釈されません。
    pub min_show_rank: u32,

    /// パーセンタイル計算の分母となる最大順位
    ///
    /// デフォルトでは辞書中の最大順位が使用されます。
    pub word_max_rank: u32,
}

/// 辞書に基づいてテキストをスキャンするスキャナー
///
/// スキャナー自体は辞書と設定のみを保持し、スキャンの作業領域は
/// [`new_worker()`](Scanner::new_worker)で作成する[`Worker`]が持ちます。
/// スキャナーは安価にクローンでき、複数のワーカー間で辞書を共有します。
#[derive(Clone)]
pub struct Scanner {
    dict: Arc<Dictionary>,
    config: ScanConfig,
}

impl Scanner {
    /// 辞書から新しいスキャナーを作成します。
    pub fn new(dict: Dictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// 共有辞書から新しいスキャナーを作成します。
    ///
    /// 複数のスキャナーで同じ辞書を共有したい場合に使用します。
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        let word_max_rank = dict.word_max_rank();
        Self {
            dict,
            config: ScanConfig {
                enable_idioms: true,
                enable_lemmas: true,
                enable_generic_words: false,
                min_show_rank: 1,
                word_max_rank,
            },
        }
    }

    /// 熟語照合を有効にするかどうかを設定します。
    pub const fn enable_idioms(mut self, yes: bool) -> Self {
        self.config.enable_idioms = yes;
        self
    }

    /// 単語照合を有効にするかどうかを設定します。
    pub const fn enable_lemmas(mut self, yes: bool) -> Self {
        self.config.enable_lemmas = yes;
        self
    }

    /// 辞書外の汎用単語の注釈を有効にするかどうかを設定します。
    pub const fn enable_generic_words(mut self, yes: bool) -> Self {
        self.config.enable_generic_words = yes;
        self
    }

    /// 注釈する単語の最小順位を設定します。
    pub const fn min_show_rank(mut self, rank: u32) -> Self {
        self.config.min_show_rank = rank;
        self
    }

    /// パーセンタイル計算の分母となる最大順位を設定します。
    ///
    /// `0`を指定した場合、辞書中の最大順位に戻します。
    pub fn word_max_rank(mut self, max_rank: u32) -> Self {
        self.config.word_max_rank = if max_rank == 0 {
            self.dict.word_max_rank()
        } else {
            max_rank
        };
        self
    }

    /// 現在のスキャン設定を取得します。
    #[inline(always)]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// 辞書内部データへの参照を取得します。
    #[inline(always)]
    pub(crate) fn dictionary(&self) -> DictionaryInnerRef<'_> {
        match self.dict.as_ref() {
            Dictionary::Archived(dict) => DictionaryInnerRef::Archived(&**dict),
            Dictionary::Owned(dict) => DictionaryInnerRef::Owned(dict),
        }
    }

    /// このスキャナーで動作する新しいワーカーを作成します。
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// 語形の頻度パーセンタイルを計算します。
    ///
    /// パーセンタイルは`ceil(順位 * 100 / 最大順位)`です。小さいほど
    /// 頻出、100に近いほど稀少な単語であることを示します。
    ///
    /// # 戻り値
    ///
    /// 語形が辞書にない場合、または最大順位が0の場合は`None`。
    pub fn percentile(&self, surface: &str) -> Option<u32> {
        let max_rank = u64::from(self.config.word_max_rank);
        if max_rank == 0 {
            return None;
        }
        let rank = match self.dictionary() {
            DictionaryInnerRef::Archived(dict) => dict.word_lookup(surface)?.1,
            DictionaryInnerRef::Owned(dict) => dict.word_lookup(surface)?.1,
        };
        let pct = (u64::from(rank) * 100).div_ceil(max_rank);
        Some(u32::try_from(pct).unwrap_or(u32::MAX))
    }
}

/// ブロックに対して照合ループを一回実行します。
///
/// 検出した照合結果を`matches`に追記し、認識済みトークン数と
/// 処理したカーソル位置数の組を返します。熟語が消費した後続トークンは
/// 位置数に数えません。密度ゲートの適用は呼び出し側
/// ([`Worker::scan`](crate::scanner::worker::Worker::scan))の責務です。
pub(crate) fn scan_block<L>(
    lex: &L,
    block: &Block,
    config: &ScanConfig,
    exclusion: &ExclusionSet,
    matches: &mut Vec<MatchRecord>,
) -> (usize, usize)
where
    L: LexiconAccess + ?Sized,
{
    let tokens = block.tokens();
    let mut num_nonempty = 0;
    let mut num_good = 0;

    let mut i = 0;
    while i < tokens.len() {
        num_nonempty += 1;
        let tok = &tokens[i];
        let mut advance = 1;
        let mut matched = false;

        // 熟語照合。トークン列を貪欲に延長しながらスペース連結キーを引く。
        if config.enable_idioms && lex.has_idioms() && tok.aligned() {
            let mut key = tok.text().to_string();
            let mut last = i;
            loop {
                match lex.idiom_lookup(&key) {
                    Some(IdiomKind::Prefix) => {
                        let Some(next_tok) = tokens.get(last + 1) else {
                            break;
                        };
                        // 熟語は半角スペース1個で隣接するトークンのみにまたがる
                        if !next_tok.aligned()
                            || next_tok.begin_char() != tokens[last].end_char() + 1
                        {
                            break;
                        }
                        key.push(' ');
                        key.push_str(next_tok.text());
                        last += 1;
                    }
                    Some(IdiomKind::Lemma(lemma)) => {
                        let consumed = last - i + 1;
                        if exclusion.contains(lemma) {
                            // 既知の熟語は注釈せずトークンだけ消費する
                        } else {
                            matches.push(MatchRecord {
                                kind: MatchKind::Idiom,
                                lemma: Some(lemma.to_string()),
                                begin_char: tok.begin_char(),
                                end_char: tokens[last].end_char(),
                                begin_byte: tok.begin_byte(),
                                end_byte: tokens[last].end_byte(),
                            });
                            num_good += consumed;
                        }
                        advance = consumed;
                        matched = true;
                        break;
                    }
                    None => break,
                }
            }
        }

        // 単語照合
        if !matched && config.enable_lemmas && tok.text().len() >= MIN_TOKEN_LEN {
            if let Some((lemma, rank)) = lex.word_lookup(tok.text()) {
                if rank >= config.min_show_rank && !exclusion.contains(lemma) {
                    matches.push(MatchRecord {
                        kind: MatchKind::Lemma,
                        lemma: Some(lemma.to_string()),
                        begin_char: tok.begin_char(),
                        end_char: tok.end_char(),
                        begin_byte: tok.begin_byte(),
                        end_byte: tok.end_byte(),
                    });
                    num_good += 1;
                    matched = true;
                }
            }
        }

        // 汎用単語の注釈。認識済みトークンとしては数えない。
        if !matched
            && config.enable_generic_words
            && tok.text().len() >= MIN_TOKEN_LEN
            && GENERIC_WORD.is_match(tok.text())
        {
            matches.push(MatchRecord {
                kind: MatchKind::GenericWord,
                lemma: None,
                begin_char: tok.begin_char(),
                end_char: tok.end_char(),
                begin_byte: tok.begin_byte(),
                end_byte: tok.end_byte(),
            });
        }

        // 辞書に載っている語形は注釈の有無に関わらず認識済みとして数える
        if lex.contains_word(tok.text()) {
            num_good += 1;
        }
        i += advance;
    }

    (num_good, num_nonempty)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use crate::annotation::MatchKind;
    use crate::dictionary::DictionaryBuilder;

    const WORDS: &str = "\
the\tthe\t1\n\
will\twill\t20\n\
went\tgo\t40\n\
kick\tkick\t800\n\
bucket\tbucket\t4000\n\
ameliorate\tameliorate\t9000\n";

    const IDIOMS: &str = "kick the bucket\tdie\n";

    fn scanner() -> Scanner {
        let dict = DictionaryBuilder::from_readers(
            Cursor::new(WORDS),
            Some(Cursor::new(IDIOMS)),
        )
        .unwrap();
        Scanner::new(Dictionary::from_inner(dict))
    }

    fn lemmas(worker: &Worker) -> Vec<(MatchKind, Option<String>)> {
        worker
            .annotation_iter()
            .map(|a| (a.kind(), a.lemma().map(|s| s.to_string())))
            .collect()
    }

    #[test]
    fn test_idiom_precedence() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();
        worker.reset_block("He will kick the bucket.");
        worker.scan(&ExclusionSet::new());

        assert_eq!(
            lemmas(&worker),
            vec![(MatchKind::Idiom, Some("die".to_string()))]
        );
        let a = worker.annotation(0);
        assert_eq!(a.surface(), "kick the bucket");
        assert_eq!(a.range_char(), 8..23);
    }

    #[test]
    fn test_idiom_boundary_rejected() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();
        // ハイフン区切りでは熟語にならず、先頭トークンが単語照合に落ちる
        worker.reset_block("kick-the-bucket");
        worker.scan(&ExclusionSet::new());

        assert_eq!(
            lemmas(&worker),
            vec![
                (MatchKind::Lemma, Some("kick".to_string())),
                (MatchKind::Lemma, Some("bucket".to_string())),
            ]
        );
    }

    #[test]
    fn test_idiom_multi_space_gap_rejected() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();
        worker.reset_block("kick  the bucket");
        worker.scan(&ExclusionSet::new());

        assert_eq!(
            lemmas(&worker),
            vec![
                (MatchKind::Lemma, Some("kick".to_string())),
                (MatchKind::Lemma, Some("bucket".to_string())),
            ]
        );
    }

    #[test]
    fn test_excluded_lemma_suppressed() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();
        let mut exclusion = ExclusionSet::new();
        exclusion.mark_known("ameliorate");

        worker.reset_block("please ameliorate this");
        worker.scan(&exclusion);

        // 注釈は抑制されるが、認識済みトークンとして密度には寄与する
        assert_eq!(worker.num_matches(), 0);
        assert_eq!(worker.num_good(), 1);
        assert_eq!(worker.num_tokens(), 3);
    }

    #[test]
    fn test_excluded_idiom_consumes_tokens() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();
        let mut exclusion = ExclusionSet::new();
        exclusion.mark_known("die");

        worker.reset_block("He will kick the bucket.");
        worker.scan(&exclusion);

        // 熟語は注釈されず、構成語が単語として注釈されることもない
        assert_eq!(worker.num_matches(), 0);
    }

    #[test]
    fn test_generic_words() {
        let scanner = scanner().min_show_rank(100).enable_generic_words(true);
        let mut worker = scanner.new_worker();
        worker.reset_block("the frobnicate xs");
        worker.scan(&ExclusionSet::new());

        // "the"は順位がしきい値未満のため汎用単語に落ちる。
        // "xs"は短すぎるため注釈されない。
        assert_eq!(
            lemmas(&worker),
            vec![
                (MatchKind::GenericWord, None),
                (MatchKind::GenericWord, None),
            ]
        );
        let a = worker.annotation(1);
        assert_eq!(a.surface(), "frobnicate");
        assert_eq!(a.class_key(), "rarescan_none_none");
    }

    #[test]
    fn test_density_boundary() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();

        // 30トークン中、注釈された"ameliorate"が2重に数えられて
        // num_good=3となり、ちょうど0.1: 受理される
        let mut line = "ameliorate went".to_string();
        for _ in 0..28 {
            line.push_str(" zzz");
        }
        worker.reset_block(&line);
        worker.scan(&ExclusionSet::new());
        assert_eq!(worker.num_good(), 3);
        assert_eq!(worker.num_matches(), 1);

        // 31トークンで0.1未満: 棄却される
        line.push_str(" zzz");
        worker.reset_block(&line);
        worker.scan(&ExclusionSet::new());
        assert_eq!(worker.num_matches(), 0);
    }

    #[test]
    fn test_density_denominator_skips_idiom_interior() {
        let scanner = scanner().min_show_rank(100);
        let mut worker = scanner.new_worker();

        // 熟語が消費した後続トークン("the"と"bucket")は分母に入らない。
        // 40位置中num_good=4(熟語3+先頭語形の2重カウント1)でちょうど0.1。
        let mut line = "kick the bucket".to_string();
        for _ in 0..39 {
            line.push_str(" zzz");
        }
        worker.reset_block(&line);
        worker.scan(&ExclusionSet::new());
        assert_eq!(worker.num_tokens(), 40);
        assert_eq!(worker.num_good(), 4);
        assert_eq!(worker.num_matches(), 1);

        // 41位置目で0.1を下回り棄却される
        line.push_str(" zzz");
        worker.reset_block(&line);
        worker.scan(&ExclusionSet::new());
        assert_eq!(worker.num_tokens(), 41);
        assert_eq!(worker.num_matches(), 0);
    }

    #[test]
    fn test_empty_input() {
        let scanner = scanner();
        let mut worker = scanner.new_worker();
        worker.reset_block("");
        worker.scan(&ExclusionSet::new());
        assert_eq!(worker.num_matches(), 0);
        assert!(worker.segment_iter().next().is_none());
    }

    #[test]
    fn test_percentile() {
        let scanner = scanner();
        assert_eq!(scanner.percentile("bucket"), Some(45));
        assert_eq!(scanner.percentile("ameliorate"), Some(100));
        assert_eq!(scanner.percentile("zzz"), None);

        let scanner = scanner.word_max_rank(200);
        assert_eq!(scanner.percentile("went"), Some(20));

        let scanner = scanner.word_max_rank(3);
        assert_eq!(scanner.percentile("the"), Some(34));
    }
}
