//! テキストブロックの内部表現
//!
//! このモジュールは、スキャン対象のテキストブロックとその正規化済み
//! トークン列を保持する[`Block`]を提供します。正規化は元のテキストを
//! 書き換えず、`char_indices`に対する一回の走査でトークン境界と
//! 文字・バイト両方のオフセットを記録します。

use std::ops::Range;

/// 区切り文字の判定
///
/// 句読点類(ASCIIとタイポグラフィ用の引用符・ダッシュ)および
/// すべてのUnicode空白文字を区切りとして扱います。
/// 区切り文字はトークンに含まれず、トークンを終端させます。
#[inline(always)]
pub(crate) fn is_separator(c: char) -> bool {
    matches!(
        c,
        ',' | ';'
            | '('
            | ')'
            | '?'
            | '!'
            | '`'
            | ':'
            | '"'
            | '\''
            | '.'
            | '-'
            | '\u{2013}' // en dash
            | '\u{2014}' // em dash
            | '\u{2018}'
            | '\u{2019}'
            | '\u{201C}'
            | '\u{201D}'
    ) || c.is_whitespace()
}

/// トークン内の1文字を正規化します。
///
/// ASCII英数字とアンダースコアは小文字化して保持し、
/// それ以外の文字はプレースホルダ`.`に置き換えます。
/// プレースホルダを含むトークンは汎用単語パターンに一致しません。
#[inline(always)]
fn normalize_char(c: char) -> char {
    if c.is_ascii_alphanumeric() || c == '_' {
        c.to_ascii_lowercase()
    } else {
        '.'
    }
}

/// ブロック内の1トークン
///
/// 正規化済みのトークン文字列と、元のテキスト中での位置
/// (文字単位・バイト単位の両方)を保持します。
/// `aligned`は、トークン直前の元の文字がリテラルな半角スペース
/// (またはテキスト先頭)であることを示します。熟語照合の境界条件に
/// 使用されます。
#[derive(Debug, Clone)]
pub(crate) struct TokenSpan {
    text: String,
    begin_char: usize,
    end_char: usize,
    begin_byte: usize,
    end_byte: usize,
    aligned: bool,
}

impl TokenSpan {
    /// 正規化済みトークン文字列を取得します。
    #[inline(always)]
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// 文字単位の開始位置を取得します。
    #[inline(always)]
    pub(crate) const fn begin_char(&self) -> usize {
        self.begin_char
    }

    /// 文字単位の終了位置(排他的)を取得します。
    #[inline(always)]
    pub(crate) const fn end_char(&self) -> usize {
        self.end_char
    }

    /// バイト単位の開始位置を取得します。
    #[inline(always)]
    pub(crate) const fn begin_byte(&self) -> usize {
        self.begin_byte
    }

    /// バイト単位の終了位置(排他的)を取得します。
    #[inline(always)]
    pub(crate) const fn end_byte(&self) -> usize {
        self.end_byte
    }

    /// 文字単位の位置範囲を取得します。
    #[inline(always)]
    pub(crate) const fn range_char(&self) -> Range<usize> {
        self.begin_char..self.end_char
    }

    /// 境界条件を満たすかどうかを取得します。
    #[inline(always)]
    pub(crate) const fn aligned(&self) -> bool {
        self.aligned
    }
}

/// スキャン対象のテキストブロック
///
/// 元のテキストと正規化済みトークン列を保持します。
/// トークン列から元のテキストへの位置対応は[`TokenSpan`]が持つ
/// オフセットで復元できます。空のトークンは生成されません。
#[derive(Default)]
pub(crate) struct Block {
    input: String,
    tokens: Vec<TokenSpan>,
    len_char: usize,
}

impl Block {
    /// 新しい空のブロックを作成します。
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// ブロックの内容をクリアします。
    pub(crate) fn clear(&mut self) {
        self.input.clear();
        self.tokens.clear();
        self.len_char = 0;
    }

    /// 入力テキストを設定し、トークン列を再構築します。
    ///
    /// 区切り文字でトークンを分割しながら、各トークンの文字・バイト
    /// オフセットと境界ビットを記録します。中間文字列は生成しません。
    pub(crate) fn reset<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        let input = input.as_ref();
        self.input.push_str(input);

        let mut cur: Option<TokenSpan> = None;
        let mut prev_char: Option<char> = None;
        let mut pos_char = 0;

        for (pos_byte, c) in input.char_indices() {
            if is_separator(c) {
                if let Some(tok) = cur.take() {
                    self.tokens.push(tok);
                }
            } else {
                match cur.as_mut() {
                    Some(tok) => {
                        tok.text.push(normalize_char(c));
                        tok.end_char = pos_char + 1;
                        tok.end_byte = pos_byte + c.len_utf8();
                    }
                    None => {
                        let aligned = prev_char.is_none_or(|p| p == ' ');
                        let mut text = String::new();
                        text.push(normalize_char(c));
                        cur = Some(TokenSpan {
                            text,
                            begin_char: pos_char,
                            end_char: pos_char + 1,
                            begin_byte: pos_byte,
                            end_byte: pos_byte + c.len_utf8(),
                            aligned,
                        });
                    }
                }
            }
            prev_char = Some(c);
            pos_char += 1;
        }
        if let Some(tok) = cur.take() {
            self.tokens.push(tok);
        }
        self.len_char = pos_char;
    }

    /// 元の入力テキストへの参照を取得します。
    #[inline(always)]
    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    /// トークン列への参照を取得します。
    #[inline(always)]
    pub(crate) fn tokens(&self) -> &[TokenSpan] {
        &self.tokens
    }

    /// ブロック全体の文字数を取得します。
    #[inline(always)]
    pub(crate) const fn len_char(&self) -> usize {
        self.len_char
    }

    /// ブロック全体のバイト数を取得します。
    #[inline(always)]
    pub(crate) fn len_byte(&self) -> usize {
        self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(block: &Block) -> Vec<&str> {
        block.tokens().iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_basic_split() {
        let mut block = Block::new();
        block.reset("He will kick the bucket.");
        assert_eq!(texts(&block), vec!["he", "will", "kick", "the", "bucket"]);
        assert_eq!(block.len_char(), 24);
        assert_eq!(block.len_byte(), 24);
    }

    #[test]
    fn test_offsets() {
        let mut block = Block::new();
        block.reset("He will kick");
        let t = &block.tokens()[2];
        assert_eq!(t.range_char(), 8..12);
        assert_eq!(t.begin_byte(), 8);
        assert_eq!(t.end_byte(), 12);
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut block = Block::new();
        block.reset("café bar");
        assert_eq!(texts(&block), vec!["caf.", "bar"]);
        let t0 = &block.tokens()[0];
        assert_eq!(t0.range_char(), 0..4);
        assert_eq!(t0.begin_byte(), 0);
        assert_eq!(t0.end_byte(), 5);
        let t1 = &block.tokens()[1];
        assert_eq!(t1.range_char(), 5..8);
        assert_eq!(t1.begin_byte(), 6);
        assert_eq!(t1.end_byte(), 9);
    }

    #[test]
    fn test_separators() {
        let mut block = Block::new();
        block.reset("one,two;three(four)five–six—seven’s");
        assert_eq!(
            texts(&block),
            vec!["one", "two", "three", "four", "five", "six", "seven", "s"]
        );
    }

    #[test]
    fn test_placeholder_and_case() {
        let mut block = Block::new();
        block.reset("Naïve R2_D2");
        assert_eq!(texts(&block), vec!["na.ve", "r2_d2"]);
    }

    #[test]
    fn test_aligned_bits() {
        let mut block = Block::new();
        block.reset("kick-the bucket");
        let tokens = block.tokens();
        assert!(tokens[0].aligned());
        // ハイフン直後のトークンは境界条件を満たさない
        assert!(!tokens[1].aligned());
        assert!(tokens[2].aligned());
    }

    #[test]
    fn test_aligned_at_start() {
        let mut block = Block::new();
        block.reset("bucket");
        assert!(block.tokens()[0].aligned());
    }

    #[test]
    fn test_empty_tokens_never_created() {
        let mut block = Block::new();
        block.reset("  -- , !! ");
        assert!(block.tokens().is_empty());
        assert_eq!(block.len_char(), 10);
    }

    #[test]
    fn test_empty_input() {
        let mut block = Block::new();
        block.reset("");
        assert!(block.tokens().is_empty());
        assert_eq!(block.len_char(), 0);
        assert_eq!(block.len_byte(), 0);
    }

    #[test]
    fn test_reset_clears_previous() {
        let mut block = Block::new();
        block.reset("one two three");
        block.reset("four");
        assert_eq!(texts(&block), vec!["four"]);
        assert_eq!(block.input(), "four");
    }
}
