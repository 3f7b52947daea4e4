//! スキャンのための辞書モジュール。
//!
//! このモジュールは、スキャンに必要な辞書データの読み込み、構築、管理を行います。
//! 主な機能として以下を提供します:
//!
//! - 単語辞書と熟語辞書の構築と読み込み
//! - ゼロコピーデシリアライゼーションによる高速な辞書アクセス
//! - メモリマップドファイルによる効率的なメモリ使用
//!
//! # 辞書の読み込み方法
//!
//! 辞書は複数の方法で読み込むことができます:
//!
//! - [`Dictionary::from_path`]: ファイルパスから辞書を読み込む(推奨)
//! - [`Dictionary::read`]: リーダーから辞書を読み込む
//! - [`Dictionary::from_inner`]: 構築済みの[`DictionaryInner`]をそのまま使用する
//!
//! # 辞書のビルド
//!
//! [`DictionaryBuilder`]を使用して、テキスト形式のソースデータから辞書を構築できます。
pub mod builder;
pub(crate) mod idiom;
pub(crate) mod word;

use std::fs::{create_dir_all, File, Metadata};
use std::io::{Read, Write};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;
use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{
    access, access_unchecked, api::serialize_using, ser::allocator::Arena, ser::sharing::Share,
    ser::writer::IoWriter, ser::Serializer, util::with_arena, Archive, Deserialize, Serialize,
};
use sha2::{Digest, Sha256};

use crate::dictionary::idiom::{ArchivedIdiomLexicon, IdiomKind, IdiomLexicon};
use crate::dictionary::word::{ArchivedWordLexicon, WordLexicon};
use crate::errors::{RarescanError, Result};

pub use crate::dictionary::builder::DictionaryBuilder;

/// Rarescan辞書を識別するマジックバイト。
///
/// この定数の"0.1"というバージョンは、辞書フォーマットのバージョンを示しており、
/// クレートのセマンティックバージョンからは切り離されています。
pub const MODEL_MAGIC: &[u8] = b"RarescanDictionary 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;
const DATA_START: usize = MODEL_MAGIC_LEN + PADDING_LEN;

/// 辞書の読み込みモード。
///
/// 辞書ファイルを読み込む際の検証戦略を指定します。
/// 安全性とパフォーマンスのトレードオフを制御できます。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoadMode {
    /// 読み込むたびに完全な検証を実行します(最も安全)。
    ///
    /// このモードでは、辞書データの整合性を毎回検証するため、
    /// 最も安全ですがパフォーマンスは低下します。
    /// キャッシュファイルは作成されません。
    Validate,
    /// 事前計算されたハッシュが一致する場合は検証をスキップします(繰り返しの読み込みで最速)。
    ///
    /// このモードでは、ファイルメタデータに基づくハッシュを使用して、
    /// 検証済みであることを確認します。高速な読み込みが可能ですが、
    /// ファイルが置き換えられるTOCTOU攻撃に対して脆弱です。
    TrustCache,
}

/// [`Dictionary`]の内部データ。
///
/// 単語辞書と、任意で熟語辞書を保持します。
#[derive(Archive, Serialize, Deserialize)]
pub struct DictionaryInner {
    words: WordLexicon,
    idioms: Option<IdiomLexicon>,
}

/// メモリバッファ(mmapまたはヒープ)を所有し、アーカイブされた辞書へのアクセスを提供するラッパー。
#[allow(dead_code)]
enum DictBuffer {
    Mmap(Mmap),
    Aligned(AlignedVec),
}

/// スキャンのための読み取り専用辞書。
///
/// ゼロコピーデシリアライゼーションによって読み込まれた辞書です。
/// 2つのバリアントがあります:
/// - `Archived`: メモリマップまたはアライメント済みバッファから直接アクセスされる辞書
/// - `Owned`: ヒープ上に所有される辞書データ(ビルダーから直接構築した場合など)
pub enum Dictionary {
    Archived(ArchivedDictionary),
    Owned(Arc<DictionaryInner>),
}

/// アーカイブ形式の辞書。
///
/// メモリバッファとアーカイブされた辞書データへの参照を保持します。
/// ゼロコピーアクセスを可能にし、高速な辞書参照を実現します。
pub struct ArchivedDictionary {
    _buffer: DictBuffer,
    data: &'static ArchivedDictionaryInner,
}

impl Deref for ArchivedDictionary {
    type Target = ArchivedDictionaryInner;
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

/// 辞書内部データへの参照(アーカイブ版または所有版)。
///
/// 辞書の実装の詳細を隠蔽し、アーカイブ版と所有版の両方に対して
/// 統一的なインターフェースを提供します。
pub(crate) enum DictionaryInnerRef<'a> {
    Archived(&'a ArchivedDictionaryInner),
    Owned(&'a DictionaryInner),
}

/// 辞書引きの統一インターフェース。
///
/// 所有版([`DictionaryInner`])とアーカイブ版([`ArchivedDictionaryInner`])の
/// 両方に実装され、照合ループを一度だけ書くための継ぎ目になります。
pub(crate) trait LexiconAccess {
    /// 語形に対応する見出し語と順位を取得します。
    fn word_lookup(&self, surface: &str) -> Option<(&str, u32)>;

    /// 語形が単語辞書に含まれるかどうかを取得します。
    fn contains_word(&self, surface: &str) -> bool;

    /// スペース連結キーに対応する熟語の役割を取得します。
    fn idiom_lookup(&self, key: &str) -> Option<IdiomKind<'_>>;

    /// 熟語辞書を持つかどうかを取得します。
    fn has_idioms(&self) -> bool;
}

impl DictionaryInner {
    /// 単語辞書への参照を取得します。
    #[inline(always)]
    pub(crate) const fn words(&self) -> &WordLexicon {
        &self.words
    }

    /// 熟語辞書への参照を取得します。
    #[inline(always)]
    pub(crate) const fn idioms(&self) -> Option<&IdiomLexicon> {
        self.idioms.as_ref()
    }

    /// 辞書データを`rkyv`フォーマットを使用してライターにシリアライズします。
    ///
    /// この関数の出力バイナリは、[`Dictionary::from_path`]などの読み込み
    /// メソッドが期待する形式です。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::fs::File;
    /// use std::io::Cursor;
    /// use rarescan::DictionaryBuilder;
    ///
    /// let dict = DictionaryBuilder::from_readers(
    ///     Cursor::new("ameliorate\tameliorate\t9000\n"),
    ///     Some(Cursor::new("kick the bucket\tdie\n")),
    /// )?;
    ///
    /// let mut file = File::create("scan.dic")?;
    /// dict.write(&mut file)?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - 基礎となる`writer`への書き込みに失敗した場合(例: I/Oエラー)。
    /// - `rkyv`シリアライゼーションプロセスでエラーが発生した場合。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        with_arena(|arena: &mut Arena| {
            let writer = IoWriter::new(&mut wtr);
            let mut serializer = Serializer::new(writer, arena.acquire(), Share::new());
            serialize_using::<_, rkyv::rancor::Error>(self, &mut serializer)
        })
        .map_err(|e| {
            RarescanError::invalid_state("rkyv serialization failed".to_string(), e.to_string())
        })?;

        Ok(())
    }
}

impl LexiconAccess for DictionaryInner {
    #[inline(always)]
    fn word_lookup(&self, surface: &str) -> Option<(&str, u32)> {
        self.words.lookup(surface)
    }

    #[inline(always)]
    fn contains_word(&self, surface: &str) -> bool {
        self.words.contains(surface)
    }

    #[inline(always)]
    fn idiom_lookup(&self, key: &str) -> Option<IdiomKind<'_>> {
        self.idioms.as_ref().and_then(|lex| lex.lookup(key))
    }

    #[inline(always)]
    fn has_idioms(&self) -> bool {
        self.idioms.is_some()
    }
}

impl ArchivedDictionaryInner {
    /// 単語辞書への参照を取得します。
    #[inline(always)]
    pub(crate) fn words(&self) -> &ArchivedWordLexicon {
        &self.words
    }

    /// 熟語辞書への参照を取得します。
    #[inline(always)]
    pub(crate) fn idioms(&self) -> Option<&ArchivedIdiomLexicon> {
        self.idioms.as_ref()
    }
}

impl LexiconAccess for ArchivedDictionaryInner {
    #[inline(always)]
    fn word_lookup(&self, surface: &str) -> Option<(&str, u32)> {
        self.words().lookup(surface)
    }

    #[inline(always)]
    fn contains_word(&self, surface: &str) -> bool {
        self.words().contains(surface)
    }

    #[inline(always)]
    fn idiom_lookup(&self, key: &str) -> Option<IdiomKind<'_>> {
        self.idioms().and_then(|lex| lex.lookup(key))
    }

    #[inline(always)]
    fn has_idioms(&self) -> bool {
        self.idioms().is_some()
    }
}

impl Dictionary {
    /// `DictionaryInner`から辞書を作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 辞書の内部データ。
    ///
    /// # 戻り値
    ///
    /// 新しい`Dictionary`インスタンス。
    pub fn from_inner(dict: DictionaryInner) -> Self {
        Self::Owned(Arc::new(dict))
    }

    /// 辞書データを`rkyv`フォーマットを使用してライターにシリアライズします。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - 基礎となる`writer`への書き込みに失敗した場合(例: I/Oエラー)。
    /// - `rkyv`シリアライゼーションプロセスでエラーが発生した場合。
    ///
    /// # Panics
    ///
    /// `Dictionary::Archived`バリアントでこのメソッドが呼び出された場合にパニックします。
    pub fn write<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        match self {
            Dictionary::Owned(dict) => dict.write(wtr),
            Dictionary::Archived(_) => unreachable!(),
        }
    }

    /// すべてのデータをヒープバッファに読み込むことで、リーダーから辞書を作成します。
    ///
    /// これは、ファイルパスが利用できない場合(例: メモリ内バッファからの読み込み)の
    /// フォールバックです。すべてのコンテンツをメモリに読み込むため、
    /// [`from_path`](Self::from_path)よりもメモリ効率が低くなります。
    ///
    /// # 引数
    ///
    /// * `rdr` - `std::io::Read`を実装するリーダー。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - データを読み込めない場合。
    /// - コンテンツが無効な場合。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;

        if !magic.starts_with(MODEL_MAGIC) {
            return Err(RarescanError::invalid_argument(
                "rdr",
                "The magic number of the input dictionary mismatches.",
            ));
        }

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes = AlignedVec::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let archived = access::<ArchivedDictionaryInner, Error>(&aligned_bytes).map_err(|e| {
            RarescanError::invalid_state(
                "rkyv validation failed. The dictionary file may be corrupted or incompatible."
                    .to_string(),
                e.to_string(),
            )
        })?;

        // SAFETY: AlignedVec ensures correct alignment for ArchivedDictionaryInner
        let data: &'static ArchivedDictionaryInner = unsafe { &*(archived as *const _) };

        Ok(Self::Archived(ArchivedDictionary {
            _buffer: DictBuffer::Aligned(aligned_bytes),
            data,
        }))
    }

    /// メモリマッピングを使用してファイルパスから辞書を作成します。
    ///
    /// この関数は、辞書ファイルをメモリにマップしてゼロコピーアクセスを実現し、
    /// 高いパフォーマンスとメモリ効率を提供します。読み込み動作は`mode`パラメータで
    /// 設定でき、安全性とパフォーマンスのバランスを調整できます。
    ///
    /// | モード | 検証 | キャッシュ書き込み | 用途 |
    /// |------|-------------|---------------|-----------|
    /// | `Validate` | 毎回完全検証 | ❌ | 最大の安全性 |
    /// | `TrustCache` | プルーフファイルが存在する場合はスキップ | ✅ | 高速な再読み込み |
    ///
    /// ## キャッシングメカニズム(`LoadMode::TrustCache`)
    ///
    /// 後続の読み込みを高速化するため、この関数は`TrustCache`モードが有効な場合に
    /// キャッシュメカニズムを使用します。辞書ファイルのメタデータ(サイズ、更新時刻など)から
    /// 一意のハッシュを生成し、辞書ファイルと同じディレクトリの`.cache`内に対応する
    /// 「プルーフファイル」(例: `<hash>.sha256`)を探して、完全な検証を行わずに
    /// 辞書の妥当性を証明します。
    ///
    /// プルーフファイルが見つからない場合、関数は完全な検証を実行します。成功した場合、
    /// プルーフファイルを作成して次回の読み込みを高速化します。
    ///
    /// # 引数
    ///
    /// - `path` - 辞書ファイルへのパス。
    /// - `mode` - 検証戦略を指定する[`LoadMode`]:
    ///   - `LoadMode::Validate`: 読み込むたびに辞書データの完全な検証を実行します。
    ///     これは最も安全なモードで、キャッシュファイルを書き込みません。
    ///   - `LoadMode::TrustCache`: 上記のキャッシュメカニズムを有効にします。
    ///     **警告: このモードは、高いパフォーマンスを実現するためにファイルメタデータを
    ///     信頼して検証します。辞書ファイルが悪意のある攻撃者によって置き換えられる可能性が
    ///     ある場合、TOCTOU攻撃に対して脆弱です。ファイルの整合性が保証できない環境では
    ///     `LoadMode::Validate`を使用してください。**
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - ファイルを開けない、または読み込めない場合。
    /// - ファイルが破損している、無効な形式、またはマジックナンバーが一致しない場合。
    pub fn from_path<P: AsRef<Path>>(path: P, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            RarescanError::invalid_argument("path", format!("Failed to open dictionary file: {e}"))
        })?;
        let meta = file.metadata()?;
        let mut magic = [0u8; MODEL_MAGIC_LEN];
        file.read_exact(&mut magic)?;

        if !magic.starts_with(MODEL_MAGIC) {
            return Err(RarescanError::invalid_argument(
                "path",
                "The magic number of the input dictionary mismatches.",
            ));
        }

        let mmap = unsafe { Mmap::map(&file)? };

        let Some(data_bytes) = mmap.get(DATA_START..) else {
            return Err(RarescanError::invalid_argument(
                "path",
                "Dictionary file too small or corrupted.",
            ));
        };

        let current_hash = compute_metadata_hash(&meta);
        let hash_name = format!("{current_hash}.sha256");
        let cache_dir = path
            .parent()
            .ok_or_else(|| {
                RarescanError::invalid_argument(
                    "path",
                    "Input path must have a parent directory.",
                )
            })?
            .join(".cache");
        let hash_path = cache_dir.join(&hash_name);

        if mode == LoadMode::TrustCache && hash_path.exists() {
            let archived = unsafe { access_unchecked::<ArchivedDictionaryInner>(data_bytes) };
            let data: &'static ArchivedDictionaryInner = unsafe { &*(archived as *const _) };
            return Ok(Self::Archived(ArchivedDictionary {
                _buffer: DictBuffer::Mmap(mmap),
                data,
            }));
        }

        match access::<ArchivedDictionaryInner, Error>(data_bytes) {
            Ok(archived) => {
                if mode == LoadMode::TrustCache {
                    create_dir_all(&cache_dir)?;
                    File::create_new(&hash_path)?;
                }

                let data: &'static ArchivedDictionaryInner = unsafe { &*(archived as *const _) };
                Ok(Self::Archived(ArchivedDictionary {
                    _buffer: DictBuffer::Mmap(mmap),
                    data,
                }))
            }
            Err(_) => {
                // mmap先頭のアライメントが不足する場合はヒープへコピーして再検証する
                let mut aligned_bytes = AlignedVec::with_capacity(data_bytes.len());
                aligned_bytes.extend_from_slice(data_bytes);

                let archived =
                    access::<ArchivedDictionaryInner, Error>(&aligned_bytes).map_err(|e| {
                        RarescanError::invalid_state(
                            "rkyv validation failed. The dictionary file may be corrupted or incompatible."
                                .to_string(),
                            e.to_string(),
                        )
                    })?;

                let data: &'static ArchivedDictionaryInner = unsafe { &*(archived as *const _) };
                Ok(Self::Archived(ArchivedDictionary {
                    _buffer: DictBuffer::Aligned(aligned_bytes),
                    data,
                }))
            }
        }
    }

    /// 検証なしでメモリマッピングを使用してファイルパスから辞書を作成します。
    ///
    /// この関数は、データ検証をスキップして高速に読み込む
    /// [`from_path`](Self::from_path)のバージョンです。チェックサムなどによって
    /// ファイルの整合性が既に確認されている状況を想定しています。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - ファイルを開けない場合。
    /// - ファイルが小さすぎる場合。
    /// - マジックナンバーが不正な場合。
    ///
    /// この関数は、シリアライズされたデータ自体の整合性を検証しません。
    ///
    /// # Safety
    ///
    /// この関数はunsafeです。なぜなら、`rkyv`の検証ステップをバイパスして
    /// メモリマップされたデータに直接アクセスするためです。呼び出し側は、
    /// ファイルの内容が辞書の有効で破損していない表現であることを保証する必要があります。
    ///
    /// ファイルが破損または切り詰められている場合、この関数は無効なデータを
    /// 有効なポインタやオフセットであるかのように読み取る可能性があります。
    /// これにより、境界外メモリアクセス、パニック、またはその他の形式の未定義動作が
    /// 発生する可能性があります。
    pub unsafe fn from_path_unchecked<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            RarescanError::invalid_argument("path", format!("Failed to open dictionary file: {e}"))
        })?;
        let mut magic = [0u8; MODEL_MAGIC_LEN];
        file.read_exact(&mut magic)?;

        if !magic.starts_with(MODEL_MAGIC) {
            return Err(RarescanError::invalid_argument(
                "path",
                "The magic number of the input dictionary mismatches.",
            ));
        }

        let mmap = unsafe { Mmap::map(&file)? };

        let Some(data_bytes) = mmap.get(DATA_START..) else {
            return Err(RarescanError::invalid_argument(
                "path",
                "Dictionary file too small or corrupted.",
            ));
        };

        let archived = unsafe { access_unchecked::<ArchivedDictionaryInner>(data_bytes) };
        let data: &'static ArchivedDictionaryInner = unsafe { &*(archived as *const _) };
        Ok(Self::Archived(ArchivedDictionary {
            _buffer: DictBuffer::Mmap(mmap),
            data,
        }))
    }

    /// 単語辞書の登録語数を取得します。
    pub fn num_words(&self) -> usize {
        match self {
            Dictionary::Archived(dict) => dict.words().len(),
            Dictionary::Owned(dict) => dict.words().len(),
        }
    }

    /// 単語辞書中の最大順位を取得します。
    pub fn word_max_rank(&self) -> u32 {
        match self {
            Dictionary::Archived(dict) => dict.words().max_rank(),
            Dictionary::Owned(dict) => dict.words().max_rank(),
        }
    }

    /// 熟語辞書の登録キー数(接頭辞を含む)を取得します。
    ///
    /// 熟語辞書を持たない場合は0を返します。
    pub fn num_idiom_keys(&self) -> usize {
        match self {
            Dictionary::Archived(dict) => dict.idioms().map_or(0, |lex| lex.len()),
            Dictionary::Owned(dict) => dict.idioms().map_or(0, |lex| lex.len()),
        }
    }
}

/// ファイルメタデータからハッシュを計算します。
///
/// この関数は、ファイルのメタデータ(サイズ、更新時刻、iノードなど)から
/// 一意のSHA256ハッシュを生成します。このハッシュは、プルーフファイルの
/// 命名とファイルの同一性確認に使用されます。
#[inline(always)]
fn compute_metadata_hash(meta: &Metadata) -> String {
    let mut hasher = Sha256::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        hasher.update(meta.dev().to_le_bytes());
        hasher.update(meta.ino().to_le_bytes());
        hasher.update(meta.size().to_le_bytes());
        hasher.update(meta.mtime().to_le_bytes());
        hasher.update(meta.mtime_nsec().to_le_bytes());
    }

    #[cfg(not(unix))]
    {
        use std::time::SystemTime;

        hasher.update(meta.len().to_le_bytes());
        for time in [meta.modified(), meta.created()] {
            match time
                .ok()
                .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            {
                Some(duration) => {
                    hasher.update(duration.as_secs().to_le_bytes());
                    hasher.update(duration.subsec_nanos().to_le_bytes());
                }
                None => hasher.update([0u8; 12]),
            }
        }
    }

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn build_inner() -> DictionaryInner {
        DictionaryBuilder::from_readers(
            Cursor::new("went\tgo\t40\nbucket\tbucket\t4000\n"),
            Some(Cursor::new("kick the bucket\tdie\n")),
        )
        .unwrap()
    }

    fn write_dict(path: &Path) {
        let mut file = File::create(path).unwrap();
        build_inner().write(&mut file).unwrap();
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut buffer = Vec::new();
        build_inner().write(&mut buffer).unwrap();
        assert!(buffer.starts_with(MODEL_MAGIC));

        let dict = Dictionary::read(buffer.as_slice()).unwrap();
        match &dict {
            Dictionary::Archived(archived) => {
                assert_eq!(archived.words().lookup("went"), Some(("go", 40)));
                assert_eq!(
                    archived.idioms().unwrap().lookup("kick the bucket"),
                    Some(IdiomKind::Lemma("die"))
                );
                assert_eq!(archived.idioms().unwrap().lookup("kick"), Some(IdiomKind::Prefix));
            }
            Dictionary::Owned(_) => unreachable!(),
        }
        assert_eq!(dict.num_words(), 2);
        assert_eq!(dict.word_max_rank(), 4000);
        assert_eq!(dict.num_idiom_keys(), 3);
    }

    #[test]
    fn test_read_rejects_bad_magic() {
        let data = vec![b'x'; 64];
        assert!(Dictionary::read(data.as_slice()).is_err());
    }

    #[test]
    fn test_from_path_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.dic");
        write_dict(&path);

        let dict = Dictionary::from_path(&path, LoadMode::Validate).unwrap();
        assert_eq!(dict.num_words(), 2);
        assert!(!dir.path().join(".cache").exists());
    }

    #[test]
    fn test_from_path_trust_cache_creates_proof() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.dic");
        write_dict(&path);

        let dict = Dictionary::from_path(&path, LoadMode::TrustCache).unwrap();
        assert_eq!(dict.num_idiom_keys(), 3);
        let cache_dir = dir.path().join(".cache");
        assert!(cache_dir.exists());
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 1);

        // 2回目はプルーフファイル経由で読み込まれる
        let dict = Dictionary::from_path(&path, LoadMode::TrustCache).unwrap();
        assert_eq!(dict.num_words(), 2);
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_from_path_unchecked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.dic");
        write_dict(&path);

        let dict = unsafe { Dictionary::from_path_unchecked(&path) }.unwrap();
        assert_eq!(dict.num_words(), 2);
    }

    #[test]
    fn test_from_path_rejects_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.dic");
        std::fs::write(&path, MODEL_MAGIC).unwrap();

        assert!(Dictionary::from_path(&path, LoadMode::Validate).is_err());
    }
}
