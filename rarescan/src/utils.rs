//! ユーティリティ関数を提供するモジュール
//!
//! 主に辞書ソースファイル(TSV形式)の行解析を提供します。

use csv_core::ReadFieldResult;

/// TSV形式の行を解析してフィールドのベクターに分割する
///
/// この関数は、タブ区切りの文字列を解析し、各フィールドを個別の文字列として
/// 抽出します。ダブルクォートで囲まれたフィールドや、フィールド内のタブも
/// 正しく処理します。
///
/// # 引数
///
/// * `row` - 解析するTSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # 例
///
/// ```
/// # use rarescan::utils::parse_tsv_row;
/// let fields = parse_tsv_row("ameliorate\tameliorate\t9000");
/// assert_eq!(fields, vec!["ameliorate", "ameliorate", "9000"]);
/// ```
pub fn parse_tsv_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = csv_core::ReaderBuilder::new().delimiter(b'\t').build();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        match result {
            // バッファより長いフィールドは継ぎ足して読み続ける
            ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { .. } => {
                fields.push(String::from_utf8_lossy(&field).into_owned());
                field.clear();
            }
            ReadFieldResult::InputEmpty | ReadFieldResult::End => {
                fields.push(String::from_utf8_lossy(&field).into_owned());
                break;
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_row() {
        assert_eq!(
            &["walk", "walk", "120"],
            parse_tsv_row("walk\twalk\t120").as_slice()
        );
    }

    #[test]
    fn test_parse_tsv_row_single_field() {
        assert_eq!(&["kick the bucket"], parse_tsv_row("kick the bucket").as_slice());
    }

    #[test]
    fn test_parse_tsv_row_long_field() {
        let long = "a".repeat(5000);
        let row = format!("{long}\tx");
        let fields = parse_tsv_row(&row);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], long);
        assert_eq!(fields[1], "x");
    }

    #[test]
    fn test_parse_tsv_row_with_quote() {
        assert_eq!(
            &["a\tb", "c"],
            parse_tsv_row("\"a\tb\"\tc").as_slice()
        );
    }
}
