//! Rarescanのテストモジュール群
//!
//! 辞書のシリアライズを含む、クレート全体を通したスキャンの
//! 動作を検証するテストを含みます。

mod scanning;
