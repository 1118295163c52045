//! 出力モジュール（共通）

#[cfg(feature = "excel")]
pub mod submittal_xlsx;
