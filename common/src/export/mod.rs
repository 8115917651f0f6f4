//! 出力処理（CLIとWASMで共有）

#[cfg(feature = "excel")]
pub mod excel_core;
