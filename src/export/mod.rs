pub mod excel;

use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）ならタイトルからファイル名を作る
pub fn output_path_for(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem_for(title), extension))
    } else {
        output.to_path_buf()
    }
}

/// ファイル名に使えない文字を置き換える
fn file_stem_for(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() { "export".to_string() } else { stem.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for(Path::new("out/sheet.xlsx"), "ignored", "xlsx");
        assert_eq!(path, PathBuf::from("out/sheet.xlsx"));
    }

    #[test]
    fn test_output_path_for_dir() {
        let path = output_path_for(Path::new("out"), "Analyse 1 / S1", "xlsx");
        assert_eq!(path, PathBuf::from("out").join("Analyse 1 _ S1.xlsx"));
    }
}
