//! 出席簿Excel生成（共通ライブラリ）
//!
//! 教室ごとに1シート: タイトル、教室見出し、占有行、受験者表（署名欄つき）

use crate::display::{classroom_header, occupancy_line, seat_label};
use crate::types::{AssignmentSummary, Candidate};
use rust_xlsxwriter::*;

/// Excelのシート名の最大長
const MAX_SHEET_NAME_LEN: usize = 31;

/// シート名に使えない文字
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// 受験者がいない場合のシート名
const EMPTY_SHEET_NAME: &str = "Vide";

/// 表の列定義
struct Column {
    label: &'static str,
    width: f64,
}

const COLUMNS: [Column; 7] = [
    Column { label: "Place", width: 8.0 },
    Column { label: "CNE", width: 14.0 },
    Column { label: "CIN", width: 12.0 },
    Column { label: "Nom", width: 20.0 },
    Column { label: "Prénom", width: 20.0 },
    Column { label: "Email", width: 28.0 },
    Column { label: "Signature", width: 22.0 },
];

/// 表の開始行（タイトル・見出し・占有行の下）
const TABLE_START_ROW: u32 = 4;

/// 列ごとのセル値
fn cell_value(candidate: &Candidate, col: usize) -> String {
    match col {
        0 => seat_label(candidate),
        1 => candidate.cne.clone(),
        2 => candidate.cin.clone(),
        3 => candidate.nom.clone(),
        4 => candidate.prenom.clone(),
        5 => candidate.email.clone(),
        _ => String::new(),
    }
}

/// シート名として使える形に整える
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !INVALID_SHEET_CHARS.contains(c))
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim();
    let truncated: String = cleaned.chars().take(MAX_SHEET_NAME_LEN).collect();
    if truncated.is_empty() {
        "Salle".to_string()
    } else {
        truncated
    }
}

/// 教室ごとのシート名（重複は ` (n)` を付けて一意にする）
pub fn sheet_names(summary: &AssignmentSummary) -> Vec<String> {
    if summary.assignments.is_empty() {
        return vec![EMPTY_SHEET_NAME.to_string()];
    }

    let mut used: Vec<String> = Vec::new();
    let mut names = Vec::with_capacity(summary.assignments.len());

    for assignment in &summary.assignments {
        let base = sanitize_sheet_name(&assignment.classroom_name);
        let mut candidate = base.clone();
        let mut n = 2;
        // Excelはシート名の大文字小文字を区別しない（アクセント付きも含む）
        while used.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({})", n);
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
            n += 1;
        }
        used.push(candidate.to_lowercase());
        names.push(candidate);
    }

    names
}

/// 出席簿Excelをバッファに生成
///
/// # Arguments
/// * `summary` - 正規化済みの教室割当
/// * `title` - 各シート先頭のタイトル（試験名など）
pub fn generate_attendance_buffer(summary: &AssignmentSummary, title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let title_format = Format::new().set_bold().set_font_size(14.0);

    let header_format = Format::new()
        .set_bold()
        .set_font_size(11.0);

    let label_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let names = sheet_names(summary);

    if summary.assignments.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(EMPTY_SHEET_NAME)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        worksheet.write_string_with_format(0, 0, title, &title_format)
            .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;
        worksheet.write_string(1, 0, "Aucune affectation")
            .map_err(|e| format!("書き込みエラー: {}", e))?;
    }

    for (assignment, sheet_name) in summary.assignments.iter().zip(names.iter()) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, column) in COLUMNS.iter().enumerate() {
            worksheet.set_column_width(col as u16, column.width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
        }

        worksheet.write_string_with_format(0, 0, title, &title_format)
            .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;
        worksheet.write_string_with_format(1, 0, &classroom_header(assignment), &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        worksheet.write_string(2, 0, &occupancy_line(assignment))
            .map_err(|e| format!("占有行書き込みエラー: {}", e))?;

        for (col, column) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(TABLE_START_ROW, col as u16, column.label, &label_format)
                .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
        }

        for (i, candidate) in assignment.candidats.iter().enumerate() {
            let row = TABLE_START_ROW + 1 + i as u32;
            for col in 0..COLUMNS.len() {
                let value = cell_value(candidate, col);
                worksheet.write_string_with_format(row, col as u16, &value, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
