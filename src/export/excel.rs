//! 出席簿Excel生成（CLI版）
//!
//! 生成は共通ライブラリ、ここではファイルへの書き出しのみ

use crate::error::{AdminError, Result};
use exam_admin_common::export::excel_core::generate_attendance_buffer;
use exam_admin_common::AssignmentSummary;
use std::path::Path;

pub fn generate_excel(summary: &AssignmentSummary, output_path: &Path, title: &str) -> Result<()> {
    let buffer = generate_attendance_buffer(summary, title).map_err(AdminError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;

    tracing::debug!(path = %output_path.display(), classrooms = summary.assignments.len(), "出席簿を保存");
    Ok(())
}
