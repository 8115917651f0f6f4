//! 描画用の文字列
//!
//! CLIの一覧表示、WASMのカード、Excel出力で同じ表記を使う。

use crate::types::{Candidate, ClassroomAssignment};

/// 座席番号がない場合の表記
pub const NO_SEAT: &str = "N/A";

/// カードの見出し: `A101 (Capacité : 30)`
pub fn classroom_header(assignment: &ClassroomAssignment) -> String {
    format!("{} (Capacité : {})", assignment.classroom_name, assignment.capacity)
}

/// 占有行: `12 / 30 places occupées`
pub fn occupancy_line(assignment: &ClassroomAssignment) -> String {
    format!("{} / {} places occupées", assignment.assigned, assignment.capacity)
}

/// 受験者の氏名: `prenom nom`
pub fn candidate_name(candidate: &Candidate) -> String {
    format!("{} {}", candidate.prenom, candidate.nom).trim().to_string()
}

/// 座席番号（なければ `N/A`）
pub fn seat_label(candidate: &Candidate) -> String {
    candidate
        .seat_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| NO_SEAT.to_string())
}

/// 座席行: `Place : 3`
pub fn seat_line(candidate: &Candidate) -> String {
    format!("Place : {}", seat_label(candidate))
}
