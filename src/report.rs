//! 端末への一覧表示

use exam_admin_common::display::{candidate_name, classroom_header, occupancy_line, seat_line};
use exam_admin_common::{AssignmentSummary, ExamEvent, Page};

/// 教室割当をカード形式のテキストにする
pub fn render_summary(summary: &AssignmentSummary) -> String {
    let mut out = String::new();

    if summary.assignments.is_empty() {
        out.push_str("Aucune affectation\n");
    }

    for assignment in &summary.assignments {
        out.push_str(&format!("■ {}\n", classroom_header(assignment)));
        out.push_str(&format!("  {}\n", occupancy_line(assignment)));
        for candidate in &assignment.candidats {
            out.push_str(&format!("  - {:<32} {}\n", candidate_name(candidate), seat_line(candidate)));
        }
        if assignment.is_overfilled() {
            out.push_str("  ⚠ capacité dépassée\n");
        }
        out.push('\n');
    }

    out.push_str(&format!("Total candidats : {}\n", summary.stats.total_candidates));
    out
}

/// 試験一覧の1ページ
pub fn render_events(page: &Page<ExamEvent>) -> String {
    let mut out = String::new();

    if page.items.is_empty() {
        out.push_str("Aucun événement\n");
    }

    for event in &page.items {
        out.push_str(&format!(
            "{}  [{}] {} ({})",
            event.date.format("%Y-%m-%d %H:%M"),
            event.kind,
            event.title,
            event.id
        ));
        let details: Vec<&str> = [&event.formation, &event.filiere, &event.location]
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        if !details.is_empty() {
            out.push_str(&format!(" - {}", details.join(" / ")));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Page {}/{} ({} éléments)\n",
        page.page, page.total_pages, page.total_items
    ));
    out
}
