//! 教室割当カード

use leptos::prelude::*;
use exam_admin_common::display::{candidate_name, classroom_header, occupancy_line, seat_line};
use exam_admin_common::{AssignmentSummary, ClassroomAssignment};

#[component]
pub fn AssignmentView(summary: AssignmentSummary) -> impl IntoView {
    let total = summary.stats.total_candidates;
    let is_empty = summary.assignments.is_empty();

    // 描画キー用に位置を添える（classroom_id がない教室向け）
    let rooms: Vec<(usize, ClassroomAssignment)> = summary.assignments.into_iter().enumerate().collect();

    view! {
        <div class="assignment-view">
            <p class="assignment-total">{format!("Total candidats : {}", total)}</p>
            <Show when=move || is_empty>
                <p class="text-muted">"Aucune affectation"</p>
            </Show>
            <For
                each=move || rooms.clone()
                key=|(index, room)| room.row_key(*index)
                children=move |(_, room)| view! { <ClassroomCard room=room /> }
            />
        </div>
    }
}

#[component]
fn ClassroomCard(room: ClassroomAssignment) -> impl IntoView {
    let header = classroom_header(&room);
    let occupancy = occupancy_line(&room);
    let card_class = if room.is_overfilled() { "classroom-card overfilled" } else { "classroom-card" };

    let rows: Vec<_> = room
        .candidats
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            (candidate.row_key(index), candidate_name(candidate), seat_line(candidate))
        })
        .collect();

    view! {
        <div class=card_class>
            <h3 class="classroom-header">{header}</h3>
            <p class="classroom-occupancy">{occupancy}</p>
            <ul class="candidate-list">
                <For
                    each=move || rows.clone()
                    key=|(key, _, _)| key.clone()
                    children=move |(_, name, seat)| view! {
                        <li class="candidate-row">
                            <span class="candidate-name">{name}</span>
                            <span class="candidate-seat">{seat}</span>
                        </li>
                    }
                />
            </ul>
        </div>
    }
}
