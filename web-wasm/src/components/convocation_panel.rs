//! 受験票発行パネル

use leptos::prelude::*;
use exam_admin_common::{Candidate, Convocation};

#[component]
pub fn ConvocationPanel(default_exam_id: ReadSignal<String>) -> impl IntoView {
    let (student, set_student) = signal(String::new());
    let (exam_override, set_exam_override) = signal(String::new());
    let (issued, set_issued) = signal(None::<(String, String)>);
    let (error, set_error) = signal(None::<String>);

    let on_issue = move |_| {
        let student_id = student.get_untracked().trim().to_string();
        let exam = exam_override.get_untracked();
        let exam_id = if exam.trim().is_empty() { default_exam_id.get_untracked() } else { exam };

        if student_id.is_empty() || exam_id.trim().is_empty() {
            set_error.set(Some("Étudiant et examen requis".to_string()));
            return;
        }

        let mut candidate = Candidate::default();
        match student_id.parse::<i64>() {
            Ok(id) => candidate.candidat_id = Some(id),
            Err(_) => candidate.cne = student_id,
        }

        let Some(convocation) =
            Convocation::issue(&candidate, exam_id.trim(), "", "", js_sys::Date::now() as i64)
        else {
            set_error.set(Some("Étudiant et examen requis".to_string()));
            return;
        };
        match convocation.payload.to_qr_string() {
            Ok(payload) => {
                set_error.set(None);
                set_issued.set(Some((convocation.reference, payload)));
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="convocation-panel">
            <h2>"Convocation"</h2>
            <div class="settings-grid">
                <div class="form-group">
                    <label for="conv-student">"Étudiant (id ou CNE)"</label>
                    <input
                        type="text"
                        id="conv-student"
                        prop:value=move || student.get()
                        on:input=move |ev| set_student.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="conv-exam">"Examen"</label>
                    <input
                        type="text"
                        id="conv-exam"
                        placeholder=move || default_exam_id.get()
                        prop:value=move || exam_override.get()
                        on:input=move |ev| set_exam_override.set(event_target_value(&ev))
                    />
                </div>
            </div>
            <button class="btn btn-primary btn-small" on:click=on_issue>"Générer"</button>

            {move || error.get().map(|message| view! { <p class="error-text">{message}</p> })}

            {move || issued.get().map(|(reference, payload)| view! {
                <div class="convocation-result">
                    <p>{format!("Référence : {}", reference)}</p>
                    <pre class="qr-payload">{payload}</pre>
                </div>
            })}
        </div>
    }
}
