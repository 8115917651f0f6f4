//! QRスキャン結果の読み取り
//!
//! 不正なデータはコンソールに出して無視する。

use leptos::prelude::*;
use exam_admin_common::{read_scan, QrPayload};

/// 入力を読み、表示する結果と「無視した」フラグを返す
///
/// 読めなかった場合は前回の結果を残さない。
fn read_input(data: &str) -> (Option<QrPayload>, bool) {
    let payload = read_scan(data);
    let ignored = payload.is_none();
    (payload, ignored)
}

#[component]
pub fn ScanPanel() -> impl IntoView {
    let (raw, set_raw) = signal(String::new());
    let (scanned, set_scanned) = signal(None::<QrPayload>);
    let (ignored, set_ignored) = signal(false);

    let on_read = move |_| {
        let (payload, was_ignored) = read_input(&raw.get_untracked());
        if was_ignored {
            web_sys::console::warn_1(&"スキャンデータを無視".into());
        }
        set_ignored.set(was_ignored);
        set_scanned.set(payload);
    };

    view! {
        <div class="scan-panel">
            <h2>"Lecture de convocation"</h2>
            <textarea
                rows="3"
                prop:value=move || raw.get()
                on:input=move |ev| set_raw.set(event_target_value(&ev))
            />
            <button class="btn btn-secondary btn-small" on:click=on_read>"Lire"</button>

            <Show when=move || ignored.get()>
                <p class="text-muted">"Données illisibles, ignorées"</p>
            </Show>

            {move || scanned.get().map(|payload| view! {
                <dl class="scan-result">
                    <dt>"Candidat"</dt><dd>{payload.student_id.clone()}</dd>
                    <dt>"Examen"</dt><dd>{payload.exam_id.clone()}</dd>
                    <dt>"Référence"</dt><dd>{payload.reference.clone()}</dd>
                    <dt>"Salle"</dt><dd>{payload.classroom.clone().unwrap_or_default()}</dd>
                    <dt>"Place"</dt>
                    <dd>{payload.seat_number.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string())}</dd>
                </dl>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_clears_previous_result() {
        let valid = QrPayload::new("42", "7", 1000).to_qr_string().unwrap();
        let (first, ignored) = read_input(&valid);
        assert_eq!(first.map(|p| p.student_id), Some("42".to_string()));
        assert!(!ignored);

        let (second, ignored) = read_input("{not json");
        assert!(second.is_none());
        assert!(ignored);
    }
}
