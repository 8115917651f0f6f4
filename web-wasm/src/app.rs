//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::api;
use crate::components::{
    header::Header,
    settings_panel::SettingsPanel,
    assignment_view::AssignmentView,
    error_panel::ErrorPanel,
    convocation_panel::ConvocationPanel,
    scan_panel::ScanPanel,
    event_list::EventList,
};
use exam_admin_common::{AssignmentSummary, EventKind, ExamEvent};

/// 取得中・失敗・取得済みの状態
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

/// 取得開始時の世代番号がまだ最新か
pub fn is_current(started: u64, latest: u64) -> bool {
    started == latest
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 接続設定
    let (base_url, set_base_url) = signal("http://localhost:8000/api".to_string());
    let (token, set_token) = signal(String::new());
    let (kind, set_kind) = signal(EventKind::Exam);
    let (event_id, set_event_id) = signal(String::new());

    // 取得結果
    let (assignments, set_assignments) = signal(ViewState::<AssignmentSummary>::Idle);
    let (events, set_events) = signal(ViewState::<Vec<ExamEvent>>::Idle);

    // 古い応答を捨てるための世代番号
    let (generation, set_generation) = signal(0u64);
    let (events_generation, set_events_generation) = signal(0u64);

    let on_load = move |_: ()| {
        let id = event_id.get_untracked();
        if id.trim().is_empty() {
            set_assignments.set(ViewState::Failed("Identifiant requis".to_string()));
            return;
        }

        set_generation.update(|g| *g += 1);
        let current = generation.get_untracked();
        let base = base_url.get_untracked();
        let token = token.get_untracked();
        let kind = kind.get_untracked();

        set_assignments.set(ViewState::Loading);
        spawn_local(async move {
            let result = api::load_assignments(&base, &token, kind, &id).await;
            if !is_current(current, generation.get_untracked()) {
                // 新しい取得が始まっている
                return;
            }
            match result {
                Ok(summary) => set_assignments.set(ViewState::Loaded(summary)),
                Err(message) => {
                    web_sys::console::error_1(&message.clone().into());
                    set_assignments.set(ViewState::Failed(message));
                }
            }
        });
    };

    let on_load_events = move |_: ()| {
        let base = base_url.get_untracked();
        let token = token.get_untracked();
        let kind = kind.get_untracked();

        set_events_generation.update(|g| *g += 1);
        let current = events_generation.get_untracked();

        set_events.set(ViewState::Loading);
        spawn_local(async move {
            let result = api::load_events(&base, &token, kind).await;
            if !is_current(current, events_generation.get_untracked()) {
                return;
            }
            match result {
                Ok(list) => set_events.set(ViewState::Loaded(list)),
                Err(message) => set_events.set(ViewState::Failed(message)),
            }
        });
    };

    let on_dismiss = move |_: ()| set_assignments.set(ViewState::Idle);

    view! {
        <div class="container">
            <Header />

            <SettingsPanel
                base_url=base_url
                set_base_url=set_base_url
                token=token
                set_token=set_token
                kind=kind
                set_kind=set_kind
                event_id=event_id
                set_event_id=set_event_id
                on_load=on_load
                on_load_events=on_load_events
            />

            {move || match assignments.get() {
                ViewState::Idle => view! { <p class="text-muted">"Choisissez un examen ou un concours"</p> }.into_any(),
                ViewState::Loading => view! { <p class="loading">"Chargement..."</p> }.into_any(),
                ViewState::Loaded(summary) => view! { <AssignmentView summary=summary /> }.into_any(),
                ViewState::Failed(message) => view! {
                    <ErrorPanel message=message on_retry=on_load on_dismiss=on_dismiss />
                }.into_any(),
            }}

            <ConvocationPanel default_exam_id=event_id />

            <ScanPanel />

            {move || match events.get() {
                ViewState::Idle => view! { <span></span> }.into_any(),
                ViewState::Loading => view! { <p class="loading">"Chargement des événements..."</p> }.into_any(),
                ViewState::Loaded(list) => view! { <EventList events=list /> }.into_any(),
                ViewState::Failed(message) => view! {
                    <div class="error-panel">{format!("Échec du chargement : {}", message)}</div>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_response_detected() {
        // 一覧の取得を2回続けて始め、1回目の応答が後から届いた場合
        let mut latest = 0u64;
        latest += 1;
        let first = latest;
        latest += 1;
        let second = latest;

        assert!(!is_current(first, latest));
        assert!(is_current(second, latest));
    }
}
