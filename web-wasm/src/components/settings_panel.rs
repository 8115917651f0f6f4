//! 接続設定・取得対象パネル

use leptos::prelude::*;
use exam_admin_common::EventKind;

#[component]
pub fn SettingsPanel<FL, FE>(
    base_url: ReadSignal<String>,
    set_base_url: WriteSignal<String>,
    token: ReadSignal<String>,
    set_token: WriteSignal<String>,
    kind: ReadSignal<EventKind>,
    set_kind: WriteSignal<EventKind>,
    event_id: ReadSignal<String>,
    set_event_id: WriteSignal<String>,
    on_load: FL,
    on_load_events: FE,
) -> impl IntoView
where
    FL: Fn(()) + 'static + Clone,
    FE: Fn(()) + 'static + Clone,
{
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="api-url">"URL de l'API"</label>
                    <input
                        type="text"
                        id="api-url"
                        prop:value=move || base_url.get()
                        on:input=move |ev| {
                            set_base_url.set(event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="api-token">"Jeton"</label>
                    <input
                        type="password"
                        id="api-token"
                        prop:value=move || token.get()
                        on:input=move |ev| {
                            set_token.set(event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="event-kind">"Type"</label>
                    <select
                        id="event-kind"
                        on:change=move |ev| {
                            if let Ok(k) = event_target_value(&ev).parse::<EventKind>() {
                                set_kind.set(k);
                            }
                        }
                    >
                        <option value="exam" selected=move || kind.get() == EventKind::Exam>"Examen"</option>
                        <option value="concours" selected=move || kind.get() == EventKind::Concours>"Concours"</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="event-id">"Identifiant"</label>
                    <input
                        type="text"
                        id="event-id"
                        placeholder="ex. 12"
                        prop:value=move || event_id.get()
                        on:input=move |ev| {
                            set_event_id.set(event_target_value(&ev));
                        }
                    />
                    <div class="api-actions">
                        <button
                            class="btn btn-primary btn-small"
                            on:click={
                                let on_load = on_load.clone();
                                move |_| on_load(())
                            }
                        >
                            "Afficher les affectations"
                        </button>
                        <button
                            class="btn btn-secondary btn-small"
                            on:click={
                                let on_load_events = on_load_events.clone();
                                move |_| on_load_events(())
                            }
                        >
                            "Lister les événements"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
