//! 試験・コンクール一覧（検索・期間・ページング）

use leptos::prelude::*;
use exam_admin_common::{filter_events, paginate, EventFilter, ExamEvent, Period};

const PER_PAGE: usize = 10;

#[component]
pub fn EventList(events: Vec<ExamEvent>) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (period, set_period) = signal(Period::Upcoming);
    let (page, set_page) = signal(1usize);

    // 日付はローカル時刻で比較する
    let now = chrono::Local::now().naive_local();

    let current_page = Memo::new(move |_| {
        let filter = EventFilter {
            period: period.get(),
            query: Some(query.get()),
            ..Default::default()
        };
        let selected = filter_events(&events, &filter, now);
        paginate(&selected, page.get(), PER_PAGE)
    });

    view! {
        <div class="event-list">
            <div class="event-filters">
                <input
                    type="search"
                    placeholder="Rechercher..."
                    prop:value=move || query.get()
                    on:input=move |ev| {
                        set_query.set(event_target_value(&ev));
                        set_page.set(1);
                    }
                />
                <select on:change=move |ev| {
                    if let Ok(p) = event_target_value(&ev).parse::<Period>() {
                        set_period.set(p);
                        set_page.set(1);
                    }
                }>
                    <option value="upcoming">"À venir"</option>
                    <option value="past">"Passés"</option>
                    <option value="all">"Tous"</option>
                </select>
            </div>

            <table class="event-table">
                <tbody>
                    <For
                        each=move || current_page.get().items
                        key=|event| format!("{}-{}", event.kind.as_str(), event.id)
                        children=move |event| view! {
                            <tr>
                                <td>{event.date.format("%d/%m/%Y %H:%M").to_string()}</td>
                                <td>{event.kind.to_string()}</td>
                                <td>{event.title.clone()}</td>
                                <td>{event.formation.clone()}</td>
                                <td>{event.filiere.clone()}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>

            <div class="pagination">
                <button
                    class="btn btn-tertiary btn-small"
                    disabled=move || current_page.get().page <= 1
                    on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Précédent"
                </button>
                <span>
                    {move || {
                        let p = current_page.get();
                        format!("Page {}/{} ({} éléments)", p.page, p.total_pages, p.total_items)
                    }}
                </span>
                <button
                    class="btn btn-tertiary btn-small"
                    disabled=move || { let p = current_page.get(); p.page >= p.total_pages }
                    on:click=move |_| set_page.update(|p| *p += 1)
                >
                    "Suivant"
                </button>
            </div>
        </div>
    }
}
