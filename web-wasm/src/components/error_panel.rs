//! エラーパネル（再試行・閉じる）

use leptos::prelude::*;

#[component]
pub fn ErrorPanel<FR, FD>(message: String, on_retry: FR, on_dismiss: FD) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone,
    FD: Fn(()) + 'static + Clone,
{
    view! {
        <div class="error-panel" role="alert">
            <p>{format!("Échec du chargement : {}", message)}</p>
            <div class="api-actions">
                <button
                    class="btn btn-primary btn-small"
                    on:click={
                        let on_retry = on_retry.clone();
                        move |_| on_retry(())
                    }
                >
                    "Réessayer"
                </button>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click={
                        let on_dismiss = on_dismiss.clone();
                        move |_| on_dismiss(())
                    }
                >
                    "Fermer"
                </button>
            </div>
        </div>
    }
}
