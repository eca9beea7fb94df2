use super::Source;
use crate::api::SourceState;
use crate::components::notification::use_notifier;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use poolman_shared::Reservation;
use poolman_shared::reservation::CancelConfirmation;

/// 取消预约前的确认框
#[component]
pub fn CancelDialog(
    confirm: RwSignal<CancelConfirmation>,
    source: StoredValue<Source, LocalStorage>,
    reservations: SourceState<Vec<Reservation>>,
) -> impl IntoView {
    let notifier = use_notifier();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            let open = confirm.with(CancelConfirmation::is_open);
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let on_accept = move |_| {
        let mut pending = confirm.get_untracked();
        confirm.set(CancelConfirmation::Closed);
        let source = source.get_value();
        spawn_local(async move {
            match pending.accept_and_cancel(source.client(), &*source).await {
                Ok(Some(list)) => {
                    reservations.accept(list);
                    notifier.success("Reservation cancelled");
                }
                Ok(None) => {}
                Err(e) if e.is_unauthorized() => {}
                Err(e) => notifier.error(e.to_string()),
            }
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| confirm.update(CancelConfirmation::dismiss)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Cancel reservation"</h3>
                <p class="py-4">
                    {move || match confirm.with(CancelConfirmation::pending_id) {
                        Some(id) => format!("Cancel reservation #{}? This cannot be undone.", id),
                        None => String::new(),
                    }}
                </p>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| confirm.update(CancelConfirmation::dismiss)>
                        "Keep"
                    </button>
                    <button type="button" class="btn btn-error" on:click=on_accept>
                        "Cancel reservation"
                    </button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
