mod cancel_dialog;
mod import_dialog;

use crate::api::SourceState;
use crate::auth::use_auth;
use crate::web::http::FetchClient;
use cancel_dialog::CancelDialog;
use import_dialog::ImportDialog;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use poolman_shared::Reservation;
use poolman_shared::date::format_display;
use poolman_shared::reservation::CancelConfirmation;
use poolman_shared::source::ReservationsSource;
use std::rc::Rc;

pub(crate) type Source = Rc<ReservationsSource<FetchClient>>;

/// 从当前时刻开始的预约
#[component]
pub fn ReservationsPage() -> impl IntoView {
    let auth = use_auth();
    let source: StoredValue<Source, LocalStorage> =
        StoredValue::new_local(Rc::new(ReservationsSource::new(auth.client())));
    let reservations = SourceState::<Vec<Reservation>>::new();
    let confirm = RwSignal::new(CancelConfirmation::default());

    let refresh = Callback::new(move |_: ()| reservations.load(source.get_value()));
    refresh.run(());

    let rows = move || reservations.data.get().unwrap_or_default();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">"Reservations"</h3>
                    <div class="flex gap-2">
                        <ImportDialog on_done=refresh />
                        <button on:click=move |_| refresh.run(()) disabled=move || reservations.loading.get() class="btn btn-ghost">
                            "Refresh"
                        </button>
                    </div>
                </div>

                <Show when=move || reservations.error.get().is_some()>
                    <div role="alert" class="alert alert-error mx-6">
                        <span>{move || reservations.error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Pool"</th>
                                <th>"Slots"</th>
                                <th>"Start"</th>
                                <th>"End"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || !reservations.loading.get() && rows().is_empty()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No upcoming reservations"
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=rows
                                key=|r| r.id
                                children=move |reservation| {
                                    let id = reservation.id;
                                    view! {
                                        <tr>
                                            <td class="font-mono text-sm">{reservation.pool_id.clone()}</td>
                                            <td>{reservation.slot_count}</td>
                                            <td>{format_display(&reservation.start_datetime)}</td>
                                            <td>{format_display(&reservation.end_datetime)}</td>
                                            <td>
                                                <button class="btn btn-outline btn-error btn-sm"
                                                    on:click=move |_| confirm.update(|c| c.request(id))>
                                                    "Cancel"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>

        <CancelDialog confirm=confirm source=source reservations=reservations />
    }
}
