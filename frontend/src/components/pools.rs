use crate::api::SourceState;
use crate::auth::use_auth;
use crate::components::reservation_dialog::ReservationDialogButton;
use leptos::prelude::*;
use poolman_shared::Pool;
use poolman_shared::pool_table::{PoolTable, SortKey};
use poolman_shared::source::PoolsSource;
use std::rc::Rc;

#[component]
pub fn PoolsPage() -> impl IntoView {
    let auth = use_auth();
    let source = StoredValue::new_local(Rc::new(PoolsSource::new(auth.client())));
    let pools = SourceState::<Vec<Pool>>::new();
    let table = RwSignal::new(PoolTable::default());

    let refresh = Callback::new(move |_: ()| pools.load(source.get_value()));
    refresh.run(());

    let all_rows = move || pools.data.get().unwrap_or_default();
    let filtered_count = move || table.with(|t| t.apply(&all_rows()).len());
    let visible_rows = move || table.with(|t| t.visible(&all_rows()));

    let header = move |key: SortKey, label: &'static str| {
        view! {
            <th class="cursor-pointer select-none" on:click=move |_| table.update(|t| t.toggle_sort(key))>
                {label}
                {move || table.with(|t| t.sort_indicator(key))}
            </th>
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">"Pools"</h3>
                    <button on:click=move |_| refresh.run(()) disabled=move || pools.loading.get() class="btn btn-ghost btn-sm">
                        "Refresh"
                    </button>
                </div>

                <Show when=move || pools.error.get().is_some()>
                    <div role="alert" class="alert alert-error mx-6">
                        <span>{move || pools.error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                {header(SortKey::Name, "Name")}
                                {header(SortKey::MaximumCount, "Maximum count")}
                                {header(SortKey::Description, "Description")}
                                <th>"Reserve"</th>
                            </tr>
                            <tr>
                                <th>
                                    <input type="text" placeholder="Filter"
                                        class="input input-bordered input-xs w-full"
                                        prop:value=move || table.with(|t| t.name_filter.clone())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            table.update(|t| t.set_name_filter(value));
                                        }
                                    />
                                </th>
                                <th></th>
                                <th>
                                    <input type="text" placeholder="Filter"
                                        class="input input-bordered input-xs w-full"
                                        prop:value=move || table.with(|t| t.description_filter.clone())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            table.update(|t| t.set_description_filter(value));
                                        }
                                    />
                                </th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || pools.loading.get() && pools.data.with(Option::is_none)>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !pools.loading.get() && filtered_count() == 0>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">"No pools"</td>
                                </tr>
                            </Show>
                            <For
                                each=visible_rows
                                key=|p| p.pool_id.clone()
                                children=move |pool| {
                                    view! {
                                        <tr>
                                            <td class="font-bold">{pool.display_name.clone()}</td>
                                            <td>{pool.maximum_count}</td>
                                            <td class="opacity-70">{pool.description.clone()}</td>
                                            <td>
                                                <ReservationDialogButton pool=pool on_success=refresh />
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>

                <div class="flex items-center justify-end gap-2 p-4">
                    <button class="btn btn-sm" on:click=move |_| table.update(|t| t.previous_page())
                        disabled=move || table.with(|t| t.page == 0)>
                        "Previous"
                    </button>
                    <span class="text-sm">
                        {move || {
                            let total = filtered_count();
                            table.with(|t| {
                                let pages = t.page_count(total);
                                format!("Page {} of {}", t.page.min(pages - 1) + 1, pages)
                            })
                        }}
                    </span>
                    <button class="btn btn-sm" on:click=move |_| {
                            let total = filtered_count();
                            table.update(|t| t.next_page(total));
                        }
                        disabled=move || {
                            let total = filtered_count();
                            table.with(|t| t.page + 1 >= t.page_count(total))
                        }>
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}
