use crate::api::SourceState;
use crate::auth::use_auth;
use leptos::prelude::*;
use poolman_shared::source::StatisticsSource;
use poolman_shared::stats::StatsWindow;
use poolman_shared::{StatisticsSnapshot, UsageEntry};
use std::rc::Rc;

/// 按服务端顺序渲染的排行表
#[component]
fn UsageTable(title: &'static str, entries: Signal<Vec<UsageEntry>>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"Pool"</th>
                            <th>"Reserved slots"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            entries
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(rank, entry)| {
                                    view! {
                                        <tr>
                                            <td>{rank + 1}</td>
                                            <td class="font-mono text-sm">{entry.pool_label().to_string()}</td>
                                            <td>{entry.slots()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
pub fn StatisticsPage() -> impl IntoView {
    let auth = use_auth();
    let window = RwSignal::new(StatsWindow::default());
    let stats = SourceState::<StatisticsSnapshot>::new();

    // 切换窗口时重新拉取
    Effect::new(move |_| {
        let selected = window.get();
        stats.load(Rc::new(StatisticsSource::new(auth.client(), selected)));
    });

    let most_used = Signal::derive(move || {
        stats.data.with(|s| s.as_ref().map(|s| s.most_used.clone()).unwrap_or_default())
    });
    let least_used = Signal::derive(move || {
        stats.data.with(|s| s.as_ref().map(|s| s.least_used.clone()).unwrap_or_default())
    });

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Statistics"</h2>
                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        if let Some(selected) = StatsWindow::from_value(&event_target_value(&ev)) {
                            window.set(selected);
                        }
                    }
                >
                    {StatsWindow::ALL
                        .into_iter()
                        .map(|w| {
                            view! {
                                <option value=w.value() selected=move || window.get() == w>
                                    {w.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || stats.error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || stats.error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                <UsageTable title="Most reserved pools" entries=most_used />
                <UsageTable title="Least reserved pools" entries=least_used />
            </div>
        </div>
    }
}
