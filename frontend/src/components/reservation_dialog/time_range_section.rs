//! 预约时间段输入
//!
//! 修改开始时间时结束时间同步为相同值，之后可单独调整。

use leptos::prelude::*;
use poolman_shared::date::{format_local_input, parse_local_input};
use poolman_shared::reservation::ReservationDialog;

#[component]
pub fn TimeRangeSection(state: RwSignal<ReservationDialog>) -> impl IntoView {
    let start_value = move || {
        state
            .with(|d| d.form.start.as_ref().map(format_local_input))
            .unwrap_or_default()
    };
    let end_value = move || {
        state
            .with(|d| d.form.end.as_ref().map(format_local_input))
            .unwrap_or_default()
    };

    view! {
        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Start"</span>
                </label>
                <input type="datetime-local"
                    class="input input-bordered w-full"
                    prop:value=start_value
                    on:input=move |ev| {
                        let start = parse_local_input(&event_target_value(&ev));
                        state.update(|d| d.form.set_start(start));
                    }
                />
            </div>
            <div class="form-control">
                <label class="label">
                    <span class="label-text">"End"</span>
                </label>
                <input type="datetime-local"
                    class="input input-bordered w-full"
                    prop:value=end_value
                    on:input=move |ev| {
                        let end = parse_local_input(&event_target_value(&ev));
                        state.update(|d| d.form.set_end(end));
                    }
                />
            </div>
        </div>
    }
}
