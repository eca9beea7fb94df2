//! 预约弹窗
//!
//! 状态机在 `poolman_shared::reservation::ReservationDialog` 中，
//! 组件只负责把它绑定到 `<dialog>` 和表单输入。

mod time_range_section;

use crate::auth::use_auth;
use crate::components::notification::use_notifier;
use leptos::prelude::*;
use leptos::task::spawn_local;
use poolman_shared::Pool;
use poolman_shared::reservation::ReservationDialog;
use time_range_section::TimeRangeSection;

#[component]
pub fn ReservationDialogButton(
    pool: Pool,
    /// 创建成功后调用一次
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let state = RwSignal::new(ReservationDialog::new(pool.pool_id.clone()));
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            let open = state.with(ReservationDialog::is_open);
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = state.try_update(|d| d.begin_submit()).flatten() else {
            return;
        };
        let client = auth.client();
        spawn_local(async move {
            let result = client.create_reservation(&request).await;
            let created = state
                .try_update(|d| d.finish_submit(result))
                .unwrap_or(false);
            if created {
                notifier.success(format!("Reserved {} slot(s) on {}", request.slot_count, request.pool_id));
                if let Some(callback) = on_success {
                    callback.try_run(());
                }
            }
        });
    };

    let title = format!("Reserve {}", pool.display_name);
    let placeholder = format!("max {}", pool.maximum_count);

    view! {
        <button
            class="btn btn-primary btn-sm"
            on:click=move |_| state.update(ReservationDialog::open)
        >
            "Reserve"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| state.update(ReservationDialog::close)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>

                <form on:submit=on_submit class="space-y-4 pt-4">
                    <Show when=move || state.with(|d| d.message.is_some())>
                        <div role="alert" class="alert alert-warning text-sm py-2">
                            <span>{move || state.with(|d| d.message.clone().unwrap_or_default())}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Slot count"</span>
                        </label>
                        <input
                            type="text"
                            inputmode="numeric"
                            placeholder=placeholder
                            class="input input-bordered w-full"
                            prop:value=move || state.with(|d| d.form.slot_count.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|d| d.form.slot_count = value);
                            }
                        />
                    </div>

                    <TimeRangeSection state=state />

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| state.update(ReservationDialog::close)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || state.with(|d| d.submitting)>
                            {move || if state.with(|d| d.submitting) {
                                view! { <span class="loading loading-spinner"></span> "Reserving..." }.into_any()
                            } else {
                                "Reserve".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
