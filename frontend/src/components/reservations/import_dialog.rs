//! 批量导入预约
//!
//! 上传文件后原样显示服务端返回的文本，无论状态码。

use crate::auth::use_auth;
use crate::web::file::read_selected;
use leptos::prelude::*;
use leptos::task::spawn_local;
use poolman_shared::reservation::ImportForm;
use web_sys::HtmlInputElement;

#[component]
pub fn ImportDialog(
    /// 收到服务端响应后调用
    #[prop(into)]
    on_done: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let form = RwSignal::new(ImportForm::default());
    let (submitting, set_submitting) = signal(false);
    let (result, set_result) = signal(Option::<(String, bool)>::None); // 文本, 是否出错
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            let open = form.with(|f| f.open);
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let close = move || {
        form.update(ImportForm::close);
        set_result.set(None);
        if let Some(input) = input_ref.get_untracked() {
            input.set_value("");
        }
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        spawn_local(async move {
            match read_selected(&input).await {
                Ok(upload) => {
                    form.try_update(|f| f.select(upload));
                }
                Err(e) => {
                    log::warn!("Reading import file failed: {}", e);
                    set_result.try_set(Some((e.to_string(), true)));
                }
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let pending = form.get_untracked();
        let client = auth.client();
        set_submitting.set(true);
        set_result.set(None);
        spawn_local(async move {
            match pending.submit(&client).await {
                Ok(text) => {
                    set_result.try_set(Some((text, false)));
                    // 页面已卸载时跳过刷新
                    on_done.try_run(());
                }
                Err(e) if e.is_unauthorized() => {}
                Err(e) => {
                    set_result.try_set(Some((e.to_string(), true)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <button class="btn btn-secondary gap-2" on:click=move |_| form.update(ImportForm::open)>
            "Import reservations"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Import reservations"</h3>
                <p class="py-2 text-base-content/70">"Upload a reservations file to create reservations in bulk."</p>

                <form on:submit=on_submit class="space-y-4">
                    <input type="file"
                        class="file-input file-input-bordered w-full"
                        node_ref=input_ref
                        on:change=on_file_change
                    />

                    <Show when=move || result.get().is_some()>
                        <div class=move || {
                            if result.get().is_some_and(|(_, is_err)| is_err) {
                                "alert alert-error text-sm"
                            } else {
                                "alert alert-info text-sm"
                            }
                        }>
                            <pre class="whitespace-pre-wrap">
                                {move || result.get().map(|(text, _)| text).unwrap_or_default()}
                            </pre>
                        </div>
                    </Show>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| close()>"Close"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Uploading..." }.into_any()
                            } else {
                                "Upload".into_any()
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

#[cfg(test)]
mod tests {
    use leptos::prelude::*;
    use leptos::reactive::owner::Owner;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_done_callback_after_unmount_is_skipped() {
        let page = Owner::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let on_done = page.with(|| {
            Callback::new(move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });

        assert!(on_done.try_run(()).is_some());

        // 上传未完成时离开页面
        page.unset();
        assert!(on_done.try_run(()).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
