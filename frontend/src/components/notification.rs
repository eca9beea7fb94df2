use leptos::prelude::*;
use std::time::Duration;

/// 页面右上角的提示，3 秒后自动清除
#[derive(Clone, Copy)]
pub struct Notifier {
    message: RwSignal<Option<(String, bool)>>, // 消息内容, 是否出错
}

impl Notifier {
    pub fn success(&self, message: impl Into<String>) {
        self.message.try_set(Some((message.into(), false)));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.message.try_set(Some((message.into(), true)));
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier {
        message: RwSignal::new(None),
    };
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

#[component]
pub fn NotificationToast(notifier: Notifier) -> impl IntoView {
    let message = notifier.message;

    Effect::new(move |_| {
        if message.get().is_some() {
            set_timeout(move || { message.try_set(None); }, Duration::from_secs(3));
        }
    });

    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if message.get().is_some_and(|(_, is_err)| is_err) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || message.get().map(|(text, _)| text).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
