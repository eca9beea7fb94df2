use crate::auth::{logout, use_auth};
use crate::components::notification::{NotificationToast, provide_notifier};
use crate::web::router::use_router;
use leptos::prelude::*;
use poolman_shared::route::AppRoute;

/// 所有页面共用的顶栏
#[component]
pub fn MainView(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notifier = provide_notifier();

    let link_class = move |page: AppRoute| {
        let active = router.is_some_and(|r| r.current_route().get() == page);
        if active { "btn btn-ghost btn-active" } else { "btn btn-ghost" }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NotificationToast notifier=notifier />

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <a class="btn btn-ghost text-xl" href="#/pools">"PCOIP Pool Manager"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {move || auth.state.get().api_base_url}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        {AppRoute::PAGES
                            .into_iter()
                            .map(|page| {
                                view! {
                                    <a class=move || link_class(page) href=format!("#{}", page.to_path())>
                                        {page.title()}
                                    </a>
                                }
                            })
                            .collect_view()}
                        <button on:click=move |_| logout(&auth) class="btn btn-outline btn-error">
                            "Logout"
                        </button>
                    </div>
                </div>

                {children()}
            </div>
        </div>
    }
}
