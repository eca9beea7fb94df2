use leptos::prelude::*;
use poolman_frontend::App;
use poolman_frontend::config::AppConfig;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    let config = AppConfig::from_env();
    poolman_frontend::init_logger(config.log_level);
    log::info!("PCOIP Pool Manager starting, API at {}", config.api_url);
    mount_to_body(move || view! { <App config=config /> });
}
