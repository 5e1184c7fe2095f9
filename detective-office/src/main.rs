mod content;
mod engine;
mod error;
mod interaction;
mod rpc;
mod ui;

use crate::engine::core::app_setup::create_app;
use crate::engine::core::capability::{check_graphics_support, show_unsupported_notice};
use crate::engine::core::session::SessionConfig;

fn main() {
    match check_graphics_support() {
        Ok(backend) => println!("✓ Graphics support: {backend}"),
        Err(err) => {
            show_unsupported_notice(&err);
            return;
        }
    }

    let mut app = create_app(SessionConfig::default());

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
