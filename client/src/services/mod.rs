pub mod api;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod http;
