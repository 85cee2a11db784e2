use crate::app::App;

mod app;
mod browser;
mod components;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger unavailable: {err}").into());
    }

    yew::Renderer::<App>::new().render();
}
