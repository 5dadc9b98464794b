use civic_portals::app::AdminApp;
use civic_portals::config::CONFIG;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Admin portal starting ({})", CONFIG.environment);

    yew::Renderer::<AdminApp>::new().render();
}
