use civic_portals::app::CitizenApp;
use civic_portals::config::CONFIG;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Citizen portal starting ({})", CONFIG.environment);

    yew::Renderer::<CitizenApp>::new().render();
}
