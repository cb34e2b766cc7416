#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::rc::Rc;

    use anyhow::Context;
    use canvas_bridge::cli::Cli;
    use canvas_bridge::desktop::DesktopHost;
    use canvas_bridge::driver::Driver;
    use clap::Parser;
    use winit::event_loop::EventLoop;

    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let host = Rc::new(DesktopHost::in_temp_dir());
    let mut driver = Driver::new(settings, host, !cli.no_ui);

    log::info!("Canvas bridge - drop files on the window, close it to quit");
    event_loop.run_app(&mut driver)?;

    Ok(())
}

// The browser build starts from `canvas_bridge::web::start`
#[cfg(target_arch = "wasm32")]
fn main() {}
