use clap::Parser;
use simple_logger::SimpleLogger;

use pipcount::{
    app::{Config, PipCounter, PipCountError, StopReason},
    displays::{NopDisplay, WindowDisplay},
    vision::CameraSource,
};

/// Pipcount - counts dice pips in a live camera feed
#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct Args {
    /// Capture device index
    #[arg(default_value_t = Config::DEFAULT_DEVICE)]
    device: i32,
}

#[cfg(target_os = "linux")]
fn has_display() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(not(target_os = "linux"))]
fn has_display() -> bool {
    true
}

fn run(config: Config) -> Result<StopReason, PipCountError> {
    let mut source = CameraSource::open(config.device)?;
    let show_windows = config.show_windows;
    let mut counter = PipCounter::new(config);
    if show_windows {
        let mut display = WindowDisplay::new().map_err(PipCountError::Display)?;
        counter.run(&mut source, &mut display)
    } else {
        log::info!("Running without windows");
        counter.run(&mut source, &mut NopDisplay::new())
    }
}

fn main() {
    let args = Args::parse();

    // RUST_LOG overrides the default level
    if let Err(e) = SimpleLogger::new()
        .with_level(log::Level::Info.to_level_filter())
        .env()
        .with_utc_timestamps()
        .init()
    {
        eprintln!("Failed to start logger: {}", e);
    }

    let config = Config {
        show_windows: has_display(),
        ..Config::new(args.device)
    };
    log::info!("Starting Pipcount");
    log::debug!("Configuration: {}", config.info());

    match run(config) {
        Ok(reason) => log::info!("Pipcount done ({:?})", reason),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }

    log::info!("Shutdown");
}
