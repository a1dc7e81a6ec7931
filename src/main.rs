use luminara::board::Board;
use luminara::config::{Config, DEFAULT_CONFIG_PATH};
use luminara::display::{Display, PixelBuffer, RenderTarget};
use luminara::input::{Interaction, ViewMode};
use luminara::util::FpsCounter;
use luminara::view::{render_flat, render_isometric};
use luminara::Result;
use tracing_subscriber::EnvFilter;

/// Command line overrides applied on top of the config file
#[derive(Default)]
struct Args {
    config_path: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    level: Option<u32>,
    no_vsync: bool,
}

fn print_help() {
    println!("Usage: luminara [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config PATH, -c PATH    Config file (default: {})", DEFAULT_CONFIG_PATH);
    println!("  --width W, -w W           Window width");
    println!("  --height H, -h H          Window height");
    println!("  --resolution WxH, -r WxH  Window size (e.g., 1024x768)");
    println!("  --level N, -l N           Start at level N");
    println!("  --no-vsync                Disable VSync");
    println!("  --help                    Show this help message");
    println!();
    println!("Controls:");
    println!("  Drag a black handle   - Move a plate");
    println!("  Click a color, then a handle - Paint the plate");
    println!("  Right click           - Drop the picked color");
    println!("  Space                 - Toggle isometric view");
    println!("  Escape                - Quit");
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--no-vsync" => parsed.no_vsync = true,
            "--config" | "-c" => {
                parsed.config_path = value.cloned();
                i += 1;
            },
            "--width" | "-w" => {
                parsed.width = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--height" | "-h" => {
                parsed.height = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--level" | "-l" => {
                parsed.level = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--resolution" | "-r" => {
                // Parse WxH format (e.g., 1024x768)
                if let Some((w, h)) = value.and_then(|v| v.split_once('x')) {
                    if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                        parsed.width = Some(w);
                        parsed.height = Some(h);
                    }
                }
                i += 1;
            },
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => tracing::warn!(arg = other, "ignoring unknown argument"),
        }
        i += 1;
    }

    parsed
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    let mut config =
        Config::load_or_default(args.config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(level) = args.level {
        config.level = level;
    }
    if args.no_vsync {
        config.vsync = false;
    }

    // A broken level is fatal: the puzzle can't be judged with a plate missing
    let level = config.load_level(config.level)?;
    let mut board = Board::new();
    level.load(&mut board);

    let (mut display, texture_creator) =
        Display::with_options("Luminara", config.width, config.height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, display.width(), display.height())?;
    let mut buffer = PixelBuffer::with_size(display.width(), display.height());

    let mut fps = FpsCounter::new(120);
    let mut interaction = Interaction::new();

    tracing::info!(
        width = config.width,
        height = config.height,
        level = level.id,
        "luminara started; press SPACE to toggle the isometric view"
    );

    while !interaction.should_quit() {
        fps.tick();

        for event in display.poll_events() {
            interaction.handle_event(&event, &mut board);
        }

        match interaction.view() {
            ViewMode::Flat => render_flat(&mut buffer, &board, interaction.armed_color()),
            ViewMode::Isometric => {
                interaction.check_solved(&level, &board);
                render_isometric(&mut buffer, &board, &config);
            },
        }

        display.present(&mut target, &buffer)?;

        if fps.window_full() {
            tracing::debug!(
                fps = fps.average_fps() as u32,
                frame_ms = fps.avg_frame_time_ms(),
                "frame timing"
            );
            fps.reset();
        }
    }

    Ok(())
}
