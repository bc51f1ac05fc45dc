mod calendar;
mod config;
mod event;
mod habits;
mod layout;
mod location;
mod render;
mod store;
mod theme;
mod toggle;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;

use calendar::MonthView;
use config::Config;
use layout::CanvasSpec;
use store::HabitStore;
use theme::Theme;

#[derive(Parser)]
#[command(
    name = "daily3",
    version,
    about = "Monthly habit calendar rendered as a home-screen style widget"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render the widget PNG
    Render {
        #[arg(short, long, help = "Output path, defaults to the configured file")]
        out: Option<PathBuf>,
        #[arg(long, help = "Device screen width for breakpoint selection")]
        screen_width: Option<u32>,
    },
    /// Toggle today's habits interactively, then refresh the widget
    Toggle,
    /// Render to a temporary file and print its path
    Preview {
        #[arg(long, help = "Device screen width for breakpoint selection")]
        screen_width: Option<u32>,
    },
}

fn main() -> Result<()> {
    Logger::try_with_env_or_str("warn")?.start()?;

    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("failed to load config, using defaults: {e}");
        Config::default()
    });
    let theme = Theme::load(&config.theme).unwrap_or_default();
    let store = HabitStore::new()?;

    match cli.command.unwrap_or(Command::Render {
        out: None,
        screen_width: None,
    }) {
        Command::Render { out, screen_width } => {
            let path = render_widget_file(&store, &config, &theme, screen_width, out)?;
            println!("{}", path.display());
        }
        Command::Toggle => {
            toggle::run_toggle_menu(&store, &theme)?;
            // The widget reflects the new toggles on the next look
            let path = render_widget_file(&store, &config, &theme, None, None)?;
            println!("{}", path.display());
        }
        Command::Preview { screen_width } => {
            let out = std::env::temp_dir().join("daily3-preview.png");
            let path = render_widget_file(&store, &config, &theme, screen_width, Some(out))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn render_widget_file(
    store: &HabitStore,
    config: &Config,
    theme: &Theme,
    screen_width: Option<u32>,
    out: Option<PathBuf>,
) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    let month = MonthView::of(today);
    let log = store.load_habits();
    let city = location::resolve_city(store, config);

    let canvas = CanvasSpec::for_screen_width(screen_width.unwrap_or(config.screen_width));
    let image = render::render_to_image(canvas, &month, &log, today, &city, &theme.colors)?;

    let path = out.unwrap_or_else(|| PathBuf::from(&config.output_file));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image.save_with_format(&path, image::ImageFormat::Png)?;
    Ok(path)
}
