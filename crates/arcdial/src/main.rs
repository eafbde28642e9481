use arcdial::app::App;
use arcdial::config;
use arcdial::events::{AppEvent, SliderEvent};
use arcdial::sys::{SOCKET_PATH, protocol, runtime};
use clap::{Parser, Subcommand};
use ringgeom::SurfaceBounds;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arcdial", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Width of the surface the rings are laid out on
    #[arg(long, global = true, default_value_t = 800.0)]
    width: f64,

    /// Height of the surface the rings are laid out on
    #[arg(long, global = true, default_value_t = 800.0)]
    height: f64,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run the rings and read input lines from the socket.
    Serve {
        /// Do not reload when the config file changes
        #[arg(long)]
        no_watch: bool,
    },
    /// Feed a file of input lines through the rings and print the results.
    Replay { path: PathBuf },
    /// Send one input line to a running server.
    Send {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        words: Vec<String>,
    },
    /// Write the bundled configuration if none exists yet.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let bounds = SurfaceBounds::sized(cli.width, cli.height);

    match cli.command {
        Commands::Serve { no_watch } => serve(bounds, !no_watch),
        Commands::Replay { path } => replay(&path, bounds),
        Commands::Send { words } => send_command(&words.join(" ")),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn emit(event: Option<SliderEvent>) {
    if let Some(event) = event {
        log::info!("{}", event);
        println!("{}", event);
    }
}

fn serve(bounds: SurfaceBounds, watch_config: bool) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let mut app = App::new(&config, bounds)?;

    let (tx, rx) = async_channel::bounded(64);

    runtime::start_background_services(tx, watch_config)?;

    emit(app.start());
    while let Ok(event) = rx.recv_blocking() {
        emit(app.update(event));
    }
    Ok(())
}

fn replay(path: &std::path::Path, bounds: SurfaceBounds) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let mut app = App::new(&config, bounds)?;
    let script = fs_err::read_to_string(path)?;

    emit(app.start());
    for (index, line) in script.lines().enumerate() {
        let event = match protocol::parse_line(line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => anyhow::bail!("{}:{}: {}", path.display(), index + 1, e),
        };
        if matches!(event, AppEvent::ConfigReload) {
            log::warn!("{}:{}: reload is ignored during replay", path.display(), index + 1);
            continue;
        }
        emit(app.update(event));
    }
    Ok(())
}

fn send_command(line: &str) -> anyhow::Result<()> {
    protocol::parse_line(line)?;

    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to arcdial at {}: {}. Is `arcdial serve` running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", line)?;
    Ok(())
}
