// SPDX-License-Identifier: MPL-2.0
use tracing_subscriber::EnvFilter;
use zoom_view::app::{self, paths, Flags};

const HELP: &str = "\
Zoom View

USAGE:
  zoom_view [OPTIONS] [IMAGE]

ARGS:
  <IMAGE>                Image file to show (defaults to startup.image in settings.toml)

OPTIONS:
  --config-dir <DIR>     Directory holding settings.toml (or ZOOM_VIEW_CONFIG_DIR)
  -h, --help             Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let config_dir: Option<String> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            tracing::error!("invalid --config-dir: {err}");
            None
        }
    };

    let image = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    paths::init_cli_override(config_dir);

    app::run(Flags { image })
}
