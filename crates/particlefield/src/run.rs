use anyhow::{Context, Result};
use renderer::{run_windowed, FieldParams, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::defaults;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let surface_size = match args.size.as_deref() {
        Some(spec) => parse_surface_size(spec)
            .with_context(|| format!("invalid --size specification {spec:?}"))?,
        None => (defaults::SURFACE_WIDTH, defaults::SURFACE_HEIGHT),
    };

    let stock = FieldParams::default();
    let initial_params = FieldParams {
        zoom: args.zoom.unwrap_or(stock.zoom),
        duration: args.duration.unwrap_or(stock.duration),
        power: args.power.unwrap_or(stock.power),
    };

    let config = RendererConfig {
        surface_size,
        window_title: defaults::WINDOW_TITLE.to_string(),
        initial_params,
        forward_mouse: args.mouse,
    };

    tracing::info!(
        width = surface_size.0,
        height = surface_size.1,
        zoom = initial_params.zoom,
        duration = initial_params.duration,
        power = initial_params.power,
        mouse = args.mouse,
        "starting particle field demo"
    );

    run_windowed(config)
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 800x600"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_accepts_wxh() {
        assert_eq!(parse_surface_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size(" 1280 X 720 ").unwrap(), (1280, 720));
    }

    #[test]
    fn surface_size_rejects_garbage() {
        assert!(parse_surface_size("800").is_err());
        assert!(parse_surface_size("800x").is_err());
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("axb").is_err());
    }
}
