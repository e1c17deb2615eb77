use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "particlefield",
    author,
    version,
    about = "Interactive procedural particle-field shader demo"
)]
pub struct Args {
    /// Override the window resolution (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Forward mouse position and button state to the shader's view override.
    #[arg(long)]
    pub mouse: bool,

    /// Initial zoom factor (arrow up/down adjust it at runtime).
    #[arg(long, value_name = "FACTOR")]
    pub zoom: Option<f32>,

    /// Initial orbit span (W/S adjust it at runtime).
    #[arg(long, value_name = "FACTOR")]
    pub duration: Option<f32>,

    /// Initial phase advance rate (arrow left/right adjust it at runtime).
    #[arg(long, value_name = "FACTOR")]
    pub power: Option<f32>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parameter_overrides_parse() {
        let args = Args::try_parse_from([
            "particlefield",
            "--size",
            "1280x720",
            "--mouse",
            "--zoom",
            "2.0",
        ])
        .unwrap();
        assert_eq!(args.size.as_deref(), Some("1280x720"));
        assert!(args.mouse);
        assert_eq!(args.zoom, Some(2.0));
        assert_eq!(args.duration, None);
        assert_eq!(args.power, None);
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let args = Args::try_parse_from(["particlefield"]).unwrap();
        assert!(args.size.is_none());
        assert!(!args.mouse);
    }
}
