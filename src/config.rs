use std::path::PathBuf;

use clap::{arg, command, value_parser, ArgMatches, Command};

pub const DEFAULT_VERTEX_SHADER: &str = "Shaders/vertex.shader";
pub const DEFAULT_FRAGMENT_SHADER: &str = "Shaders/fragment.shader";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
    pub log_filter: Option<String>,
}

pub fn cli() -> Command {
    command!()
        .arg(
            arg!(-v --vertex <PATH> "Vertex shader source")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_VERTEX_SHADER),
        )
        .arg(
            arg!(-f --fragment <PATH> "Fragment shader source")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_FRAGMENT_SHADER),
        )
        .arg(
            arg!(-W --width <PX> "Window width")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("800"),
        )
        .arg(
            arg!(-H --height <PX> "Window height")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("600"),
        )
        .arg(arg!(-t --title <TEXT> "Window title").default_value("OpenGL"))
        .arg(arg!(--vsync "Wait for vertical sync when presenting"))
        .arg(arg!(-l --log <FILTER> "Log filter, e.g. \"debug\" or \"quadview=trace\""))
}

impl Config {
    pub fn parse() -> Self {
        Self::from_matches(&cli().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        // Every option but the log filter has a default, so these lookups never miss.
        Self {
            vertex_shader: matches.get_one::<PathBuf>("vertex").cloned().unwrap_or_default(),
            fragment_shader: matches
                .get_one::<PathBuf>("fragment")
                .cloned()
                .unwrap_or_default(),
            width: matches.get_one::<u32>("width").copied().unwrap_or(800),
            height: matches.get_one::<u32>("height").copied().unwrap_or(600),
            title: matches.get_one::<String>("title").cloned().unwrap_or_default(),
            vsync: matches.get_flag("vsync"),
            log_filter: matches.get_one::<String>("log").cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> clap::error::Result<Config> {
        cli()
            .try_get_matches_from(std::iter::once("quadview").chain(args.iter().copied()))
            .map(|m| Config::from_matches(&m))
    }

    #[test]
    fn defaults_match_the_sandbox_window() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.vertex_shader, PathBuf::from(DEFAULT_VERTEX_SHADER));
        assert_eq!(config.fragment_shader, PathBuf::from(DEFAULT_FRAGMENT_SHADER));
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "OpenGL");
        assert!(!config.vsync);
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "-v", "a.vert", "--fragment", "b.frag", "-W", "1024", "-H", "768", "--title", "quad",
            "--vsync", "-l", "debug",
        ])
        .unwrap();

        assert_eq!(config.vertex_shader, PathBuf::from("a.vert"));
        assert_eq!(config.fragment_shader, PathBuf::from("b.frag"));
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.title, "quad");
        assert!(config.vsync);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_zero_sized_window() {
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--height", "0"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        cli().debug_assert();
    }
}
