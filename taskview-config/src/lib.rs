//! Configuration for the taskview overview.
//!
//! The config is a KDL document with two top-level sections, `overview` and `animations`. Every
//! node is optional; see `resources/default-config.kdl` for the full set with defaults.

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

pub mod animations;
pub mod overview;
pub mod utils;

pub use crate::animations::{Animation, Animations, Curve};
pub use crate::overview::{
    ExitBehavior, ExitPolicy, Gestures, Grid, LayoutKind, Linear, Overview,
};
pub use crate::utils::{Color, FloatOrInt};

const DEFAULT_CONFIG: &str = include_str!("../../resources/default-config.kdl");

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub overview: Overview,
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracy_client::span!("Config::load");

        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::parse("default-config.kdl", DEFAULT_CONFIG)
            .expect("default config must parse")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn default_config_matches_defaults() {
        let parsed = Config::default();
        let expected = Config {
            overview: Overview::default(),
            animations: Animations::default(),
        };
        assert_eq!(parsed, expected);
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn parse_linear() {
        let config = do_parse(
            r##"
            overview {
                layout "linear"
                gap-size 4.5
                background-color "#ff000080"
                linear {
                    height 240
                    scroll-speed 2
                    blur
                }
            }
            "##,
        );

        let overview = &config.overview;
        assert_eq!(overview.layout, LayoutKind::Linear);
        assert_eq!(overview.gap_size, FloatOrInt(4.5));
        assert_eq!(overview.linear.height, FloatOrInt(240.));
        assert_eq!(overview.linear.scroll_speed, FloatOrInt(2.));
        assert!(overview.linear.blur);
        assert_eq!(overview.background_color.r, 1.);
        assert!((overview.background_color.a - 128. / 255.).abs() < 1e-3);
        assert_eq!(overview.background_color.opaque().a, 1.);

        // Untouched sections keep their defaults.
        assert_eq!(overview.grid, Grid::default());
    }

    #[test]
    fn parse_grid_and_gestures() {
        let config = do_parse(
            r#"
            overview {
                grid {
                    rows 2
                    columns 4
                    wrap-around
                }
                gestures {
                    fingers 3
                    distance 200
                    off
                }
            }
            animations {
                overview {
                    duration-ms 150
                    curve "ease-out-expo"
                }
            }
            "#,
        );

        assert_eq!(
            config.overview.grid,
            Grid {
                rows: 2,
                columns: 4,
                wrap_around: true,
            }
        );
        assert_eq!(
            config.overview.gestures,
            Gestures {
                off: true,
                fingers: 3,
                distance: FloatOrInt(200.),
            }
        );
        assert_eq!(config.animations.overview.duration_ms, 150);
        assert_eq!(config.animations.overview.curve, Curve::EaseOutExpo);
        assert!(!config.animations.off);
    }

    #[test]
    fn exit_behavior_is_terminated_by_active() {
        let config = do_parse(r#"overview { exit-behavior "original" "hovered"; }"#);
        let resolved: Vec<_> = config.overview.exit_behavior.resolved().collect();
        assert_eq!(
            resolved,
            [
                ExitPolicy::Original,
                ExitPolicy::Hovered,
                ExitPolicy::Active
            ]
        );

        // Anything after an explicit "active" can never be reached.
        let config = do_parse(r#"overview { exit-behavior "active" "original"; }"#);
        let resolved: Vec<_> = config.overview.exit_behavior.resolved().collect();
        assert_eq!(resolved, [ExitPolicy::Active]);
    }

    #[test]
    fn unknown_layout_is_an_error() {
        assert!(Config::parse("test.kdl", r#"overview { layout "spiral"; }"#).is_err());
    }

    #[test]
    fn bad_color_is_an_error() {
        assert!(Config::parse("test.kdl", r#"overview { background-color "nope"; }"#).is_err());
    }

    #[test]
    fn unknown_exit_policy_is_an_error() {
        assert!(Config::parse("test.kdl", r#"overview { exit-behavior "sideways"; }"#).is_err());
    }
}
