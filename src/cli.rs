//! Command-line interface of the `taskview` binary.

use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context as _};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use smithay::utils::{Physical, Size};
use taskview_config::Config;
use tracing::{debug, info};

use crate::animation::Clock;
use crate::desktop::{Desktop, MonitorId, WorkspaceId};
use crate::headless::HeadlessDesktop;
use crate::layout::{Options, OverviewLayout, Stage};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Validate the config file.
    Validate {
        /// Path to config file (default: `$XDG_CONFIG_HOME/taskview/config.kdl`).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print where every workspace slot goes on a simulated monitor.
    Preview {
        /// Path to config file (default: the built-in config).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Monitor size in physical pixels.
        #[arg(long, default_value = "1920x1080", value_parser = parse_size)]
        size: Size<f64, Physical>,
        /// Monitor output scale.
        #[arg(long, default_value_t = 1.)]
        scale: f64,
        #[arg(long, value_enum, default_value_t = PreviewStage::Opened)]
        stage: PreviewStage,
        /// Active workspace of the monitor.
        #[arg(long, default_value_t = 1)]
        workspace: i64,
        /// Other live workspaces on the monitor.
        #[arg(long, value_delimiter = ',')]
        live: Vec<i64>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewStage {
    Closed,
    Opened,
}

fn parse_size(s: &str) -> Result<Size<f64, Physical>, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.trim().parse().map_err(|err| format!("invalid width: {err}"))?;
    let h: u32 = h.trim().parse().map_err(|err| format!("invalid height: {err}"))?;
    if w == 0 || h == 0 {
        return Err(String::from("size must be non-zero"));
    }
    Ok(Size::from((f64::from(w), f64::from(h))))
}

/// The user config location, following the XDG base directory convention.
pub fn default_config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("taskview").join("config.kdl"))
}

pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        debug!("using the built-in config");
        return Ok(Config::default());
    };

    // miette reports only render their snippets through Debug.
    Config::load(&path).map_err(|err: miette::Report| anyhow!("{err:?}"))
}

pub fn validate(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => default_config_path().context("error finding the config directory")?,
    };

    load_config(Some(path.clone()))?;
    info!("config at {path:?} is valid");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotReport {
    pub workspace: i64,
    pub x: i32,
    pub y: i32,
    /// `[x, y, width, height]` in monitor pixels.
    pub rect: [f64; 4],
    pub live: bool,
}

pub struct PreviewArgs {
    pub size: Size<f64, Physical>,
    pub scale: f64,
    pub stage: PreviewStage,
    pub workspace: i64,
    pub live: Vec<i64>,
}

/// Lays out a simulated monitor and reports every slot.
pub fn preview(config: &Config, args: &PreviewArgs) -> anyhow::Result<Vec<SlotReport>> {
    if args.scale.is_nan() || args.scale <= 0. {
        bail!("scale must be positive, got {}", args.scale);
    }

    let mut desktop = HeadlessDesktop::new();
    let monitor = desktop.add_monitor("preview", (0., 0.), args.size, args.scale);
    for id in std::iter::once(args.workspace).chain(args.live.iter().copied()) {
        desktop.add_workspace(WorkspaceId(id), monitor);
    }

    let info = desktop
        .monitor(monitor)
        .context("preview monitor disappeared")?;

    let options = Rc::new(Options::from_config(config));
    let mut layout = OverviewLayout::new(Clock::default(), options);
    layout.init_position(&info, &desktop)?;
    if args.stage == PreviewStage::Opened {
        layout.set_progress(1., &info, &desktop)?;
    }
    let slots = layout.build(Stage::Animating, &info, &desktop)?;

    let reports = slots
        .into_iter()
        .map(|(id, slot)| SlotReport {
            workspace: id.0,
            x: slot.x,
            y: slot.y,
            rect: [
                slot.rect.loc.x,
                slot.rect.loc.y,
                slot.rect.size.w,
                slot.rect.size.h,
            ],
            live: is_live(&desktop, id, monitor),
        })
        .collect();

    Ok(reports)
}

fn is_live(desktop: &HeadlessDesktop, id: WorkspaceId, monitor: MonitorId) -> bool {
    desktop.workspace(id).is_some_and(|ws| ws.monitor == monitor)
}

pub fn format_table(reports: &[SlotReport]) -> String {
    let mut buf = String::new();
    for report in reports {
        let [x, y, w, h] = report.rect;
        let live = if report.live { " live" } else { "" };
        buf.push_str(&format!(
            "{} ({}, {}): {x:.1},{y:.1} {w:.1}x{h:.1}{live}\n",
            report.workspace, report.x, report.y
        ));
    }
    buf
}
