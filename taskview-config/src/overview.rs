use crate::utils::{Color, FloatOrInt};

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::from_rgba8_unpremul(0x1e, 0x1e, 0x2e, 0xff);
pub const DEFAULT_ACTIVE_BORDER_COLOR: Color = Color::from_rgba8_unpremul(0xcb, 0xa6, 0xf7, 0xff);
pub const DEFAULT_INACTIVE_BORDER_COLOR: Color =
    Color::from_rgba8_unpremul(0x45, 0x47, 0x5a, 0xff);

/// `BTN_LEFT` from `linux/input-event-codes.h`.
pub const BTN_LEFT: u32 = 0x110;
/// `BTN_RIGHT` from `linux/input-event-codes.h`.
pub const BTN_RIGHT: u32 = 0x111;

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Overview {
    #[knuffel(child, unwrap(argument), default)]
    pub layout: LayoutKind,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(8.))]
    pub gap_size: FloatOrInt,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(4.))]
    pub border_size: FloatOrInt,
    #[knuffel(child, unwrap(argument), default = DEFAULT_BACKGROUND_COLOR)]
    pub background_color: Color,
    #[knuffel(child, unwrap(argument), default = DEFAULT_ACTIVE_BORDER_COLOR)]
    pub active_border_color: Color,
    #[knuffel(child, unwrap(argument), default = DEFAULT_INACTIVE_BORDER_COLOR)]
    pub inactive_border_color: Color,
    #[knuffel(child, default)]
    pub exit_behavior: ExitBehavior,
    #[knuffel(child, unwrap(argument), default = BTN_LEFT)]
    pub drag_button: u32,
    #[knuffel(child, unwrap(argument), default = BTN_RIGHT)]
    pub select_button: u32,
    #[knuffel(child, default)]
    pub grid: Grid,
    #[knuffel(child, default)]
    pub linear: Linear,
    #[knuffel(child, default)]
    pub gestures: Gestures,
}

impl Default for Overview {
    fn default() -> Self {
        Self {
            layout: LayoutKind::default(),
            gap_size: FloatOrInt(8.),
            border_size: FloatOrInt(4.),
            background_color: DEFAULT_BACKGROUND_COLOR,
            active_border_color: DEFAULT_ACTIVE_BORDER_COLOR,
            inactive_border_color: DEFAULT_INACTIVE_BORDER_COLOR,
            exit_behavior: ExitBehavior::default(),
            drag_button: BTN_LEFT,
            select_button: BTN_RIGHT,
            grid: Grid::default(),
            linear: Linear::default(),
            gestures: Gestures::default(),
        }
    }
}

/// Which arrangement the overview uses.
///
/// Unknown names are rejected at parse time.
#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    #[default]
    Grid,
    Linear,
}

/// One rule of the exit-workspace policy.
#[derive(knuffel::DecodeScalar, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// The workspace under the pointer, if the pointer is on the view's monitor.
    Hovered,
    /// The workspace the overview was opened from.
    Original,
    /// The workspace most recently clicked or dropped onto.
    Interacted,
    /// Whatever the monitor currently shows. Always succeeds.
    Active,
}

#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct ExitBehavior {
    #[knuffel(arguments)]
    pub policies: Vec<ExitPolicy>,
}

impl Default for ExitBehavior {
    fn default() -> Self {
        Self {
            policies: vec![
                ExitPolicy::Hovered,
                ExitPolicy::Interacted,
                ExitPolicy::Original,
            ],
        }
    }
}

impl ExitBehavior {
    /// Policies in evaluation order, always terminated by [`ExitPolicy::Active`].
    pub fn resolved(&self) -> impl Iterator<Item = ExitPolicy> + '_ {
        self.policies
            .iter()
            .copied()
            .take_while(|policy| *policy != ExitPolicy::Active)
            .chain(std::iter::once(ExitPolicy::Active))
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    #[knuffel(child, unwrap(argument), default = 3)]
    pub rows: u16,
    #[knuffel(child, unwrap(argument), default = 3)]
    pub columns: u16,
    #[knuffel(child)]
    pub wrap_around: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            wrap_around: false,
        }
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    #[knuffel(child, unwrap(argument), default = FloatOrInt(300.))]
    pub height: FloatOrInt,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(1.))]
    pub scroll_speed: FloatOrInt,
    #[knuffel(child)]
    pub blur: bool,
}

impl Default for Linear {
    fn default() -> Self {
        Self {
            height: FloatOrInt(300.),
            scroll_speed: FloatOrInt(1.),
            blur: false,
        }
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Gestures {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = 4)]
    pub fingers: u8,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(300.))]
    pub distance: FloatOrInt,
}

impl Default for Gestures {
    fn default() -> Self {
        Self {
            off: false,
            fingers: 4,
            distance: FloatOrInt(300.),
        }
    }
}
