#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, default)]
    pub overview: Animation,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            overview: Animation::default(),
        }
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = 300)]
    pub duration_ms: u32,
    #[knuffel(child, unwrap(argument), default)]
    pub curve: Curve,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            off: false,
            duration_ms: 300,
            curve: Curve::default(),
        }
    }
}

#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    #[default]
    EaseOutCubic,
    EaseOutExpo,
}
