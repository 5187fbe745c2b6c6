use knuffel::errors::DecodeError;

/// A number that can be written either as an integer or as a float.
///
/// knuffel refuses to decode `8` into an `f64`, which is annoying for pixel sizes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FloatOrInt(pub f64);

/// RGBA color, not premultiplied.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new_unpremul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgba8_unpremul(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.,
            g: g as f32 / 255.,
            b: b as f32 / 255.,
            a: a as f32 / 255.,
        }
    }

    pub fn to_array_unpremul(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the same color with the alpha channel forced to opaque.
    #[must_use]
    pub fn opaque(self) -> Self {
        Self { a: 1., ..self }
    }
}

fn check_no_type_name<S: knuffel::traits::ErrorSpan>(
    type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
    ctx: &mut knuffel::decode::Context<S>,
) {
    if let Some(type_name) = &type_name {
        ctx.emit_error(DecodeError::unexpected(
            type_name,
            "type name",
            "no type name expected for this node",
        ));
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for FloatOrInt {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        check_no_type_name(type_name, ctx);
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<FloatOrInt, DecodeError<S>> {
        match &**val {
            knuffel::ast::Literal::Int(ref value) => match value.try_into() {
                Ok(v) => {
                    let v: i32 = v;
                    Ok(FloatOrInt(f64::from(v)))
                }
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(FloatOrInt::default())
                }
            },
            knuffel::ast::Literal::Decimal(ref value) => match value.try_into() {
                Ok(v) => Ok(FloatOrInt(v)),
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(FloatOrInt::default())
                }
            },
            _ => {
                ctx.emit_error(DecodeError::scalar_kind(
                    knuffel::decode::Kind::Int,
                    val,
                ));
                Ok(FloatOrInt::default())
            }
        }
    }
}

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for Color {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        check_no_type_name(type_name, ctx);
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Color, DecodeError<S>> {
        match &**val {
            knuffel::ast::Literal::String(ref s) => match csscolorparser::parse(s) {
                Ok(color) => Ok(Color::new_unpremul(
                    color.r as f32,
                    color.g as f32,
                    color.b as f32,
                    color.a as f32,
                )),
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(Color::default())
                }
            },
            _ => {
                ctx.emit_error(DecodeError::scalar_kind(
                    knuffel::decode::Kind::String,
                    val,
                ));
                Ok(Color::default())
            }
        }
    }
}
