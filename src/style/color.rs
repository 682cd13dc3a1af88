use crate::foundation::error::{ToonError, ToonResult};
use crate::foundation::math::Approx;
use crate::value::Value;

/// Spellings that mean "no color".
pub const NO_COLOR: [&str; 3] = ["none", "transparent", "clear"];

const NAMED: &[(&str, [u8; 3])] = &[
    ("aqua", [0x00, 0xFF, 0xFF]),
    ("beige", [0xF5, 0xF5, 0xDC]),
    ("black", [0x00, 0x00, 0x00]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("brown", [0xA5, 0x2A, 0x2A]),
    ("coral", [0xFF, 0x7F, 0x50]),
    ("crimson", [0xDC, 0x14, 0x3C]),
    ("cyan", [0x00, 0xFF, 0xFF]),
    ("darkblue", [0x00, 0x00, 0x8B]),
    ("darkgray", [0xA9, 0xA9, 0xA9]),
    ("darkgreen", [0x00, 0x64, 0x00]),
    ("darkred", [0x8B, 0x00, 0x00]),
    ("gold", [0xFF, 0xD7, 0x00]),
    ("gray", [0x80, 0x80, 0x80]),
    ("green", [0x00, 0x80, 0x00]),
    ("grey", [0x80, 0x80, 0x80]),
    ("indigo", [0x4B, 0x00, 0x82]),
    ("khaki", [0xF0, 0xE6, 0x8C]),
    ("lightblue", [0xAD, 0xD8, 0xE6]),
    ("lightgray", [0xD3, 0xD3, 0xD3]),
    ("lime", [0x00, 0xFF, 0x00]),
    ("magenta", [0xFF, 0x00, 0xFF]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("olive", [0x80, 0x80, 0x00]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("pink", [0xFF, 0xC0, 0xCB]),
    ("purple", [0x80, 0x00, 0x80]),
    ("red", [0xFF, 0x00, 0x00]),
    ("salmon", [0xFA, 0x80, 0x72]),
    ("silver", [0xC0, 0xC0, 0xC0]),
    ("skyblue", [0x87, 0xCE, 0xEB]),
    ("steelblue", [0x46, 0x82, 0xB4]),
    ("tan", [0xD2, 0xB4, 0x8C]),
    ("teal", [0x00, 0x80, 0x80]),
    ("tomato", [0xFF, 0x63, 0x47]),
    ("violet", [0xEE, 0x82, 0xEE]),
    ("wheat", [0xF5, 0xDE, 0xB3]),
    ("white", [0xFF, 0xFF, 0xFF]),
    ("yellow", [0xFF, 0xFF, 0x00]),
];

/// An RGB color with optional alpha. `rgb: None` is the explicit "none" color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Channels, or `None` for no color.
    pub rgb: Option<[u8; 3]>,
    /// Opacity in `0..=1`; `None` is opaque.
    pub alpha: Option<f64>,
}

impl Color {
    /// The absent color.
    pub const NONE: Color = Color {
        rgb: None,
        alpha: Some(0.0),
    };

    /// An opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: Some([r, g, b]),
            alpha: None,
        }
    }

    /// The same color with opacity `alpha`, which must lie in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> ToonResult<Self> {
        Ok(Self {
            alpha: Some(valid_alpha(alpha)?),
            ..self
        })
    }

    /// True for the absent color.
    pub fn is_none(&self) -> bool {
        self.rgb.is_none()
    }

    /// Parse `#RRGGBB`, a color name, a no-color spelling, or `"<alpha> * <color>"`.
    pub fn parse(s: &str) -> ToonResult<Self> {
        let fields: Vec<&str> = s.split('*').map(str::trim).collect();
        match fields.as_slice() {
            [name] => rgb_code(name),
            [a, b] => {
                let (alpha, name) = match (a.parse::<f64>(), b.parse::<f64>()) {
                    (Ok(alpha), _) => (alpha, *b),
                    (_, Ok(alpha)) => (alpha, *a),
                    _ => {
                        return Err(ToonError::validation(format!(
                            "one operand of * in color string must be a number: {s:?}"
                        )));
                    }
                };
                let color = rgb_code(name)?;
                if color.is_none() {
                    return Ok(Self::NONE);
                }
                color.with_alpha(alpha)
            }
            _ => Err(ToonError::validation(format!(
                "the * notation in color string requires exactly two operands: {s:?}"
            ))),
        }
    }

    /// Promote a color-like value (a color, a color string, or `Null` for none).
    pub fn from_value(v: &Value) -> ToonResult<Self> {
        match v {
            Value::Color(c) => c.validated(),
            Value::Text(s) => Self::parse(s),
            Value::Null => Ok(Self::NONE),
            other => Err(other.not_concrete("color", "a color or color string")),
        }
    }

    fn validated(self) -> ToonResult<Self> {
        if let Some(a) = self.alpha {
            valid_alpha(a)?;
        }
        Ok(if self.is_none() { Self::NONE } else { self })
    }

    /// Rec. 709 luma; grays are returned unchanged.
    pub fn grayscale(self) -> Self {
        match self.rgb {
            Some([r, g, b]) if !(r == g && g == b) => {
                let y = (0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b))
                    .round()
                    .clamp(0.0, 255.0) as u8;
                Self {
                    rgb: Some([y, y, y]),
                    alpha: self.alpha,
                }
            }
            _ => self,
        }
    }

    /// Linear mix `(1 - w) * self + w * other`; "none" blends as a transparent version of
    /// the other side.
    pub fn blend(self, other: Color, w: f64) -> Color {
        let lerp = |x: f64, y: f64| (1.0 - w) * x + w * y;
        let (a_rgb, b_rgb) = match (self.rgb, other.rgb) {
            (None, None) => return Self::NONE,
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => (a, a),
            (None, Some(b)) => (b, b),
        };
        let alpha_of = |c: Color| if c.is_none() { 0.0 } else { c.alpha.unwrap_or(1.0) };
        let channel = |i: usize| {
            lerp(f64::from(a_rgb[i]), f64::from(b_rgb[i]))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        let alpha = match (self.alpha, other.alpha, self.is_none() || other.is_none()) {
            (None, None, false) => None,
            _ => Some(lerp(alpha_of(self), alpha_of(other)).clamp(0.0, 1.0)),
        };
        Color {
            rgb: Some([channel(0), channel(1), channel(2)]),
            alpha,
        }
    }

    /// `#RRGGBB`, or `None` for the "none" color.
    pub fn hex(&self) -> Option<String> {
        self.rgb
            .map(|[r, g, b]| format!("#{r:02X}{g:02X}{b:02X}"))
    }
}

impl Approx for Color {
    fn approx_eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb && self.alpha.approx_eq(&other.alpha)
    }
}

fn valid_alpha(a: f64) -> ToonResult<f64> {
    if (0.0..=1.0).contains(&a) {
        Ok(a)
    } else {
        Err(ToonError::validation(format!(
            "alpha channel must be between 0 and 1, inclusive: {a}"
        )))
    }
}

fn rgb_code(name: &str) -> ToonResult<Color> {
    if NO_COLOR.contains(&name) {
        return Ok(Color::NONE);
    }
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ToonError::validation(format!(
                "badly formatted RGB code: {name:?}"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| {
                ToonError::validation(format!(
                    "supposed hex part of RGB code does not parse: {name:?}"
                ))
            })
        };
        return Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?));
    }
    let lower = name.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, [r, g, b])| Color::rgb(*r, *g, *b))
        .ok_or_else(|| ToonError::validation(format!("invalid color name or RGB code: {name:?}")))
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
