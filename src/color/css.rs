/// Straight (non-premultiplied) 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Substitute for fills whose CSS string cannot be parsed.
pub const FALLBACK_GRAY: Rgb = Rgb::new(0x80, 0x80, 0x80);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS color, substituting [`FALLBACK_GRAY`] when it is not understood.
    pub fn parse_or_gray(s: &str) -> Self {
        parse_css_color(s).unwrap_or(FALLBACK_GRAY)
    }

    /// Multiply each channel by `factor`, clamped to the byte range.
    pub fn shade(self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 1.0 };
        let ch = |c: u8| -> u8 { (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8 };
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_css_alpha(self, alpha: f64) -> String {
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, trim_float(a))
    }

    /// Straight RGBA8 with `alpha` in `[0, 1]`.
    pub fn to_rgba8(self, alpha: f64) -> [u8; 4] {
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
        [self.r, self.g, self.b, (a * 255.0).round() as u8]
    }
}

fn trim_float(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_owned() } else { s.to_owned() }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or a basic named color.
///
/// Alpha components are accepted and discarded; box fills use a fixed face alpha.
pub fn parse_css_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }
    named(&lower)
}

fn parse_hex(s: &str) -> Option<Rgb> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }

    let b = s.as_bytes();
    match b.len() {
        3 | 4 => {
            let r = nibble(b[0])?;
            let g = nibble(b[1])?;
            let bl = nibble(b[2])?;
            if b.len() == 4 {
                nibble(b[3])?;
            }
            Some(Rgb::new(r * 17, g * 17, bl * 17))
        }
        6 | 8 => {
            let byte = |i: usize| -> Option<u8> { Some(nibble(b[i])? * 16 + nibble(b[i + 1])?) };
            if b.len() == 8 {
                byte(6)?;
            }
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgb> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    fn channel(p: &str) -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? * 255.0 / 100.0,
            None => p.parse::<f64>().ok()?,
        };
        if !v.is_finite() {
            return None;
        }
        Some(v.round().clamp(0.0, 255.0) as u8)
    }

    if let Some(a) = parts.get(3) {
        let a = a.strip_suffix('%').unwrap_or(a);
        a.parse::<f64>().ok().filter(|v| v.is_finite())?;
    }
    Some(Rgb::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn named(s: &str) -> Option<Rgb> {
    let c = match s {
        "black" => Rgb::new(0, 0, 0),
        "white" => Rgb::new(255, 255, 255),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "silver" => Rgb::new(192, 192, 192),
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 128, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "orange" => Rgb::new(255, 165, 0),
        "purple" => Rgb::new(128, 0, 128),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/color/css.rs"]
mod tests;
