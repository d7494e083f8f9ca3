use crate::error::CoreError;

/// Couleur RGB 8 bits.
pub type Rgb = (u8, u8, u8);

/// Les 148 noms CSS (comparaison insensible à la casse).
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("aliceblue", (240, 248, 255)),
    ("antiquewhite", (250, 235, 215)),
    ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)),
    ("azure", (240, 255, 255)),
    ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)),
    ("black", (0, 0, 0)),
    ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)),
    ("blueviolet", (138, 43, 226)),
    ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)),
    ("cadetblue", (95, 158, 160)),
    ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)),
    ("coral", (255, 127, 80)),
    ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkcyan", (0, 139, 139)),
    ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)),
    ("darkmagenta", (139, 0, 139)),
    ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)),
    ("darkorchid", (153, 50, 204)),
    ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)),
    ("darkseagreen", (143, 188, 143)),
    ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)),
    ("darkslategrey", (47, 79, 79)),
    ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)),
    ("deeppink", (255, 20, 147)),
    ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)),
    ("dimgrey", (105, 105, 105)),
    ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)),
    ("floralwhite", (255, 250, 240)),
    ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)),
    ("gainsboro", (220, 220, 220)),
    ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)),
    ("goldenrod", (218, 165, 32)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("green", (0, 128, 0)),
    ("greenyellow", (173, 255, 47)),
    ("honeydew", (240, 255, 240)),
    ("hotpink", (255, 105, 180)),
    ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lavenderblush", (255, 240, 245)),
    ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)),
    ("lightblue", (173, 216, 230)),
    ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)),
    ("lightgoldenrodyellow", (250, 250, 210)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightgrey", (211, 211, 211)),
    ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)),
    ("lightseagreen", (32, 178, 170)),
    ("lightskyblue", (135, 206, 250)),
    ("lightslategray", (119, 136, 153)),
    ("lightslategrey", (119, 136, 153)),
    ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)),
    ("magenta", (255, 0, 255)),
    ("maroon", (128, 0, 0)),
    ("mediumaquamarine", (102, 205, 170)),
    ("mediumblue", (0, 0, 205)),
    ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)),
    ("mediumseagreen", (60, 179, 113)),
    ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)),
    ("mediumturquoise", (72, 209, 204)),
    ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)),
    ("mintcream", (245, 255, 250)),
    ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)),
    ("navajowhite", (255, 222, 173)),
    ("navy", (0, 0, 128)),
    ("oldlace", (253, 245, 230)),
    ("olive", (128, 128, 0)),
    ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)),
    ("orangered", (255, 69, 0)),
    ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)),
    ("palegreen", (152, 251, 152)),
    ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)),
    ("rosybrown", (188, 143, 143)),
    ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)),
    ("salmon", (250, 128, 114)),
    ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)),
    ("seashell", (255, 245, 238)),
    ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)),
    ("slategrey", (112, 128, 144)),
    ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)),
    ("steelblue", (70, 130, 180)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("thistle", (216, 191, 216)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];

/// Parse une couleur de cellule.
///
/// Formes acceptées : `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`
/// (entiers ou pourcentages), `rgba(r, g, b, a)`, `hsl(h, s%, l%)`,
/// `hsv(h, s%, v%)` / `hsb(...)` et les noms CSS. L'alpha est ignoré : les
/// tuiles sont en RGB.
///
/// # Errors
/// Returns [`CoreError::InvalidColor`] if the string matches none of the forms.
///
/// # Example
/// ```
/// use dq_core::color::parse_color;
/// assert_eq!(parse_color("#ffffff").unwrap(), (255, 255, 255));
/// assert_eq!(parse_color("#f00").unwrap(), (255, 0, 0));
/// assert_eq!(parse_color("Navy").unwrap(), (0, 0, 128));
/// assert_eq!(parse_color("hsl(120, 100%, 25%)").unwrap(), (0, 128, 0));
/// ```
pub fn parse_color(value: &str) -> Result<Rgb, CoreError> {
    let s = value.trim();
    let parsed = if let Some(hex) = s.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some((func, args)) = s.strip_suffix(')').and_then(|rest| rest.split_once('(')) {
        parse_function(&func.trim().to_ascii_lowercase(), args)
    } else {
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, rgb)| rgb)
    };
    parsed.ok_or_else(|| CoreError::InvalidColor {
        value: value.to_string(),
    })
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    // from_str_radix tolère un '+' en tête
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 | 4 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            Some((r * 17, g * 17, b * 17))
        }
        6 | 8 => Some((
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

fn parse_function(func: &str, args: &str) -> Option<Rgb> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    match (func, parts.as_slice()) {
        ("rgb", [r, g, b]) | ("rgba", [r, g, b, _]) => {
            Some((rgb_channel(r)?, rgb_channel(g)?, rgb_channel(b)?))
        }
        ("hsl", [h, s, l]) => Some(hsl_to_rgb(hue(h)?, percent(s)?, percent(l)?)),
        ("hsv" | "hsb", [h, s, v]) => Some(hsv_to_rgb(hue(h)?, percent(s)?, percent(v)?)),
        _ => None,
    }
}

/// Canal `rgb()` : entier 0..=255 ou pourcentage.
fn rgb_channel(s: &str) -> Option<u8> {
    if s.ends_with('%') {
        return percent(s).map(unit_to_u8);
    }
    s.parse::<u8>().ok()
}

/// `"50%"` → 0.5.
fn percent(s: &str) -> Option<f64> {
    let v = s.strip_suffix('%')?.trim().parse::<f64>().ok()?;
    (v.is_finite() && (0.0..=100.0).contains(&v)).then_some(v / 100.0)
}

/// Teinte en degrés → [0, 1).
fn hue(s: &str) -> Option<f64> {
    let h = s.parse::<f64>().ok().filter(|h| h.is_finite())?;
    Some(h.rem_euclid(360.0) / 360.0)
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    if s == 0.0 {
        let v = unit_to_u8(l);
        return (v, v, v);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        unit_to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        unit_to_u8(hue_to_rgb(p, q, h)),
        unit_to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    (unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("#000000").ok(), Some((0, 0, 0)));
        assert_eq!(parse_color("#AbCdEf").ok(), Some((0xab, 0xcd, 0xef)));
        assert_eq!(parse_color("#fff").ok(), Some((255, 255, 255)));
        assert_eq!(parse_color(" #123456 ").ok(), Some((0x12, 0x34, 0x56)));
        assert_eq!(parse_color("#f008").ok(), Some((255, 0, 0)));
        assert_eq!(parse_color("#0000ff80").ok(), Some((0, 0, 255)));
    }

    #[test]
    fn rgb_function_and_names() {
        assert_eq!(parse_color("rgb(10, 20, 30)").ok(), Some((10, 20, 30)));
        assert_eq!(parse_color("RGB(100%, 0%, 50%)").ok(), Some((255, 0, 128)));
        assert_eq!(parse_color("rgba(1,2,3,0.5)").ok(), Some((1, 2, 3)));
        assert_eq!(parse_color("WHITE").ok(), Some((255, 255, 255)));
        assert_eq!(parse_color("grey").ok(), parse_color("gray").ok());
    }

    #[test]
    fn full_css_name_set() {
        assert_eq!(NAMED_COLORS.len(), 148);
        assert_eq!(parse_color("darkblue").ok(), Some((0, 0, 139)));
        assert_eq!(parse_color("SkyBlue").ok(), Some((135, 206, 235)));
        assert_eq!(parse_color("forestgreen").ok(), Some((34, 139, 34)));
        assert_eq!(parse_color("rebeccapurple").ok(), Some((102, 51, 153)));
        assert_eq!(parse_color("lightgoldenrodyellow").ok(), Some((250, 250, 210)));
    }

    #[test]
    fn hsl_and_hsv() {
        assert_eq!(parse_color("hsl(0, 100%, 50%)").ok(), Some((255, 0, 0)));
        assert_eq!(parse_color("hsl(240, 100%, 50%)").ok(), Some((0, 0, 255)));
        assert_eq!(parse_color("hsl(-120, 100%, 50%)").ok(), Some((0, 0, 255)));
        assert_eq!(parse_color("hsl(0, 0%, 50%)").ok(), Some((128, 128, 128)));
        assert_eq!(parse_color("hsv(120, 100%, 100%)").ok(), Some((0, 255, 0)));
        assert_eq!(parse_color("hsb(0, 0%, 100%)").ok(), Some((255, 255, 255)));
        assert_eq!(parse_color("hsv(300, 100%, 50%)").ok(), Some((128, 0, 128)));
    }

    #[test]
    fn rejects_garbage() {
        for bad in [
            "",
            "#12",
            "#gggggg",
            "#1234567",
            "#+1+2+3",
            "#+12+34+56",
            "rgb(1,2)",
            "rgb(1,2,300)",
            "rgb(+1,2,3",
            "hsl(0, 100, 50)",
            "hsl(0, 150%, 50%)",
            "cmyk(0,0,0,0)",
            "notacolor",
            "#é12",
        ] {
            assert!(
                matches!(parse_color(bad), Err(CoreError::InvalidColor { .. })),
                "accepted {bad:?}"
            );
        }
    }
}
