//! SVG loading animations shown by the grid overlay.
//!
//! Each animation is a 32x32 viewBox drawn at 100x100 with evenly staggered
//! phases, generated rather than stored as literal markup.

use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridbookError;

const SVG_OPEN: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32" width="100" height="100" fill="#333">"##;
const SVG_CLOSE: &str = "</svg>";

/// Spline timing shared by the `bars` animation.
const BAR_SPLINES: &str = "0.2 0.2 0.4 0.8;0.2 0.6 0.4 0.8;0.2 0.8 0.4 0.8";
const BUBBLE_SPLINES: &str = "0.2 0.2 0.4 0.8;0.2 0.2 0.4 0.8;0.2 0.2 0.4 0.8";

/// Named loader animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    Bars,
    Bubbles,
    Spokes,
    #[default]
    Spin,
}

impl LoaderKind {
    pub const ALL: [LoaderKind; 4] = [Self::Bars, Self::Bubbles, Self::Spokes, Self::Spin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bars => "bars",
            Self::Bubbles => "bubbles",
            Self::Spokes => "spokes",
            Self::Spin => "spin",
        }
    }

    /// Render the animation as standalone SVG markup.
    pub fn svg(self) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(SVG_OPEN);
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Bars => write_bars(&mut out),
            Self::Bubbles => write_bubbles(&mut out),
            Self::Spokes => write_spokes(&mut out),
            Self::Spin => write_spin(&mut out),
        };
        out.push_str(SVG_CLOSE);
        out
    }
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderKind {
    type Err = GridbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GridbookError::Config(format!("unknown loader \"{s}\"")))
    }
}

fn write_bars(out: &mut String) -> fmt::Result {
    const BAR: &str = "M0 12 V20 H4 V12z";
    const TALL: &str = "M0 4 V28 H4 V4z";
    for i in 0..5u8 {
        let x = 2 + 6 * u32::from(i);
        let begin = f64::from(2 * i) / 10.0;
        write!(
            out,
            r#"<path transform="translate({x})" d="{BAR}"><animate attributeName="d" values="{BAR}; {TALL}; {BAR}; {BAR}" dur="1.2s" repeatCount="indefinite" begin="{begin}" keytimes="0;.2;.5;1" keySplines="{BAR_SPLINES}" calcMode="spline" /></path>"#
        )?;
    }
    Ok(())
}

fn write_spokes(out: &mut String) -> fmt::Result {
    for i in 0..8u16 {
        let angle = 45 * i;
        let begin = f64::from(i) * 0.125;
        write!(
            out,
            r#"<path opacity=".1" d="M14 0 H18 V8 H14 z" transform="rotate({angle} 16 16)"><animate attributeName="opacity" from="1" to=".1" dur="1s" repeatCount="indefinite" begin="{begin}s"/></path>"#
        )?;
    }
    Ok(())
}

fn write_bubbles(out: &mut String) -> fmt::Result {
    for i in 0..8u16 {
        let angle = 45 * i;
        let begin = f64::from(i) * 0.125;
        write!(
            out,
            r#"<circle transform="rotate({angle} 16 16)" cx="16" cy="3" r="0"><animate attributeName="r" values="0;3;0;0" dur="1s" repeatCount="indefinite" begin="{begin}s" keySplines="{BUBBLE_SPLINES}" calcMode="spline" /></circle>"#
        )?;
    }
    Ok(())
}

fn write_spin(out: &mut String) -> fmt::Result {
    out.write_str(
        r#"<path opacity=".25" d="M16 0 A16 16 0 0 0 16 32 A16 16 0 0 0 16 0 M16 4 A12 12 0 0 1 16 28 A12 12 0 0 1 16 4"/>"#,
    )?;
    out.write_str(
        r#"<path d="M16 0 A16 16 0 0 1 32 16 L28 16 A12 12 0 0 0 16 4z"><animateTransform attributeName="transform" type="rotate" from="0 16 16" to="360 16 16" dur="0.8s" repeatCount="indefinite" /></path>"#,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_loader_is_a_complete_svg() {
        for kind in LoaderKind::ALL {
            let svg = kind.svg();
            assert!(svg.starts_with("<svg"), "{kind}");
            assert!(svg.ends_with("</svg>"), "{kind}");
            assert!(svg.contains(r#"viewBox="0 0 32 32""#));
        }
    }

    #[test]
    fn phases_are_evenly_staggered() {
        let bars = LoaderKind::Bars.svg();
        assert_eq!(bars.matches("<path").count(), 5);
        assert!(bars.contains(r#"translate(26)"#));
        assert!(bars.contains(r#"begin="0.8""#));

        let spokes = LoaderKind::Spokes.svg();
        assert_eq!(spokes.matches("<path").count(), 8);
        assert!(spokes.contains(r#"rotate(315 16 16)"#));
        assert!(spokes.contains(r#"begin="0.875s""#));

        assert_eq!(LoaderKind::Bubbles.svg().matches("<circle").count(), 8);
    }

    #[test]
    fn parse_names() {
        assert_eq!("bubbles".parse::<LoaderKind>().unwrap(), LoaderKind::Bubbles);
        assert!(matches!(
            "dots".parse::<LoaderKind>(),
            Err(GridbookError::Config(_))
        ));
        assert_eq!(LoaderKind::default(), LoaderKind::Spin);
    }
}
