//! Vector rendering of the clock face.

use std::fmt::Write;

use crate::config::ClockConfig;
use crate::tracker::{DisplaySurface, HandId};

const VIEWBOX: f64 = 200.0;
const CENTER: f64 = VIEWBOX / 2.0;

/// Collects hand rotations and writes them out as an SVG document.
///
/// Rotations are written unreduced; SVG renders `rotate(366, ...)` the same
/// as `rotate(6, ...)`.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    mounted: [bool; 3],
    rotations: [Option<f64>; 3],
}

impl SvgSurface {
    pub fn new(hands: &[HandId]) -> Self {
        let mut surface = Self::default();
        for hand in hands {
            surface.mounted[hand.index()] = true;
        }
        surface
    }

    pub fn for_config(config: &ClockConfig) -> Self {
        Self::new(&config.mounted_hands())
    }

    pub fn rotation(&self, hand: HandId) -> Option<f64> {
        self.rotations[hand.index()]
    }

    pub fn to_svg(&self, config: &ClockConfig) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut svg, config);
        svg
    }

    fn write_svg(&self, out: &mut String, config: &ClockConfig) -> std::fmt::Result {
        let c = fmt_num(CENTER);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" baseProfile="full" width="100%" height="100%" viewBox="0 0 {v} {v}">"#,
            v = fmt_num(VIEWBOX)
        )?;
        writeln!(
            out,
            r#"  <g id="faceplate"><circle cx="{c}" cy="{c}" r="{r}" style="fill: {fill}; stroke: {stroke}; stroke-width: {w}"/></g>"#,
            r = fmt_num(config.face_radius * CENTER),
            fill = config.face_color.to_css(),
            stroke = config.outline_color.to_css(),
            w = fmt_num(config.face_stroke_width),
        )?;
        writeln!(
            out,
            r#"  <g id="innerDial"><circle cx="{c}" cy="{c}" r="{r}" style="fill: {fill}; stroke: {stroke}; stroke-width: {w}"/></g>"#,
            r = fmt_num(config.inner_radius * CENTER),
            fill = config.inner_color.to_css(),
            stroke = config.outline_color.to_css(),
            w = fmt_num(config.face_stroke_width),
        )?;

        for hand in HandId::ALL {
            if !self.mounted[hand.index()] {
                continue;
            }
            let style = config.hand(hand);
            let rotation = self.rotations[hand.index()].unwrap_or(0.0);
            writeln!(
                out,
                r#"  <g id="{hand}Hand" transform="rotate({a}, {c}, {c})"><line x1="{c}" y1="{c}" x2="{c}" y2="{y2}" style="stroke: {color}; stroke-width: {w}"/></g>"#,
                a = fmt_num(rotation),
                y2 = fmt_num(CENTER - style.length * CENTER),
                color = style.color.to_css(),
                w = fmt_num(style.width),
            )?;
        }

        writeln!(
            out,
            r#"  <g id="axisCover"><circle cx="{c}" cy="{c}" r="{r}" style="fill: {fill}; stroke: {stroke}; stroke-width: {w}"/></g>"#,
            r = fmt_num(config.axis_cover_radius * CENTER),
            fill = config.axis_cover_color.to_css(),
            stroke = config.axis_cover_outline_color.to_css(),
            w = fmt_num(config.axis_cover_stroke_width),
        )?;
        writeln!(out, "</svg>")
    }
}

impl DisplaySurface for SvgSurface {
    fn set_rotation(&mut self, hand: HandId, absolute_degrees: f64) {
        if !self.mounted[hand.index()] {
            log::trace!("svg has no {hand} hand, ignoring rotation");
            return;
        }
        self.rotations[hand.index()] = Some(absolute_degrees);
    }
}

/// At most three decimals, no trailing zeros.
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        _ => text.to_string(),
    }
}
