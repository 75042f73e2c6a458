// ============================================================================
// RASTER CLOCK FACE
// ============================================================================

use crate::config::{ClockConfig, Color};
use crate::tracker::{DisplaySurface, HandId};

/// Half-extent of the face in face units; geometry ratios scale from this.
const FACE_UNITS: f64 = 100.0;

/// Below this distance (degrees) an animating hand lands on its target.
const SETTLE_EPSILON: f64 = 0.01;

// ============================================================================
// DISPLAY SURFACE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct HandPose {
    shown: f64,
    target: f64,
}

/// Hand positions for the raster face.
///
/// Rotations animate towards their absolute target once per frame. Because
/// the target is unbounded, a hand told to go from 354 to 360 moves 6°
/// forward instead of sweeping back through the dial.
#[derive(Debug, Clone, Default)]
pub struct FaceSurface {
    mounted: [bool; 3],
    poses: [Option<HandPose>; 3],
}

impl FaceSurface {
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

    /// Angle currently drawn for `hand`.
    pub fn rotation(&self, hand: HandId) -> Option<f64> {
        self.poses[hand.index()].map(|pose| pose.shown)
    }

    pub fn target(&self, hand: HandId) -> Option<f64> {
        self.poses[hand.index()].map(|pose| pose.target)
    }

    /// Moves every hand one animation step. Returns whether any hand is
    /// still short of its target.
    pub fn advance_frame(&mut self, lerp_factor: f64) -> bool {
        let mut moving = false;
        for pose in self.poses.iter_mut().flatten() {
            pose.shown = lerp(pose.shown, pose.target, lerp_factor);
            if (pose.target - pose.shown).abs() < SETTLE_EPSILON {
                pose.shown = pose.target;
            } else {
                moving = true;
            }
        }
        moving
    }

    pub fn is_settled(&self) -> bool {
        self.poses
            .iter()
            .flatten()
            .all(|pose| pose.shown == pose.target)
    }

    fn slot(&mut self, hand: HandId) -> Option<&mut Option<HandPose>> {
        if !self.mounted[hand.index()] {
            log::trace!("face has no {hand} hand, ignoring rotation");
            return None;
        }
        Some(&mut self.poses[hand.index()])
    }
}

impl DisplaySurface for FaceSurface {
    fn set_rotation(&mut self, hand: HandId, absolute_degrees: f64) {
        let Some(slot) = self.slot(hand) else {
            return;
        };
        let pose = slot.get_or_insert(HandPose {
            shown: absolute_degrees,
            target: absolute_degrees,
        });
        pose.target = absolute_degrees;
    }

    fn snap_rotation(&mut self, hand: HandId, absolute_degrees: f64) {
        if let Some(slot) = self.slot(hand) {
            *slot = Some(HandPose {
                shown: absolute_degrees,
                target: absolute_degrees,
            });
        }
    }
}

fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug)]
enum DrawCommand {
    Clear((u8, u8, u8)),
    Disc {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: (u8, u8, u8),
        stroke: (u8, u8, u8),
        stroke_width: f64,
    },
    HandLine {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        thickness: f32,
        color: (u8, u8, u8),
    },
}

struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn render(&self, canvas: &mut Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    canvas.clear(*color);
                }
                DrawCommand::Disc {
                    cx,
                    cy,
                    radius,
                    fill,
                    stroke,
                    stroke_width,
                } => {
                    draw_disc(canvas, *cx, *cy, *radius, *fill, *stroke, *stroke_width);
                }
                DrawCommand::HandLine {
                    x0,
                    y0,
                    x1,
                    y1,
                    thickness,
                    color,
                } => {
                    draw_thick_line_aa(canvas, *x0, *y0, *x1, *y1, *thickness, *color);
                }
            }
        }
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

/// RGBA frame buffer view.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    fn clear(&mut self, color: (u8, u8, u8)) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.0, color.1, color.2, 0xff]);
        }
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        (self.frame[idx], self.frame[idx + 1], self.frame[idx + 2])
    }
}

/// Face center and scale for a canvas.
struct Dial {
    cx: f64,
    cy: f64,
    scale: f64,
}

impl Dial {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            scale: width.min(height) as f64 / (2.0 * FACE_UNITS),
        }
    }

    fn radius(&self, ratio: f64) -> f64 {
        ratio * FACE_UNITS * self.scale
    }

    /// Point at `length` from the center along a clockwise angle measured
    /// from twelve o'clock.
    fn point_at(&self, degrees: f64, length: f64) -> (f64, f64) {
        let radians = degrees.to_radians();
        (
            self.cx + radians.sin() * length,
            self.cy - radians.cos() * length,
        )
    }
}

// ============================================================================
// RENDERING
// ============================================================================

pub fn render_face(canvas: &mut Canvas, surface: &FaceSurface, config: &ClockConfig) {
    let mut scene = Scene::new();
    let dial = Dial::new(canvas.width, canvas.height);

    scene.add_command(DrawCommand::Clear(config.background_color.as_tuple()));
    add_disc(
        &mut scene,
        &dial,
        config.face_radius,
        config.face_color,
        config.outline_color,
        config.face_stroke_width,
    );
    add_disc(
        &mut scene,
        &dial,
        config.inner_radius,
        config.inner_color,
        config.outline_color,
        config.face_stroke_width,
    );

    for hand in HandId::ALL {
        if let Some(rotation) = surface.rotation(hand) {
            let style = config.hand(hand);
            let (x1, y1) = dial.point_at(rotation, dial.radius(style.length));
            scene.add_command(DrawCommand::HandLine {
                x0: dial.cx,
                y0: dial.cy,
                x1,
                y1,
                thickness: (style.width * dial.scale) as f32,
                color: style.color.as_tuple(),
            });
        }
    }

    add_disc(
        &mut scene,
        &dial,
        config.axis_cover_radius,
        config.axis_cover_color,
        config.axis_cover_outline_color,
        config.axis_cover_stroke_width,
    );

    scene.render(canvas);
}

fn add_disc(
    scene: &mut Scene,
    dial: &Dial,
    radius_ratio: f64,
    fill: Color,
    stroke: Color,
    stroke_width: f64,
) {
    scene.add_command(DrawCommand::Disc {
        cx: dial.cx,
        cy: dial.cy,
        radius: dial.radius(radius_ratio),
        fill: fill.as_tuple(),
        stroke: stroke.as_tuple(),
        stroke_width: stroke_width * dial.scale,
    });
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(canvas: &mut Canvas, x: usize, y: usize, color: (u8, u8, u8), alpha: f32) {
    if x < canvas.width && y < canvas.height {
        let idx = (y * canvas.width + x) * 4;
        let src = [color.0 as f32, color.1 as f32, color.2 as f32];
        let dst = [
            canvas.frame[idx] as f32,
            canvas.frame[idx + 1] as f32,
            canvas.frame[idx + 2] as f32,
        ];
        let a = alpha.clamp(0.0, 1.0);
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        canvas.frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn draw_thick_line_aa(
    canvas: &mut Canvas,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    thickness: f32,
    color: (u8, u8, u8),
) {
    let pad = thickness.ceil() as f64 + 1.0;
    let min_x = (x0.min(x1) - pad).floor().max(0.0) as i32;
    let max_x = (x0.max(x1) + pad).ceil().min(canvas.width as f64 - 1.0) as i32;
    let min_y = (y0.min(y1) - pad).floor().max(0.0) as i32;
    let max_y = (y0.max(y1) + pad).ceil().min(canvas.height as f64 - 1.0) as i32;
    let dx = (x1 - x0) as f32;
    let dy = (y1 - y0) as f32;
    let len_sq = (dx * dx + dy * dy).max(f32::EPSILON);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 - x0 as f32;
            let py = y as f32 - y0 as f32;
            let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
            let lx = x0 as f32 + t * dx;
            let ly = y0 as f32 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(canvas, x as usize, y as usize, color, aa);
            }
        }
    }
}

/// Filled circle with an outline centered on its edge.
fn draw_disc(
    canvas: &mut Canvas,
    cx: f64,
    cy: f64,
    radius: f64,
    fill: (u8, u8, u8),
    stroke: (u8, u8, u8),
    stroke_width: f64,
) {
    let outer = radius + stroke_width / 2.0;
    let inner = radius - stroke_width / 2.0;
    let min_x = (cx - outer - 1.0).floor().max(0.0) as i32;
    let max_x = (cx + outer + 1.0).ceil().min(canvas.width as f64 - 1.0) as i32;
    let min_y = (cy - outer - 1.0).floor().max(0.0) as i32;
    let max_y = (cy + outer + 1.0).ceil().min(canvas.height as f64 - 1.0) as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();

            let coverage = (outer + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.01 {
                continue;
            }
            set_pixel(canvas, x as usize, y as usize, stroke, coverage as f32);

            let fill_coverage = (inner + 0.5 - dist).clamp(0.0, 1.0);
            if fill_coverage > 0.01 {
                set_pixel(canvas, x as usize, y as usize, fill, fill_coverage as f32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rotation_places_the_hand() {
        let mut surface = FaceSurface::new(&HandId::ALL);
        surface.set_rotation(HandId::Second, 354.0);
        assert_eq!(surface.rotation(HandId::Second), Some(354.0));
        assert!(surface.is_settled());
    }

    #[test]
    fn animation_follows_the_unbounded_angle() {
        let mut surface = FaceSurface::new(&HandId::ALL);
        surface.snap_rotation(HandId::Second, 354.0);
        surface.set_rotation(HandId::Second, 360.0);

        let mut previous = 354.0;
        while surface.advance_frame(0.5) {
            let shown = surface.rotation(HandId::Second).unwrap();
            assert!(shown > previous && shown < 360.0);
            previous = shown;
        }
        assert_eq!(surface.rotation(HandId::Second), Some(360.0));
    }

    #[test]
    fn snap_skips_the_animation() {
        let mut surface = FaceSurface::new(&HandId::ALL);
        surface.snap_rotation(HandId::Minute, 0.0);
        surface.set_rotation(HandId::Minute, 90.0);
        surface.snap_rotation(HandId::Minute, 180.0);
        assert!(surface.is_settled());
        assert_eq!(surface.rotation(HandId::Minute), Some(180.0));
    }

    #[test]
    fn missing_hands_ignore_updates() {
        let mut surface = FaceSurface::new(&[HandId::Hour, HandId::Minute]);
        surface.set_rotation(HandId::Second, 12.0);
        surface.snap_rotation(HandId::Second, 12.0);
        assert_eq!(surface.rotation(HandId::Second), None);
        assert_eq!(surface.target(HandId::Second), None);
    }

    #[test]
    fn renders_hand_from_the_center_towards_its_angle() {
        let (width, height) = (200, 200);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height);

        let config = ClockConfig::default();
        let mut surface = FaceSurface::new(&[HandId::Second]);
        surface.snap_rotation(HandId::Second, 90.0);
        render_face(&mut canvas, &surface, &config);

        // Second hand points at three o'clock, over the inner dial.
        let orange = config.second_hand.color.as_tuple();
        assert_eq!(canvas.pixel(150, 100), orange);
        // Nothing points at nine o'clock.
        assert_eq!(canvas.pixel(50, 100), config.inner_color.as_tuple());
        // Faceplate ring and background.
        assert_eq!(canvas.pixel(100, 12), config.face_color.as_tuple());
        assert_eq!(canvas.pixel(0, 0), config.background_color.as_tuple());
    }

    #[test]
    fn unbounded_rotation_draws_like_its_reduction() {
        let (width, height) = (120, 120);
        let config = ClockConfig::default();

        let mut reduced = vec![0u8; width * height * 4];
        let mut surface = FaceSurface::for_config(&config);
        surface.snap_rotation(HandId::Minute, 30.0);
        render_face(&mut Canvas::new(&mut reduced, width, height), &surface, &config);

        let mut unbounded = vec![0u8; width * height * 4];
        let mut surface = FaceSurface::for_config(&config);
        surface.snap_rotation(HandId::Minute, 30.0 + 720.0);
        render_face(&mut Canvas::new(&mut unbounded, width, height), &surface, &config);

        let differing = reduced
            .iter()
            .zip(&unbounded)
            .filter(|(a, b)| a.abs_diff(**b) > 1)
            .count();
        assert_eq!(differing, 0);
    }
}
