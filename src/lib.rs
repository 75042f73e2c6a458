// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod error;
pub mod face;
pub mod logging;
pub mod sampler;
pub mod svg;
pub mod ticker;
pub mod tracker;
pub mod widget;

// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use config::{ClockConfig, Color, HandStyle, SecondHandMode};
pub use error::ClockError;
pub use face::{render_face, Canvas, FaceSurface};
pub use sampler::{FixedWallClock, SystemWallClock, TargetAngles, Tick, TimeSampler, WallClock};
pub use svg::SvgSurface;
pub use ticker::Ticker;
pub use tracker::{shortest_delta, AngleState, ContinuousAngleTracker, DisplaySurface, HandId};
pub use widget::ClockWidget;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Analogue wall clock, shown in a window or rendered to SVG.
#[derive(Debug, Clone)]
pub struct Clock {
    config: ClockConfig,
}

impl Clock {
    pub fn new(config: ClockConfig) -> Result<Self, ClockError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn sampler(&self) -> TimeSampler {
        TimeSampler::new(self.config.second_hand_mode)
    }

    /// SVG snapshot of the current local time.
    pub fn render_svg(&self) -> String {
        self.render_svg_with(SystemWallClock)
    }

    /// SVG snapshot of a fixed time.
    pub fn render_svg_at(&self, tick: Tick) -> String {
        self.render_svg_with(FixedWallClock(tick))
    }

    fn render_svg_with(&self, wall_clock: impl WallClock) -> String {
        let mut widget = ClockWidget::new(self.sampler(), wall_clock, self.config.tick_interval);
        widget.on_attach(SvgSurface::for_config(&self.config), Instant::now());
        widget
            .on_detach()
            .map(|surface| surface.to_svg(&self.config))
            .unwrap_or_default()
    }

    /// Opens the clock window and blocks until it is closed.
    ///
    /// The clock is attached while the window is visible. Occluding the
    /// window detaches it and stops the tick schedule; uncovering it
    /// attaches a fresh face synchronized to the current time.
    pub fn show(&self) -> Result<(), ClockError> {
        let config = self.config.clone();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut widget: ClockWidget<FaceSurface> =
            ClockWidget::new(self.sampler(), SystemWallClock, config.tick_interval);
        widget.on_attach(FaceSurface::for_config(&config), Instant::now());
        window.request_redraw();

        let frame_duration = Duration::try_from_secs_f64(1.0 / config.max_framerate)
            .map_err(|err| ClockError::InvalidConfig(format!("max framerate: {err}")))?;
        let mut last_frame = Instant::now();
        let mut animating = false;

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    widget.on_detach();
                    window_target.exit();
                }
                WindowEvent::Occluded(true) => {
                    widget.on_detach();
                }
                WindowEvent::Occluded(false) => {
                    if !widget.is_attached() {
                        widget.on_attach(FaceSurface::for_config(&config), Instant::now());
                        window_clone.request_redraw();
                    }
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    let resized = pixels
                        .resize_buffer(new_size.width, new_size.height)
                        .and_then(|_| pixels.resize_surface(new_size.width, new_size.height));
                    match resized {
                        Ok(()) => window_clone.request_redraw(),
                        Err(err) => {
                            log::error!("failed to resize frame buffer: {err}");
                            widget.on_detach();
                            window_target.exit();
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    let Some(surface) = widget.surface() else {
                        return;
                    };
                    let mut canvas = Canvas::new(pixels.frame_mut(), fb_width, fb_height);
                    render_face(&mut canvas, surface, &config);
                    if let Err(err) = pixels.render() {
                        log::error!("failed to present frame: {err}");
                        widget.on_detach();
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if widget.poll(now) {
                    animating = true;
                }

                if animating && now.duration_since(last_frame) >= frame_duration {
                    animating = widget
                        .surface_mut()
                        .is_some_and(|surface| surface.advance_frame(config.hand_lerp_factor));
                    window_clone.request_redraw();
                    last_frame = now;
                }

                let next_frame = last_frame + frame_duration;
                let wake = match (animating, widget.next_deadline()) {
                    (true, Some(deadline)) => deadline.min(next_frame),
                    (true, None) => next_frame,
                    (false, Some(deadline)) => deadline,
                    (false, None) => {
                        window_target.set_control_flow(ControlFlow::Wait);
                        return;
                    }
                };
                window_target.set_control_flow(ControlFlow::WaitUntil(wake));
            }
            _ => {}
        })?;

        Ok(())
    }
}
