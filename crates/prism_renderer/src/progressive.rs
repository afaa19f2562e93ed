//! Progressive pixel-at-a-time rendering.
//!
//! A host event loop calls [`ProgressiveRender::tick`] (or
//! [`ProgressiveRender::run_for`]) between frames. Each tick renders one
//! pixel, so the render can be interrupted or restarted at pixel
//! granularity without blocking the loop.

use std::time::{Duration, Instant};

use prism_core::Eye;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::ImagePlane;
use crate::image::RenderImage;
use crate::record::{RayRecorder, RecordedRay};
use crate::tracer::{TraceContext, Tracer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// No view has been set up yet
    Idle,
    Rendering,
    /// Every pixel is done
    Stopped,
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do
    Idle,
    /// One pixel rendered
    Rendered,
    /// One pixel rendered and the display should refresh
    Refresh,
    /// The last pixel was rendered; refresh once more
    Finished,
}

impl TickOutcome {
    pub fn wants_refresh(self) -> bool {
        matches!(self, TickOutcome::Refresh | TickOutcome::Finished)
    }
}

/// Renders columns left to right, each column bottom to top.
pub struct ProgressiveRender {
    tracer: Tracer,
    plane: Option<ImagePlane>,
    image: RenderImage,
    next_x: u32,
    next_y: u32,
    /// Column fraction that triggers the next refresh
    next_refresh: f32,
    state: RenderState,
    rng: StdRng,
    recorder: RayRecorder,
    record_requested: bool,
    recorded: Vec<RecordedRay>,
    started: Instant,
}

impl ProgressiveRender {
    pub fn new(tracer: Tracer, seed: u64) -> Self {
        Self {
            tracer,
            plane: None,
            image: RenderImage::new(0, 0),
            next_x: 0,
            next_y: 0,
            next_refresh: 0.0,
            state: RenderState::Idle,
            rng: StdRng::seed_from_u64(seed),
            recorder: RayRecorder::new(),
            record_requested: false,
            recorded: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Start over for a new view: rebuild the image plane, clear the image
    /// to transparent and move the cursor to the first pixel.
    pub fn restart(&mut self, eye: &Eye, width: u32, height: u32) {
        self.plane = Some(ImagePlane::new(eye, width, height));
        self.image = RenderImage::new(width, height);
        self.next_x = 0;
        self.next_y = 0;
        self.next_refresh = self.tracer.config().update_interval;
        self.started = Instant::now();

        self.state = if width == 0 || height == 0 {
            RenderState::Stopped
        } else {
            RenderState::Rendering
        };

        log::debug!("Restarted render at {}x{} ({})", width, height, self.tracer.config());
    }

    /// Render the next pixel.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != RenderState::Rendering {
            return TickOutcome::Idle;
        }
        let Some(plane) = self.plane else {
            return TickOutcome::Idle;
        };

        if self.record_requested {
            self.recorder.arm();
            self.record_requested = false;
        }
        let recording = self.recorder.is_armed();

        let (x, y) = (self.next_x, self.next_y);
        let colour = {
            let mut ctx = TraceContext::new(&mut self.rng, &mut self.recorder);
            self.tracer.pixel_colour(&plane, x, y, &mut ctx)
        };
        self.image.set(x, y, colour);

        if recording {
            self.recorded = self.recorder.take();
            log::debug!("Recorded {} rays at pixel ({}, {})", self.recorded.len(), x, y);
        }

        self.advance(plane.width, plane.height)
    }

    /// Move the cursor; the inner axis is y.
    fn advance(&mut self, width: u32, height: u32) -> TickOutcome {
        self.next_y += 1;
        if self.next_y < height {
            return TickOutcome::Rendered;
        }

        self.next_y = 0;
        self.next_x += 1;

        let mut outcome = TickOutcome::Rendered;
        if self.next_x as f32 / width as f32 >= self.next_refresh {
            self.next_refresh += self.tracer.config().update_interval;
            outcome = TickOutcome::Refresh;
        }

        if self.next_x >= width {
            self.state = RenderState::Stopped;
            log::info!(
                "Render finished: {}x{} in {:.2?}",
                width,
                height,
                self.started.elapsed()
            );
            return TickOutcome::Finished;
        }

        outcome
    }

    /// Tick until `budget` has elapsed or the render stops, calling
    /// `on_refresh` whenever a tick asks for a refresh. Always renders at
    /// least one pixel while rendering. Returns the pixels rendered.
    pub fn run_for(&mut self, budget: Duration, mut on_refresh: impl FnMut(&RenderImage)) -> usize {
        let start = Instant::now();
        let mut pixels = 0;

        loop {
            let outcome = self.tick();
            if outcome == TickOutcome::Idle {
                break;
            }
            pixels += 1;
            if outcome.wants_refresh() {
                on_refresh(&self.image);
            }
            if start.elapsed() >= budget {
                break;
            }
        }

        pixels
    }

    /// Record the rays of the next rendered pixel only.
    pub fn record_next_pixel(&mut self) {
        self.record_requested = true;
    }

    /// Rays from the most recently recorded pixel.
    pub fn recorded_rays(&self) -> &[RecordedRay] {
        &self.recorded
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn image(&self) -> &RenderImage {
        &self.image
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn plane(&self) -> Option<&ImagePlane> {
        self.plane.as_ref()
    }

    /// Fraction of pixels rendered in the current pass.
    pub fn progress(&self) -> f32 {
        let total = self.image.width() as u64 * self.image.height() as u64;
        match self.state {
            RenderState::Idle => 0.0,
            RenderState::Stopped => 1.0,
            RenderState::Rendering => {
                let done = self.next_x as u64 * self.image.height() as u64 + self.next_y as u64;
                done as f32 / total as f32
            }
        }
    }
}
