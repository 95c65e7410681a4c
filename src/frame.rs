use crate::constants::FRAME_BUDGET_MS;
use crate::dom;
use crate::input;
use crate::state::Shared;
use instant::Instant;
use pano_core::ViewState;
use std::rc::Rc;

pub struct FrameContext {
    pub shared: Rc<Shared>,
    pub frames: u64,
    pub over_budget: u64,
}

impl FrameContext {
    pub fn new(shared: Rc<Shared>) -> Self {
        Self {
            shared,
            frames: 0,
            over_budget: 0,
        }
    }

    /// One overlay pass for the orientation the panorama just rendered.
    /// Queued callbacks are left for the caller to flush.
    pub fn frame(&mut self, view: ViewState) {
        if self.shared.disposed.get() {
            return;
        }
        let start = Instant::now();

        {
            let mut surface = self.shared.surface.borrow_mut();
            let canvas = surface.canvas().clone();
            dom::sync_canvas_backing_size(&canvas);
            let dpr = dom::device_pixel_ratio();
            surface.set_device_pixel_ratio(dpr);
            let size = input::css_size((canvas.width(), canvas.height()), dpr);
            let mut nav = self.shared.navigator.borrow_mut();
            nav.resize(size.x, size.y);
            nav.update(view, &mut *surface);
        }

        self.frames += 1;
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        if ms > FRAME_BUDGET_MS {
            self.over_budget += 1;
            log::warn!(
                "[frame] overlay took {:.1}ms (budget {:.0}ms, {} of {} frames over)",
                ms,
                FRAME_BUDGET_MS,
                self.over_budget,
                self.frames
            );
        }
    }
}
