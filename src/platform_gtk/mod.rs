//! GTK4 host wiring: a `DrawingArea` driving a [`ChartEngine`].
//!
//! The engine renders into an offscreen Cairo image on the frame clock; the
//! draw function only blits that image. Gestures are translated into
//! [`InputEvent`]s with the controller's event timestamp.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

use gtk4 as gtk;
use gtk::glib;
use gtk::prelude::*;
use tracing::warn;

use crate::api::{ChartEngine, ChartEngineConfig};
use crate::core::SurfaceSize;
use crate::data::{BarRequest, BarSource, LoadEvent, spawn_fetch};
use crate::error::ChartResult;
use crate::interaction::InputEvent;
use crate::render::CairoSurface;

type SharedEngine = Rc<RefCell<ChartEngine<CairoSurface>>>;

pub struct GtkChartAdapter {
    area: gtk::DrawingArea,
    engine: SharedEngine,
    pending_load: Rc<RefCell<Option<Receiver<LoadEvent>>>>,
}

impl GtkChartAdapter {
    pub fn new(config: ChartEngineConfig) -> ChartResult<Self> {
        let surface = CairoSurface::offscreen(config.surface)?;
        let engine = Rc::new(RefCell::new(ChartEngine::new(surface, config)?));

        let area = gtk::DrawingArea::new();
        area.set_hexpand(true);
        area.set_vexpand(true);
        area.set_focusable(true);

        let adapter = Self {
            area,
            engine,
            pending_load: Rc::new(RefCell::new(None)),
        };
        adapter.install_draw_func();
        adapter.install_resize_handler();
        adapter.install_drag_gesture();
        adapter.install_scroll_zoom();
        adapter.install_double_click();
        adapter.install_frame_clock();
        Ok(adapter)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine {
        Rc::clone(&self.engine)
    }

    /// Starts fetching on a worker thread; events are applied on the frame
    /// clock. A previous unfinished load is abandoned.
    pub fn load_in_background<B>(&self, source: B, request: BarRequest) -> ChartResult<()>
    where
        B: BarSource + Send + 'static,
    {
        let events = spawn_fetch(source, request)?;
        *self.pending_load.borrow_mut() = Some(events);
        self.engine.borrow_mut().request_redraw();
        Ok(())
    }

    fn install_draw_func(&self) {
        let engine = Rc::clone(&self.engine);
        self.area.set_draw_func(move |_, context, _, _| {
            let engine = engine.borrow();
            let ratio = engine.size().device_pixel_ratio;
            if let Err(err) = engine.surface().paint_onto(context, ratio) {
                warn!(error = %err, "failed to present chart frame");
            }
        });
    }

    fn install_resize_handler(&self) {
        let engine = Rc::clone(&self.engine);
        self.area.connect_resize(move |area, width, height| {
            let size = SurfaceSize::new(width.max(0) as u32, height.max(0) as u32)
                .with_device_pixel_ratio(f64::from(area.scale_factor()));
            dispatch(&engine, area, InputEvent::Resize(size));
        });
    }

    fn install_drag_gesture(&self) {
        let drag = gtk::GestureDrag::new();

        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        drag.connect_drag_begin(move |gesture, x, y| {
            let time_ms = f64::from(gesture.current_event_time());
            dispatch(&engine, &area, InputEvent::PointerDown { x, y, time_ms });
        });

        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let time_ms = f64::from(gesture.current_event_time());
            dispatch(
                &engine,
                &area,
                InputEvent::PointerMove {
                    x: start_x + offset_x,
                    y: start_y + offset_y,
                    time_ms,
                },
            );
        });

        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        drag.connect_drag_end(move |gesture, offset_x, offset_y| {
            let (start_x, start_y) = gesture.start_point().unwrap_or((0.0, 0.0));
            let time_ms = f64::from(gesture.current_event_time());
            dispatch(
                &engine,
                &area,
                InputEvent::PointerUp {
                    x: start_x + offset_x,
                    y: start_y + offset_y,
                    time_ms,
                },
            );
        });

        self.area.add_controller(drag);
    }

    fn install_scroll_zoom(&self) {
        let cursor = Rc::new(RefCell::new((0.0_f64, 0.0_f64)));

        let motion = gtk::EventControllerMotion::new();
        let tracked = Rc::clone(&cursor);
        motion.connect_motion(move |_, x, y| {
            *tracked.borrow_mut() = (x, y);
        });
        self.area.add_controller(motion);

        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        scroll.connect_scroll(move |_, _, delta_y| {
            let (x, y) = *cursor.borrow();
            let prevent = dispatch(&engine, &area, InputEvent::Wheel { x, y, delta_y });
            if prevent {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        self.area.add_controller(scroll);
    }

    fn install_double_click(&self) {
        let click = gtk::GestureClick::new();
        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        click.connect_pressed(move |_, n_press, x, y| {
            if n_press == 2 {
                dispatch(&engine, &area, InputEvent::DoubleClick { x, y });
            }
        });
        self.area.add_controller(click);
    }

    fn install_frame_clock(&self) {
        let engine = Rc::clone(&self.engine);
        let pending_load = Rc::clone(&self.pending_load);
        self.area.add_tick_callback(move |area, clock| {
            let mut engine = engine.borrow_mut();

            let mut load_done = false;
            if let Some(events) = pending_load.borrow().as_ref() {
                load_done = engine.drain_load_events(events).unwrap_or_else(|err| {
                    warn!(error = %err, "bar load failed");
                    true
                });
            }
            if load_done {
                pending_load.borrow_mut().take();
            }

            if let Some(token) = engine.pending_frame() {
                let now_ms = clock.frame_time() as f64 / 1000.0;
                match engine.on_frame(token, now_ms) {
                    Ok(Some(_)) => area.queue_draw(),
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "chart frame failed"),
                }
            }
            glib::ControlFlow::Continue
        });
    }
}

/// Forwards one event; returns whether native handling should be suppressed.
fn dispatch(engine: &SharedEngine, area: &gtk::DrawingArea, event: InputEvent) -> bool {
    match engine.borrow_mut().handle_event(event) {
        Ok(response) => {
            if response.redraw_requested {
                area.queue_draw();
            }
            response.prevent_default
        }
        Err(err) => {
            warn!(error = %err, "chart event failed");
            false
        }
    }
}
