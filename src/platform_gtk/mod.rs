use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::ChartView;
use crate::core::Viewport;
use crate::interaction::{GestureHub, WheelDeltaMode, ZoomGesture};
use crate::render::CairoRenderer;

pub type SharedChartView = Rc<RefCell<ChartView<CairoRenderer>>>;

/// Wires a GTK4 `DrawingArea` to a chart view.
///
/// Scroll and drag input is dispatched into a [`GestureHub`]; the draw
/// callback composes whatever is queued and paints one frame, so a burst of
/// events between two display frames costs a single redraw.
pub struct GtkChartAdapter {
    view: SharedChartView,
    hub: GestureHub,
    drawing_area: gtk::DrawingArea,
    controllers: RefCell<Vec<gtk::EventController>>,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(view: ChartView<CairoRenderer>) -> Self {
        let hub = GestureHub::new();
        let view = Rc::new(RefCell::new(view));
        if let Ok(mut chart) = view.try_borrow_mut() {
            chart.attach_gestures(&hub);
        }

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_focusable(true);

        let adapter = Self {
            view,
            hub,
            drawing_area,
            controllers: RefCell::new(Vec::new()),
        };
        adapter.install_draw_func();
        adapter.install_controllers();
        adapter
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn view(&self) -> SharedChartView {
        Rc::clone(&self.view)
    }

    #[must_use]
    pub fn hub(&self) -> &GestureHub {
        &self.hub
    }

    /// Removes every input controller and unsubscribes the view.
    pub fn detach(&self) {
        for controller in self.controllers.borrow_mut().drain(..) {
            self.drawing_area.remove_controller(&controller);
        }
        if let Ok(mut chart) = self.view.try_borrow_mut() {
            chart.detach_gestures();
        }
    }

    fn install_draw_func(&self) {
        let view = Rc::clone(&self.view);
        self.drawing_area
            .set_draw_func(move |_, context, width, height| {
                let Ok(mut chart) = view.try_borrow_mut() else {
                    return;
                };
                let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                    return;
                };
                let viewport = Viewport::new(width, height);
                if viewport.is_valid() && viewport != chart.viewport() {
                    if let Err(err) = chart.resize(viewport) {
                        warn!(error = %err, width, height, "chart resize failed");
                    }
                }
                chart.apply_pending_gestures();
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "chart draw failed");
                }
            });
    }

    fn install_controllers(&self) {
        let pointer_x = Rc::new(Cell::new(0.0));

        let motion = gtk::EventControllerMotion::new();
        {
            let pointer_x = Rc::clone(&pointer_x);
            motion.connect_motion(move |_, x, _| {
                pointer_x.set(x);
            });
        }
        self.add_controller(motion.upcast());

        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        {
            let hub = self.hub.clone();
            let drawing_area = self.drawing_area.clone();
            let pointer_x = Rc::clone(&pointer_x);
            scroll.connect_scroll(move |_, _, dy| {
                if dy.abs() > f64::EPSILON {
                    hub.dispatch(ZoomGesture::Wheel {
                        delta_y: dy,
                        delta_mode: WheelDeltaMode::Line,
                        anchor_x: pointer_x.get(),
                    });
                    drawing_area.queue_draw();
                }
                gtk::glib::Propagation::Stop
            });
        }
        self.add_controller(scroll.upcast());

        let drag = gtk::GestureDrag::new();
        let last_offset_x = Rc::new(Cell::new(0.0));
        {
            let last_offset_x = Rc::clone(&last_offset_x);
            drag.connect_drag_begin(move |_, _, _| {
                last_offset_x.set(0.0);
            });
        }
        {
            let hub = self.hub.clone();
            let drawing_area = self.drawing_area.clone();
            drag.connect_drag_update(move |_, offset_x, _| {
                let delta_x = offset_x - last_offset_x.get();
                last_offset_x.set(offset_x);
                if delta_x.abs() > f64::EPSILON {
                    hub.dispatch(ZoomGesture::Drag { delta_x });
                    drawing_area.queue_draw();
                }
            });
        }
        self.add_controller(drag.upcast());
    }

    fn add_controller(&self, controller: gtk::EventController) {
        self.drawing_area.add_controller(controller.clone());
        self.controllers.borrow_mut().push(controller);
    }
}
