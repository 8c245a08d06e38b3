//! GTK4 host for an explorer session.
//!
//! Widgets feed `InputEvent`s into the session; after each pass the widgets
//! are re-synced from the controls (the cursor slider gets new bounds when
//! `n` or `p` change) and the drawing area is redrawn through Cairo.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gtk4 as gtk;
use gtk::glib;
use gtk::prelude::*;
use gtk::{Application, ApplicationWindow, DrawingArea, Label, Orientation, Scale, SpinButton};
use tracing::{debug, warn};

use crate::api::{ExplorerConfig, ExplorerSession, FORMULA_LINES, PAGE_TITLE, SessionUpdate};
use crate::core::{MAX_PROBABILITY, MIN_PROBABILITY, MIN_TRIALS, Viewport};
use crate::error::ExplorerResult;
use crate::interaction::InputEvent;
use crate::render::CairoRenderer;

pub const APPLICATION_ID: &str = "io.github.binomial_explorer";

/// Upper bound of the `n` spin button; the model itself has no maximum.
const TRIALS_WIDGET_MAX: f64 = 100_000.0;
const CONTROLS_HEIGHT_PX: i32 = 260;

struct ExplorerUi {
    session: RefCell<ExplorerSession<CairoRenderer>>,
    syncing: Cell<bool>,
    trials: SpinButton,
    probability: SpinButton,
    cursor: Scale,
    mean_label: Label,
    variance_label: Label,
    error_label: Label,
    drawing_area: DrawingArea,
}

impl ExplorerUi {
    fn dispatch(&self, event: InputEvent) {
        if self.syncing.get() {
            return;
        }
        let result = self.session.borrow_mut().handle(event);
        match result {
            Ok(SessionUpdate::Unchanged) => {}
            Ok(SessionUpdate::Rendered) => {
                self.error_label.set_text("");
                self.sync_widgets();
                self.drawing_area.queue_draw();
            }
            Err(err) => {
                warn!(error = %err, ?event, "explorer pass failed");
                self.error_label.set_text(&err.to_string());
                self.sync_widgets();
            }
        }
    }

    /// Pushes control state back into the widgets without re-dispatching.
    fn sync_widgets(&self) {
        let (trials, probability, cursor, summary) = {
            let session = self.session.borrow();
            let controls = session.controls();
            (
                controls.trials(),
                controls.probability(),
                controls.cursor(),
                session.output().summary.clone(),
            )
        };

        self.syncing.set(true);
        self.trials.set_value(trials as f64);
        self.probability.set_value(probability);
        self.cursor.set_range(cursor.min, cursor.max);
        self.cursor.set_increments(cursor.step, cursor.step * 10.0);
        self.cursor.set_value(cursor.value);
        self.mean_label.set_text(&summary.mean_line);
        self.variance_label.set_text(&summary.variance_line);
        self.syncing.set(false);
    }
}

/// Builds the explorer widget tree around a fresh session.
pub fn build_explorer_widget(config: ExplorerConfig) -> ExplorerResult<gtk::Box> {
    let viewport = config.viewport();
    let renderer = CairoRenderer::new(viewport.width as i32, viewport.height as i32)?;
    let session = ExplorerSession::new(renderer, config)?;
    let controls = session.controls().clone();
    let slider = controls.cursor();

    let root = gtk::Box::new(Orientation::Vertical, 8);
    root.set_margin_top(12);
    root.set_margin_bottom(12);
    root.set_margin_start(12);
    root.set_margin_end(12);

    let title = Label::new(None);
    title.set_markup(&format!("<big><b>{PAGE_TITLE}</b></big>"));
    root.append(&title);
    for line in FORMULA_LINES {
        root.append(&Label::new(Some(line)));
    }

    let inputs = gtk::Box::new(Orientation::Horizontal, 12);
    let trials = SpinButton::with_range(MIN_TRIALS as f64, TRIALS_WIDGET_MAX, 1.0);
    trials.set_digits(0);
    trials.set_value(controls.trials() as f64);
    let probability = SpinButton::with_range(MIN_PROBABILITY, MAX_PROBABILITY, 0.01);
    probability.set_digits(2);
    probability.set_value(controls.probability());
    inputs.append(&Label::new(Some("n")));
    inputs.append(&trials);
    inputs.append(&Label::new(Some("p")));
    inputs.append(&probability);
    root.append(&inputs);

    let mean_label = Label::new(Some(&session.output().summary.mean_line));
    let variance_label = Label::new(Some(&session.output().summary.variance_line));
    root.append(&mean_label);
    root.append(&variance_label);

    let cursor = Scale::with_range(Orientation::Horizontal, slider.min, slider.max, slider.step);
    cursor.set_digits(1);
    cursor.set_draw_value(true);
    cursor.set_hexpand(true);
    cursor.set_value(slider.value);
    let cursor_row = gtk::Box::new(Orientation::Horizontal, 12);
    cursor_row.append(&Label::new(Some("y")));
    cursor_row.append(&cursor);
    root.append(&cursor_row);

    let error_label = Label::new(None);
    root.append(&error_label);

    let drawing_area = DrawingArea::new();
    drawing_area.set_content_width(viewport.width as i32);
    drawing_area.set_content_height(viewport.height as i32);
    drawing_area.set_hexpand(true);
    drawing_area.set_vexpand(true);
    root.append(&drawing_area);

    let ui = Rc::new(ExplorerUi {
        session: RefCell::new(session),
        syncing: Cell::new(false),
        trials: trials.clone(),
        probability: probability.clone(),
        cursor: cursor.clone(),
        mean_label,
        variance_label,
        error_label,
        drawing_area: drawing_area.clone(),
    });

    let weak = Rc::downgrade(&ui);
    trials.connect_value_changed(move |spin| {
        with_ui(&weak, |ui| {
            let value = spin.value().round().max(MIN_TRIALS as f64) as u64;
            ui.dispatch(InputEvent::SetTrials(value));
        });
    });

    let weak = Rc::downgrade(&ui);
    probability.connect_value_changed(move |spin| {
        with_ui(&weak, |ui| ui.dispatch(InputEvent::SetProbability(spin.value())));
    });

    let weak = Rc::downgrade(&ui);
    cursor.connect_value_changed(move |scale| {
        with_ui(&weak, |ui| ui.dispatch(InputEvent::SetCursor(scale.value())));
    });

    let weak = Rc::downgrade(&ui);
    drawing_area.set_draw_func(move |_, context, width, height| {
        with_ui(&weak, |ui| {
            let viewport = Viewport::new(width.max(0) as u32, height.max(0) as u32);
            if let Err(err) = ui
                .session
                .borrow_mut()
                .render_on_cairo_context(context, viewport)
            {
                warn!(error = %err, width, height, "failed to draw explorer figure");
            }
        });
    });

    // Keeps the shared state alive for as long as the widget tree exists.
    let keep_alive = RefCell::new(Some(ui));
    root.connect_destroy(move |_| {
        keep_alive.borrow_mut().take();
    });

    Ok(root)
}

fn with_ui(weak: &Weak<ExplorerUi>, f: impl FnOnce(&ExplorerUi)) {
    if let Some(ui) = weak.upgrade() {
        f(&ui);
    }
}

/// Runs the desktop application until its window closes.
pub fn run_desktop_app(config: ExplorerConfig) -> glib::ExitCode {
    let app = Application::builder().application_id(APPLICATION_ID).build();
    app.connect_activate(move |app| match build_explorer_widget(config) {
        Ok(content) => {
            let viewport = config.viewport();
            let window = ApplicationWindow::builder()
                .application(app)
                .title(PAGE_TITLE)
                .default_width(viewport.width as i32 + 24)
                .default_height(viewport.height as i32 + CONTROLS_HEIGHT_PX)
                .child(&content)
                .build();
            debug!("presenting explorer window");
            window.present();
        }
        Err(err) => warn!(error = %err, "failed to build explorer window"),
    });
    app.run_with_args(&["binomial_explorer_gtk"])
}
