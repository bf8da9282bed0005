use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::dial::{self, ACTIVE_POINT_RADIUS, DialGeometry};
use crate::gui::sched::{self, GlibScheduler};
use crate::gui::slider::EventSlider;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use epochs::control::Command;
use epochs::dial::{POINT_COUNT, Point, SectionChanged};
use epochs::panel::{Panel, PanelInput, TimerOutcome};
use epochs::sched::{Tick, TimerId};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FADER_GAP: f64 = 20.0;

pub struct AppModel {
    pub panel: Rc<RefCell<Panel>>,
    hovered: Rc<Cell<Option<usize>>>,
    sched: GlibScheduler,
    slider: EventSlider,
    root: gtk::ApplicationWindow,
    handles: Handles,
}

/// Widgets refreshed from panel state after every message.
struct Handles {
    drawing_area: gtk::DrawingArea,
    start_year: gtk::Label,
    end_year: gtk::Label,
    fader: gtk::Label,
    progress: gtk::Label,
    prev: gtk::Button,
    next: gtk::Button,
    dots: Vec<gtk::Box>,
}

impl Handles {
    fn attach(widgets: &AppModelWidgets) -> Self {
        let years = gtk::Box::new(gtk::Orientation::Horizontal, 60);
        years.add_css_class("numbers-dates");
        years.set_halign(gtk::Align::Center);
        years.set_valign(gtk::Align::Center);
        years.set_can_target(false);

        let start_year = gtk::Label::new(None);
        start_year.add_css_class("year-start");
        let end_year = gtk::Label::new(None);
        end_year.add_css_class("year-end");
        years.append(&start_year);
        years.append(&end_year);

        let fader = gtk::Label::new(None);
        fader.add_css_class("fader-label");
        fader.set_can_target(false);

        widgets.stage.add_overlay(&years);
        widgets.stage.add_overlay(&fader);
        widgets.stage.connect_get_child_position({
            let fader = fader.clone();
            move |stage, child| {
                if child != fader.upcast_ref::<gtk::Widget>() {
                    return None;
                }
                // park the label just right of the anchor the active point turns to
                let geometry = DialGeometry::fit(stage.width() as f64, stage.height() as f64);
                let anchor = geometry.point_center(0, 0.0);
                let (_, natural) = child.preferred_size();
                Some(gdk::Rectangle::new(
                    (anchor.x + ACTIVE_POINT_RADIUS + FADER_GAP) as i32,
                    anchor.y as i32 - natural.height() / 2,
                    natural.width(),
                    natural.height(),
                ))
            }
        });

        let dots = (0..POINT_COUNT)
            .map(|_| {
                let dot = gtk::Box::new(gtk::Orientation::Horizontal, 0);
                dot.add_css_class("point");
                widgets.dots.append(&dot);
                dot
            })
            .collect();

        Self {
            drawing_area: widgets.drawing_area.clone(),
            start_year,
            end_year,
            fader,
            progress: widgets.progress.clone(),
            prev: widgets.prev_button.clone(),
            next: widgets.next_button.clone(),
            dots,
        }
    }
}

fn set_class(widget: &impl IsA<gtk::Widget>, class: &str, on: bool) {
    if on {
        widget.add_css_class(class);
    } else {
        widget.remove_css_class(class);
    }
}

#[derive(Debug)]
pub enum AppMsg {
    Panel(PanelInput),
    DialClick(Point),
    DialHover(Option<Point>),
    Timer(TimerId, Tick),
    Resize,
    Command(Command),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(c) => AppMsg::Command(c),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Panel, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Исторические даты"),
            set_default_size: (1440, 1080),
            add_css_class: "timewheel-window",
            connect_default_width_notify[sender] => move |_| {
                sender.input(AppMsg::Resize);
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 24,
                add_css_class: "content",

                gtk::Label {
                    set_label: "Исторические\nдаты",
                    set_halign: gtk::Align::Start,
                    add_css_class: "historical-dates",
                },

                #[name = "stage"]
                gtk::Overlay {
                    set_vexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        set_content_height: 530,

                        add_controller = gtk::EventControllerMotion {
                            connect_motion[sender] => move |_, x, y| {
                                sender.input(AppMsg::DialHover(Some(Point::new(x, y))));
                            },
                            connect_leave[sender] => move |_| {
                                sender.input(AppMsg::DialHover(None));
                            }
                        },

                        add_controller = gtk::GestureClick {
                            connect_released[sender] => move |_, _, x, y| {
                                sender.input(AppMsg::DialClick(Point::new(x, y)));
                            }
                        }
                    }
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 20,
                    add_css_class: "circle-buttons",

                    #[name = "progress"]
                    gtk::Label {
                        set_halign: gtk::Align::Start,
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 20,

                        #[name = "prev_button"]
                        gtk::Button {
                            set_icon_name: "go-previous-symbolic",
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::Panel(PanelInput::PrevButton));
                            }
                        },

                        #[name = "next_button"]
                        gtk::Button {
                            set_icon_name: "go-next-symbolic",
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::Panel(PanelInput::NextButton));
                            }
                        },
                    }
                },

                #[local_ref]
                slider_root -> gtk::Box {},

                #[name = "dots"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 10,
                    set_halign: gtk::Align::Center,
                    add_css_class: "points-panel",
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (panel, rx) = init;

        theme::load_css();

        let mut slider = EventSlider::new();
        slider.set_events(panel.events());
        let slider_root = slider.root();

        let widgets = view_output!();

        let handles = Handles::attach(&widgets);
        let sched = GlibScheduler::new(sender.input_sender().clone(), root.clone().upcast());

        let mut model = AppModel {
            panel: Rc::new(RefCell::new(panel)),
            hovered: Rc::new(Cell::new(None)),
            sched,
            slider,
            root: root.clone(),
            handles,
        };

        let panel_draw = model.panel.clone();
        let hovered_draw = model.hovered.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let geometry = DialGeometry::fit(width as f64, height as f64);
                let panel = panel_draw.borrow();
                let hovered = hovered_draw.get();
                if let Err(e) = dial::draw(cr, &geometry, panel.dial(), sched::now(), hovered, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        if let Some(width) = window::viewport_width(&root) {
            model
                .panel
                .borrow_mut()
                .set_viewport_width(width, &mut model.sched);
        }
        model.refresh();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Panel(input) => self.dispatch(input),
            AppMsg::Command(command) => {
                log::info!("Control command: {}", command);
                self.dispatch(command.into());
            }
            AppMsg::DialClick(point) => {
                if let Some(index) = self.point_at(point) {
                    self.dispatch(PanelInput::PointClicked(index));
                }
            }
            AppMsg::DialHover(cursor) => {
                let hovered = cursor.and_then(|point| self.point_at(point));
                if hovered != self.hovered.replace(hovered) {
                    self.handles.drawing_area.queue_draw();
                }
                return;
            }
            AppMsg::Timer(id, tick) => {
                let outcome =
                    self.panel
                        .borrow_mut()
                        .on_timer(id, tick, sched::now(), &mut self.sched);
                match outcome {
                    TimerOutcome::Redraw => {}
                    TimerOutcome::SweepSlides => {
                        self.slider.sweep();
                        return;
                    }
                    TimerOutcome::Ignored => return,
                }
            }
            AppMsg::Resize => {
                if let Some(width) = window::viewport_width(&self.root) {
                    let mut panel = self.panel.borrow_mut();
                    panel.set_viewport_width(width, &mut self.sched);
                    if !panel.is_sweeping() {
                        self.slider.clear_marks();
                    }
                }
            }
            AppMsg::ConfigReload => match config::load_config().and_then(Config::into_parts) {
                Ok((sections, timings)) => {
                    self.panel
                        .borrow_mut()
                        .reload(sections, timings, &mut self.sched);
                    self.slider.set_events(self.panel.borrow().events());
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.refresh();
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.panel.borrow_mut().teardown(&mut self.sched);
    }
}

impl AppModel {
    fn point_at(&self, cursor: Point) -> Option<usize> {
        let area = &self.handles.drawing_area;
        let geometry = DialGeometry::fit(area.width() as f64, area.height() as f64);
        let rotation = self.panel.borrow().dial().visual_rotation(sched::now());
        geometry.hit_test(rotation, cursor)
    }

    fn dispatch(&mut self, input: PanelInput) {
        let changed = self
            .panel
            .borrow_mut()
            .handle(input, sched::now(), &mut self.sched);
        if let Some(SectionChanged(index)) = changed {
            log::debug!("Section {} of {}", index + 1, POINT_COUNT);
            self.slider.set_events(self.panel.borrow().events());
        }
    }

    fn refresh(&self) {
        let panel = self.panel.borrow();
        let handles = &self.handles;

        let years = panel.displayed_years();
        handles.start_year.set_label(&years.start.to_string());
        handles.end_year.set_label(&years.end.to_string());
        handles.progress.set_label(&panel.progress_label());

        for (button, enabled) in [
            (&handles.prev, panel.prev_enabled()),
            (&handles.next, panel.next_enabled()),
        ] {
            button.set_sensitive(enabled);
            set_class(button, "disabled", !enabled);
        }

        handles
            .fader
            .set_label(panel.label().map(|l| l.as_str()).unwrap_or_default());
        set_class(&handles.fader, "hidden", !panel.label_visible());

        for (dot, active) in handles.dots.iter().zip(panel.dots()) {
            set_class(dot, "active", active);
        }

        handles.drawing_area.queue_draw();
    }
}
