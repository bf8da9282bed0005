use epochs::section::Event;
use epochs::visibility::{Bounds, PARTIALLY_VISIBLE_CLASS, classify};
use gtk::prelude::*;
use gtk4 as gtk;

pub const SLIDE_SPACING: i32 = 20;
const WHEEL_STEP: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Back,
    Forward,
}

/// Horizontal strip of event slides with prev/next arrows. The wheel scrolls
/// it sideways whichever axis it reports on.
pub struct EventSlider {
    root: gtk::Box,
    scroller: gtk::ScrolledWindow,
    strip: gtk::Box,
    slides: Vec<gtk::Box>,
}

impl EventSlider {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        root.add_css_class("slider-wrapper");

        let strip = gtk::Box::new(gtk::Orientation::Horizontal, SLIDE_SPACING);
        strip.add_css_class("slider");

        let scroller = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::External)
            .vscrollbar_policy(gtk::PolicyType::Never)
            .hexpand(true)
            .child(&strip)
            .build();

        let wheel = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::BOTH_AXES);
        wheel.set_propagation_phase(gtk::PropagationPhase::Capture);
        wheel.connect_scroll({
            let scroller = scroller.clone();
            move |_, dx, dy| {
                // force to the horizontal axis
                let delta = if dx.abs() > dy.abs() { dx } else { dy };
                let adj = scroller.hadjustment();
                adj.set_value(adj.value() + delta * WHEEL_STEP);
                glib::Propagation::Stop
            }
        });
        scroller.add_controller(wheel);

        let prev = Self::nav_button("go-previous-symbolic", "swiper-button-prev");
        let next = Self::nav_button("go-next-symbolic", "swiper-button-next");
        for (button, nav) in [(&prev, Nav::Back), (&next, Nav::Forward)] {
            let scroller = scroller.clone();
            let strip = strip.clone();
            button.connect_clicked(move |_| Self::step(&scroller, &strip, nav));
        }

        root.append(&prev);
        root.append(&scroller);
        root.append(&next);

        Self {
            root,
            scroller,
            strip,
            slides: Vec::new(),
        }
    }

    pub fn root(&self) -> &gtk::Box {
        &self.root
    }

    fn nav_button(icon: &str, class: &str) -> gtk::Button {
        let button = gtk::Button::from_icon_name(icon);
        button.add_css_class(class);
        button.set_valign(gtk::Align::Center);
        button
    }

    pub fn set_events(&mut self, events: &[Event]) {
        for slide in self.slides.drain(..) {
            self.strip.remove(&slide);
        }

        for event in events {
            let slide = Self::slide(event);
            self.strip.append(&slide);
            self.slides.push(slide);
        }

        self.scroller.hadjustment().set_value(0.0);
    }

    fn slide(event: &Event) -> gtk::Box {
        let slide = gtk::Box::new(gtk::Orientation::Vertical, 15);
        slide.add_css_class("slide");

        let year = gtk::Label::new(Some(event.year.to_string().as_str()));
        year.add_css_class("event-year");
        year.set_xalign(0.0);

        let text = gtk::Label::new(Some(event.text.as_str()));
        text.add_css_class("event-text");
        text.set_xalign(0.0);
        text.set_wrap(true);
        text.set_max_width_chars(30);

        slide.append(&year);
        slide.append(&text);
        slide
    }

    /// Scrolls so the neighbouring slide's left edge lines up with the
    /// scroller's.
    fn step(scroller: &gtk::ScrolledWindow, strip: &gtk::Box, nav: Nav) {
        let adj = scroller.hadjustment();
        let current = adj.value();

        let mut offsets = Vec::new();
        let mut child = strip.first_child();
        while let Some(widget) = child {
            if let Some(rect) = widget.compute_bounds(strip) {
                offsets.push(rect.x() as f64);
            }
            child = widget.next_sibling();
        }

        let target = match nav {
            Nav::Forward => offsets.into_iter().find(|x| *x > current + 1.0),
            Nav::Back => offsets.into_iter().rev().find(|x| *x < current - 1.0),
        };
        if let Some(x) = target {
            adj.set_value(x.min(adj.upper() - adj.page_size()).max(adj.lower()));
        }
    }

    /// Marks slides cut off by either edge of the scroller. Slides that are not
    /// laid out yet are left alone.
    pub fn sweep(&self) {
        let container = Bounds::from_origin(0.0, self.scroller.width() as f64);
        if container.right <= 0.0 {
            return;
        }

        for slide in &self.slides {
            let Some(rect) = slide.compute_bounds(&self.scroller) else {
                continue;
            };
            let bounds = Bounds::from_origin(rect.x() as f64, rect.width() as f64);
            if classify(bounds, container).is_partial() {
                slide.add_css_class(PARTIALLY_VISIBLE_CLASS);
            } else {
                slide.remove_css_class(PARTIALLY_VISIBLE_CLASS);
            }
        }
    }

    pub fn clear_marks(&self) {
        for slide in &self.slides {
            slide.remove_css_class(PARTIALLY_VISIBLE_CLASS);
        }
    }
}

impl Default for EventSlider {
    fn default() -> Self {
        Self::new()
    }
}
