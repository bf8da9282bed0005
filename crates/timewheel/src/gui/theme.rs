use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub ring: Srgba<f64>,
    pub point: Srgba<f64>,
    pub badge: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            ring: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.26, 0.28, 0.39, 0.2),
                Some(0.2),
            ),
            point: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.26, 0.28, 0.39, 1.0),
                None,
            ),
            badge: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.96, 0.97, 0.99, 1.0),
                Some(1.0),
            ),
            text: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.26, 0.28, 0.39, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.content {
    padding: 40px 80px;
}

.historical-dates {
    font-size: 42px;
    font-weight: bold;
    color: #42567a;
}

.year-start, .year-end {
    font-size: 160px;
    font-weight: bold;
}

.year-start {
    color: #5d5fef;
}

.year-end {
    color: #ef5da8;
}

.fader-label {
    font-size: 20px;
    font-weight: bold;
    color: #42567a;
    transition: opacity 300ms ease;
}

.fader-label.hidden {
    opacity: 0;
}

.circle-buttons button {
    border-radius: 9999px;
    min-width: 50px;
    min-height: 50px;
}

.circle-buttons button.disabled {
    opacity: 0.5;
}

.points-panel .point {
    min-width: 6px;
    min-height: 6px;
    border-radius: 9999px;
    background-color: alpha(#42567a, 0.4);
}

.points-panel .point.active {
    background-color: #42567a;
}

.slide {
    min-width: 320px;
    transition: opacity 300ms ease;
}

.slide.partially-visible {
    opacity: 0.4;
}

.event-year {
    font-size: 25px;
    color: #3877ee;
}

.event-text {
    font-size: 20px;
    color: #42567a;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
