use gtk::prelude::*;
use gtk4 as gtk;

/// Current width of the window, falling back to its requested default size
/// before the first allocation.
pub fn viewport_width(window: &gtk::ApplicationWindow) -> Option<f64> {
    [window.width(), window.default_width()]
        .into_iter()
        .find(|w| *w > 0)
        .map(f64::from)
}
