use super::{
    ACTIVE_POINT_RADIUS, DialGeometry, IDLE_POINT_RADIUS, LABEL_FONT_SIZE, RING_WIDTH, is_expanded,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use epochs::dial::{Dial, POINT_COUNT};
use palette::Srgba;
use std::f64::consts::PI;
use std::time::Duration;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct PointRenderer<'a> {
    index: usize,
    expanded: bool,
    geometry: &'a DialGeometry,
    rotation: f64,
    label_rotation: f64,
}

impl<'a> PointRenderer<'a> {
    fn new(
        index: usize,
        expanded: bool,
        geometry: &'a DialGeometry,
        rotation: f64,
        label_rotation: f64,
    ) -> Self {
        Self {
            index,
            expanded,
            geometry,
            rotation,
            label_rotation,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if self.expanded {
            self.draw_badge(cr, colors)?;
            self.draw_number(cr, colors)
        } else {
            self.draw_dot(cr, colors)
        }
    }

    fn draw_dot(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.geometry.point_center(self.index, self.rotation);
        set_source(cr, colors.point);
        cr.arc(center.x, center.y, IDLE_POINT_RADIUS, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_badge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.geometry.point_center(self.index, self.rotation);
        cr.arc(center.x, center.y, ACTIVE_POINT_RADIUS, 0.0, 2.0 * PI);
        set_source(cr, colors.badge);
        cr.fill_preserve()?;
        set_source(cr, colors.ring);
        cr.set_line_width(RING_WIDTH);
        cr.stroke()
    }

    /// The number rides on the turned dial but is turned back by the label
    /// rotation, so it always reads upright.
    fn draw_number(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = (self.index + 1).to_string();
        let center = self.geometry.point_center(self.index, self.rotation);

        cr.save()?;
        cr.translate(center.x, center.y);
        cr.rotate((self.rotation + self.label_rotation).to_radians());
        set_source(cr, colors.text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE);
        if let Ok(ext) = cr.text_extents(&text) {
            cr.move_to(
                -ext.width() / 2.0 - ext.x_bearing(),
                -ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(&text)?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    geometry: &DialGeometry,
    dial: &Dial,
    now: Duration,
    hovered: Option<usize>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    draw_ring(cr, geometry, colors)?;

    let rotation = dial.visual_rotation(now);
    let label_rotation = dial.label_rotation(now);
    for index in 0..POINT_COUNT {
        PointRenderer::new(
            index,
            is_expanded(index, dial.active(), hovered),
            geometry,
            rotation,
            label_rotation,
        )
        .draw(cr, colors)?;
    }
    Ok(())
}

fn draw_ring(
    cr: &Context,
    geometry: &DialGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.ring);
    cr.set_line_width(RING_WIDTH);
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        0.0,
        2.0 * PI,
    );
    cr.stroke()
}
