use epochs::dial::{Dial, POINT_COUNT, Point};

pub mod view;

pub use view::draw;

pub const DIAL_MARGIN: f64 = 36.0; // room for the enlarged active point
pub const ACTIVE_POINT_RADIUS: f64 = 28.0;
pub const IDLE_POINT_RADIUS: f64 = 3.0;
pub const HIT_RADIUS: f64 = 28.0;
pub const RING_WIDTH: f64 = 1.0;
pub const LABEL_FONT_SIZE: f64 = 20.0;

/// Where the dial sits inside its drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub radius: f64,
}

impl DialGeometry {
    /// Largest circle that fits the area, keeping `DIAL_MARGIN` free around it.
    pub fn fit(width: f64, height: f64) -> Self {
        let radius = ((width.min(height) / 2.0) - DIAL_MARGIN).max(0.0);
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius,
        }
    }

    /// Screen position of point `index` with the dial turned by `rotation`
    /// degrees.
    pub fn point_center(&self, index: usize, rotation: f64) -> Point {
        // nominal position is in percent of the dial's box; re-centre and scale
        let nominal = Dial::point_position(index);
        let (x, y) = (
            (nominal.x - 50.0) / 50.0 * self.radius,
            (nominal.y - 50.0) / 50.0 * self.radius,
        );
        let (sin, cos) = rotation.to_radians().sin_cos();
        Point::new(
            self.center.x + x * cos - y * sin,
            self.center.y + x * sin + y * cos,
        )
    }

    pub fn hit_test(&self, rotation: f64, cursor: Point) -> Option<usize> {
        (0..POINT_COUNT)
            .map(|i| {
                let p = self.point_center(i, rotation);
                (i, (cursor.x - p.x).hypot(cursor.y - p.y))
            })
            .filter(|(_, dist)| *dist <= HIT_RADIUS)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }
}

/// Points grow into a numbered badge when active or under the pointer.
pub fn is_expanded(index: usize, active: usize, hovered: Option<usize>) -> bool {
    index == active || hovered == Some(index)
}
