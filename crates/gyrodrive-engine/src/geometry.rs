//! Screen-space geometry
//!
//! Coordinates follow the renderer: origin at the top-left, y grows
//! downwards, units are pixels.

use serde::Serialize;

use crate::config::GameConfig;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the two rectangles overlap with a non-zero area.
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Fixed geometry derived once from a [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub screen: Size,
    /// Drivable area; taller than the screen so a zoomed-out camera never
    /// runs past its end.
    pub road: Rect,
    /// Car rectangle at the start of a run.
    pub car_start: Rect,
    pub obstacle_size: Size,
}

impl Layout {
    pub fn from_config(config: &GameConfig) -> Self {
        let sx = config.screen.width;
        let sy = config.screen.height;

        let road_width = sx * config.road.width_fraction;
        let road = Rect::new(
            (sx - road_width) / 2.0,
            0.0,
            road_width,
            sy * config.motion.max_zoom,
        );

        let car_width = sx * config.car.width_fraction;
        let car_height = sy * config.car.height_fraction;
        let car_start = Rect::new(
            road.x + road.width / 2.0 - car_width / 2.0,
            sy - car_height - sy * config.car.bottom_margin_fraction,
            car_width,
            car_height,
        );

        Self {
            screen: Size {
                width: sx,
                height: sy,
            },
            road,
            car_start,
            obstacle_size: Size {
                width: sx * config.obstacle.width_fraction,
                height: sy * config.obstacle.height_fraction,
            },
        }
    }

    /// Leftmost allowed car x.
    pub fn car_min_x(&self) -> f64 {
        self.road.x
    }

    /// Rightmost allowed car x; the whole car stays on the road.
    pub fn car_max_x(&self) -> f64 {
        self.road.right() - self.car_start.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_default_layout() {
        let layout = Layout::from_config(&GameConfig::default());
        assert!((layout.road.x - 480.0).abs() < 1e-9);
        assert!((layout.road.width - 960.0).abs() < 1e-9);
        assert!((layout.road.height - 2160.0).abs() < 1e-9);
        assert!((layout.car_start.width - 120.0).abs() < 1e-9);
        // Car is centred on the road.
        assert!((layout.car_start.x - 900.0).abs() < 1e-9);
        // 1080 - 179.28 - 54
        assert!((layout.car_start.y - 846.72).abs() < 1e-6);
        assert!((layout.car_max_x() - 1320.0).abs() < 1e-9);
    }
}
