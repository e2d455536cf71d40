//! Canvas framing and pixel projection for orbit playback.
//!
//! The canvas is 600 px square with a 50 px margin, so the orbit set is fitted into 500 px.
//! Orbit-local coordinates (y down) are rotated by the argument of periapsis around the Earth
//! and shifted to the canvas centre.

pub use framing::{Framing, ellipse_bounding_box};
pub use canvas::{CanvasFrame, Viewport, speed_label};

/// Fitting the orbits into the drawable square.
pub mod framing {
    use kepler_core::vector::Vector2;
    use kepler_orbits::Orbit;
    use serde::Serialize;

    /// Width and height of an ellipse with semi-axes `a`, `b` rotated by `angle` radians.
    pub fn ellipse_bounding_box(a: f64, b: f64, angle: f64) -> [f64; 2] {
        let (sin, cos) = angle.sin_cos();
        [
            2.0 * (a * a * cos * cos + b * b * sin * sin).sqrt(),
            2.0 * (a * a * sin * sin + b * b * cos * cos).sqrt(),
        ]
    }

    /// Square viewing box around a set of orbits.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Framing {
        /// Side of the square box (km).
        pub max_length_km: f64,
        /// Earth position relative to the box centre (km, y up).
        pub earth_offset_km: Vector2,
    }

    impl Framing {
        /// Box around a single orbit; the ellipse centre sits in the middle of the canvas.
        pub fn for_orbit(orbit: &Orbit) -> Self {
            Self::for_orbits(std::slice::from_ref(orbit))
        }

        /// Box enclosing every orbit of a sequence, all sharing the Earth as focus.
        ///
        /// Extents are measured from the Earth on each side; the box is the larger of the two
        /// spans, and the shorter axis is centred inside it.
        pub fn for_orbits(orbits: &[Orbit]) -> Self {
            let mut left: f64 = 0.0;
            let mut right: f64 = 0.0;
            let mut bottom: f64 = 0.0;
            let mut top: f64 = 0.0;

            for orbit in orbits {
                let a = orbit.semi_major_axis_km();
                if orbit.is_circular() {
                    left = left.max(a);
                    right = right.max(a);
                    bottom = bottom.max(a);
                    top = top.max(a);
                    continue;
                }

                let arg = orbit.argument_of_periapsis();
                let [width, height] = ellipse_bounding_box(a, orbit.semi_minor_axis_km(), arg);
                let focal_x = arg.cos() * orbit.focal_distance_km();
                let focal_y = arg.sin() * orbit.focal_distance_km();

                left = left.max(width / 2.0 + focal_x);
                right = right.max(width / 2.0 - focal_x);
                bottom = bottom.max(height / 2.0 + focal_y);
                top = top.max(height / 2.0 - focal_y);
            }

            let span_x = left + right;
            let span_y = bottom + top;

            Framing {
                max_length_km: span_x.max(span_y),
                earth_offset_km: [span_x / 2.0 - right, span_y / 2.0 - top],
            }
        }
    }
}

/// Pixel scale, projection, and labels.
pub mod canvas {
    use kepler_core::constants::EARTH_RADIUS_KM;
    use kepler_core::time::HOURS_PER_DAY;
    use kepler_core::vector::{self, Vector2};
    use kepler_orbits::BurnVector;
    use kepler_sim::Frame;
    use serde::Serialize;

    use crate::framing::Framing;

    /// Side of the square canvas (px).
    pub const CANVAS_SIZE_PX: f64 = 600.0;
    /// Side of the area the orbits are fitted into (px).
    pub const DRAWING_SIZE_PX: f64 = 500.0;
    /// Length of a velocity or acceleration arrow at ratio 1 (px).
    pub const MAX_VECTOR_PX: f64 = 250.0;
    /// Length of the largest burn arrow (px).
    pub const MAX_BURN_VECTOR_PX: f64 = 100.0;
    /// Earth diameter drawn to scale (km).
    pub const EARTH_DIAMETER_KM: f64 = 2.0 * EARTH_RADIUS_KM;

    /// Speed readout: `N h/s`, or `1 day/s` at the top of the range.
    pub fn speed_label(speed_h_s: f64) -> String {
        if speed_h_s == HOURS_PER_DAY {
            "1 day/s".to_string()
        } else {
            format!("{speed_h_s} h/s")
        }
    }

    /// Everything a renderer needs to draw one frame, in absolute canvas pixels (y down).
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CanvasFrame {
        pub title: &'static str,
        pub satellite_px: Vector2,
        pub velocity_end_px: Option<Vector2>,
        pub acceleration_end_px: Option<Vector2>,
        pub earth_px: Vector2,
        pub earth_diameter_px: f64,
        pub earth_rotation: f64,
        pub time_label: String,
        pub speed_label: String,
        pub scale_label: String,
    }

    /// Fixed mapping from kilometres to canvas pixels for one simulation.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Viewport {
        framing: Framing,
        km_per_pixel: f64,
    }

    impl Viewport {
        pub fn new(framing: Framing) -> Self {
            Viewport {
                framing,
                km_per_pixel: framing.max_length_km / DRAWING_SIZE_PX,
            }
        }

        pub fn framing(&self) -> &Framing {
            &self.framing
        }

        pub fn km_per_pixel(&self) -> f64 {
            self.km_per_pixel
        }

        pub fn earth_diameter_px(&self) -> f64 {
            EARTH_DIAMETER_KM / self.km_per_pixel
        }

        /// Distance-scale readout; the scale bar spans a fifth of the framed length.
        pub fn scale_label(&self) -> String {
            format!("{} km", (self.framing.max_length_km / 5.0).floor())
        }

        /// Earth centre in absolute canvas pixels.
        pub fn earth_px(&self) -> Vector2 {
            let [x, y] = self.framing.earth_offset_km;
            let centre = CANVAS_SIZE_PX / 2.0;
            [centre + x / self.km_per_pixel, centre - y / self.km_per_pixel]
        }

        /// Map an orbit-local point (km) to absolute canvas pixels.
        pub fn to_canvas(&self, point_km: Vector2, argument_of_periapsis: f64) -> Vector2 {
            let local_px = vector::scale(&point_km, 1.0 / self.km_per_pixel);
            self.local_px_to_canvas(local_px, argument_of_periapsis)
        }

        /// Canvas end point of an arrow starting at `anchor_km` with direction `ratio`.
        pub fn arrow_end(
            &self,
            anchor_km: Vector2,
            ratio: Vector2,
            max_px: f64,
            argument_of_periapsis: f64,
        ) -> Vector2 {
            let anchor_px = vector::scale(&anchor_km, 1.0 / self.km_per_pixel);
            let tip_px = vector::add(&anchor_px, &vector::scale(&ratio, max_px));
            self.local_px_to_canvas(tip_px, argument_of_periapsis)
        }

        /// Start and end of a burn arrow in canvas pixels.
        pub fn burn_arrow(&self, burn: &BurnVector, argument_of_periapsis: f64) -> [Vector2; 2] {
            [
                self.to_canvas(burn.anchor_km, argument_of_periapsis),
                self.arrow_end(
                    burn.anchor_km,
                    burn.ratio,
                    MAX_BURN_VECTOR_PX,
                    argument_of_periapsis,
                ),
            ]
        }

        /// Project a simulation frame onto the canvas.
        pub fn project(&self, frame: &Frame) -> CanvasFrame {
            let arg = frame.argument_of_periapsis;
            let arrow = |ratio: Vector2| self.arrow_end(frame.position_km, ratio, MAX_VECTOR_PX, arg);

            CanvasFrame {
                title: frame.role.title(),
                satellite_px: self.to_canvas(frame.position_km, arg),
                velocity_end_px: frame.velocity_ratio.map(arrow),
                acceleration_end_px: frame.acceleration_ratio.map(arrow),
                earth_px: self.earth_px(),
                earth_diameter_px: self.earth_diameter_px(),
                earth_rotation: frame.earth_rotation,
                time_label: format!("Time: {} h", frame.elapsed_hours),
                speed_label: speed_label(frame.speed_h_s),
                scale_label: self.scale_label(),
            }
        }

        // The canvas turns clockwise for positive angles, so a counterclockwise argument of
        // periapsis is applied as a negative screen rotation.
        fn local_px_to_canvas(&self, local_px: Vector2, argument_of_periapsis: f64) -> Vector2 {
            let rotated = vector::rotate(&local_px, -argument_of_periapsis);
            vector::add(&self.earth_px(), &rotated)
        }
    }
}
