//! Variable-width outline for freehand strokes.
//!
//! Raw samples are smoothed with a uniform Catmull-Rom spline, each smoothed
//! sample gets a width from its pressure, and the outline follows the offset
//! curves on both sides of the centerline with round caps at both ends.

use super::mark::{Mark, MarkPoint};
use super::path::{Outline, Paint, PathCommand};
use crate::util::Point;
use std::f64::consts::PI;

/// Strokes with fewer samples than this are drawn as a dot.
pub const DOT_THRESHOLD: usize = 10;

/// Thinnest width as a fraction of the stroke size.
pub const THIN_RATIO: f64 = 0.382;

/// Spline subdivisions between two raw samples.
const SEGMENTS_PER_SPAN: usize = 4;

/// Intermediate vertices on each round cap.
const CAP_STEPS: usize = 8;

/// Pressure assumed for the first sample when it has to be simulated.
const INITIAL_SIMULATED_PRESSURE: f64 = 0.5;

/// How quickly simulated pressure follows the pointer speed.
const PRESSURE_RESPONSE: f64 = 0.275;

/// Builds the outline for a freehand mark.
pub fn outline(mark: &Mark) -> Outline {
    if mark.points.len() < DOT_THRESHOLD {
        return dot(mark);
    }

    let pressures = stroke_pressures(mark);
    let samples = smooth(&mark.points, &pressures);
    let (thin, thick) = width_range(mark);

    let ribbon: Vec<(Point, f64)> = samples
        .into_iter()
        .map(|(p, pressure)| (p, (thin + (thick - thin) * pressure) / 2.0))
        .collect();

    ribbon_outline(&ribbon).unwrap_or_else(|| dot(mark))
}

/// Filled circle with diameter equal to the stroke size.
fn dot(mark: &Mark) -> Outline {
    let center = mark
        .points
        .first()
        .map(MarkPoint::position)
        .unwrap_or_default();
    let radius = mark.size / 2.0;
    let mut outline = Outline::new(Paint::Fill);
    outline.commands.push(PathCommand::Ellipse {
        center,
        rx: radius,
        ry: radius,
    });
    outline
}

/// `(thinnest, widest)` stroke width for a mark.
pub fn width_range(mark: &Mark) -> (f64, f64) {
    let thin = mark.size * THIN_RATIO;
    let thick = if mark.pressure_enabled {
        mark.size
    } else {
        mark.size / 2.0
    };
    (thin, thick)
}

/// Per-sample pressure: the device reading when it is usable, otherwise a
/// value synthesized from stroke velocity and acceleration.
pub fn stroke_pressures(mark: &Mark) -> Vec<f64> {
    if mark.pressure_enabled && mark.pointer_kind.reports_pressure() {
        mark.points.iter().map(|p| p.pressure.clamp(0.0, 1.0)).collect()
    } else {
        simulate_pressure(&mark.points, mark.size)
    }
}

/// Fast strokes thin out, slow strokes fill in. Speed is normalized against
/// the stroke size; sudden speed changes make the pressure react faster.
fn simulate_pressure(points: &[MarkPoint], size: f64) -> Vec<f64> {
    let mut pressures = Vec::with_capacity(points.len());
    let Some(first) = points.first() else {
        return pressures;
    };

    let size = size.max(f64::EPSILON);
    let mut pressure = INITIAL_SIMULATED_PRESSURE;
    let mut previous = first.position();
    let mut previous_speed = 0.0;
    pressures.push(pressure);

    for point in &points[1..] {
        let position = point.position();
        let speed = (previous.distance(position) / size).min(1.0);
        let acceleration = (speed - previous_speed).abs();
        let target = 1.0 - speed;
        let rate = ((speed + acceleration) * PRESSURE_RESPONSE).min(1.0);
        pressure = (pressure + (target - pressure) * rate).clamp(0.0, 1.0);

        pressures.push(pressure);
        previous = position;
        previous_speed = speed;
    }

    pressures
}

/// Catmull-Rom interpolation through the raw samples with the end samples
/// duplicated, carrying pressure linearly along each span.
fn smooth(points: &[MarkPoint], pressures: &[f64]) -> Vec<(Point, f64)> {
    let n = points.len();
    let at = |i: isize| -> Point {
        let clamped = i.clamp(0, n as isize - 1) as usize;
        points[clamped].position()
    };

    let mut out = Vec::with_capacity((n - 1) * SEGMENTS_PER_SPAN + 1);
    for i in 0..n - 1 {
        let i = i as isize;
        let (p0, p1, p2, p3) = (at(i - 1), at(i), at(i + 1), at(i + 2));
        let (w1, w2) = (pressures[i as usize], pressures[i as usize + 1]);
        for step in 0..SEGMENTS_PER_SPAN {
            let t = step as f64 / SEGMENTS_PER_SPAN as f64;
            out.push((catmull_rom(p0, p1, p2, p3, t), w1 + (w2 - w1) * t));
        }
    }
    out.push((points[n - 1].position(), pressures[n - 1]));
    out
}

fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let tt = t * t;
    let ttt = tt * t;
    let q0 = -ttt + 2.0 * tt - t;
    let q1 = 3.0 * ttt - 5.0 * tt + 2.0;
    let q2 = -3.0 * ttt + 4.0 * tt + t;
    let q3 = ttt - tt;
    Point::new(
        0.5 * (p0.x * q0 + p1.x * q1 + p2.x * q2 + p3.x * q3),
        0.5 * (p0.y * q0 + p1.y * q1 + p2.y * q2 + p3.y * q3),
    )
}

/// Closed silhouette around `(center, radius)` samples.
///
/// Returns `None` when the samples never move, since no direction exists to
/// offset against.
fn ribbon_outline(samples: &[(Point, f64)]) -> Option<Outline> {
    let normals = normals(samples)?;

    let left: Vec<Point> = samples
        .iter()
        .zip(&normals)
        .map(|(&(c, r), n)| Point::new(c.x + n.x * r, c.y + n.y * r))
        .collect();
    let right: Vec<Point> = samples
        .iter()
        .zip(&normals)
        .map(|(&(c, r), n)| Point::new(c.x - n.x * r, c.y - n.y * r))
        .collect();

    let mut outline = Outline::new(Paint::Fill);
    outline.move_to(left[0]);
    for p in &left[1..] {
        outline.line_to(*p);
    }

    // End cap sweeps from the left side, around the stroke tip, to the right side.
    let (end, end_radius) = samples[samples.len() - 1];
    let end_normal = normals[normals.len() - 1];
    push_cap(&mut outline, end, end_radius, end_normal.y.atan2(end_normal.x));

    for p in right.iter().rev() {
        outline.line_to(*p);
    }

    let (start, start_radius) = samples[0];
    let start_normal = normals[0];
    push_cap(
        &mut outline,
        start,
        start_radius,
        start_normal.y.atan2(start_normal.x) + PI,
    );

    outline.close();
    Some(outline)
}

/// Half-circle of intermediate vertices, clockwise from `from_angle`.
fn push_cap(outline: &mut Outline, center: Point, radius: f64, from_angle: f64) {
    for step in 1..=CAP_STEPS {
        let angle = from_angle - PI * step as f64 / (CAP_STEPS + 1) as f64;
        outline.line_to(Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        ));
    }
}

/// Unit normals (tangent rotated a quarter turn) for every sample. Samples
/// with no local movement reuse the nearest known normal.
fn normals(samples: &[(Point, f64)]) -> Option<Vec<Point>> {
    let n = samples.len();
    let mut normals: Vec<Option<Point>> = (0..n)
        .map(|i| {
            let prev = samples[i.saturating_sub(1)].0;
            let next = samples[(i + 1).min(n - 1)].0;
            let (dx, dy) = (next.x - prev.x, next.y - prev.y);
            let len = dx.hypot(dy);
            (len > f64::EPSILON).then(|| Point::new(-dy / len, dx / len))
        })
        .collect();

    let first_known = normals.iter().flatten().next().copied()?;
    let mut last = first_known;
    for normal in normals.iter_mut() {
        match normal {
            Some(n) => last = *n,
            None => *normal = Some(last),
        }
    }
    Some(normals.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::mark::MarkKind;
    use crate::input::{InputSample, ToolKind, ToolSettings};

    fn stroke(points: &[(f64, f64)], size: f64, pressure_enabled: bool) -> Mark {
        let mut settings = ToolSettings::default();
        settings.size = size;
        settings.pressure_enabled = pressure_enabled;
        let mut mark = Mark::begin(
            ToolKind::Pencil,
            InputSample::mouse(points[0].0, points[0].1),
            &settings,
        );
        for &(x, y) in &points[1..] {
            mark.add_point(InputSample::mouse(x, y));
        }
        mark
    }

    fn horizontal(count: usize) -> Vec<(f64, f64)> {
        (0..count).map(|i| (i as f64 * 10.0, 0.0)).collect()
    }

    #[test]
    fn short_strokes_are_dots() {
        let mark = stroke(&horizontal(9), 16.0, false);
        let outline = outline(&mark);
        assert_eq!(outline.paint, Paint::Fill);
        assert_eq!(
            outline.commands,
            vec![PathCommand::Ellipse {
                center: Point::new(0.0, 0.0),
                rx: 8.0,
                ry: 8.0,
            }]
        );
    }

    #[test]
    fn ten_sample_stroke_is_a_ribbon_of_bounded_width() {
        let mark = stroke(&horizontal(10), 16.0, false);
        assert_eq!(mark.kind, MarkKind::Freehand);
        let outline = outline(&mark);
        assert_eq!(outline.paint, Paint::Fill);
        assert_eq!(outline.commands.last(), Some(&PathCommand::ClosePath));

        let vertices: Vec<Point> = outline.vertices().collect();
        assert!(vertices.len() > 2 * 9 * SEGMENTS_PER_SPAN);

        let thin = 16.0 * THIN_RATIO / 2.0;
        let thick = 8.0 / 2.0;
        let mut widest: f64 = 0.0;
        for v in &vertices {
            assert!(v.y.abs() <= thick + 1e-9, "vertex {v:?} outside ribbon");
            assert!(v.x >= -thick - 1e-9 && v.x <= 90.0 + thick + 1e-9);
            widest = widest.max(v.y.abs());
        }
        assert!(widest >= thin - 1e-9);

        // Offsets along the shaft sit between the thin and thick half-widths.
        for v in vertices.iter().filter(|v| v.x > 0.0 && v.x < 90.0) {
            if v.y.abs() > 1e-6 {
                let half = v.y.abs();
                assert!(half >= thin - 1e-9 && half <= thick + 1e-9);
            }
        }

        // Ribbon is centered on the line.
        let above = vertices.iter().filter(|v| v.y > 1e-6).count();
        let below = vertices.iter().filter(|v| v.y < -1e-6).count();
        assert_eq!(above, below);
    }

    #[test]
    fn pressure_widens_pen_strokes() {
        let mut settings = ToolSettings::default();
        settings.size = 10.0;
        let mut mark = Mark::begin(ToolKind::Pencil, InputSample::pen(0.0, 0.0, 1.0), &settings);
        for i in 1..12 {
            mark.add_point(InputSample::pen(i as f64 * 5.0, 0.0, 1.0));
        }
        let widest = outline(&mark)
            .vertices()
            .map(|v| v.y.abs())
            .fold(0.0, f64::max);
        assert!((widest - 5.0).abs() < 1e-9);
    }

    #[test]
    fn simulated_pressure_stays_in_unit_range() {
        let points: Vec<(f64, f64)> = (0..30)
            .map(|i| ((i * i) as f64, (i % 3) as f64 * 7.0))
            .collect();
        let mark = stroke(&points, 4.0, true);
        let pressures = stroke_pressures(&mark);
        assert_eq!(pressures.len(), points.len());
        assert!(pressures.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(pressures.last().unwrap() < &INITIAL_SIMULATED_PRESSURE);
    }

    #[test]
    fn stationary_stroke_falls_back_to_dot() {
        let mark = stroke(&[(5.0, 5.0); 12], 16.0, false);
        let outline = outline(&mark);
        assert!(matches!(outline.commands[0], PathCommand::Ellipse { .. }));
    }

    #[test]
    fn freehand_outline_is_deterministic() {
        let points: Vec<(f64, f64)> = (0..20)
            .map(|i| (i as f64 * 3.0, (i as f64 * 0.7).sin() * 12.0))
            .collect();
        let mark = stroke(&points, 16.0, true);
        assert_eq!(outline(&mark), outline(&mark));
    }
}
