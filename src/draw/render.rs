//! Cairo-based rendering of outlines onto the live and committed layers.

use std::fs::File;
use std::path::Path;

use super::color::{Color, ERASE_INDICATOR};
use super::history::History;
use super::mark::{CompletedMark, Mark};
use super::path::{self, Outline, Paint, PathCommand};
use super::surfaces::{DrawError, Surfaces, clear_layer};
use crate::util;

/// Appends `outline` to the current cairo path.
pub fn build_path(ctx: &cairo::Context, outline: &Outline) {
    ctx.new_path();
    for command in &outline.commands {
        match *command {
            PathCommand::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathCommand::LineTo(p) => ctx.line_to(p.x, p.y),
            PathCommand::Ellipse { center, rx, ry } => {
                // A zero radius would make the scale matrix singular
                if rx <= 0.0 || ry <= 0.0 {
                    continue;
                }
                ctx.new_sub_path();
                ctx.save().ok();
                ctx.translate(center.x, center.y);
                ctx.scale(rx, ry);
                ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
                ctx.restore().ok();
                ctx.close_path();
            }
            PathCommand::ClosePath => ctx.close_path(),
        }
    }
}

/// Fills or strokes `outline` with the current source and operator.
fn paint_outline(ctx: &cairo::Context, outline: &Outline, size: f64) {
    build_path(ctx, outline);
    match outline.paint {
        Paint::Fill => {
            ctx.set_fill_rule(cairo::FillRule::Winding);
            let _ = ctx.fill();
        }
        Paint::Stroke => {
            ctx.set_line_width(size);
            ctx.set_line_cap(cairo::LineCap::Round);
            ctx.set_line_join(cairo::LineJoin::Round);
            let _ = ctx.stroke();
        }
    }
}

fn set_source(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Clears the live layer and paints the in-progress mark, if any.
///
/// Eraser strokes are shown in the neutral erase indicator color so the
/// user sees what will be removed.
pub fn redraw_live(surfaces: &Surfaces, mark: Option<&Mark>) -> Result<(), DrawError> {
    clear_layer(surfaces.live())?;
    let Some(mark) = mark else {
        return Ok(());
    };

    let ctx = cairo::Context::new(surfaces.live())?;
    let color = if mark.eraser { ERASE_INDICATOR } else { mark.color };
    set_source(&ctx, color);
    paint_outline(&ctx, &path::outline_for(mark), mark.size);
    Ok(())
}

/// Clears the committed layer and repaints every committed mark in commit
/// order, each at its eased fade opacity. Eraser marks only remove ink
/// painted before them, so the order matters.
pub fn redraw_committed(surfaces: &Surfaces, history: &History) -> Result<(), DrawError> {
    clear_layer(surfaces.committed())?;
    if history.is_empty() {
        return Ok(());
    }

    let ctx = cairo::Context::new(surfaces.committed())?;
    for mark in history.iter() {
        render_committed_mark(&ctx, mark);
    }
    Ok(())
}

/// Paints one committed mark using its cached outline.
pub fn render_committed_mark(ctx: &cairo::Context, mark: &CompletedMark) {
    let alpha = util::ease_out_quad(mark.strength.clamp(0.0, 1.0));
    if alpha <= 0.0 {
        return;
    }

    let _ = ctx.save();
    if mark.is_eraser() {
        ctx.set_operator(cairo::Operator::DestOut);
        ctx.set_source_rgba(0.0, 0.0, 0.0, alpha);
    } else {
        ctx.set_operator(cairo::Operator::Over);
        set_source(ctx, mark.mark.color.with_alpha(alpha));
    }
    paint_outline(ctx, &mark.outline, mark.mark.size);
    let _ = ctx.restore();
}

/// Flattens committed under live into a new surface.
pub fn composite(surfaces: &Surfaces) -> Result<cairo::ImageSurface, DrawError> {
    let size = surfaces.size();
    let out = cairo::ImageSurface::create(cairo::Format::ARgb32, size.width, size.height)?;
    {
        let ctx = cairo::Context::new(&out)?;
        ctx.set_source_surface(surfaces.committed(), 0.0, 0.0)?;
        ctx.paint()?;
        ctx.set_source_surface(surfaces.live(), 0.0, 0.0)?;
        ctx.paint()?;
    }
    out.flush();
    Ok(out)
}

/// Writes the composited layers to a PNG file.
pub fn write_png(surfaces: &Surfaces, path: &Path) -> Result<(), DrawError> {
    let image = composite(surfaces)?;
    let mut file = File::create(path)?;
    image.write_to_png(&mut file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CanvasSize;
    use crate::input::{InputSample, ToolKind, ToolSettings};
    use std::time::Duration;

    fn alpha_at(surface: &cairo::ImageSurface, x: i32, y: i32) -> u8 {
        surface.flush();
        let stride = surface.stride() as usize;
        let mut alpha = 0;
        surface
            .with_data(|data| {
                // ARGB32 is native-endian; alpha is the high byte of each pixel
                let offset = y as usize * stride + x as usize * 4;
                let pixel = u32::from_ne_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]);
                alpha = (pixel >> 24) as u8;
            })
            .unwrap();
        alpha
    }

    fn rect(tool: ToolKind, from: (f64, f64), to: (f64, f64), size: f64) -> Mark {
        let mut settings = ToolSettings::default();
        settings.size = size;
        let mut mark = Mark::begin(tool, InputSample::mouse(from.0, from.1), &settings);
        mark.add_point(InputSample::mouse(to.0, to.1));
        mark
    }

    fn stroke(tool: ToolKind, y: f64, size: f64) -> Mark {
        let mut settings = ToolSettings::default();
        settings.size = size;
        let mut mark = Mark::begin(tool, InputSample::mouse(0.0, y), &settings);
        for i in 1..40 {
            mark.add_point(InputSample::mouse(i as f64 * 2.0, y));
        }
        mark
    }

    #[test]
    fn live_redraw_paints_and_clears() {
        let surfaces = Surfaces::new(CanvasSize::new(64, 64)).unwrap();
        let mark = rect(ToolKind::Rect, (10.0, 10.0), (50.0, 50.0), 4.0);

        redraw_live(&surfaces, Some(&mark)).unwrap();
        assert_eq!(alpha_at(surfaces.live(), 10, 30), 255);
        assert_eq!(alpha_at(surfaces.live(), 30, 30), 0);

        redraw_live(&surfaces, None).unwrap();
        assert_eq!(alpha_at(surfaces.live(), 10, 30), 0);
    }

    #[test]
    fn committed_redraw_is_idempotent() {
        let surfaces = Surfaces::new(CanvasSize::new(64, 64)).unwrap();
        let mut history = History::new();
        history.commit(rect(ToolKind::Rect, (10.0, 10.0), (50.0, 50.0), 4.0).complete(1, Duration::ZERO));

        redraw_committed(&surfaces, &history).unwrap();
        let first = alpha_at(surfaces.committed(), 10, 30);
        redraw_committed(&surfaces, &history).unwrap();
        redraw_committed(&surfaces, &history).unwrap();
        assert_eq!(alpha_at(surfaces.committed(), 10, 30), first);
        assert_eq!(first, 255);

        redraw_committed(&surfaces, &History::new()).unwrap();
        assert_eq!(alpha_at(surfaces.committed(), 10, 30), 0);
    }

    #[test]
    fn eraser_marks_cut_through_earlier_ink() {
        let surfaces = Surfaces::new(CanvasSize::new(100, 40)).unwrap();
        let mut history = History::new();
        history.commit(stroke(ToolKind::Pencil, 20.0, 16.0).complete(1, Duration::ZERO));
        redraw_committed(&surfaces, &history).unwrap();
        assert!(alpha_at(surfaces.committed(), 40, 20) > 0);

        history.commit(stroke(ToolKind::Eraser, 20.0, 16.0).complete(2, Duration::ZERO));
        redraw_committed(&surfaces, &history).unwrap();
        assert_eq!(alpha_at(surfaces.committed(), 40, 20), 0);
    }

    #[test]
    fn faded_marks_are_translucent() {
        let surfaces = Surfaces::new(CanvasSize::new(64, 64)).unwrap();
        let mut history = History::new();
        history.commit(rect(ToolKind::Rect, (10.0, 10.0), (50.0, 50.0), 4.0).complete(1, Duration::ZERO));
        history.decay(0.0, Duration::from_millis(16));
        history.decay(0.5, Duration::from_millis(16));
        redraw_committed(&surfaces, &history).unwrap();

        // ease(0.5) = 0.75
        let alpha = alpha_at(surfaces.committed(), 10, 30);
        assert!((180..=200).contains(&alpha), "alpha {alpha}");
    }

    #[test]
    fn write_png_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let surfaces = Surfaces::new(CanvasSize::new(16, 16)).unwrap();
        write_png(&surfaces, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
