//! Renders the radial canvas with tiny-skia.
//!
//! Produces one premultiplied frame per redraw from the current picker
//! state. Everything is laid out in logical pixels and scaled to device
//! pixels by a single transform. Text (page indicator, file name, loading
//! dots) is drawn by the Slint layer on top of this frame.

use crate::geometry::{RadialLayout, Rect, sector_span};
use crate::state::{PickerState, PreviewState, Thumbnail};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, Path, PathBuilder, Pattern, Pixmap, SpreadMode, Stroke,
    Transform,
};

const LINE_ALPHA: f32 = 0.18;
const LINE_WIDTH: f32 = 2.0;
const HOVER_FILL_ALPHA: f32 = 0.25;
const HOVER_BORDER_ALPHA: f32 = 0.8;
const HOVER_BORDER_WIDTH: f32 = 4.0;
const OVERLAY_ALPHA: f32 = 0.8;
const PREVIEW_BORDER_WIDTH: f32 = 3.0;
const CLOSE_BORDER_WIDTH: f32 = 2.0;
const CLOSE_CROSS_WIDTH: f32 = 3.0;
const CLOSE_CROSS_INSET: f32 = 10.0;
/// Thumbnails overshoot their sector's bounding box so no gap shows at the rim.
const COVER_OVERSHOOT: f32 = 1.1;
/// Line segments per sector arc.
const ARC_STEPS: usize = 48;

/// Everything one frame depends on.
pub struct Scene<'a> {
    /// Logical canvas size.
    pub width: f32,
    pub height: f32,
    /// Device pixels per logical pixel.
    pub scale: f32,
    pub layout: RadialLayout,
    pub thumbnails: &'a [Thumbnail],
    pub hovered: Option<usize>,
    pub preview: Option<&'a PreviewState>,
    pub background_alpha: f32,
}

impl<'a> Scene<'a> {
    pub fn from_state(state: &'a PickerState, background_alpha: f32, scale: f32) -> Self {
        let (width, height) = state.canvas_size();
        Self {
            width,
            height,
            scale,
            layout: *state.layout(),
            thumbnails: state.thumbnails(),
            hovered: state.hovered(),
            preview: state.preview(),
            background_alpha,
        }
    }

    /// Frame size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let device = |logical: f32| ((logical * self.scale).round() as u32).max(1);
        (device(self.width), device(self.height))
    }
}

fn tint(color: Color, alpha: f32) -> Color {
    let mut color = color;
    color.set_alpha(alpha);
    color
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        ..Stroke::default()
    }
}

fn polygon(points: &[(f32, f32)]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.0, first.1);
    for &(x, y) in rest {
        builder.line_to(x, y);
    }
    builder.close();
    builder.finish()
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Option<Path> {
    let mut builder = PathBuilder::new();
    builder.move_to(from.0, from.1);
    builder.line_to(to.0, to.1);
    builder.finish()
}

fn rect_path(rect: Rect) -> Option<Path> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height).map(PathBuilder::from_rect)
}

/// Maps a thumbnail onto its sector: cover-scaled to the sector's bounding
/// box, overshooting by [`COVER_OVERSHOOT`], centred on it.
fn cover_transform(bounds: Rect, image: &Pixmap) -> Transform {
    let (image_w, image_h) = (image.width().max(1) as f32, image.height().max(1) as f32);
    let scale = f32::max(bounds.width / image_w, bounds.height / image_h) * COVER_OVERSHOOT;
    let (cx, cy) = bounds.center();
    Transform::from_translate(cx - image_w * scale / 2.0, cy - image_h * scale / 2.0)
        .pre_scale(scale, scale)
}

/// Renders the scene into a fresh frame; `None` if it cannot be allocated.
pub fn render(scene: &Scene) -> Option<Pixmap> {
    let (width, height) = scene.pixel_size();
    let mut frame = Pixmap::new(width, height)?;
    let transform = Transform::from_scale(scene.scale, scene.scale);

    draw_ring(&mut frame, scene, transform);
    if let Some(preview) = scene.preview {
        draw_preview(&mut frame, scene, preview, transform);
    }
    Some(frame)
}

fn draw_ring(frame: &mut Pixmap, scene: &Scene, transform: Transform) {
    let layout = &scene.layout;
    let count = scene.thumbnails.len();

    if let Some(disk) = PathBuilder::from_circle(layout.cx, layout.cy, layout.outer) {
        let paint = solid(tint(Color::BLACK, scene.background_alpha));
        frame.fill_path(&disk, &paint, FillRule::Winding, transform, None);
    }

    let line = stroke(LINE_WIDTH);
    let line_paint = solid(tint(Color::WHITE, LINE_ALPHA));
    let placeholder = solid(Color::from_rgba8(51, 51, 51, 255));

    for (index, thumbnail) in scene.thumbnails.iter().enumerate() {
        let Some(sector) = polygon(&layout.sector_outline(index, count, ARC_STEPS)) else {
            continue;
        };

        match thumbnail.image() {
            Some(image) => {
                let paint = Paint {
                    shader: Pattern::new(
                        image.as_ref(),
                        SpreadMode::Pad,
                        FilterQuality::Bilinear,
                        1.0,
                        cover_transform(layout.sector_bounds(index, count), image),
                    ),
                    anti_alias: true,
                    ..Paint::default()
                };
                frame.fill_path(&sector, &paint, FillRule::Winding, transform, None);
            }
            None => frame.fill_path(&sector, &placeholder, FillRule::Winding, transform, None),
        }

        // Each sector draws its separator on its start angle
        let (start, _) = sector_span(index, count);
        if let Some(separator) = segment(
            layout.point_at(layout.inner, start),
            layout.point_at(layout.outer, start),
        ) {
            frame.stroke_path(&separator, &line_paint, &line, transform, None);
        }
    }

    let rings = [layout.outer, layout.inner];
    for radius in rings.into_iter().filter(|radius| *radius > 0.0) {
        if let Some(ring) = PathBuilder::from_circle(layout.cx, layout.cy, radius) {
            frame.stroke_path(&ring, &line_paint, &line, transform, None);
        }
    }

    let Some(hovered) = scene.hovered.filter(|&h| h < count) else {
        return;
    };
    if let Some(sector) = polygon(&layout.sector_outline(hovered, count, ARC_STEPS)) {
        let fill = solid(tint(Color::WHITE, HOVER_FILL_ALPHA));
        frame.fill_path(&sector, &fill, FillRule::Winding, transform, None);
        let border = solid(tint(Color::WHITE, HOVER_BORDER_ALPHA));
        frame.stroke_path(&sector, &border, &stroke(HOVER_BORDER_WIDTH), transform, None);
    }
}

fn draw_preview(frame: &mut Pixmap, scene: &Scene, preview: &PreviewState, transform: Transform) {
    let layout = preview.layout();
    let image_rect = layout.image;
    let white = solid(tint(Color::WHITE, 0.8));
    let dim = solid(tint(Color::BLACK, OVERLAY_ALPHA));

    if let Some(overlay) = rect_path(Rect::new(0.0, 0.0, scene.width, scene.height)) {
        frame.fill_path(&overlay, &dim, FillRule::Winding, transform, None);
    }

    if let Some(outline) = rect_path(image_rect) {
        let paint = Paint {
            shader: Pattern::new(
                preview.image().as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                Transform::from_translate(image_rect.x, image_rect.y)
                    .pre_scale(layout.scale, layout.scale),
            ),
            anti_alias: true,
            ..Paint::default()
        };
        frame.fill_path(&outline, &paint, FillRule::Winding, transform, None);
        frame.stroke_path(&outline, &white, &stroke(PREVIEW_BORDER_WIDTH), transform, None);
    }

    let close = layout.close_button;
    if let Some(button) = rect_path(close) {
        frame.fill_path(&button, &dim, FillRule::Winding, transform, None);
        frame.stroke_path(&button, &white, &stroke(CLOSE_BORDER_WIDTH), transform, None);
    }

    let inset = CLOSE_CROSS_INSET;
    let cross = [
        ((close.x + inset, close.y + inset), (close.right() - inset, close.bottom() - inset)),
        ((close.right() - inset, close.y + inset), (close.x + inset, close.bottom() - inset)),
    ];
    let cross_paint = solid(Color::WHITE);
    for (from, to) in cross {
        if let Some(line) = segment(from, to) {
            frame.stroke_path(&line, &cross_paint, &stroke(CLOSE_CROSS_WIDTH), transform, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BACKGROUND_ALPHA, INNER_HOLE_RATIO};
    use std::path::PathBuf;

    const SIZE: f32 = 200.0;

    fn scene<'a>(
        thumbnails: &'a [Thumbnail],
        hovered: Option<usize>,
        preview: Option<&'a PreviewState>,
    ) -> Scene<'a> {
        Scene {
            width: SIZE,
            height: SIZE,
            scale: 1.0,
            layout: RadialLayout::new(SIZE, SIZE, INNER_HOLE_RATIO),
            thumbnails,
            hovered,
            preview,
            background_alpha: BACKGROUND_ALPHA,
        }
    }

    /// Straight-alpha RGBA of the pixel under a logical point.
    fn pixel_at(frame: &Pixmap, scale: f32, point: (f32, f32)) -> [u8; 4] {
        let color = frame
            .pixel((point.0 * scale) as u32, (point.1 * scale) as u32)
            .unwrap()
            .demultiply();
        [color.red(), color.green(), color.blue(), color.alpha()]
    }

    fn close_to(actual: [u8; 4], expected: [u8; 4]) -> bool {
        actual
            .iter()
            .zip(expected)
            .all(|(&a, e)| (a as i16 - e as i16).abs() <= 2)
    }

    fn filled(r: u8, g: u8, b: u8) -> Pixmap {
        let mut pixmap = Pixmap::new(8, 8).unwrap();
        pixmap.fill(Color::from_rgba8(r, g, b, 255));
        pixmap
    }

    #[test]
    fn corners_stay_transparent() {
        let slots = vec![Thumbnail::Loading; 3];
        let frame = render(&scene(&slots, None, None)).unwrap();
        assert_eq!(frame.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(frame.pixel(199, 199).unwrap().alpha(), 0);
    }

    #[test]
    fn hole_shows_dimmed_background() {
        let slots = vec![Thumbnail::Loading; 3];
        let frame = render(&scene(&slots, None, None)).unwrap();
        let alpha = (BACKGROUND_ALPHA * 255.0).round() as u8;
        assert!(close_to(pixel_at(&frame, 1.0, (100.0, 100.0)), [0, 0, 0, alpha]));
    }

    #[test]
    fn sectors_show_thumbnail_or_placeholder() {
        let slots = vec![
            Thumbnail::Ready(filled(255, 0, 0)),
            Thumbnail::Loading,
            Thumbnail::Failed,
        ];
        let s = scene(&slots, None, None);
        let frame = render(&s).unwrap();

        let at = |index| pixel_at(&frame, 1.0, s.layout.sector_midpoint(index, 3));
        assert!(close_to(at(0), [255, 0, 0, 255]));
        assert!(close_to(at(1), [51, 51, 51, 255]));
        assert!(close_to(at(2), [51, 51, 51, 255]));
    }

    #[test]
    fn hovered_sector_is_brighter() {
        let slots = vec![Thumbnail::Loading; 2];
        let plain = render(&scene(&slots, None, None)).unwrap();
        let hovered = render(&scene(&slots, Some(1), None)).unwrap();
        let layout = RadialLayout::new(SIZE, SIZE, INNER_HOLE_RATIO);

        let point = layout.sector_midpoint(1, 2);
        assert!(pixel_at(&hovered, 1.0, point)[0] > pixel_at(&plain, 1.0, point)[0]);
        // The other sector is untouched
        let other = layout.sector_midpoint(0, 2);
        assert_eq!(pixel_at(&plain, 1.0, other), pixel_at(&hovered, 1.0, other));
    }

    #[test]
    fn separator_lines_lighten_sector_edges() {
        let slots = vec![Thumbnail::Loading; 4];
        let s = scene(&slots, None, None);
        let frame = render(&s).unwrap();
        // Angle 0 boundary, halfway between the rings
        let on_line = (s.layout.cx + 70.0, s.layout.cy);
        let off_line = s.layout.sector_midpoint(0, 4);
        assert!(pixel_at(&frame, 1.0, on_line)[0] > pixel_at(&frame, 1.0, off_line)[0]);
    }

    #[test]
    fn preview_covers_the_canvas() {
        let slots = vec![Thumbnail::Ready(filled(255, 0, 0)); 2];
        let preview = PreviewState::new(
            PathBuf::from("/walls/green.png"),
            filled(0, 255, 0),
            SIZE,
            SIZE,
        );
        let frame = render(&scene(&slots, None, Some(&preview))).unwrap();

        // Image centre shows the preview
        let layout = preview.layout();
        let (cx, cy) = layout.image.center();
        assert!(close_to(pixel_at(&frame, 1.0, (cx - 20.0, cy + 20.0)), [0, 255, 0, 255]));

        // Outside the ring only the dim overlay remains
        assert!(close_to(pixel_at(&frame, 1.0, (0.0, 0.0)), [0, 0, 0, 204]));

        // The close button's cross runs through its centre
        let close_center = layout.close_button.center();
        assert!(close_to(pixel_at(&frame, 1.0, close_center), [255, 255, 255, 255]));
    }

    #[test]
    fn frame_follows_the_scale_factor() {
        let slots = vec![Thumbnail::Ready(filled(255, 0, 0)), Thumbnail::Loading];
        let mut s = scene(&slots, None, None);
        s.scale = 2.0;
        let frame = render(&s).unwrap();

        assert_eq!((frame.width(), frame.height()), (400, 400));
        let midpoint = s.layout.sector_midpoint(0, 2);
        assert!(close_to(pixel_at(&frame, 2.0, midpoint), [255, 0, 0, 255]));
        assert_eq!(frame.pixel(0, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn zero_sized_canvas_still_gets_a_pixel() {
        let mut s = scene(&[], None, None);
        s.width = 0.0;
        s.height = 0.0;
        assert_eq!(render(&s).map(|f| (f.width(), f.height())), Some((1, 1)));
    }
}
