use vello::{
    Scene,
    kurbo::{Affine, Arc, Circle, Point, Rect, Stroke},
    peniko::{Color, Fill},
};

use crate::ShapeLayer;

/// Portion of the layer path currently visible, per its presentation state.
///
/// Returns `None` when there is no path yet, the radius is not positive, or
/// the stroke end does not lie past the stroke start.
#[must_use]
pub fn visible_arc(layer: &ShapeLayer) -> Option<Arc> {
    let path = layer.path?;
    if path.radii.x <= 0.0 || path.radii.y <= 0.0 {
        return None;
    }

    let state = layer.presentation();
    let start = state.stroke_start.clamp(0.0, 1.0);
    let end = state.stroke_end.clamp(0.0, 1.0);
    if end <= start {
        return None;
    }

    Some(Arc {
        start_angle: path.start_angle + path.sweep_angle * start,
        sweep_angle: path.sweep_angle * (end - start),
        ..path
    })
}

/// Transform taking layer coordinates to scene coordinates for a spinner at `frame`.
#[must_use]
pub fn layer_transform(frame: Rect, layer: &ShapeLayer) -> Affine {
    let center = layer
        .path
        .map(|path| path.center)
        .unwrap_or_else(|| layer.frame.center());
    Affine::translate(frame.origin().to_vec2())
        * Affine::rotate_about(layer.presentation().rotation, center)
}

/// Draw one spinner placed at `frame` into `scene`.
pub fn render_spinner(scene: &mut Scene, frame: Rect, layer: &ShapeLayer, background: Color) {
    let origin = Affine::translate(frame.origin().to_vec2());

    if background.components[3] > 0.0 {
        let bounds = Rect::from_origin_size(Point::ORIGIN, frame.size());
        scene.fill(Fill::NonZero, origin, background, None, &bounds);
    }

    let transform = layer_transform(frame, layer);

    if let (Some(fill), Some(path)) = (layer.fill_color, layer.path) {
        let circle = Circle::new(path.center, path.radii.x);
        scene.fill(Fill::NonZero, transform, fill, None, &circle);
    }

    if layer.line_width <= 0.0 {
        return;
    }

    if let Some(arc) = visible_arc(layer) {
        let stroke = Stroke::new(layer.line_width).with_caps(layer.line_cap);
        scene.stroke(&stroke, transform, layer.stroke_color, None, &arc);
    }
}
