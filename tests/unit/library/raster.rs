use super::*;
use crate::animation::Sampled;
use crate::entity::Kind;
use crate::render::{CanvasOpts, DrawCall};
use crate::sample::TimeSpec;
use crate::style::FillStyle;

fn red(_: f64, _: f64) -> (fn(f64) -> Color, Option<f64>) {
    (|_| Color::rgb(255, 0, 0), None)
}

fn grid(n: usize) -> RasterGrid {
    let axis = Axis {
        min: 0.0,
        max: 1.0,
        n,
    };
    RasterGrid {
        x: axis,
        y: axis,
        ..RasterGrid::default()
    }
}

fn fill_colors(calls: &[DrawCall]) -> Vec<Sampled<Color>> {
    calls
        .iter()
        .map(|c| match c {
            DrawCall::Polygon {
                fill: FillStyle::Solid { color },
                ..
            } => color.clone(),
            other => panic!("expected a filled polygon, got {other:?}"),
        })
        .collect()
}

#[test]
fn default_grid_has_two_staggered_layers() {
    let image = rasterize(&RasterGrid::default(), red).unwrap();
    let Kind::Group {
        entities: Value::List(pixels),
    } = image.kind()
    else {
        panic!("expected a group of pixels");
    };
    assert_eq!(pixels.len(), 21 * 21 + 20 * 20);
}

#[test]
fn rejects_degenerate_grids() {
    let mut g = grid(0);
    assert!(matches!(rasterize(&g, red), Err(ToonError::Validation(_))));
    g = grid(2);
    g.x.max = g.x.min;
    assert!(rasterize(&g, red).is_err());
    g = grid(2);
    g.pixel_aspect_ratio = 0.0;
    assert!(rasterize(&g, red).is_err());
    g = grid(2);
    g.width = -1.0;
    assert!(rasterize(&g, red).is_err());
}

#[test]
fn layer_alphas_composite_back() {
    for a in [1.0, 0.6, 0.2] {
        let lower = Layer::Lower.alpha(a);
        let upper = Layer::Upper.alpha(a);
        assert!((upper + lower * (1.0 - upper) - a).abs() < 1e-12);
    }
    assert!(layered(Color::NONE, Layer::Upper).unwrap().is_none());
}

#[test]
fn static_pixels_render_still() {
    let image = rasterize(&grid(1), red).unwrap();
    let recording = image
        .record(&CanvasOpts::default(), TimeSpec::still())
        .unwrap();
    assert_eq!(recording.calls.len(), 5);
    let colors = fill_colors(&recording.calls);
    let opaque = Color::rgb(255, 0, 0).with_alpha(1.0).unwrap();
    let half = Color::rgb(255, 0, 0).with_alpha(0.5).unwrap();
    assert_eq!(colors[0], Sampled::Const(opaque));
    assert_eq!(colors[4], Sampled::Const(half));
    let DrawCall::Polygon { line, .. } = &recording.calls[0] else {
        unreachable!();
    };
    assert_eq!(line.weight, Sampled::Const(0.0));
}

#[test]
fn animated_pixels_follow_their_interval() {
    let blink = |x: f64, _: f64| {
        let f = move |t: f64| {
            if t + x < 0.5 {
                Color::rgb(255, 0, 0)
            } else {
                Color::rgb(0, 0, 255)
            }
        };
        (f, Some(0.5))
    };
    let image = rasterize(&grid(1), blink).unwrap();
    let opts = CanvasOpts {
        duration: Some(1.0),
        ..CanvasOpts::default()
    };
    let recording = image
        .record(&opts, TimeSpec::interval(0.0, 1.0).unwrap())
        .unwrap();
    let colors = fill_colors(&recording.calls);
    let Sampled::Keys(keys) = &colors[0] else {
        panic!("expected the first pixel to change color");
    };
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0].value.rgb, Some([255, 0, 0]));
    assert_eq!(keys[2].value.rgb, Some([0, 0, 255]));

    assert!(matches!(
        image.record(&CanvasOpts::default(), TimeSpec::still()),
        Err(ToonError::Animation(_))
    ));
}
