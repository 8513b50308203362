//! Lane lines, road edges and the driving path

use hud_state::{Point, Scene, UiStatus};

use crate::directive::{Color, DrawDirective, Paint};
use crate::palette;
use crate::CanvasSize;

/// Lane line fill: white with the line's confidence as alpha
pub fn lane_line_color(prob: f32) -> Color {
    Color::rgb_alpha(255, 255, 255, prob)
}

/// Road edge fill: red, fading out as the edge's standard deviation grows
pub fn road_edge_color(std: f32) -> Color {
    Color::rgb_alpha(255, 0, 0, (1.0 - std).clamp(0.0, 1.0))
}

/// Vertical gradient used to fill the driving path
///
/// Fully tinted at the canvas bottom and transparent at a quarter height.
pub fn path_paint(scene: &Scene, status: UiStatus, canvas: CanvasSize) -> Paint {
    let engaged = status != UiStatus::Disengaged;
    let base = if engaged && scene.steer_override {
        palette::red(255)
    } else if engaged {
        palette::engaged_path(scene.lane_mode)
    } else {
        Color::WHITE
    };

    Paint::VerticalGradient {
        y0: canvas.height as f32,
        y1: canvas.height as f32 / 4.0,
        from: base.with_alpha(200.0 / 255.0),
        to: base.with_alpha(0.0),
    }
}

fn polygon(points: &[Point], color: Color) -> Option<DrawDirective> {
    if points.len() < 3 || color.is_transparent() {
        return None;
    }
    Some(DrawDirective::FillPolygon {
        points: points.to_vec(),
        paint: Paint::Solid(color),
    })
}

/// Lane lines and road edges (skipped in end-to-end mode) followed by the path
pub fn lane_lines(scene: &Scene, status: UiStatus, canvas: CanvasSize) -> Vec<DrawDirective> {
    let mut out = Vec::new();

    if !scene.end_to_end {
        for (line, prob) in scene.lane_lines.iter().zip(scene.lane_line_probs) {
            out.extend(polygon(line, lane_line_color(prob)));
        }
        for (edge, std) in scene.road_edges.iter().zip(scene.road_edge_stds) {
            out.extend(polygon(edge, road_edge_color(std)));
        }
    }

    if scene.track.len() >= 3 {
        out.push(DrawDirective::FillPolygon {
            points: scene.track.clone(),
            paint: path_paint(scene, status, canvas),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_state::LaneMode;
    use proptest::prelude::*;

    const CANVAS: CanvasSize = CanvasSize {
        width: 2120,
        height: 1040,
    };

    fn triangle(x: f32) -> Vec<Point> {
        vec![
            Point::new(x, 1000.0),
            Point::new(x + 10.0, 500.0),
            Point::new(x + 20.0, 1000.0),
        ]
    }

    fn scene_with_lines(probs: [f32; 4]) -> Scene {
        Scene {
            lane_lines: [triangle(100.0), triangle(400.0), triangle(800.0), triangle(1200.0)],
            lane_line_probs: probs,
            road_edges: [triangle(50.0), triangle(1500.0)],
            road_edge_stds: [0.25, 1.5],
            ..Default::default()
        }
    }

    fn fill_alphas(directives: &[DrawDirective]) -> Vec<f32> {
        directives
            .iter()
            .filter_map(|d| match d {
                DrawDirective::FillPolygon {
                    paint: Paint::Solid(c),
                    ..
                } => Some(c.alpha),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_zero_probability_draws_nothing() {
        let scene = scene_with_lines([0.0, 0.5, 0.0, 1.0]);
        let out = lane_lines(&scene, UiStatus::Engaged, CANVAS);
        // two lane lines + one visible road edge (std 1.5 clamps to alpha 0)
        assert_eq!(fill_alphas(&out), vec![0.5, 1.0, 0.75]);
    }

    #[test]
    fn test_road_edge_alpha() {
        assert_eq!(road_edge_color(0.25).alpha, 0.75);
        assert_eq!(road_edge_color(2.0).alpha, 0.0);
        assert_eq!(road_edge_color(-1.0).alpha, 1.0);
    }

    #[test]
    fn test_end_to_end_skips_lanes() {
        let mut scene = scene_with_lines([1.0; 4]);
        scene.end_to_end = true;
        scene.track = triangle(600.0);
        let out = lane_lines(&scene, UiStatus::Engaged, CANVAS);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            out[0],
            DrawDirective::FillPolygon {
                paint: Paint::VerticalGradient { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_path_colors() {
        let mut scene = Scene::default();
        let from = |paint: Paint| match paint {
            Paint::VerticalGradient { from, to, y0, y1 } => {
                assert_eq!(y0, 1040.0);
                assert_eq!(y1, 260.0);
                assert_eq!(to.alpha, 0.0);
                from
            }
            Paint::Solid(_) => panic!("path must be a gradient"),
        };

        let c = from(path_paint(&scene, UiStatus::Disengaged, CANVAS));
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
        assert_eq!(c.alpha_u8(), 200);

        let c = from(path_paint(&scene, UiStatus::Engaged, CANVAS));
        assert_eq!((c.r, c.g, c.b), (0, 100, 255));

        scene.lane_mode = LaneMode::Manual;
        let c = from(path_paint(&scene, UiStatus::Engaged, CANVAS));
        assert_eq!((c.r, c.g, c.b), (0, 160, 255));

        scene.steer_override = true;
        let c = from(path_paint(&scene, UiStatus::Engaged, CANVAS));
        assert_eq!((c.r, c.g, c.b), (201, 34, 49));

        // Override has no meaning while disengaged
        let c = from(path_paint(&scene, UiStatus::Disengaged, CANVAS));
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
    }

    proptest! {
        #[test]
        fn prop_lane_alpha_is_probability(p in 0.0f32..=1.0) {
            prop_assert_eq!(lane_line_color(p).alpha, p);
        }
    }
}
