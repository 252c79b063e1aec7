use super::*;
use crate::draw::{DrawError, PixelBuffer, Rgba, ShapeKind};
use crate::input::{ActiveStyle, GestureEvent, ToolMode};

const RED: Rgba = Rgba::new(255, 0, 0, 255);
const BLUE: Rgba = Rgba::new(0, 0, 255, 255);

fn create_test_controller() -> DrawingSurfaceController {
    let mut controller = DrawingSurfaceController::new(64, 64);
    // Drop the initial full-surface dirty mark.
    controller.take_dirty_regions();
    controller
}

fn drag(controller: &mut DrawingSurfaceController, from: (i32, i32), moves: &[(i32, i32)]) {
    controller.gesture_start(from.0, from.1).unwrap();
    for &(x, y) in moves {
        controller.gesture_move(x, y).unwrap();
    }
    controller.gesture_end();
}

#[test]
fn test_new_controller_defaults() {
    let controller = DrawingSurfaceController::new(800, 500);
    assert_eq!(controller.tool_mode(), ToolMode::Pen);
    assert_eq!(*controller.active_style(), ActiveStyle::default());
    assert_eq!(controller.settings().pen_width, 4.0);
    assert_eq!(controller.settings().eraser_width, 20.0);
    assert_eq!(controller.settings().tolerance, 12);
    assert!(!controller.is_drawing());
    assert_eq!(controller.buffer().count(Rgba::WHITE), 800 * 500);
}

#[test]
fn test_start_alone_draws_nothing() {
    let mut controller = create_test_controller();
    controller.gesture_start(20, 20).unwrap();
    assert!(controller.is_drawing());
    assert_eq!(controller.buffer().count(Rgba::WHITE), 64 * 64);
}

#[test]
fn test_pen_segment_uses_opacity() {
    let mut controller = create_test_controller();
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.set_active_opacity(0.5);

    drag(&mut controller, (10, 10), &[(30, 10)]);

    assert_eq!(
        controller.buffer().get(20, 10),
        Some(Rgba::new(128, 128, 255, 255))
    );
    assert_eq!(controller.buffer().get(20, 40), Some(Rgba::WHITE));
    assert!(!controller.is_drawing());
}

#[test]
fn test_pen_segments_chain_from_last_point() {
    let mut controller = create_test_controller();
    drag(&mut controller, (10, 10), &[(30, 10), (30, 40)]);

    assert_eq!(controller.buffer().get(20, 10), Some(RED));
    assert_eq!(controller.buffer().get(30, 25), Some(RED));
    // No segment joins the first point to the last one.
    assert_eq!(controller.buffer().get(20, 25), Some(Rgba::WHITE));
}

#[test]
fn test_eraser_makes_pixels_transparent() {
    let mut controller = create_test_controller();
    controller.set_active_opacity(0.3);
    controller.set_tool_mode(ToolMode::Eraser);

    drag(&mut controller, (20, 30), &[(40, 30)]);

    assert_eq!(controller.buffer().get(30, 30), Some(Rgba::TRANSPARENT));
    // 20px brush reaches 9px away from the segment.
    assert_eq!(controller.buffer().get(30, 39), Some(Rgba::TRANSPARENT));
    assert_eq!(controller.buffer().get(30, 45), Some(Rgba::WHITE));
}

#[test]
fn test_bucket_fills_on_start_and_stays_idle() {
    let mut controller = DrawingSurfaceController::new(20, 20);
    controller.set_tool_mode(ToolMode::Bucket);

    controller.gesture_start(5, 5).unwrap();

    assert!(!controller.is_drawing());
    assert_eq!(controller.buffer().count(RED), 400);

    // Moves and ends after a bucket press are no-ops.
    controller.gesture_move(10, 10).unwrap();
    controller.gesture_end();
    assert_eq!(controller.buffer().count(RED), 400);
}

#[test]
fn test_bucket_is_idempotent() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Circle));
    drag(&mut controller, (32, 32), &[(44, 32)]);

    controller.set_tool_mode(ToolMode::Bucket);
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.gesture_start(32, 32).unwrap();
    let once = controller.buffer().clone();
    controller.gesture_start(32, 32).unwrap();

    assert_eq!(controller.buffer(), &once);
}

#[test]
fn test_bucket_stays_inside_outline() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    drag(&mut controller, (10, 10), &[(30, 30)]);

    controller.set_tool_mode(ToolMode::Bucket);
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.gesture_start(20, 20).unwrap();

    assert_eq!(controller.buffer().get(20, 20), Some(BLUE));
    assert_eq!(controller.buffer().get(10, 20), Some(RED));
    assert_eq!(controller.buffer().get(0, 0), Some(Rgba::WHITE));
    assert_eq!(controller.buffer().get(40, 40), Some(Rgba::WHITE));
}

#[test]
fn test_bucket_fill_color_is_composited_over_white() {
    let mut controller = DrawingSurfaceController::new(8, 8);
    controller.set_tool_mode(ToolMode::Bucket);
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.set_active_opacity(0.5);

    controller.gesture_start(0, 0).unwrap();

    assert_eq!(controller.buffer().count(Rgba::new(128, 128, 255, 255)), 64);
}

#[test]
fn test_filled_rectangle_gesture_is_exact() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    controller.set_fill_enabled(true);

    drag(&mut controller, (10, 10), &[(50, 50)]);

    let buffer = controller.buffer();
    for y in 0..64 {
        for x in 0..64 {
            let inside = (10..50).contains(&x) && (10..50).contains(&y);
            let expected = if inside { RED } else { Rgba::WHITE };
            assert_eq!(buffer.get(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_preview_frames_do_not_persist() {
    let mut previewed = create_test_controller();
    previewed.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    drag(&mut previewed, (10, 10), &[(60, 60), (5, 40), (30, 40), (20, 25)]);

    let mut direct = create_test_controller();
    direct.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    drag(&mut direct, (10, 10), &[(20, 25)]);

    assert_eq!(previewed.buffer(), direct.buffer());
}

#[test]
fn test_preview_keeps_earlier_drawing() {
    let mut controller = create_test_controller();
    drag(&mut controller, (2, 2), &[(2, 60)]);
    let pen_pixel = controller.buffer().get(2, 30);

    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Star));
    drag(&mut controller, (10, 10), &[(60, 60), (30, 30)]);

    assert_eq!(controller.buffer().get(2, 30), pen_pixel);
}

#[test]
fn test_line_is_stroked_even_with_fill_enabled() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Line));
    controller.set_fill_enabled(true);

    drag(&mut controller, (10, 10), &[(50, 10)]);

    assert_eq!(controller.buffer().get(30, 10), Some(RED));
    assert_eq!(controller.buffer().get(30, 20), Some(Rgba::WHITE));
}

#[test]
fn test_overlapping_start_is_rejected() {
    let mut controller = create_test_controller();
    controller.gesture_start(5, 5).unwrap();

    let result = controller.gesture_start(40, 40);

    assert_eq!(result, Err(DrawError::GestureInProgress));
    match &controller.state {
        DrawingState::Drawing { anchor, .. } => assert_eq!(*anchor, (5, 5)),
        DrawingState::Idle => panic!("gesture should still be active"),
    }
}

#[test]
fn test_cancel_restores_snapshot() {
    let mut controller = create_test_controller();
    drag(&mut controller, (5, 5), &[(5, 50)]);
    let before = controller.buffer().clone();

    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Hexagon));
    controller.set_fill_enabled(true);
    controller.gesture_start(10, 10).unwrap();
    controller.gesture_move(50, 50).unwrap();
    assert_ne!(controller.buffer(), &before);

    controller.gesture_cancel().unwrap();

    assert_eq!(controller.buffer(), &before);
    assert!(!controller.is_drawing());
}

#[test]
fn test_cancel_keeps_pen_segments() {
    let mut controller = create_test_controller();
    controller.gesture_start(10, 10).unwrap();
    controller.gesture_move(30, 10).unwrap();
    controller.gesture_cancel().unwrap();

    assert_eq!(controller.buffer().get(20, 10), Some(RED));
    assert!(!controller.is_drawing());
}

#[test]
fn test_coordinates_are_clamped() {
    let mut controller = DrawingSurfaceController::new(20, 20);
    controller.gesture_start(-5, -5).unwrap();
    controller.gesture_move(1000, 1000).unwrap();
    controller.gesture_end();

    assert_eq!(controller.buffer().get(0, 0), Some(RED));
    assert_eq!(controller.buffer().get(19, 19), Some(RED));

    controller.set_tool_mode(ToolMode::Bucket);
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.gesture_start(-100, 500).unwrap();
    assert_eq!(controller.buffer().get(0, 19), Some(BLUE));
}

#[test]
fn test_style_change_applies_to_next_move() {
    let mut controller = create_test_controller();
    controller.gesture_start(10, 10).unwrap();
    controller.gesture_move(30, 10).unwrap();
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.gesture_move(50, 10).unwrap();
    controller.gesture_end();

    assert_eq!(controller.buffer().get(20, 10), Some(RED));
    assert_eq!(controller.buffer().get(40, 10), Some(BLUE));
}

#[test]
fn test_tool_change_applies_to_next_gesture() {
    let mut controller = create_test_controller();
    controller.gesture_start(10, 10).unwrap();
    controller.set_tool_mode(ToolMode::Eraser);
    controller.gesture_move(30, 10).unwrap();
    controller.gesture_end();

    assert_eq!(controller.buffer().get(20, 10), Some(RED));

    drag(&mut controller, (10, 40), &[(30, 40)]);
    assert_eq!(controller.buffer().get(20, 40), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_move_while_idle_is_ignored() {
    let mut controller = create_test_controller();
    controller.gesture_move(10, 10).unwrap();
    controller.gesture_end();
    controller.gesture_cancel().unwrap();
    assert_eq!(controller.buffer().count(Rgba::WHITE), 64 * 64);
    assert!(controller.take_dirty_regions().is_empty());
}

#[test]
fn test_invalid_star_points_surface_error() {
    let mut controller = create_test_controller();
    let mut settings = *controller.settings();
    settings.star_points = 1;
    controller.set_settings(settings);
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Star));

    controller.gesture_start(10, 10).unwrap();
    let result = controller.gesture_move(40, 40);

    assert!(matches!(result, Err(DrawError::UnsupportedShapeKind(_))));
    assert_eq!(controller.buffer().count(Rgba::WHITE), 64 * 64);
}

#[test]
fn test_preview_dirty_regions_cover_previous_frame() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    controller.gesture_start(10, 10).unwrap();
    controller.gesture_move(50, 50).unwrap();
    controller.take_dirty_regions();

    controller.gesture_move(20, 20).unwrap();
    let regions = controller.take_dirty_regions();

    assert!(regions.iter().any(|r| r.contains(50, 50)));
    assert!(regions.iter().any(|r| r.contains(20, 20)));
}

#[test]
fn test_clear_resets_buffer_and_gesture() {
    let mut controller = create_test_controller();
    drag(&mut controller, (10, 10), &[(30, 30)]);
    controller.gesture_start(5, 5).unwrap();

    controller.clear(Rgba::TRANSPARENT);

    assert!(!controller.is_drawing());
    assert_eq!(controller.buffer().count(Rgba::TRANSPARENT), 64 * 64);
    assert_eq!(
        controller.take_dirty_regions(),
        vec![crate::util::Rect::new(0, 0, 64, 64).unwrap()]
    );
}

#[test]
fn test_handle_event_dispatch() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    controller.set_fill_enabled(true);

    for event in [
        GestureEvent::Start { x: 10, y: 10 },
        GestureEvent::Move { x: 20, y: 20 },
        GestureEvent::End,
    ] {
        controller.handle_event(event).unwrap();
    }

    assert_eq!(controller.buffer().count(RED), 100);
}

#[test]
fn test_snapshot_restore_rejects_other_sizes() {
    let snapshot = PreviewSnapshot::capture(&PixelBuffer::new(4, 4, Rgba::WHITE));
    let mut other = PixelBuffer::new(8, 8, Rgba::WHITE);
    assert!(matches!(
        snapshot.restore(&mut other),
        Err(DrawError::BufferSizeMismatch { .. })
    ));
}

#[test]
fn test_translucent_pen_blends_each_pixel_once_per_gesture() {
    let mut controller = create_test_controller();
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.set_active_opacity(0.5);

    drag(
        &mut controller,
        (10, 10),
        &[(30, 10), (30, 30), (10, 10), (30, 10)],
    );

    let single = Rgba::new(128, 128, 255, 255);
    assert_eq!(controller.buffer().get(30, 10), Some(single));
    assert_eq!(controller.buffer().get(20, 10), Some(single));
    for px in controller.buffer().pixels() {
        assert!(*px == Rgba::WHITE || *px == single, "pixel blended twice: {px:?}");
    }
}

#[test]
fn test_separate_pen_gestures_build_up() {
    let mut controller = create_test_controller();
    controller.set_active_color(240.0, 100.0, 50.0);
    controller.set_active_opacity(0.5);

    drag(&mut controller, (10, 10), &[(30, 10)]);
    drag(&mut controller, (10, 10), &[(30, 10)]);

    assert_eq!(
        controller.buffer().get(20, 10),
        Some(Rgba::new(64, 64, 255, 255))
    );
}

#[test]
fn test_into_buffer_returns_drawing() {
    let mut controller = create_test_controller();
    controller.set_tool_mode(ToolMode::Shape(ShapeKind::Rectangle));
    controller.set_fill_enabled(true);
    drag(&mut controller, (10, 10), &[(20, 20)]);

    let buffer = controller.into_buffer();
    assert_eq!(buffer.count(RED), 100);
}
