//! Collision detection and response
//!
//! Circle-vs-axis-aligned-rectangle for the paddles, plain sign flips for
//! the horizontal walls, and side-out detection for scoring. Responses
//! flip a velocity component and never correct position, so a fast ball
//! can tunnel past a wall by one step; that is accepted behavior here,
//! not something to fix silently (training dynamics depend on it).

use glam::Vec2;

use super::state::{Ball, PaddleRect, Side};

/// Flip the vertical velocity when the ball is at or past a horizontal
/// wall. Leaves vx and the position untouched.
pub fn resolve_wall_collision(ball: &mut Ball, field_height: f32) {
    debug_assert!(ball.pos.is_finite() && ball.vel.is_finite());

    if ball.pos.y <= 0.0 || ball.pos.y >= field_height {
        ball.vel.y = -ball.vel.y;
    }
}

/// Check the ball against both paddles and reflect it off the first hit.
///
/// The nearest point on a rectangle to the ball center is the center
/// clamped into the rectangle's extent; a hit is a nearest-point distance
/// within the ball radius. The left paddle is checked first and wins when
/// both are in range - the iteration order is part of the deterministic
/// contract. An edge clip (ball center at or beyond the paddle's vertical
/// extent) flips vy, a face hit flips vx.
pub fn resolve_paddle_collision(
    ball: &mut Ball,
    left: &PaddleRect,
    right: &PaddleRect,
) -> Option<Side> {
    debug_assert!(ball.pos.is_finite() && ball.vel.is_finite());

    for (rect, side) in [(left, Side::Left), (right, Side::Right)] {
        let nearest = ball.pos.clamp(rect.min, rect.max);

        if ball.pos.distance(nearest) <= ball.radius {
            if ball.pos.y <= rect.min.y || ball.pos.y >= rect.max.y {
                ball.vel.y = -ball.vel.y;
            } else {
                ball.vel.x = -ball.vel.x;
            }
            return Some(side);
        }
    }

    None
}

/// The side the ball exited on, if it left the field horizontally.
///
/// The exit margin is two ball radii past the wall, so a ball grazing the
/// boundary still counts as in play. Scoring goes to the opponent of the
/// returned side.
pub fn side_out(ball: &Ball, field_width: f32) -> Option<Side> {
    if ball.pos.x <= -(ball.radius * 2.0) {
        Some(Side::Left)
    } else if ball.pos.x >= field_width + ball.radius * 2.0 {
        Some(Side::Right)
    } else {
        None
    }
}

/// Nearest point on a paddle rect to an arbitrary point (exposed for
/// diagnostics and tests).
#[inline]
pub fn nearest_point(rect: &PaddleRect, point: Vec2) -> Vec2 {
    point.clamp(rect.min, rect.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Paddle;

    fn test_ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            radius: 10.0,
            serving: false,
        }
    }

    fn rect_at(x: f32, y: f32) -> PaddleRect {
        PaddleRect {
            min: Vec2::new(x, y),
            max: Vec2::new(x + 30.0, y + 130.0),
        }
    }

    #[test]
    fn test_wall_flip_top_and_bottom() {
        let mut ball = test_ball(Vec2::new(500.0, -3.0), Vec2::new(5.0, -5.0));
        resolve_wall_collision(&mut ball, 800.0);
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));

        let mut ball = test_ball(Vec2::new(500.0, 805.0), Vec2::new(5.0, 5.0));
        resolve_wall_collision(&mut ball, 800.0);
        assert_eq!(ball.vel, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_wall_no_positional_correction() {
        // The flip leaves the ball where it is; only vy changes sign
        let mut ball = test_ball(Vec2::new(500.0, -3.0), Vec2::new(5.0, -5.0));
        resolve_wall_collision(&mut ball, 800.0);
        assert_eq!(ball.pos, Vec2::new(500.0, -3.0));
    }

    #[test]
    fn test_wall_miss_inside_field() {
        let mut ball = test_ball(Vec2::new(500.0, 400.0), Vec2::new(5.0, 5.0));
        resolve_wall_collision(&mut ball, 800.0);
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_paddle_face_hit_flips_vx() {
        let left = rect_at(30.0, 300.0);
        let right = rect_at(930.0, 300.0);

        // Ball just right of the left paddle face, vertically centered on it
        let mut ball = test_ball(Vec2::new(65.0, 365.0), Vec2::new(-5.0, 2.0));
        let hit = resolve_paddle_collision(&mut ball, &left, &right);
        assert_eq!(hit, Some(Side::Left));
        assert_eq!(ball.vel, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn test_paddle_edge_clip_flips_vy() {
        let left = rect_at(30.0, 300.0);
        let right = rect_at(930.0, 300.0);

        // Ball center above the paddle top, within radius of the top edge
        let mut ball = test_ball(Vec2::new(45.0, 295.0), Vec2::new(-5.0, 5.0));
        let hit = resolve_paddle_collision(&mut ball, &left, &right);
        assert_eq!(hit, Some(Side::Left));
        assert_eq!(ball.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_paddle_miss_out_of_range() {
        let left = rect_at(30.0, 300.0);
        let right = rect_at(930.0, 300.0);

        let mut ball = test_ball(Vec2::new(500.0, 400.0), Vec2::new(5.0, 5.0));
        assert_eq!(resolve_paddle_collision(&mut ball, &left, &right), None);
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_left_paddle_wins_tie() {
        // Two overlapping rects both within range of the ball: left is
        // checked first and must win.
        let left = rect_at(100.0, 300.0);
        let right = rect_at(110.0, 300.0);

        let mut ball = test_ball(Vec2::new(95.0, 365.0), Vec2::new(-5.0, 0.0));
        let hit = resolve_paddle_collision(&mut ball, &left, &right);
        assert_eq!(hit, Some(Side::Left));
    }

    #[test]
    fn test_exactly_one_flip_per_hit() {
        // A hit registers against exactly one paddle even when both are in
        // range, so vx flips once, not twice.
        let left = rect_at(100.0, 300.0);
        let right = rect_at(104.0, 300.0);

        let mut ball = test_ball(Vec2::new(98.0, 365.0), Vec2::new(-5.0, 1.0));
        resolve_paddle_collision(&mut ball, &left, &right);
        assert_eq!(ball.vel, Vec2::new(5.0, 1.0));
    }

    #[test]
    fn test_side_out_margins() {
        let ball = test_ball(Vec2::new(-20.0, 400.0), Vec2::new(-5.0, 0.0));
        assert_eq!(side_out(&ball, 1000.0), Some(Side::Left));

        let ball = test_ball(Vec2::new(1020.0, 400.0), Vec2::new(5.0, 0.0));
        assert_eq!(side_out(&ball, 1000.0), Some(Side::Right));

        // Just inside either margin: still in play
        let ball = test_ball(Vec2::new(-19.0, 400.0), Vec2::new(-5.0, 0.0));
        assert_eq!(side_out(&ball, 1000.0), None);
        let ball = test_ball(Vec2::new(1019.0, 400.0), Vec2::new(5.0, 0.0));
        assert_eq!(side_out(&ball, 1000.0), None);
    }

    #[test]
    fn test_nearest_point_clamping() {
        let rect = rect_at(30.0, 300.0);
        assert_eq!(
            nearest_point(&rect, Vec2::new(0.0, 0.0)),
            Vec2::new(30.0, 300.0)
        );
        assert_eq!(
            nearest_point(&rect, Vec2::new(45.0, 350.0)),
            Vec2::new(45.0, 350.0)
        );
        assert_eq!(
            nearest_point(&rect, Vec2::new(100.0, 500.0)),
            Vec2::new(60.0, 430.0)
        );
    }

    #[test]
    fn test_right_wall_rally_end_to_end() {
        // Ball at field center moving right at 5/tick with the right paddle
        // spanning the ball's y: advancing until contact and resolving must
        // flip vx to -5 and report the right-side hit.
        let cfg = GameConfig::default();
        let left = Paddle::new(&cfg, Side::Left);
        let mut right = Paddle::new(&cfg, Side::Right);
        right.y = 335.0; // center the paddle on y=400

        let mut ball = test_ball(Vec2::new(500.0, 400.0), Vec2::new(5.0, 0.0));
        let mut hit = None;
        for _ in 0..100 {
            ball.pos += ball.vel;
            hit = resolve_paddle_collision(&mut ball, &left.rect(), &right.rect());
            if hit.is_some() {
                break;
            }
        }
        assert_eq!(hit, Some(Side::Right));
        assert_eq!(ball.vel, Vec2::new(-5.0, 0.0));
    }
}
