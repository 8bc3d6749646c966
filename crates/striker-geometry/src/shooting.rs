//! Shooting-point construction.
//!
//! The shooting point is where the robot should stand behind the ball so that
//! pushing forward drives the ball along the ball → goal line.

use libm::round;

use crate::Point2D;

/// Computes the shooting point on the line through `ball` and `goal`.
///
/// The target x-coordinate is offset from the ball by `extension`:
/// `ball.x + extension` when `from_goal_side` is set, `ball.x - extension`
/// otherwise. The y-coordinate is taken from the ball → goal line and rounded
/// to a whole pixel.
///
/// # Arguments
///
/// * `ball`: Ball position, `None` if the ball was not found.
/// * `goal`: Goal position, `None` if the goal was not found.
/// * `extension`: Offset along x between the ball and the target, in pixels.
/// * `from_goal_side`: Which side of the ball the robot approaches from.
///
/// # Returns
///
/// * `None` if the ball or goal is unknown, or the line is numerically degenerate.
/// * The ball position itself when ball and goal share an x-coordinate (the slope is undefined).
/// * Otherwise the point on the line at the offset x-coordinate.
pub fn shooting_point(
    ball: Option<Point2D>,
    goal: Option<Point2D>,
    extension: f64,
    from_goal_side: bool,
) -> Option<Point2D> {
    let (ball, goal) = (ball?, goal?);

    let dx = goal.x - ball.x;
    if dx == 0.0 {
        return Some(ball);
    }

    let slope = (goal.y - ball.y) / dx;
    let intercept = ball.y - slope * ball.x;

    let x = if from_goal_side {
        ball.x + extension
    } else {
        ball.x - extension
    };
    let y = round(slope * x + intercept);

    if x.is_finite() && y.is_finite() {
        Some(Point2D::new(x, y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_behind_ball_on_diagonal() {
        let target = shooting_point(
            Some(Point2D::new(100.0, 100.0)),
            Some(Point2D::new(200.0, 200.0)),
            10.0,
            false,
        );
        assert_eq!(target, Some(Point2D::new(90.0, 90.0)));
    }

    #[test]
    fn test_point_from_goal_side() {
        let target = shooting_point(
            Some(Point2D::new(100.0, 100.0)),
            Some(Point2D::new(200.0, 200.0)),
            10.0,
            true,
        );
        assert_eq!(target, Some(Point2D::new(110.0, 110.0)));
    }

    #[test]
    fn test_y_is_rounded_to_pixel() {
        // Slope 1/3: y = 100 + (-10) / 3 = 96.67 -> 97
        let target = shooting_point(
            Some(Point2D::new(100.0, 100.0)),
            Some(Point2D::new(130.0, 110.0)),
            10.0,
            false,
        )
        .unwrap();
        assert_eq!(target.x, 90.0);
        assert_eq!(target.y, 97.0);
    }

    #[test]
    fn test_vertical_line_falls_back_to_ball() {
        let ball = Point2D::new(50.0, 80.0);
        let target = shooting_point(Some(ball), Some(Point2D::new(50.0, 300.0)), 10.0, false);
        assert_eq!(target, Some(ball));
    }

    #[test]
    fn test_coincident_ball_and_goal_falls_back_to_ball() {
        let ball = Point2D::new(50.0, 80.0);
        assert_eq!(shooting_point(Some(ball), Some(ball), 25.0, true), Some(ball));
    }

    #[test]
    fn test_unknown_inputs_give_no_target() {
        let p = Point2D::new(1.0, 1.0);
        assert_eq!(shooting_point(None, Some(p), 10.0, false), None);
        assert_eq!(shooting_point(Some(p), None, 10.0, false), None);
        assert_eq!(shooting_point(None, None, 10.0, false), None);
    }

    #[test]
    fn test_non_finite_geometry_gives_no_target() {
        let ball = Point2D::new(0.0, 0.0);
        let goal = Point2D::new(1e-320, 1e300);
        assert_eq!(shooting_point(Some(ball), Some(goal), 10.0, false), None);
        assert_eq!(shooting_point(Some(Point2D::new(f64::NAN, 0.0)), Some(goal), 10.0, false), None);
    }
}
