//! Collision detection and response against static level geometry
//!
//! Axis-separated: a body moves along y and is pushed out of every platform it
//! now overlaps, then moves along x and is pushed out again. There is no swept
//! test, so a body faster than a platform's thickness per step can pass
//! through it, and corners can snap. Both are accepted.

use glam::Vec2;

use super::rect::Rect;

/// A moving box with a velocity (pixels/s)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self { rect, vel: Vec2::ZERO }
    }
}

/// What happens to horizontal velocity when a body hits the side of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallResponse {
    /// Zero horizontal velocity (player, baddies)
    Stop,
    /// Reverse horizontal velocity (barrels)
    Bounce,
}

/// Contacts produced by one `move_and_collide`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Came down onto a platform top
    pub landed: bool,
    /// Hit the underside of a platform
    pub bumped_head: bool,
    /// Hit the side of a platform
    pub hit_wall: bool,
}

/// Move along y by `vel.y * dt` and resolve overlaps against `solids`.
///
/// Returns (landed, bumped_head). A downward mover is snapped so its bottom
/// equals the platform top; an upward mover is snapped to the platform bottom.
pub fn resolve_vertical(body: &mut Body, solids: &[Rect], dt: f32) -> (bool, bool) {
    let mut landed = false;
    let mut bumped = false;

    body.rect.y += body.vel.y * dt;
    for solid in solids {
        if !body.rect.overlaps(solid) {
            continue;
        }
        if body.vel.y > 0.0 {
            body.rect.y = solid.y - body.rect.h;
            body.vel.y = 0.0;
            landed = true;
        } else if body.vel.y < 0.0 {
            body.rect.y = solid.bottom();
            body.vel.y = 0.0;
            bumped = true;
        }
    }

    (landed, bumped)
}

/// Move along x by `vel.x * dt` and resolve overlaps against `solids`.
///
/// Returns true if any platform side was hit.
pub fn resolve_horizontal(
    body: &mut Body,
    solids: &[Rect],
    dt: f32,
    response: WallResponse,
) -> bool {
    let mut hit = false;

    body.rect.x += body.vel.x * dt;
    for solid in solids {
        if !body.rect.overlaps(solid) {
            continue;
        }
        if body.vel.x > 0.0 {
            body.rect.x = solid.x - body.rect.w;
        } else if body.vel.x < 0.0 {
            body.rect.x = solid.right();
        }
        body.vel.x = match response {
            WallResponse::Stop => 0.0,
            WallResponse::Bounce => -body.vel.x,
        };
        hit = true;
    }

    hit
}

/// Vertical then horizontal resolution for one step
pub fn move_and_collide(
    body: &mut Body,
    solids: &[Rect],
    dt: f32,
    response: WallResponse,
) -> Contacts {
    let (landed, bumped_head) = resolve_vertical(body, solids, dt);
    let hit_wall = resolve_horizontal(body, solids, dt, response);
    Contacts {
        landed,
        bumped_head,
        hit_wall,
    }
}

/// Keep a body inside [0, world_w]. Returns the side that was touched:
/// -1 for the left edge, 1 for the right edge, 0 for none.
pub fn clamp_to_world_x(body: &mut Body, world_w: f32) -> i32 {
    if body.rect.x < 0.0 {
        body.rect.x = 0.0;
        -1
    } else if body.rect.right() > world_w {
        body.rect.x = world_w - body.rect.w;
        1
    } else {
        0
    }
}

/// Squared distance between two box centers
#[inline]
pub fn center_distance_sq(a: &Rect, b: &Rect) -> f32 {
    a.center().distance_squared(b.center())
}
