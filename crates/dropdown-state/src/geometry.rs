//! Overlay placement
//!
//! Decides where the option panel renders relative to its trigger. The panel
//! matches the trigger's width and opens below it unless there is less than
//! `max_height` of room between the trigger's bottom edge and the bottom of
//! the screen, in which case it opens above.

use dropdown_platform::layout::{LayoutRect, MeasureError};
use serde::{Deserialize, Serialize};

/// Which side of the trigger the panel opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Panel sits above the trigger
    Up,
    /// Panel sits below the trigger
    #[default]
    Down,
}

/// Absolute placement of an open panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Top edge of the panel
    pub top: f32,
    /// Left edge of the panel
    pub left: f32,
    /// Panel width (equal to the trigger width)
    pub width: f32,
    /// Opening direction
    pub direction: Direction,
}

/// Place a panel of at most `max_height` next to `trigger`
///
/// # Example
///
/// ```rust
/// use dropdown_platform::layout::LayoutRect;
/// use dropdown_state::geometry::{resolve_geometry, Direction};
///
/// let near_bottom = resolve_geometry(LayoutRect::new(0.0, 700.0, 300.0, 50.0), 250.0, 800.0);
/// assert_eq!(near_bottom.direction, Direction::Up);
/// assert_eq!(near_bottom.top, 450.0);
/// ```
pub fn resolve_geometry(trigger: LayoutRect, max_height: f32, screen_height: f32) -> GeometrySnapshot {
    let space_below = screen_height - trigger.bottom();

    let (top, direction) = if space_below < max_height {
        (trigger.y - max_height, Direction::Up)
    } else {
        (trigger.bottom(), Direction::Down)
    };

    GeometrySnapshot {
        top,
        left: trigger.x,
        width: trigger.width,
        direction,
    }
}

/// Place a panel from a measurement result
///
/// A failed measurement yields the default snapshot; the panel then renders
/// at the origin until the user reopens it.
pub fn resolve_measurement(
    measured: Result<LayoutRect, MeasureError>,
    max_height: f32,
    screen_height: f32,
) -> GeometrySnapshot {
    match measured {
        Ok(trigger) => resolve_geometry(trigger, max_height, screen_height),
        Err(err) => {
            tracing::warn!("Trigger measurement failed, using default geometry: {}", err);
            GeometrySnapshot::default()
        }
    }
}
