//! Translation of raw pointer positions and key presses into picker commands.

use crate::config::{ARROW_HALF_HEIGHT, NEXT_ARROW_DX, PREV_ARROW_DX};
use crate::geometry::RadialLayout;
use slint::SharedString;
use slint::platform::Key;

/// Page navigation arrow drawn in the centre hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavArrow {
    Prev,
    Next,
}

/// What a pointer position lands on outside preview mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Arrow(NavArrow),
    Sector(usize),
    /// The centre hole or anything beyond the outer ring.
    Outside,
}

/// Keyboard commands the picker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Escape,
    NextPage,
    PrevPage,
}

/// Which arrows are currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrowAvailability {
    pub prev: bool,
    pub next: bool,
}

/// Arrow click zone under the centre-relative offset, if that arrow is shown.
pub fn arrow_at(dx: f32, dy: f32, arrows: ArrowAvailability) -> Option<NavArrow> {
    if dy.abs() >= ARROW_HALF_HEIGHT {
        return None;
    }
    if arrows.prev && dx >= PREV_ARROW_DX.0 && dx <= PREV_ARROW_DX.1 {
        return Some(NavArrow::Prev);
    }
    if arrows.next && dx >= NEXT_ARROW_DX.0 && dx <= NEXT_ARROW_DX.1 {
        return Some(NavArrow::Next);
    }
    None
}

/// Resolves a canvas point. Arrows take precedence over the ring.
pub fn hit_test(
    layout: &RadialLayout,
    x: f32,
    y: f32,
    sector_count: usize,
    arrows: ArrowAvailability,
) -> Hit {
    let polar = layout.polar(x, y);
    if let Some(arrow) = arrow_at(polar.dx, polar.dy, arrows) {
        return Hit::Arrow(arrow);
    }
    match layout.sector_at(x, y, sector_count) {
        Some(index) => Hit::Sector(index),
        None => Hit::Outside,
    }
}

fn is_key(text: &str, key: Key) -> bool {
    SharedString::from(key).as_str() == text
}

/// Maps the text of a key event to a command.
pub fn key_command(text: &str) -> Option<KeyCommand> {
    if is_key(text, Key::Escape) {
        Some(KeyCommand::Escape)
    } else if is_key(text, Key::RightArrow) || is_key(text, Key::Space) {
        Some(KeyCommand::NextPage)
    } else if is_key(text, Key::LeftArrow) {
        Some(KeyCommand::PrevPage)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: ArrowAvailability = ArrowAvailability {
        prev: true,
        next: true,
    };

    fn layout() -> RadialLayout {
        RadialLayout::new(900.0, 900.0, 0.25)
    }

    #[test]
    fn arrows_are_tested_before_the_hole() {
        let l = layout();
        assert_eq!(hit_test(&l, 450.0 - 60.0, 450.0, 6, BOTH), Hit::Arrow(NavArrow::Prev));
        assert_eq!(hit_test(&l, 450.0 + 50.0, 455.0, 6, BOTH), Hit::Arrow(NavArrow::Next));
    }

    #[test]
    fn hidden_arrows_fall_through_to_the_hole() {
        let l = layout();
        let arrows = ArrowAvailability {
            prev: false,
            next: true,
        };
        assert_eq!(hit_test(&l, 450.0 - 60.0, 450.0, 6, arrows), Hit::Outside);
        assert_eq!(
            hit_test(&l, 450.0 - 60.0, 450.0, 6, ArrowAvailability::default()),
            Hit::Outside
        );
    }

    #[test]
    fn arrow_zone_edges() {
        assert_eq!(arrow_at(-90.0, 0.0, BOTH), Some(NavArrow::Prev));
        assert_eq!(arrow_at(-40.0, 29.9, BOTH), Some(NavArrow::Prev));
        assert_eq!(arrow_at(-40.0, 30.0, BOTH), None);
        assert_eq!(arrow_at(-91.0, 0.0, BOTH), None);
        assert_eq!(arrow_at(0.0, 0.0, BOTH), None);
        assert_eq!(arrow_at(80.0, -10.0, BOTH), Some(NavArrow::Next));
        assert_eq!(arrow_at(81.0, -10.0, BOTH), None);
    }

    #[test]
    fn ring_points_are_sectors() {
        let l = layout();
        assert_eq!(hit_test(&l, 450.0 + 300.0, 451.0, 6, BOTH), Hit::Sector(0));
        assert_eq!(hit_test(&l, 450.0, 450.0 - 300.0, 4, BOTH), Hit::Sector(3));
        assert_eq!(hit_test(&l, 5.0, 5.0, 6, BOTH), Hit::Outside);
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(key_command("\u{1b}"), Some(KeyCommand::Escape));
        assert_eq!(key_command(" "), Some(KeyCommand::NextPage));
        assert_eq!(
            key_command(SharedString::from(Key::RightArrow).as_str()),
            Some(KeyCommand::NextPage)
        );
        assert_eq!(
            key_command(SharedString::from(Key::LeftArrow).as_str()),
            Some(KeyCommand::PrevPage)
        );
        assert_eq!(key_command("a"), None);
    }
}
