//! Screen regions.
//!
//! The screen is the path view over a one-row status bar.  The path view is
//! itself the projected scene plus a one-column depth rail on the right,
//! separated by a blank column.

use ratatui::layout::{Constraint, Layout, Rect};

/// Smallest path view worth projecting cards into.
const MIN_PATH_WIDTH: u16 = 8;
const MIN_PATH_HEIGHT: u16 = 3;

/// Path view above the status bar.
pub struct AppLayout {
    pub path_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let [path_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        Self {
            path_area,
            status_area,
        }
    }
}

/// Split of the path view into the card scene and the depth rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLayout {
    pub scene: Rect,
    pub rail: Rect,
}

impl PathLayout {
    /// `None` when the view is too small to draw cards in.
    pub fn split(path_area: Rect) -> Option<Self> {
        if path_area.width < MIN_PATH_WIDTH || path_area.height < MIN_PATH_HEIGHT {
            return None;
        }
        let [scene, _gap, rail] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(path_area);
        Some(Self { scene, rail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_takes_the_last_row() {
        let l = AppLayout::from_area(Rect::new(0, 0, 120, 51));
        assert_eq!(l.path_area, Rect::new(0, 0, 120, 50));
        assert_eq!(l.status_area, Rect::new(0, 50, 120, 1));
    }

    #[test]
    fn rail_is_the_rightmost_column() {
        let p = PathLayout::split(Rect::new(2, 1, 100, 40)).unwrap();
        assert_eq!(p.scene, Rect::new(2, 1, 98, 40));
        assert_eq!(p.rail, Rect::new(101, 1, 1, 40));
    }

    #[test]
    fn tiny_path_view_has_no_split() {
        assert!(PathLayout::split(Rect::new(0, 0, 7, 40)).is_none());
        assert!(PathLayout::split(Rect::new(0, 0, 100, 2)).is_none());
    }
}
