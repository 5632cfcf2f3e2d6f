//! Grid geometry and maze layouts for the Forager world
//!
//! Layouts are plain text:
//! - `%` wall
//! - `.` food
//! - `P` agent start
//! - `G` ghost start
//! - ` ` empty floor

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Maximum number of ghosts in a layout
pub const MAX_GHOSTS: usize = 4;

// ============================================================================
// GEOMETRY
// ============================================================================

/// Grid cell (column, row); row 0 is the top line of the layout text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i16,
    pub y: i16,
}

impl Pos {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Neighbour in direction (Stop returns self)
    pub fn offset(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos::new(self.x + dx, self.y + dy)
    }
}

/// Agent / ghost action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

/// Every direction, Stop last
pub const ALL_DIRECTIONS: [Direction; 5] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::Stop,
];

/// The four moving directions
pub const MOVES: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// (dx, dy) with y growing downwards
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Static maze: walls plus starting positions
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub width: i16,
    pub height: i16,
    walls: FxHashSet<Pos>,
    pub food: Vec<Pos>,
    pub agent_start: Pos,
    pub ghost_starts: Vec<Pos>,
}

impl Layout {
    /// Parse layout text
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = rows[0].chars().count();
        let (grid_width, grid_height) = match (i16::try_from(width), i16::try_from(rows.len())) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(LayoutError::TooLarge {
                    width,
                    height: rows.len(),
                })
            }
        };
        let mut walls = FxHashSet::default();
        let mut food = Vec::new();
        let mut agents = Vec::new();
        let mut ghost_starts = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow { row, expected: width, found });
            }

            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(col as i16, row as i16);
                match ch {
                    '%' => {
                        walls.insert(pos);
                    }
                    '.' => food.push(pos),
                    'P' => agents.push(pos),
                    'G' => ghost_starts.push(pos),
                    ' ' => {}
                    _ => return Err(LayoutError::UnknownCell { ch, row, col }),
                }
            }
        }

        if agents.len() != 1 {
            return Err(LayoutError::AgentCount(agents.len()));
        }
        if ghost_starts.len() > MAX_GHOSTS {
            return Err(LayoutError::TooManyGhosts {
                max: MAX_GHOSTS,
                found: ghost_starts.len(),
            });
        }

        food.sort();

        Ok(Self {
            width: grid_width,
            height: grid_height,
            walls,
            food,
            agent_start: agents[0],
            ghost_starts,
        })
    }

    /// Load one of the built-in layouts by name
    pub fn builtin(name: &str) -> Result<Self, LayoutError> {
        let text = match name {
            "small" => SMALL_LAYOUT,
            "medium" => MEDIUM_LAYOUT,
            "open" => OPEN_LAYOUT,
            other => return Err(LayoutError::UnknownLayout(other.to_string())),
        };
        Self::parse(text)
    }

    /// Names accepted by `builtin`
    pub fn builtin_names() -> &'static [&'static str] {
        &["small", "medium", "open"]
    }

    /// Walls and cells outside the grid are blocked
    pub fn is_wall(&self, pos: Pos) -> bool {
        pos.x < 0
            || pos.y < 0
            || pos.x >= self.width
            || pos.y >= self.height
            || self.walls.contains(&pos)
    }

    /// Directions that lead onto floor from `pos` (Stop not included)
    pub fn open_moves(&self, pos: Pos) -> Vec<Direction> {
        MOVES
            .iter()
            .copied()
            .filter(|&dir| !self.is_wall(pos.offset(dir)))
            .collect()
    }

    /// Index of a food pellet position, if any
    pub fn food_index(&self, pos: Pos) -> Option<usize> {
        self.food.binary_search(&pos).ok()
    }
}

// ============================================================================
// BUILT-IN LAYOUTS
// ============================================================================

/// Tiny maze, one ghost
pub const SMALL_LAYOUT: &str = "\
%%%%%%%%%
%P  .  .%
% %%% % %
%.  G  .%
%%%%%%%%%
";

/// Classic-style maze, two ghosts
pub const MEDIUM_LAYOUT: &str = "\
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%..%........%..%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%
";

/// Open field, no ghosts
pub const OPEN_LAYOUT: &str = "\
%%%%%%%%%%
%P . . . %
%  . . . %
% . . . .%
%%%%%%%%%%
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small() {
        let layout = Layout::builtin("small").unwrap();
        assert_eq!(layout.width, 9);
        assert_eq!(layout.height, 5);
        assert_eq!(layout.agent_start, Pos::new(1, 1));
        assert_eq!(layout.ghost_starts, vec![Pos::new(4, 3)]);
        assert_eq!(layout.food.len(), 4);
    }

    #[test]
    fn test_all_builtins_parse() {
        for name in Layout::builtin_names() {
            assert!(Layout::builtin(name).is_ok(), "layout {} should parse", name);
        }
    }

    #[test]
    fn test_open_moves() {
        let layout = Layout::builtin("small").unwrap();
        // Top-left corner: only east and south are open
        let moves = layout.open_moves(Pos::new(1, 1));
        assert_eq!(moves, vec![Direction::South, Direction::East]);
    }

    #[test]
    fn test_outside_grid_is_wall() {
        let layout = Layout::builtin("open").unwrap();
        assert!(layout.is_wall(Pos::new(-1, 0)));
        assert!(layout.is_wall(Pos::new(0, 100)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Layout::parse(""), Err(LayoutError::Empty));
        assert_eq!(
            Layout::parse("%%%\n%P\n"),
            Err(LayoutError::RaggedRow { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(Layout::parse("%.%\n"), Err(LayoutError::AgentCount(0)));
        assert_eq!(
            Layout::parse("%PX\n"),
            Err(LayoutError::UnknownCell { ch: 'X', row: 0, col: 2 })
        );
        assert!(matches!(
            Layout::parse("PGGGGG\n"),
            Err(LayoutError::TooManyGhosts { found: 5, .. })
        ));
    }

    #[test]
    fn test_rejects_layout_wider_than_grid() {
        let text = format!("P{}\n", " ".repeat(39_999));
        assert_eq!(
            Layout::parse(&text),
            Err(LayoutError::TooLarge { width: 40_000, height: 1 })
        );
    }

    #[test]
    fn test_direction_reverse() {
        for dir in ALL_DIRECTIONS {
            assert_eq!(dir.reverse().reverse(), dir);
        }
        assert_eq!(Pos::new(2, 2).offset(Direction::Stop), Pos::new(2, 2));
    }
}
