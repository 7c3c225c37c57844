//! The overworld tile map.

use crate::core::constants::TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    /// Walking onto tall grass may start an encounter
    Grass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// 15x11 tiles, one 32px tile per character.
const ROUTE_LAYOUT: [&str; 11] = [
    "###############",
    "#.....\"\"\"\"\"\"..#",
    "#.....\"\"\"\"\"\"..#",
    "#..##.\"\"\"\"\"\"..#",
    "#..##.........#",
    "#.............#",
    "#\"\"\"\"...##....#",
    "#\"\"\"\"...##....#",
    "#\"\"\"\".........#",
    "#.............#",
    "###############",
];

pub const SPAWN_TILE: (i32, i32) = (7, 5);

#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Parses rows of `#` (wall), `.` (floor) and `"` (grass).
    /// Short rows are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            let mut cells: Vec<Tile> = row
                .chars()
                .map(|ch| match ch {
                    '.' => Tile::Floor,
                    '"' => Tile::Grass,
                    _ => Tile::Wall,
                })
                .collect();
            cells.resize(width, Tile::Wall);
            tiles.extend(cells);
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn route() -> Self {
        Self::from_rows(&ROUTE_LAYOUT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Anything off the map counts as wall.
    pub fn tile(&self, col: i32, row: i32) -> Tile {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return Tile::Wall;
        }
        self.tiles[row as usize * self.width + col as usize]
    }

    pub fn is_walkable(&self, col: i32, row: i32) -> bool {
        self.tile(col, row) != Tile::Wall
    }

    /// Tiles with their top-left canvas position, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Tile, f64, f64)> + '_ {
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let col = (index % self.width) as f64;
            let row = (index / self.width) as f64;
            (*tile, col * TILE_SIZE, row * TILE_SIZE)
        })
    }
}

/// The trainer walking the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    pub col: i32,
    pub row: i32,
    /// Canvas position, tweened between tiles
    pub x: f64,
    pub y: f64,
    pub facing: Direction,
}

impl Walker {
    pub fn at(col: i32, row: i32) -> Self {
        Self {
            col,
            row,
            x: col as f64 * TILE_SIZE,
            y: row as f64 * TILE_SIZE,
            facing: Direction::Down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_layout() {
        let map = TileMap::route();
        assert_eq!(map.width(), 15);
        assert_eq!(map.height(), 11);
        assert_eq!(map.tile(0, 0), Tile::Wall);
        assert_eq!(map.tile(6, 1), Tile::Grass);
        assert!(map.is_walkable(SPAWN_TILE.0, SPAWN_TILE.1));
    }

    #[test]
    fn test_off_map_is_wall() {
        let map = TileMap::route();
        assert_eq!(map.tile(-1, 3), Tile::Wall);
        assert_eq!(map.tile(3, 99), Tile::Wall);
    }

    #[test]
    fn test_short_rows_padded() {
        let map = TileMap::from_rows(&["#..", "#"]);
        assert_eq!(map.width(), 3);
        assert_eq!(map.tile(2, 1), Tile::Wall);
        assert_eq!(map.tiles().count(), 6);
    }

    #[test]
    fn test_walker_canvas_position_follows_tile() {
        let walker = Walker::at(2, 3);
        assert_eq!((walker.x, walker.y), (64.0, 96.0));
    }
}
