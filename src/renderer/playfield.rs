//! Playfield rasterizer
//!
//! Scales one player's canvas into a fixed-size grid of terminal cells:
//! road, dashed lane dividers, enemy cars and the player's car.

use crate::sim::{Aabb, LaneGeometry, Player};
use crate::skins::{self, Rgb};

pub const ROAD: Rgb = skins::GRAY;
pub const DIVIDER: Rgb = skins::WHITE;
pub const ENEMY: Rgb = skins::RED;

const BLOCK: char = '\u{2588}'; // █
const DASH: char = '\u{2502}'; // │

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        ch: ' ',
        fg: ROAD,
        bg: ROAD,
    };

    pub fn solid(color: Rgb) -> Self {
        Cell {
            ch: BLOCK,
            fg: color,
            bg: ROAD,
        }
    }
}

/// Row-major cell buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::EMPTY; cols * rows],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Set a cell; out-of-range coordinates are clipped
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = cell;
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Count cells drawn in `color`
    pub fn count(&self, color: Rgb) -> usize {
        self.cells
            .iter()
            .filter(|c| c.ch == BLOCK && c.fg == color)
            .count()
    }
}

/// Canvas-to-cell mapping
#[derive(Debug, Clone, Copy)]
struct Scale {
    cols: f32,
    rows: f32,
    width: f32,
    height: f32,
}

impl Scale {
    fn col(&self, x: f32) -> f32 {
        x * self.cols / self.width
    }

    fn row(&self, y: f32) -> f32 {
        y * self.rows / self.height
    }

    /// Half-open cell span covered by `rect`; at least one cell wide and tall
    fn span(&self, rect: &Aabb) -> (i32, i32, i32, i32) {
        let max = rect.max();
        let c0 = self.col(rect.min.x).floor() as i32;
        let r0 = self.row(rect.min.y).floor() as i32;
        let c1 = (self.col(max.x).ceil() as i32).max(c0 + 1);
        let r1 = (self.row(max.y).ceil() as i32).max(r0 + 1);
        (c0, r0, c1, r1)
    }
}

fn fill(grid: &mut Grid, scale: Scale, rect: &Aabb, cell: Cell) {
    let (c0, r0, c1, r1) = scale.span(rect);
    for row in r0..r1 {
        for col in c0..c1 {
            grid.set(col, row, cell);
        }
    }
}

/// Rasterize `player`'s road into a `cols` x `rows` grid
pub fn rasterize(player: &Player, cols: usize, rows: usize) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let config = player.config();
    let scale = Scale {
        cols: cols as f32,
        rows: rows as f32,
        width: config.canvas_width.max(1) as f32,
        height: config.canvas_height.max(1) as f32,
    };

    // Dashes scroll with the road
    let scroll = scale.row(player.frame_count as f32 * player.speed()) as usize;
    let geo = LaneGeometry::from_config(config);
    for lane in 1..geo.lanes {
        let col = scale.col((lane * geo.slot_width) as f32).floor() as i32;
        for row in 0..rows {
            if (row + 4 - scroll % 4) % 4 < 2 {
                grid.set(
                    col,
                    row as i32,
                    Cell {
                        ch: DASH,
                        fg: DIVIDER,
                        bg: ROAD,
                    },
                );
            }
        }
    }

    for obstacle in &player.obstacles {
        fill(&mut grid, scale, &obstacle.bounds(config), Cell::solid(ENEMY));
    }

    if player.alive {
        let skin = player.skins.current_skin();
        let bounds = player.bounds();
        fill(&mut grid, scale, &bounds, Cell::solid(skin.body));

        // Windscreen on the second row when the car is tall enough
        let (c0, r0, c1, r1) = scale.span(&bounds);
        if r1 - r0 >= 3 {
            for col in c0..c1 {
                grid.set(col, r0 + 1, Cell::solid(skin.window));
            }
        }
    }

    grid
}
