use crate::error::GridError;
use crate::point::WorldPoint;
use crate::tiles::TileLegend;
use core::fmt;
use grid_util::point::Point;
use grid_util::{Grid, SimpleGrid};
use petgraph::unionfind::UnionFind;
use serde::Deserialize;
use smallvec::SmallVec;

/// A single tile of a [GridModel]. Immutable once the grid is built; the state a
/// search attaches to a cell lives in [SearchContext](crate::solver::SearchContext).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub point: Point,
    pub walkable: bool,
    /// Extra cost charged for entering this cell.
    pub movement_penalty: u32,
    pub world_anchor: WorldPoint,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::new(Point::new(0, 0), false, 0, WorldPoint::default())
    }
}

impl Cell {
    pub fn new(
        point: Point,
        walkable: bool,
        movement_penalty: u32,
        world_anchor: WorldPoint,
    ) -> Cell {
        Cell {
            point,
            walkable,
            movement_penalty,
            world_anchor,
        }
    }
}

/// Placement of the grid in world space. Cell `(x, y)` covers the square starting at
/// `origin + (x, y) * cell_size`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub origin: WorldPoint,
    pub cell_size: f32,
}

impl Default for GridLayout {
    fn default() -> GridLayout {
        GridLayout {
            origin: WorldPoint::default(),
            cell_size: 1.0,
        }
    }
}

impl GridLayout {
    pub fn new(origin: WorldPoint, cell_size: f32) -> GridLayout {
        GridLayout { origin, cell_size }
    }

    /// Centre of cell `(x, y)`.
    pub fn anchor(&self, x: usize, y: usize) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (x as f32 + 0.5) * self.cell_size,
            self.origin.y + (y as f32 + 0.5) * self.cell_size,
        )
    }

    fn validate(&self) -> Result<(), GridError> {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            Ok(())
        } else {
            Err(GridError::CellSize(self.cell_size))
        }
    }
}

/// Dense `width * height` lattice of [Cell]s, read-only after construction.
/// Connected components over walkable cells are computed up front using a
/// [UnionFind] so unreachable goals can be rejected without a search.
///
/// Searches address cells by the flat index of the underlying [SimpleGrid];
/// `points` maps such an index back to its coordinate.
#[derive(Clone, Debug)]
pub struct GridModel {
    width: usize,
    height: usize,
    layout: GridLayout,
    cells: SimpleGrid<Cell>,
    points: Vec<Point>,
    components: UnionFind<usize>,
}

impl GridModel {
    /// Builds a grid where `f(x, y)` yields `(walkable, movement_penalty)` for each cell.
    pub fn from_fn<F>(
        width: usize,
        height: usize,
        layout: GridLayout,
        mut f: F,
    ) -> Result<GridModel, GridError>
    where
        F: FnMut(usize, usize) -> (bool, u32),
    {
        check_size(width, height)?;
        layout.validate()?;
        let mut cells = SimpleGrid::new(width, height, Cell::default());
        for (x, y) in grid_coordinates(width, height) {
            let point = Point::new(x as i32, y as i32);
            let (walkable, penalty) = f(x, y);
            if let Some(slot) = cells.get_point_mut(point) {
                *slot = Cell::new(point, walkable, penalty, layout.anchor(x, y));
            }
        }
        Ok(GridModel::assemble(width, height, layout, cells))
    }

    /// Builds a grid from externally decoded cells, given in any order. Every coordinate
    /// in `[0, width) x [0, height)` must appear exactly once.
    pub fn from_cells(
        width: usize,
        height: usize,
        layout: GridLayout,
        cells: Vec<Cell>,
    ) -> Result<GridModel, GridError> {
        check_size(width, height)?;
        layout.validate()?;
        if cells.len() != width * height {
            return Err(GridError::CellCount {
                expected: width * height,
                actual: cells.len(),
            });
        }
        let mut slots: SimpleGrid<Option<Cell>> = SimpleGrid::new(width, height, None);
        for cell in cells {
            let point = cell.point;
            let slot = slots
                .get_point_mut(point)
                .ok_or(GridError::OutOfBounds { point })?;
            if slot.is_some() {
                return Err(GridError::DuplicateCell { point });
            }
            *slot = Some(cell);
        }
        let mut grid = SimpleGrid::new(width, height, Cell::default());
        for (x, y) in grid_coordinates(width, height) {
            let point = Point::new(x as i32, y as i32);
            // Counts match and there are no duplicates, so every slot is filled.
            let cell = slots.get_point_mut(point).and_then(Option::take);
            if let (Some(slot), Some(cell)) = (grid.get_point_mut(point), cell) {
                *slot = cell;
            }
        }
        Ok(GridModel::assemble(width, height, layout, grid))
    }

    /// Parses a text map. `.` is open ground, `#` is blocked and a digit `1`-`9` is
    /// walkable with that movement penalty. The first line is the top row.
    pub fn from_ascii(text: &str, layout: GridLayout) -> Result<GridModel, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        check_size(width, height)?;
        let mut decoded = vec![(true, 0); width * height];
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            let y = height - 1 - row;
            for (column, c) in line.chars().enumerate() {
                decoded[y * width + column] = match c {
                    '.' => (true, 0),
                    '#' => (false, 0),
                    '1'..='9' => (true, c.to_digit(10).unwrap_or(0)),
                    found => {
                        return Err(GridError::InvalidCharacter { found, row, column });
                    }
                };
            }
        }
        GridModel::from_fn(width, height, layout, |x, y| decoded[y * width + x])
    }

    /// Decodes row-major tile codes (row `y = 0` first) through a [TileLegend].
    pub fn from_tile_codes(
        width: usize,
        height: usize,
        codes: &[u32],
        legend: &TileLegend,
        layout: GridLayout,
    ) -> Result<GridModel, GridError> {
        if codes.len() != width * height {
            return Err(GridError::CellCount {
                expected: width * height,
                actual: codes.len(),
            });
        }
        GridModel::from_fn(width, height, layout, |x, y| {
            legend.decode(codes[y * width + x])
        })
    }

    fn assemble(
        width: usize,
        height: usize,
        layout: GridLayout,
        cells: SimpleGrid<Cell>,
    ) -> GridModel {
        let mut points = vec![Point::new(0, 0); width * height];
        for (x, y) in grid_coordinates(width, height) {
            let point = Point::new(x as i32, y as i32);
            points[cells.get_ix_point(&point)] = point;
        }
        let mut grid = GridModel {
            width,
            height,
            layout,
            cells,
            points,
            components: UnionFind::new(width * height),
        };
        grid.generate_components();
        grid
    }

    /// Links up 4-adjacent walkable cells into the same component.
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.max_size());
        for (x, y) in grid_coordinates(self.width, self.height) {
            let point = Point::new(x as i32, y as i32);
            if !self.is_walkable(point) {
                continue;
            }
            let ix = self.cells.get_ix_point(&point);
            for n in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.is_walkable(n) {
                    components.union(ix, self.cells.get_ix_point(&n));
                }
            }
        }
        self.components = components;
    }

    fn is_walkable(&self, point: Point) -> bool {
        self.cell(point).map_or(false, |c| c.walkable)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, which bounds the size of a search's open set.
    pub fn max_size(&self) -> usize {
        self.width * self.height
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// All cells, ordered by index.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.points.iter().filter_map(|p| self.cells.get_point(*p))
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.cells.point_in_bounds(point)
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.in_bounds(point).then(|| self.cells.get_ix_point(&point))
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        if self.in_bounds(point) {
            self.cells.get_point(point)
        } else {
            None
        }
    }

    /// Coordinate of the cell with index `ix`, if there is one.
    pub fn point_at_index(&self, ix: usize) -> Option<Point> {
        self.points.get(ix).copied()
    }

    /// Panics if `ix >= max_size()`.
    pub fn cell_at_index(&self, ix: usize) -> &Cell {
        match self.cells.get_point(self.points[ix]) {
            Some(cell) => cell,
            None => panic!("cell index {ix} is outside the grid"),
        }
    }

    /// Indices of the in-bounds 4-neighbours of cell `ix`, walkable or not, ordered
    /// left, down, up, right.
    pub fn neighbour_indices(&self, ix: usize) -> SmallVec<[usize; 4]> {
        let mut points: SmallVec<[Point; 4]> = self.points[ix]
            .neumann_neighborhood_smallvec()
            .into_iter()
            .filter(|p| self.cells.point_in_bounds(*p))
            .collect();
        points.sort_by_key(|p| (p.x, p.y));
        points
            .iter()
            .map(|p| self.cells.get_ix_point(p))
            .collect()
    }

    pub fn neighbours(&self, cell: &Cell) -> SmallVec<[&Cell; 4]> {
        match self.index_of(cell.point) {
            Some(ix) => self
                .neighbour_indices(ix)
                .into_iter()
                .map(|n| self.cell_at_index(n))
                .collect(),
            None => SmallVec::new(),
        }
    }

    /// Index of the cell nearest to `position`. Positions outside the grid snap to the
    /// closest border cell. Halfway cases round to the even cell.
    pub fn index_at_world_position(&self, position: WorldPoint) -> usize {
        let extent_x = self.width as f32 * self.layout.cell_size;
        let extent_y = self.height as f32 * self.layout.cell_size;
        let percent_x = ((position.x - self.layout.origin.x) / extent_x).clamp(0.0, 1.0);
        let percent_y = ((position.y - self.layout.origin.y) / extent_y).clamp(0.0, 1.0);
        let x = snap(self.width, percent_x);
        let y = snap(self.height, percent_y);
        self.cells.get_ix_point(&Point::new(x as i32, y as i32))
    }

    pub fn cell_at_world_position(&self, position: WorldPoint) -> &Cell {
        self.cell_at_index(self.index_at_world_position(position))
    }

    /// Checks if both points are walkable and on the same connected component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        match (self.index_of(start), self.index_of(goal)) {
            (Some(s), Some(g)) => {
                self.is_walkable(start) && self.is_walkable(goal) && self.components.equiv(s, g)
            }
            _ => false,
        }
    }

    /// Cost of following a cell-by-cell path: `step_cost` plus the entered cell's
    /// penalty for every step. [None] if the path leaves the grid, touches a blocked
    /// cell, contains a step that is not between 4-adjacent cells or costs more than
    /// [u32::MAX].
    pub fn path_cost(&self, path: &[Point], step_cost: u32) -> Option<u32> {
        let mut total: u32 = 0;
        for (i, p) in path.iter().enumerate() {
            let cell = self.cell(*p).filter(|c| c.walkable)?;
            if i > 0 {
                let prev = path[i - 1];
                if (prev.x - p.x).abs() + (prev.y - p.y).abs() != 1 {
                    return None;
                }
                total = total
                    .checked_add(step_cost)?
                    .checked_add(cell.movement_penalty)?;
            }
        }
        Some(total)
    }
}

/// Row-major `(x, y)` pairs covering a `width * height` grid.
fn grid_coordinates(width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

/// Cell coordinate along an axis of `len` cells for a position `percent` of the way
/// across it.
fn snap(len: usize, percent: f32) -> usize {
    (((len - 1) as f32 * percent).round_ties_even() as usize).min(len - 1)
}

fn check_size(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        Err(GridError::Empty { width, height })
    } else {
        Ok(())
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.height).rev() {
            let row = (0..self.width as i32)
                .filter_map(|x| self.cell(Point::new(x, y as i32)))
                .map(|c| match (c.walkable, c.movement_penalty) {
                    (false, _) => '#',
                    (true, 0) => '.',
                    (true, p) if p < 10 => char::from_digit(p, 10).unwrap_or('+'),
                    (true, _) => '+',
                })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
