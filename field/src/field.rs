use itertools::Itertools;
use log::{debug, trace};
use std::fmt;

use crate::error::FieldError;

/// Count reported by [`Cell::Revealed`] for an exposed mine.
pub const MINE: u8 = 9;

const EXPOSED: u8 = 1;
const FLAGGED: u8 = 1 << 1;
const MINED: u8 = 1 << 2;

/// Largest board `Field::new` will allocate.
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Clone, Copy, Default)]
pub(crate) struct CellData {
    /* bit-packed representation:
       x   x   x   x   x   x   x   x
       -------------       |   |   -
       mine count          |   |   exposed?
                           |   |
                           |   flagged by player?
                           |
                           mine?
    */
    data: u8,
}

impl CellData {
    fn has(self, bit: u8) -> bool {
        self.data & bit != 0
    }

    fn set(&mut self, bit: u8, on: bool) {
        if on {
            self.data |= bit;
        } else {
            self.data &= !bit;
        }
    }

    fn count(self) -> u8 {
        self.data >> 4
    }

    fn set_count(&mut self, n: u8) {
        self.data = self.data & 0x0f | n << 4;
    }

    fn to_cell(self) -> Cell {
        if self.has(EXPOSED) {
            Cell::Revealed(if self.has(MINED) { MINE } else { self.count() })
        } else {
            Cell::Hidden(self.has(FLAGGED))
        }
    }
}

/// What the player can see of a single square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Hidden(bool),
    Revealed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing has been revealed yet.
    Ready,
    Playing,
    Won,
    /// Holds the mine that went off.
    Lost(Coord),
}

pub type Coord = (isize, isize);

fn around((x, y): Coord) -> impl Iterator<Item=Coord> {
    [(x, y-1), (x+1, y-1), (x+1, y), (x+1, y+1), (x, y+1), (x-1, y+1), (x-1, y), (x-1, y-1)].into_iter()
}

#[derive(Clone)]
pub struct Field {
    pub(crate) cells: Vec<CellData>,
    width: usize,
    height: usize,
    pub(crate) mines: usize,
    flags_left: usize,
    pub(crate) hidden: usize,
    pub(crate) placed: bool,
    pub(crate) state: State,
}

impl Field {
    /// An empty board. Mines are laid on the first reveal so that it can never hit one.
    pub fn new(width: usize, height: usize, mines: usize) -> Result<Self, FieldError> {
        let cells = width.checked_mul(height).filter(|&cells| cells <= MAX_CELLS)
            .ok_or(FieldError::TooLarge { width, height })?;
        if cells == 0 {
            return Err(FieldError::EmptyBoard);
        }
        if mines >= cells {
            return Err(FieldError::TooManyMines { mines, cells });
        }
        debug!("new {}x{} field with {} mines", width, height, mines);
        Ok(Self {
            cells: vec![CellData::default(); cells],
            width,
            height,
            mines,
            flags_left: mines,
            hidden: cells,
            placed: false,
            state: State::Ready,
        })
    }

    /// A board with mines already placed at the given points.
    pub fn from_layout(width: usize, height: usize, mines: &[Coord]) -> Result<Self, FieldError> {
        let mines: Vec<Coord> = mines.iter().copied().unique().collect();
        let mut field = Self::new(width, height, mines.len())?;
        for &point in &mines {
            let idx = field.index_of(point).ok_or(FieldError::OutOfBounds(point))?;
            field.cells[idx].set(MINED, true);
        }
        field.placed = true;
        field.fill_numbers();
        Ok(field)
    }

    pub(crate) fn index_of(&self, (x, y): Coord) -> Option<usize> {
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y*self.width + x)
    }

    pub fn get(&self, point: Coord) -> Option<Cell> {
        self.index_of(point).map(|idx| self.cells[idx].to_cell())
    }

    /// Always false until the mines have been placed.
    pub fn is_mine(&self, point: Coord) -> bool {
        self.index_of(point).is_some_and(|idx| self.cells[idx].has(MINED))
    }

    pub(crate) fn count_at(&self, point: Coord) -> u8 {
        self.index_of(point).map_or(0, |idx| self.cells[idx].count())
    }

    pub(crate) fn expose(&mut self, point: Coord) {
        if let Some(idx) = self.index_of(point) {
            if !self.cells[idx].has(EXPOSED) {
                self.cells[idx].set(EXPOSED, true);
                self.hidden -= 1;
            }
        }
    }

    pub(crate) fn set_mine(&mut self, idx: usize, mine: bool) {
        self.cells[idx].set(MINED, mine);
    }

    pub(crate) fn fill_numbers(&mut self) {
        for point in self.positions() {
            let n = if self.is_mine(point) {
                0
            } else {
                self.adjacents(point).filter(|&adj| self.is_mine(adj)).count() as u8
            };
            if let Some(idx) = self.index_of(point) {
                self.cells[idx].set_count(n);
            }
        }
    }

    /// The up-to-8 neighbours of `point` that lie on the board.
    pub fn adjacents(&self, point: Coord) -> impl Iterator<Item=Coord> {
        let (width, height) = (self.width as isize, self.height as isize);
        around(point).filter(move |&(x, y)| 0 <= x && x < width && 0 <= y && y < height)
    }

    /// Every point on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item=Coord> {
        (0..self.height as isize).cartesian_product(0..self.width as isize).map(|(y, x)| (x, y))
    }

    /// Returns whether the flag was placed or removed.
    pub fn toggle_flag(&mut self, point: Coord) -> bool {
        if self.is_over() {
            return false;
        }
        let Some(idx) = self.index_of(point) else { return false };
        match self.cells[idx].to_cell() {
            Cell::Hidden(true) => {
                self.cells[idx].set(FLAGGED, false);
                self.flags_left += 1;
            },
            Cell::Hidden(false) if self.flags_left > 0 => {
                self.cells[idx].set(FLAGGED, true);
                self.flags_left -= 1;
            },
            _ => return false,
        }
        trace!("flag toggled at {:?}, {} left", point, self.flags_left);
        true
    }

    /// Starts over with the same dimensions and mine count.
    pub fn clear(&mut self) {
        self.cells.fill(CellData::default());
        self.flags_left = self.mines;
        self.hidden = self.cells.len();
        self.placed = false;
        self.state = State::Ready;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn flags_left(&self) -> usize {
        self.flags_left
    }

    /// Number of cells not yet exposed.
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, State::Won | State::Lost(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.cells.chunks(self.width).map(|row| {
            row.iter().map(|&data| match data.to_cell() {
                Cell::Hidden(false) => '#',
                Cell::Hidden(true) => 'F',
                Cell::Revealed(0) => '.',
                Cell::Revealed(MINE) => '*',
                Cell::Revealed(n) => char::from(b'0' + n),
            }).collect::<String>()
        });
        write!(f, "{}", rows.format("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_conversion() {
        let mut data = CellData::default();
        assert_eq!(data.to_cell(), Cell::Hidden(false));
        data.set(FLAGGED, true);
        assert_eq!(data.to_cell(), Cell::Hidden(true));
        data.set(FLAGGED, false);
        data.set_count(3);
        data.set(EXPOSED, true);
        assert_eq!(data.to_cell(), Cell::Revealed(3));
        data.set(MINED, true);
        assert_eq!(data.to_cell(), Cell::Revealed(MINE));
    }

    #[test]
    fn count_does_not_clobber_flags() {
        let mut data = CellData::default();
        data.set(MINED, true);
        data.set(FLAGGED, true);
        data.set_count(8);
        assert!(data.has(MINED) && data.has(FLAGGED) && !data.has(EXPOSED));
        assert_eq!(data.count(), 8);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(Field::new(0, 5, 0).err(), Some(FieldError::EmptyBoard));
        assert_eq!(Field::new(3, 3, 9).err(), Some(FieldError::TooManyMines { mines: 9, cells: 9 }));
        assert!(Field::new(3, 3, 8).is_ok());
        assert_eq!(Field::from_layout(3, 3, &[(3, 0)]).err(), Some(FieldError::OutOfBounds((3, 0))));
    }

    #[test]
    fn rejects_oversized_boards() {
        assert_eq!(Field::new(usize::MAX, 2, 10).err(), Some(FieldError::TooLarge { width: usize::MAX, height: 2 }));
        assert_eq!(Field::new(MAX_CELLS + 1, 1, 10).err(), Some(FieldError::TooLarge { width: MAX_CELLS + 1, height: 1 }));
        assert!(Field::new(MAX_CELLS, 1, 10).is_ok());
    }

    #[test]
    fn uninitialized() {
        let field = Field::new(4, 3, 2).unwrap();
        assert_eq!(field.get((0, 2)), Some(Cell::Hidden(false)));
        assert_eq!(field.hidden(), 12);
        assert_eq!(field.state(), State::Ready);
        assert!(field.positions().all(|p| !field.is_mine(p)));
    }

    #[test]
    fn out_of_bounds() {
        let field = Field::new(4, 3, 2).unwrap();
        for point in [(-1, 0), (0, -1), (4, 0), (0, 3), (-2, -2)] {
            assert_eq!(field.get(point), None);
            assert!(!field.is_mine(point));
        }
    }

    #[test]
    fn numbers_from_layout() {
        let field = Field::from_layout(3, 3, &[(0, 0), (0, 1), (1, 1)]).unwrap();
        assert_eq!(field.mines(), 3);
        assert_eq!(field.count_at((1, 0)), 3);
        assert_eq!(field.count_at((2, 0)), 1);
        assert_eq!(field.count_at((1, 2)), 2);
        assert_eq!(field.count_at((2, 2)), 1);
        assert_eq!(field.count_at((0, 0)), 0);
    }

    #[test]
    fn duplicate_layout_points_count_once() {
        let field = Field::from_layout(3, 3, &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(field.mines(), 1);
        assert_eq!(field.flags_left(), 1);
    }

    #[test]
    fn adjacents_stay_on_board() {
        let field = Field::new(3, 2, 1).unwrap();
        assert_eq!(field.adjacents((0, 0)).count(), 3);
        assert_eq!(field.adjacents((1, 0)).count(), 5);
        assert_eq!(field.adjacents((1, 1)).count(), 5);
        let big = Field::new(3, 3, 1).unwrap();
        assert_eq!(big.adjacents((1, 1)).count(), 8);
    }

    #[test]
    fn positions_are_row_major() {
        let field = Field::new(2, 2, 1).unwrap();
        assert_eq!(field.positions().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn flags_are_bounded_by_mines() {
        let mut field = Field::new(3, 3, 2).unwrap();
        assert!(field.toggle_flag((0, 0)));
        assert!(field.toggle_flag((1, 0)));
        assert_eq!(field.flags_left(), 0);
        assert!(!field.toggle_flag((2, 0)));
        assert_eq!(field.get((2, 0)), Some(Cell::Hidden(false)));
        assert!(field.toggle_flag((0, 0)));
        assert_eq!(field.flags_left(), 1);
        assert_eq!(field.get((0, 0)), Some(Cell::Hidden(false)));
        assert!(!field.toggle_flag((5, 5)));
    }

    #[test]
    fn display() {
        let mut field = Field::from_layout(3, 2, &[(2, 1)]).unwrap();
        field.toggle_flag((2, 1));
        field.expose((0, 0));
        field.expose((1, 1));
        assert_eq!(field.to_string(), ".##\n#1F");
    }
}
