use log::{debug, info};
use rand::Rng;
use rand::seq::index::sample;

use crate::field::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// Nothing happened: the cell was flagged, already exposed, off the board, or the game is over.
    Ignored,
    /// Number of cells newly exposed.
    Exposed(usize),
    Exploded,
}

impl Field {
    /// Lays the mines uniformly over every cell except `safe`.
    fn place_mines(&mut self, safe: Coord, rng: &mut impl Rng) {
        let Some(safe_idx) = self.index_of(safe) else { return };
        // indices at or past the clicked cell shift up by one
        for idx in sample(rng, self.cells.len() - 1, self.mines) {
            self.set_mine(if idx >= safe_idx { idx + 1 } else { idx }, true);
        }
        self.placed = true;
        self.fill_numbers();
        debug!("placed {} mines, first click at {:?}", self.mines, safe);
    }

    /// Exposes the hidden region around `start`, spreading through zeroes.
    fn flood_fill(&mut self, start: Coord) -> usize {
        let mut exposed = 0;
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            if self.get(p) != Some(Cell::Hidden(false)) || self.is_mine(p) {
                continue;
            }
            self.expose(p);
            exposed += 1;
            if self.count_at(p) == 0 {
                stack.extend(self.adjacents(p));
            }
        }

        exposed
    }

    /// Reveals the cell at `point`, laying the mines first if this is the opening click.
    pub fn reveal(&mut self, point: Coord, rng: &mut impl Rng) -> Reveal {
        if self.is_over() || self.get(point) != Some(Cell::Hidden(false)) {
            return Reveal::Ignored;
        }

        if !self.placed {
            self.place_mines(point, rng);
        }
        self.state = State::Playing;

        if self.is_mine(point) {
            self.expose(point);
            self.state = State::Lost(point);
            info!("hit a mine at {:?}\n{}", point, self);
            return Reveal::Exploded;
        }

        let exposed = self.flood_fill(point);
        debug!("revealed {:?}, {} cell(s) exposed, {} hidden", point, exposed, self.hidden);
        if self.hidden == self.mines {
            self.state = State::Won;
            info!("cleared the board\n{}", self);
        }
        Reveal::Exposed(exposed)
    }
}
