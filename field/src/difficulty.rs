#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Difficulty {
    Easy,
    #[cfg_attr(feature = "clap", clap(alias = "medium"))]
    Intermediate,
    Expert,
}
use Difficulty::*;

impl Difficulty {
    /// Board width, height and mine count of the preset.
    pub fn dimensions(self) -> (usize, usize, usize) {
        match self {
            Easy => (10, 10, 10),
            Intermediate => (15, 15, 40),
            Expert => (30, 16, 99),
        }
    }
}
