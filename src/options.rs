use clap::ValueEnum;
use crossterm::style::Color;

pub struct Theme {
    pub bg_hidden: Color,
    pub bg_exposed: Color,
    pub bg_void: Color,
    pub bg_detonated: Color,
    pub header: Color,
    pub nums: [Color; 8],
    pub flag: Color,
    pub mine: Color,
}

impl Theme {
    /// Colour for a revealed count between 1 and 8.
    pub fn num(&self, n: u8) -> Color {
        self.nums[(n as usize).clamp(1, 8) - 1]
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Classic,
    Frappe,
    HighContrast,
    BlackAndWhite,
}

impl ThemeChoice {
    pub fn theme(self) -> Theme {
        match self {
            Self::Classic => Theme {
                // gray60 / gray80
                bg_hidden: Color::Rgb { r: 153, g: 153, b: 153 },
                bg_exposed: Color::Rgb { r: 204, g: 204, b: 204 },
                bg_void: Color::Rgb { r: 51, g: 51, b: 51 },
                bg_detonated: Color::Rgb { r: 255, g: 0, b: 0 },
                header: Color::Rgb { r: 51, g: 51, b: 51 },
                nums: [
                    Color::Rgb { r:   0, g:   0, b: 255 },
                    Color::Rgb { r:   0, g: 128, b:   0 },
                    Color::Rgb { r: 255, g:   0, b:   0 },
                    Color::Rgb { r:   0, g:   0, b: 128 },
                    Color::Rgb { r: 128, g:   0, b:   0 },
                    Color::Rgb { r:   0, g: 128, b: 128 },
                    Color::Rgb { r:   0, g:   0, b:   0 },
                    Color::Rgb { r: 128, g: 128, b: 128 },
                ],
                flag: Color::Rgb { r: 0, g: 0, b: 255 },
                mine: Color::Rgb { r: 255, g: 0, b: 0 },
            },
            Self::Frappe => Theme {
                bg_hidden: Color::Rgb { r: 48, g: 52, b: 70 },
                bg_exposed: Color::Rgb { r: 98, g: 104, b: 128 },
                bg_void: Color::Rgb { r: 41, g: 44, b: 60 },
                bg_detonated: Color::Rgb { r: 231, g: 130, b: 132 },
                header: Color::Rgb { r: 35, g: 38, b: 52 },
                nums: [
                    Color::Rgb { r: 140, g: 187, b: 241 },
                    Color::Rgb { r: 166, g: 209, b: 137 },
                    Color::Rgb { r: 231, g: 130, b: 132 },
                    Color::Rgb { r: 202, g: 158, b: 230 },
                    Color::Rgb { r: 239, g: 159, b: 118 },
                    Color::Rgb { r: 129, g: 200, b: 190 },
                    Color::Rgb { r: 198, g: 208, b: 245 },
                    Color::Rgb { r: 238, g: 190, b: 190 },
                ],
                flag: Color::Rgb { r: 229, g: 200, b: 144 },
                mine: Color::Rgb { r: 231, g: 130, b: 132 },
            },
            Self::HighContrast => Theme {
                bg_hidden: Color::Rgb { r: 0, g: 0, b: 0 },
                bg_exposed: Color::Rgb { r: 60, g: 60, b: 60 },
                bg_void: Color::Rgb { r: 0, g: 0, b: 0 },
                bg_detonated: Color::Rgb { r: 255, g: 0, b: 0 },
                header: Color::Rgb { r: 0, g: 0, b: 0 },
                nums: [
                    Color::Rgb { r:   0, g: 128, b: 255 },
                    Color::Rgb { r:   0, g: 255, b:   0 },
                    Color::Rgb { r: 255, g:  60, b:  60 },
                    Color::Rgb { r: 180, g: 100, b: 255 },
                    Color::Rgb { r: 216, g: 164, b:  32 },
                    Color::Rgb { r:   0, g: 192, b: 192 },
                    Color::Rgb { r: 230, g: 230, b: 192 },
                    Color::Rgb { r: 216, g: 216, b: 216 },
                ],
                flag: Color::Rgb { r: 250, g: 240, b: 50 },
                mine: Color::Rgb { r: 255, g: 60, b: 60 },
            },
            Self::BlackAndWhite => Theme {
                bg_hidden: Color::Grey,
                bg_exposed: Color::AnsiValue(145),
                bg_void: Color::Grey,
                bg_detonated: Color::White,
                header: Color::Grey,
                nums: [Color::Black; 8],
                flag: Color::Black,
                mine: Color::Black,
            },
        }
    }
}

pub struct IconSet {
    pub hidden: char,
    pub flag: char,
    pub mine: char,
    pub wrong_flag: char,
    pub empty: char,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IconSetChoice {
    Ascii,
    Latin1,
    Unicode,
}

impl IconSetChoice {
    pub fn iconset(self) -> IconSet {
        match self {
            Self::Ascii => IconSet {
                hidden: '`',
                flag: 'P',
                mine: '*',
                wrong_flag: 'X',
                empty: ' ',
            },
            Self::Latin1 => IconSet {
                hidden: '·',
                flag: '¶',
                mine: '¤',
                wrong_flag: '×',
                empty: ' ',
            },
            Self::Unicode => IconSet {
                hidden: '·',
                flag: '⚑',
                mine: '✹',
                wrong_flag: '✗',
                empty: ' ',
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_colours_are_one_based() {
        let theme = ThemeChoice::Classic.theme();
        assert_eq!(theme.num(1), theme.nums[0]);
        assert_eq!(theme.num(8), theme.nums[7]);
    }
}
