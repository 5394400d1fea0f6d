use crate::common::constants::STYLE_CYCLE_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Blue,
    Red,
    Green,
    Black,
    Yellow,
}

impl PaletteColor {
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Blue => (0, 0, 255),
            Self::Red => (255, 0, 0),
            Self::Green => (0, 128, 0),
            Self::Black => (0, 0, 0),
            Self::Yellow => (191, 191, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Black => "black",
            Self::Yellow => "yellow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
    HorizontalTick,
}

impl LineStyle {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::DashDot => "dash-dot",
            Self::Dotted => "dotted",
            Self::HorizontalTick => "hline-marker",
        }
    }
}

pub const COLORS: [PaletteColor; STYLE_CYCLE_LENGTH] = [
    PaletteColor::Blue,
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Black,
    PaletteColor::Yellow,
];

pub const LINE_STYLES: [LineStyle; STYLE_CYCLE_LENGTH] = [
    LineStyle::Solid,
    LineStyle::Dashed,
    LineStyle::DashDot,
    LineStyle::Dotted,
    LineStyle::HorizontalTick,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: PaletteColor,
    pub line: LineStyle,
    pub opacity: f64,
}

/// Per-transition style counter; both palettes wrap after five series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleCycle {
    index: usize,
}

impl StyleCycle {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    pub fn next_style(&mut self, opacity: f64) -> SeriesStyle {
        let slot = self.index % STYLE_CYCLE_LENGTH;
        let color = COLORS[slot];
        let line = LINE_STYLES[slot];
        self.index += 1;
        SeriesStyle {
            color,
            line,
            opacity,
        }
    }
}
