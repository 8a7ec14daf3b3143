/// State of a single grid cell. The discriminants are the codes printed
/// when the grid is rendered as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Blocked = 0,
    Open = 1,
    Entrance = 2,
    PlayerHere = 5,
    Exit = 8,
}

impl Cell {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Blocked),
            1 => Some(Cell::Open),
            2 => Some(Cell::Entrance),
            5 => Some(Cell::PlayerHere),
            8 => Some(Cell::Exit),
            _ => None,
        }
    }

    /// Everything except `Blocked` can be stepped on.
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Blocked)
    }

    /// Entrance and exit stay visible for the whole session.
    pub fn is_landmark(self) -> bool {
        matches!(self, Cell::Entrance | Cell::Exit)
    }
}
