//! Typed arguments for Tic commands.

/// Direction argument of the homing command.
///
/// The wire format is a raw byte and [`crate::command::home`] passes any
/// byte through unchanged; this enum names the two values the firmware
/// documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeDirection {
    Reverse,
    Forward,
}

impl HomeDirection {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Reverse => 0,
            Self::Forward => 1,
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Reverse),
            1 => Some(Self::Forward),
            _ => None,
        }
    }
}

impl From<HomeDirection> for u8 {
    fn from(direction: HomeDirection) -> Self {
        direction.to_u8()
    }
}
