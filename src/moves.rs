//! Single die-moves and whole turns.

use std::fmt;

/// Where a checker moves from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    Bar,
    Point(usize),
}

/// Where a checker moves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Point(usize),
    Off,
}

/// One die-move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Source,
    pub to: Target,
    /// Die value consumed by this move.
    pub die: u8,
    /// Whether the destination held a lone enemy checker before the move.
    pub hit: bool,
}

impl Move {
    pub fn is_bear_off(&self) -> bool {
        self.to == Target::Off
    }

    pub fn is_entry(&self) -> bool {
        self.from == Source::Bar
    }
}

/// Classic point label for an index, numbered from White's side (`P1..P24`).
pub fn point_label(idx: usize) -> String {
    format!("P{}", idx + 1)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Source::Bar => write!(f, "BAR")?,
            Source::Point(idx) => write!(f, "{}", point_label(idx))?,
        }
        write!(f, " -> ")?;
        match self.to {
            Target::Off => write!(f, "OFF")?,
            Target::Point(idx) => write!(f, "{}", point_label(idx))?,
        }
        write!(f, " ({})", self.die)?;
        if self.hit {
            write!(f, " *hit")?;
        }
        Ok(())
    }
}

/// Everything one player does in one turn: zero to four die-moves.
///
/// An empty turn is a pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Turn {
    moves: Vec<Move>,
}

impl Turn {
    pub fn pass() -> Self {
        Self::default()
    }

    /// A new turn with `mv` appended; `self` is left untouched.
    pub fn extended(&self, mv: Move) -> Turn {
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(mv);
        Turn { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl From<Vec<Move>> for Turn {
    fn from(moves: Vec<Move>) -> Self {
        Turn { moves }
    }
}

impl<'a> IntoIterator for &'a Turn {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.moves.is_empty() {
            return write!(f, "(pass)");
        }
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}
