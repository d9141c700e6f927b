//! Energy colors and per-color reserves.

use strum::{EnumIter, EnumString};

/// Energy colors. White is the wildcard currency.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyColor {
    Red,
    Yellow,
    Blue,
    Green,
    White,
}

impl EnergyColor {
    /// The four non-wildcard colors, in draw order.
    pub const COLORED: [EnergyColor; 4] = [
        EnergyColor::Red,
        EnergyColor::Yellow,
        EnergyColor::Blue,
        EnergyColor::Green,
    ];

    pub const ALL: [EnergyColor; 5] = [
        EnergyColor::Red,
        EnergyColor::Yellow,
        EnergyColor::Blue,
        EnergyColor::Green,
        EnergyColor::White,
    ];

    #[inline]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, EnergyColor::White)
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// One counter per energy color.
///
/// Used both for a combatant's reserve and for a skill's cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyPool {
    pub red: u32,
    pub yellow: u32,
    pub blue: u32,
    pub green: u32,
    pub white: u32,
}

impl EnergyPool {
    pub const EMPTY: Self = Self {
        red: 0,
        yellow: 0,
        blue: 0,
        green: 0,
        white: 0,
    };

    /// Pool holding `amount` of a single color.
    pub fn of(color: EnergyColor, amount: u32) -> Self {
        let mut pool = Self::EMPTY;
        *pool.get_mut(color) = amount;
        pool
    }

    pub fn get(&self, color: EnergyColor) -> u32 {
        match color {
            EnergyColor::Red => self.red,
            EnergyColor::Yellow => self.yellow,
            EnergyColor::Blue => self.blue,
            EnergyColor::Green => self.green,
            EnergyColor::White => self.white,
        }
    }

    pub fn get_mut(&mut self, color: EnergyColor) -> &mut u32 {
        match color {
            EnergyColor::Red => &mut self.red,
            EnergyColor::Yellow => &mut self.yellow,
            EnergyColor::Blue => &mut self.blue,
            EnergyColor::Green => &mut self.green,
            EnergyColor::White => &mut self.white,
        }
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, color: EnergyColor, amount: u32) -> Self {
        *self.get_mut(color) = amount;
        self
    }

    pub fn add(&mut self, color: EnergyColor, amount: u32) {
        let slot = self.get_mut(color);
        *slot = slot.saturating_add(amount);
    }

    /// Adds every color of `other` into this pool.
    pub fn merge(&mut self, other: &EnergyPool) {
        for (color, amount) in other.iter() {
            self.add(color, amount);
        }
    }

    /// Removes up to `amount` of `color`, returning how much was actually taken.
    pub fn take(&mut self, color: EnergyColor, amount: u32) -> u32 {
        let slot = self.get_mut(color);
        let taken = (*slot).min(amount);
        *slot -= taken;
        taken
    }

    pub fn total(&self) -> u32 {
        EnergyColor::ALL.iter().map(|&c| self.get(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterates `(color, amount)` over all five colors, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (EnergyColor, u32)> + '_ {
        EnergyColor::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Per-color saturating subtraction.
    #[must_use]
    pub fn saturating_sub(&self, other: &EnergyPool) -> EnergyPool {
        let mut out = *self;
        for color in EnergyColor::ALL {
            *out.get_mut(color) = self.get(color).saturating_sub(other.get(color));
        }
        out
    }

    /// Array view ordered like [`EnergyColor::ALL`].
    pub fn to_array(&self) -> [u32; 5] {
        let mut out = [0; 5];
        for color in EnergyColor::ALL {
            out[color.index()] = self.get(color);
        }
        out
    }
}
