use crate::card::types::{ManaColor, ManaCost};
use crate::error::GameError;

/// Per-player mana pool tracking each color and colorless mana.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManaPool {
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
    pub colorless: u32,
}

/// Fixed drain order for the generic component of a cost.
const GENERIC_ORDER: [ManaColor; 6] = [
    ManaColor::Colorless,
    ManaColor::White,
    ManaColor::Blue,
    ManaColor::Black,
    ManaColor::Red,
    ManaColor::Green,
];

impl ManaPool {
    pub fn new() -> Self {
        ManaPool::default()
    }

    pub fn get(&self, color: ManaColor) -> u32 {
        match color {
            ManaColor::White => self.white,
            ManaColor::Blue => self.blue,
            ManaColor::Black => self.black,
            ManaColor::Red => self.red,
            ManaColor::Green => self.green,
            ManaColor::Colorless => self.colorless,
        }
    }

    fn slot(&mut self, color: ManaColor) -> &mut u32 {
        match color {
            ManaColor::White => &mut self.white,
            ManaColor::Blue => &mut self.blue,
            ManaColor::Black => &mut self.black,
            ManaColor::Red => &mut self.red,
            ManaColor::Green => &mut self.green,
            ManaColor::Colorless => &mut self.colorless,
        }
    }

    /// Add mana of one color. The amount must be positive.
    pub fn add(&mut self, color: ManaColor, amount: u32) -> Result<(), GameError> {
        if amount == 0 {
            return Err(GameError::InvalidManaAmount);
        }
        *self.slot(color) += amount;
        Ok(())
    }

    /// Spend mana of one color. The amount must be positive and must not
    /// exceed the balance; the pool is never left negative.
    pub fn spend(&mut self, color: ManaColor, amount: u32) -> Result<(), GameError> {
        if amount == 0 {
            return Err(GameError::InvalidManaAmount);
        }
        let slot = self.slot(color);
        if *slot < amount {
            return Err(GameError::InvalidManaAmount);
        }
        *slot -= amount;
        Ok(())
    }

    pub fn total(&self) -> u32 {
        self.white + self.blue + self.black + self.red + self.green + self.colorless
    }

    pub fn clear(&mut self) {
        *self = ManaPool::default();
    }

    /// Pay a full cost from the pool, all-or-nothing. Colored and colorless
    /// pips are satisfied from exactly matching mana; the generic component
    /// then drains the pool in a fixed order (colorless, white, blue, black,
    /// red, green). On failure the pool is unchanged.
    pub fn pay(&mut self, cost: &ManaCost) -> Result<(), GameError> {
        let mut scratch = *self;

        for (color, pips) in [
            (ManaColor::White, cost.white),
            (ManaColor::Blue, cost.blue),
            (ManaColor::Black, cost.black),
            (ManaColor::Red, cost.red),
            (ManaColor::Green, cost.green),
            (ManaColor::Colorless, cost.colorless),
        ] {
            if pips > 0 {
                let slot = scratch.slot(color);
                if *slot < pips {
                    return Err(GameError::InsufficientMana);
                }
                *slot -= pips;
            }
        }

        let mut generic = cost.generic;
        for color in GENERIC_ORDER {
            if generic == 0 {
                break;
            }
            let slot = scratch.slot(color);
            let drained = (*slot).min(generic);
            *slot -= drained;
            generic -= drained;
        }
        if generic > 0 {
            return Err(GameError::InsufficientMana);
        }

        *self = scratch;
        Ok(())
    }

    /// Whether a cost could be paid right now, without paying it.
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let mut scratch = *self;
        scratch.pay(cost).is_ok()
    }
}
