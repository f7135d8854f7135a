use serde::{Deserialize, Serialize};
use strum::Display;

/// Field-wide weather.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Weather {
    Rain,
    Sun,
    Sandstorm,
    Hail,
}

/// Field-wide terrain.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

/// Side-scoped entry hazards, applied when an occupant switches in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HazardKind {
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
}

impl HazardKind {
    /// Maximum number of layers a side can accumulate for this hazard.
    pub fn max_layers(&self) -> u8 {
        match self {
            HazardKind::Spikes => 3,
            HazardKind::ToxicSpikes => 2,
            HazardKind::StealthRock | HazardKind::StickyWeb => 1,
        }
    }
}

/// Team-wide conditions with a duration, e.g. damage screens.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SideCondition {
    Reflect,
    LightScreen,
    Tailwind,
    Mist,
}
