use std::sync::Arc;

use content::{
    AbilityId, ChargeStyle, ContentRepository, EffectTarget, ElementType, HazardKind, ItemId,
    MoveBlueprint, MoveCategory, MoveEffect, SideCondition, SpeciesBlueprint, Stat, StatSet,
    StatusAilment, Weather,
};

use crate::battle::engine::{CombatEngine, SideConfig};
use crate::battle::field::{Field, Side, SlotRef};
use crate::battle::providers::FirstMoveProvider;
use crate::battle::rng::BattleRng;
use crate::combatant::Combatant;

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```ignore
/// let combatant = TestCombatantBuilder::new("Pikachu")
///     .types(vec![ElementType::Electric])
///     .speed(90)
///     .moves(vec!["thunder-shock"])
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    level: u8,
    types: Vec<ElementType>,
    stats: StatSet,
    ability: Option<AbilityId>,
    item: Option<ItemId>,
    status: Option<StatusAilment>,
    moves: Vec<String>,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    /// Creates a builder with flat, neutral stats.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 50,
            types: vec![ElementType::Normal],
            stats: StatSet {
                hp: 100,
                attack: 50,
                defense: 50,
                special_attack: 50,
                special_defense: 50,
                speed: 50,
            },
            ability: None,
            item: None,
            status: None,
            moves: vec!["tackle".to_string()],
            current_hp: None,
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn types(mut self, types: Vec<ElementType>) -> Self {
        self.types = types;
        self
    }

    pub fn hp(mut self, hp: u16) -> Self {
        self.stats.hp = hp;
        self
    }

    pub fn attack(mut self, attack: u16) -> Self {
        self.stats.attack = attack;
        self
    }

    pub fn defense(mut self, defense: u16) -> Self {
        self.stats.defense = defense;
        self
    }

    pub fn special_attack(mut self, special_attack: u16) -> Self {
        self.stats.special_attack = special_attack;
        self
    }

    pub fn special_defense(mut self, special_defense: u16) -> Self {
        self.stats.special_defense = special_defense;
        self
    }

    pub fn speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn ability(mut self, ability: AbilityId) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    pub fn status(mut self, status: StatusAilment) -> Self {
        self.status = Some(status);
        self
    }

    pub fn moves(mut self, moves: Vec<&str>) -> Self {
        self.moves = moves.into_iter().map(str::to_string).collect();
        self
    }

    pub fn current_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let mut combatant = Combatant::new(
            &self.name,
            &self.name.to_lowercase(),
            self.level,
            self.types,
            self.stats,
            self.moves,
        );
        if let Some(ability) = self.ability {
            combatant = combatant.with_ability(ability);
        }
        if let Some(item) = self.item {
            combatant = combatant.with_item(item);
        }
        if let Some(status) = self.status {
            combatant = combatant.with_status(status);
        }
        if let Some(hp) = self.current_hp {
            combatant = combatant.with_hp(hp);
        }
        combatant
    }
}

/// Synthetic move and species tables covering everything the tests need.
pub fn test_content() -> ContentRepository {
    let mut content = ContentRepository::new();

    content.insert_move(
        "tackle",
        MoveBlueprint::damaging(
            "Tackle",
            ElementType::Normal,
            MoveCategory::Physical,
            40,
            Some(100),
        ),
    );
    content.insert_move(
        "thunder-shock",
        MoveBlueprint::damaging(
            "Thunder Shock",
            ElementType::Electric,
            MoveCategory::Special,
            40,
            Some(100),
        ),
    );
    content.insert_move(
        "quick-jab",
        MoveBlueprint::damaging(
            "Quick Jab",
            ElementType::Normal,
            MoveCategory::Physical,
            40,
            Some(100),
        )
        .with_priority(1),
    );
    content.insert_move(
        "headbutt",
        MoveBlueprint::damaging(
            "Headbutt",
            ElementType::Normal,
            MoveCategory::Physical,
            70,
            Some(100),
        )
        .with_effect(MoveEffect::Flinch { chance: 30 }),
    );
    content.insert_move(
        "ember",
        MoveBlueprint::damaging(
            "Ember",
            ElementType::Fire,
            MoveCategory::Special,
            40,
            Some(100),
        )
        .with_effect(MoveEffect::InflictStatus {
            target: EffectTarget::Target,
            status: StatusAilment::Burn,
            chance: 10,
        }),
    );
    content.insert_move(
        "solar-beam",
        MoveBlueprint::damaging(
            "Solar Beam",
            ElementType::Grass,
            MoveCategory::Special,
            120,
            Some(100),
        )
        .with_charge(ChargeStyle::Charging),
    );
    content.insert_move(
        "fly",
        MoveBlueprint::damaging(
            "Fly",
            ElementType::Flying,
            MoveCategory::Physical,
            90,
            Some(95),
        )
        .with_charge(ChargeStyle::SemiInvulnerable),
    );
    content.insert_move(
        "focus-punch",
        MoveBlueprint::damaging(
            "Focus Punch",
            ElementType::Fighting,
            MoveCategory::Physical,
            150,
            Some(100),
        )
        .with_priority(-3)
        .with_focus(),
    );
    content.insert_move(
        "splash",
        MoveBlueprint::status("Splash", ElementType::Normal, MoveEffect::None),
    );
    content.insert_move(
        "growl",
        MoveBlueprint::status(
            "Growl",
            ElementType::Normal,
            MoveEffect::ChangeStats {
                target: EffectTarget::Target,
                changes: vec![(Stat::Attack, -1)],
                chance: 100,
            },
        ),
    );
    content.insert_move(
        "confuse-ray",
        MoveBlueprint::status(
            "Confuse Ray",
            ElementType::Ghost,
            MoveEffect::Confuse { chance: 100 },
        ),
    );
    content.insert_move(
        "leech-seed",
        MoveBlueprint::status("Leech Seed", ElementType::Grass, MoveEffect::LeechSeed),
    );
    content.insert_move(
        "spikes",
        MoveBlueprint::status(
            "Spikes",
            ElementType::Ground,
            MoveEffect::SetHazard(HazardKind::Spikes),
        ),
    );
    content.insert_move(
        "toxic-spikes",
        MoveBlueprint::status(
            "Toxic Spikes",
            ElementType::Poison,
            MoveEffect::SetHazard(HazardKind::ToxicSpikes),
        ),
    );
    content.insert_move(
        "stealth-rock",
        MoveBlueprint::status(
            "Stealth Rock",
            ElementType::Rock,
            MoveEffect::SetHazard(HazardKind::StealthRock),
        ),
    );
    content.insert_move(
        "sticky-web",
        MoveBlueprint::status(
            "Sticky Web",
            ElementType::Bug,
            MoveEffect::SetHazard(HazardKind::StickyWeb),
        ),
    );
    content.insert_move(
        "reflect",
        MoveBlueprint::status(
            "Reflect",
            ElementType::Psychic,
            MoveEffect::SetSideCondition(SideCondition::Reflect),
        ),
    );
    content.insert_move(
        "light-screen",
        MoveBlueprint::status(
            "Light Screen",
            ElementType::Psychic,
            MoveEffect::SetSideCondition(SideCondition::LightScreen),
        ),
    );
    content.insert_move(
        "mist",
        MoveBlueprint::status(
            "Mist",
            ElementType::Ice,
            MoveEffect::SetSideCondition(SideCondition::Mist),
        ),
    );
    content.insert_move(
        "tailwind",
        MoveBlueprint::status(
            "Tailwind",
            ElementType::Flying,
            MoveEffect::SetSideCondition(SideCondition::Tailwind),
        ),
    );
    content.insert_move(
        "rain-dance",
        MoveBlueprint::status(
            "Rain Dance",
            ElementType::Water,
            MoveEffect::SetWeather(Weather::Rain),
        ),
    );

    content.insert_species(
        "pikachu",
        SpeciesBlueprint {
            name: "Pikachu".to_string(),
            types: vec![ElementType::Electric],
            base_stats: StatSet {
                hp: 35,
                attack: 55,
                defense: 40,
                special_attack: 50,
                special_defense: 50,
                speed: 90,
            },
        },
    );
    content.insert_species(
        "geodude",
        SpeciesBlueprint {
            name: "Geodude".to_string(),
            types: vec![ElementType::Rock],
            base_stats: StatSet {
                hp: 40,
                attack: 80,
                defense: 100,
                special_attack: 30,
                special_defense: 30,
                speed: 20,
            },
        },
    );

    content
}

/// A single-slot-per-side field with both combatants already sent out.
pub fn duel_field(a: Combatant, b: Combatant) -> Field {
    let mut side_a = Side::new(vec![a], 1, true);
    let mut side_b = Side::new(vec![b], 1, false);
    side_a.slots[0].set_occupant(0);
    side_b.slots[0].set_occupant(0);
    Field::new([side_a, side_b])
}

/// A field with full parties behind the single active slot on each side.
pub fn party_field(side_a: Vec<Combatant>, side_b: Vec<Combatant>) -> Field {
    let mut a = Side::new(side_a, 1, true);
    let mut b = Side::new(side_b, 1, false);
    a.slots[0].set_occupant(0);
    b.slots[0].set_occupant(0);
    Field::new([a, b])
}

pub const PLAYER_SLOT: SlotRef = SlotRef { side: 0, slot: 0 };
pub const OPPONENT_SLOT: SlotRef = SlotRef { side: 1, slot: 0 };

/// An initialized one-on-one engine where both sides pick their first move
/// every turn.
pub fn duel_engine(a: Combatant, b: Combatant, rng: Box<dyn BattleRng>) -> CombatEngine {
    let mut engine = CombatEngine::new(Arc::new(test_content()), rng);
    engine
        .initialize(
            vec![
                SideConfig {
                    party: vec![a],
                    providers: vec![Box::new(FirstMoveProvider)],
                    is_player: true,
                },
                SideConfig {
                    party: vec![b],
                    providers: vec![Box::new(FirstMoveProvider)],
                    is_player: false,
                },
            ],
            1,
        )
        .expect("valid duel configuration");
    engine
}
