//! The closed set of tracked statistic kinds.
//!
//! Every activity the tracker records falls into exactly one of these
//! kinds. The set is closed: storage tables, presentation text and the
//! reconciler all iterate `StatKind::all()` and rely on its order being
//! stable across runs.
//!
//! Kind-specific knowledge lives in the [`KindDescriptor`] table rather
//! than in per-kind branches, so consumers look metadata up instead of
//! matching on individual kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;

/// A category of tracked player activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Times the player joined the server.
    Joins,
    /// Times the player died.
    Deaths,
    /// Blocks the player broke.
    BlocksBroken,
    /// Blocks the player placed.
    BlocksPlaced,
    /// Arrows the player shot.
    ArrowsShot,
    /// Buckets the player emptied.
    BucketsEmptied,
    /// Buckets the player filled.
    BucketsFilled,
    /// Commands the player performed.
    CommandsPerformed,
    /// Damage the player took.
    DamageTaken,
    /// Distance the player travelled.
    DistanceTravelled,
    /// Eggs the player threw.
    EggsThrown,
    /// Beds the player entered.
    EnteredBeds,
    /// Food items the player ate.
    FoodEaten,
    /// Items the player caught while fishing.
    ItemsCaught,
    /// Items the player crafted.
    ItemsCrafted,
    /// Items the player dropped.
    ItemsDropped,
    /// Items the player picked up.
    ItemsPickedUp,
    /// Mobs the player killed.
    KillsMobs,
    /// Players the player killed.
    KillsPlayers,
    /// Times the player teleported.
    Teleports,
    /// Minutes the player spent on the server.
    TimePlayed,
    /// Times the player was kicked.
    TimesKicked,
    /// Sheep the player shore.
    TimesShorn,
    /// Tools the player broke.
    ToolsBroken,
    /// Trades the player made with villagers.
    VillagerTrades,
    /// Votes the player cast for the server.
    Votes,
    /// Times the player switched worlds.
    WorldsChanged,
    /// Experience the player gained.
    XpGained,
}

/// Metadata describing one statistic kind.
///
/// The descriptor names the auxiliary columns storage records for the
/// kind and the label presentation uses; the core itself never branches
/// on individual kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDescriptor {
    /// Human-readable label for presentation.
    pub label: &'static str,
    /// Auxiliary column names recorded alongside the value column.
    pub columns: &'static [&'static str],
}

impl StatKind {
    /// Get all declared kinds, in stable declaration order.
    pub fn all() -> &'static [StatKind] {
        &[
            StatKind::Joins,
            StatKind::Deaths,
            StatKind::BlocksBroken,
            StatKind::BlocksPlaced,
            StatKind::ArrowsShot,
            StatKind::BucketsEmptied,
            StatKind::BucketsFilled,
            StatKind::CommandsPerformed,
            StatKind::DamageTaken,
            StatKind::DistanceTravelled,
            StatKind::EggsThrown,
            StatKind::EnteredBeds,
            StatKind::FoodEaten,
            StatKind::ItemsCaught,
            StatKind::ItemsCrafted,
            StatKind::ItemsDropped,
            StatKind::ItemsPickedUp,
            StatKind::KillsMobs,
            StatKind::KillsPlayers,
            StatKind::Teleports,
            StatKind::TimePlayed,
            StatKind::TimesKicked,
            StatKind::TimesShorn,
            StatKind::ToolsBroken,
            StatKind::VillagerTrades,
            StatKind::Votes,
            StatKind::WorldsChanged,
            StatKind::XpGained,
        ]
    }

    /// Get the stable name used in storage and wire formats.
    pub fn storage_name(&self) -> &'static str {
        match self {
            StatKind::Joins => "joins",
            StatKind::Deaths => "deaths",
            StatKind::BlocksBroken => "blocks_broken",
            StatKind::BlocksPlaced => "blocks_placed",
            StatKind::ArrowsShot => "arrows_shot",
            StatKind::BucketsEmptied => "buckets_emptied",
            StatKind::BucketsFilled => "buckets_filled",
            StatKind::CommandsPerformed => "commands_performed",
            StatKind::DamageTaken => "damage_taken",
            StatKind::DistanceTravelled => "distance_travelled",
            StatKind::EggsThrown => "eggs_thrown",
            StatKind::EnteredBeds => "entered_beds",
            StatKind::FoodEaten => "food_eaten",
            StatKind::ItemsCaught => "items_caught",
            StatKind::ItemsCrafted => "items_crafted",
            StatKind::ItemsDropped => "items_dropped",
            StatKind::ItemsPickedUp => "items_picked_up",
            StatKind::KillsMobs => "kills_mobs",
            StatKind::KillsPlayers => "kills_players",
            StatKind::Teleports => "teleports",
            StatKind::TimePlayed => "time_played",
            StatKind::TimesKicked => "times_kicked",
            StatKind::TimesShorn => "times_shorn",
            StatKind::ToolsBroken => "tools_broken",
            StatKind::VillagerTrades => "villager_trades",
            StatKind::Votes => "votes",
            StatKind::WorldsChanged => "worlds_changed",
            StatKind::XpGained => "xp_gained",
        }
    }

    /// Look up the descriptor for this kind.
    pub fn descriptor(&self) -> KindDescriptor {
        match self {
            StatKind::Joins => KindDescriptor {
                label: "Joins",
                columns: &[],
            },
            StatKind::Deaths => KindDescriptor {
                label: "Deaths",
                columns: &["world"],
            },
            StatKind::BlocksBroken => KindDescriptor {
                label: "Blocks broken",
                columns: &["world", "typeid", "datavalue"],
            },
            StatKind::BlocksPlaced => KindDescriptor {
                label: "Blocks placed",
                columns: &["world", "typeid", "datavalue"],
            },
            StatKind::ArrowsShot => KindDescriptor {
                label: "Arrows shot",
                columns: &["world", "forceShot"],
            },
            StatKind::BucketsEmptied => KindDescriptor {
                label: "Buckets emptied",
                columns: &["world"],
            },
            StatKind::BucketsFilled => KindDescriptor {
                label: "Buckets filled",
                columns: &["world"],
            },
            StatKind::CommandsPerformed => KindDescriptor {
                label: "Commands performed",
                columns: &["world", "command", "arguments"],
            },
            StatKind::DamageTaken => KindDescriptor {
                label: "Damage taken",
                columns: &["world", "cause"],
            },
            StatKind::DistanceTravelled => KindDescriptor {
                label: "Distance travelled",
                columns: &["world", "moveType"],
            },
            StatKind::EggsThrown => KindDescriptor {
                label: "Eggs thrown",
                columns: &["world"],
            },
            StatKind::EnteredBeds => KindDescriptor {
                label: "Beds entered",
                columns: &["world"],
            },
            StatKind::FoodEaten => KindDescriptor {
                label: "Food eaten",
                columns: &["world", "foodEaten"],
            },
            StatKind::ItemsCaught => KindDescriptor {
                label: "Items caught",
                columns: &["world", "caught"],
            },
            StatKind::ItemsCrafted => KindDescriptor {
                label: "Items crafted",
                columns: &["world", "item"],
            },
            StatKind::ItemsDropped => KindDescriptor {
                label: "Items dropped",
                columns: &["world", "item"],
            },
            StatKind::ItemsPickedUp => KindDescriptor {
                label: "Items picked up",
                columns: &["world", "item"],
            },
            StatKind::KillsMobs => KindDescriptor {
                label: "Mobs killed",
                columns: &["world", "mob"],
            },
            StatKind::KillsPlayers => KindDescriptor {
                label: "Players killed",
                columns: &["world", "playerKilled"],
            },
            StatKind::Teleports => KindDescriptor {
                label: "Teleports",
                columns: &["world", "destWorld", "cause"],
            },
            StatKind::TimePlayed => KindDescriptor {
                label: "Time played",
                columns: &["world"],
            },
            StatKind::TimesKicked => KindDescriptor {
                label: "Times kicked",
                columns: &["world", "reason"],
            },
            StatKind::TimesShorn => KindDescriptor {
                label: "Sheep shorn",
                columns: &["world"],
            },
            StatKind::ToolsBroken => KindDescriptor {
                label: "Tools broken",
                columns: &["world", "item"],
            },
            StatKind::VillagerTrades => KindDescriptor {
                label: "Villager trades",
                columns: &["world", "trade"],
            },
            StatKind::Votes => KindDescriptor {
                label: "Votes",
                columns: &[],
            },
            StatKind::WorldsChanged => KindDescriptor {
                label: "Worlds changed",
                columns: &["world"],
            },
            StatKind::XpGained => KindDescriptor {
                label: "Experience gained",
                columns: &["world"],
            },
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_name())
    }
}

impl FromStr for StatKind {
    type Err = TallyError;

    /// Parse a kind from its storage name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::all()
            .iter()
            .find(|kind| kind.storage_name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| TallyError::unknown_kind(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_no_duplicates() {
        let kinds = StatKind::all();
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_all_is_declaration_ordered() {
        assert_eq!(StatKind::all().first(), Some(&StatKind::Joins));
        assert_eq!(StatKind::all().last(), Some(&StatKind::XpGained));
        assert!(StatKind::all().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_storage_name_roundtrip() {
        for kind in StatKind::all() {
            let parsed: StatKind = kind.storage_name().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        let parsed: StatKind = "BLOCKS_BROKEN".parse().unwrap();
        assert_eq!(parsed, StatKind::BlocksBroken);
    }

    #[test]
    fn test_from_str_unknown_kind() {
        let err = "warp_jumps".parse::<StatKind>().unwrap_err();
        assert!(err.to_string().contains("warp_jumps"));
    }

    #[test]
    fn test_serde_uses_storage_name() {
        let json = serde_json::to_string(&StatKind::ItemsPickedUp).unwrap();
        assert_eq!(json, "\"items_picked_up\"");
        let back: StatKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StatKind::ItemsPickedUp);
    }

    #[test]
    fn test_descriptor_labels_are_nonempty() {
        for kind in StatKind::all() {
            assert!(!kind.descriptor().label.is_empty());
        }
    }

    #[test]
    fn test_descriptor_columns() {
        assert!(StatKind::Joins.descriptor().columns.is_empty());
        assert_eq!(
            StatKind::BlocksBroken.descriptor().columns,
            &["world", "typeid", "datavalue"]
        );
        assert_eq!(
            StatKind::Teleports.descriptor().columns,
            &["world", "destWorld", "cause"]
        );
    }
}
