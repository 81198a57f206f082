//! Standing and PointsPolicy.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Points awarded per match outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointsPolicy {
    #[serde(default = "default_points_for_win")]
    pub points_for_win: i32,
    #[serde(default = "default_points_for_draw")]
    pub points_for_draw: i32,
    #[serde(default)]
    pub points_for_loss: i32,
}

fn default_points_for_win() -> i32 {
    3
}

fn default_points_for_draw() -> i32 {
    1
}

impl Default for PointsPolicy {
    fn default() -> Self {
        Self {
            points_for_win: default_points_for_win(),
            points_for_draw: default_points_for_draw(),
            points_for_loss: 0,
        }
    }
}

/// Aggregate results for one player. Derived on demand, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub points: i32,
}

impl Standing {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Self::default()
        }
    }
}
