//! Event type definitions

use bevy::prelude::*;

use crate::coordinator::HoopSide;
use crate::player::PlayerIndex;
use crate::shooting::ShotGrade;

/// Gameplay events recorded on the bus
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Meter left Idle
    ChargeStarted { player: PlayerIndex },
    /// Charge released; `velocity` is None for cosmetic actors
    ShotReleased {
        player: PlayerIndex,
        fill: f32,
        grade: ShotGrade,
        velocity: Option<Vec2>,
    },
    /// Release happened but no hoop target was configured
    ShotAborted { player: PlayerIndex },
    /// Button let go without a release edge
    ChargeCancelled { player: PlayerIndex },
    PossessionGranted { player: PlayerIndex },
    /// Ball went through the active hoop
    Goal { hoop: HoopSide },
}

impl GameEvent {
    /// Short name used by scenario expectations
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::ChargeStarted { .. } => "ChargeStarted",
            GameEvent::ShotReleased { .. } => "ShotReleased",
            GameEvent::ShotAborted { .. } => "ShotAborted",
            GameEvent::ChargeCancelled { .. } => "ChargeCancelled",
            GameEvent::PossessionGranted { .. } => "PossessionGranted",
            GameEvent::Goal { .. } => "Goal",
        }
    }

    /// Actor the event is about, if any
    pub fn player(&self) -> Option<PlayerIndex> {
        match self {
            GameEvent::ChargeStarted { player }
            | GameEvent::ShotReleased { player, .. }
            | GameEvent::ShotAborted { player }
            | GameEvent::ChargeCancelled { player }
            | GameEvent::PossessionGranted { player } => Some(*player),
            GameEvent::Goal { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let event = GameEvent::ShotAborted {
            player: PlayerIndex(1),
        };
        assert_eq!(event.name(), "ShotAborted");
        assert_eq!(event.player(), Some(PlayerIndex(1)));
        assert_eq!(GameEvent::Goal { hoop: HoopSide::Left }.player(), None);
    }
}
