//! Side effects the core asks the host to broadcast.
//!
//! The core only names the effect and where it happens; playing a sound or
//! notifying listeners is the host's business.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pos::BlockPos;

/// A sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    /// A metal door swinging open.
    IronDoorOpen,
    /// A metal door swinging shut.
    IronDoorClose,
}

impl Sound {
    /// Numeric level-event id the host protocol uses for this cue.
    pub fn event_id(self) -> u32 {
        match self {
            Self::IronDoorOpen => 1011,
            Self::IronDoorClose => 1005,
        }
    }

    /// The door cue for a door ending up `open` or closed.
    pub fn door(open: bool) -> Self {
        if open {
            Self::IronDoorOpen
        } else {
            Self::IronDoorClose
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IronDoorOpen => write!(f, "iron_door_open"),
            Self::IronDoorClose => write!(f, "iron_door_close"),
        }
    }
}

/// A gameplay notification other listeners (mobs, sensors) can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    /// Something was opened.
    BlockOpen,
    /// Something was closed.
    BlockClose,
}

impl GameEvent {
    /// The event for a door ending up `open` or closed.
    pub fn door(open: bool) -> Self {
        if open {
            Self::BlockOpen
        } else {
            Self::BlockClose
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockOpen => write!(f, "block_open"),
            Self::BlockClose => write!(f, "block_close"),
        }
    }
}

/// One emitted effect, as recorded by a host that keeps a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// A sound cue at a cell.
    Sound {
        /// The cue.
        sound: Sound,
        /// Where it plays.
        pos: BlockPos,
    },
    /// A game event at a cell.
    Event {
        /// The event.
        event: GameEvent,
        /// Where it happened.
        pos: BlockPos,
    },
}

impl Effect {
    /// The cell this effect happened at.
    pub fn pos(&self) -> BlockPos {
        match self {
            Self::Sound { pos, .. } | Self::Event { pos, .. } => *pos,
        }
    }
}
