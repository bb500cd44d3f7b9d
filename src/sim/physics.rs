//! Vertical jump physics for the runner
//!
//! The player never moves horizontally; the world scrolls past. Only the
//! vertical offset above the ground line is integrated.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ground contact state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    /// On the ground line; both jumps available
    #[default]
    Grounded,
    /// In the air, with or without the mid-air jump left
    Airborne { double_jump: bool },
}

/// What a jump input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Jumped,
    DoubleJumped,
    /// Airborne with no jump left
    Ignored,
}

/// Player vertical state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Height of the player's feet above the ground (>= 0)
    pub offset: f32,
    /// Vertical velocity, positive is up
    pub velocity: f32,
    pub stance: Stance,
}

impl PlayerState {
    pub fn grounded(&self) -> bool {
        matches!(self.stance, Stance::Grounded)
    }

    pub fn double_jump_available(&self) -> bool {
        match self.stance {
            Stance::Grounded => true,
            Stance::Airborne { double_jump } => double_jump,
        }
    }

    /// Handle a jump input
    pub fn jump(&mut self) -> JumpOutcome {
        match self.stance {
            Stance::Grounded => {
                self.velocity = JUMP_FORCE;
                self.stance = Stance::Airborne { double_jump: true };
                JumpOutcome::Jumped
            }
            Stance::Airborne { double_jump: true } => {
                self.velocity = DOUBLE_JUMP_FORCE;
                self.stance = Stance::Airborne { double_jump: false };
                JumpOutcome::DoubleJumped
            }
            Stance::Airborne { double_jump: false } => JumpOutcome::Ignored,
        }
    }

    /// Integrate one step of `dt` seconds (semi-implicit Euler)
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += GRAVITY * dt;
        self.offset += self.velocity * dt;
        // A jump issued on a zero-length step must not land on the spot.
        if self.offset <= 0.0 && self.velocity <= 0.0 {
            self.land();
        }
    }

    // Only place the double jump is re-armed.
    fn land(&mut self) {
        self.offset = 0.0;
        self.velocity = 0.0;
        self.stance = Stance::Grounded;
    }
}
