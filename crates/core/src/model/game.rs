use serde::{Deserialize, Serialize};

use crate::fraction;

/// How many people are in the class for the counting game.
pub const CLASS_SIZE: u32 = 8;

/// How many stand in front when the game view first opens.
pub const STARTING_FRONT_PEOPLE: u32 = 4;

/// The "people in front of the class" counting game.
///
/// The part-of-whole fraction is `front_people / total_people`. The front
/// count is clamped into `0..=total_people` on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleGame {
    total_people: u32,
    front_people: u32,
}

impl PeopleGame {
    #[must_use]
    pub fn new(total_people: u32, front_people: u32) -> Self {
        Self {
            total_people,
            front_people: front_people.min(total_people),
        }
    }

    #[must_use]
    pub fn total_people(&self) -> u32 {
        self.total_people
    }

    #[must_use]
    pub fn front_people(&self) -> u32 {
        self.front_people
    }

    /// Move `delta` people to or from the front, clamped into range.
    /// Returns the clamped front count.
    pub fn update_people(&mut self, delta: i64) -> u32 {
        let moved = i64::from(self.front_people) + delta;
        let clamped = moved.clamp(0, i64::from(self.total_people));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.front_people = clamped as u32;
        }
        self.front_people
    }

    pub fn add_person(&mut self) -> u32 {
        self.update_people(1)
    }

    pub fn remove_person(&mut self) -> u32 {
        self.update_people(-1)
    }

    /// The current part-of-whole fraction, unsimplified.
    #[must_use]
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.front_people, self.total_people)
    }

    /// The current fraction reduced to lowest terms.
    #[must_use]
    pub fn simplified(&self) -> String {
        fraction::simplify(&self.fraction())
    }
}

impl Default for PeopleGame {
    fn default() -> Self {
        Self::new(CLASS_SIZE, STARTING_FRONT_PEOPLE)
    }
}
