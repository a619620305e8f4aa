// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness profile submitted from the profile form.
//!
//! The profile is never stored. It is collapsed into the prompt text sent to
//! the completion provider and then dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Toning,
    Endurance,
    Strength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkoutSplit {
    FullBody,
    UpperLower,
    PushPullLegs,
    BodyPart,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Goal::WeightLoss => "weight loss",
            Goal::MuscleGain => "muscle gain",
            Goal::Toning => "body toning",
            Goal::Endurance => "improving endurance",
            Goal::Strength => "increasing strength",
        })
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        })
    }
}

impl fmt::Display for WorkoutSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkoutSplit::FullBody => "full body",
            WorkoutSplit::UpperLower => "upper/lower",
            WorkoutSplit::PushPullLegs => "push/pull/legs",
            WorkoutSplit::BodyPart => "body part",
        })
    }
}

fn default_active_days() -> u8 {
    3
}

/// Profile form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub gender: Gender,
    #[validate(range(min = 13, max = 100, message = "Age must be between 13 and 100"))]
    pub age: u32,
    /// Height in centimetres
    #[validate(range(min = 100.0, max = 250.0, message = "Height must be between 100 and 250 cm"))]
    pub height: f64,
    /// Current weight in kilograms
    #[validate(range(min = 30.0, max = 300.0, message = "Weight must be between 30 and 300 kg"))]
    pub weight: f64,
    /// Days per week available for training
    #[serde(default = "default_active_days")]
    #[validate(range(min = 1, max = 7, message = "Active days must be between 1 and 7"))]
    pub active_days: u8,
    #[serde(default)]
    pub has_equipment: bool,
    pub goal: Goal,
    /// Target weight in kilograms
    #[validate(range(min = 30.0, max = 300.0, message = "Goal weight must be between 30 and 300 kg"))]
    pub goal_weight: f64,
    /// Free-text injuries or medical conditions
    #[serde(default)]
    #[validate(length(max = 500, message = "Injuries must be at most 500 characters"))]
    pub injuries: Option<String>,
    pub fitness_level: FitnessLevel,
    pub workout_split: WorkoutSplit,
}

const PROMPT_REQUIREMENTS: &str = "Requirements:
1. Provide a markdown-formatted workout plan
2. Base all recommendations on recent fitness research
3. Adjust exercises for my fitness level and equipment access
4. Include specific weights/intensities
5. The plan should be easy to follow. Give the plan in markdown format and do not use tables (mandatory).

Please output a workout plan tailored to my fitness level and goal. Make sure it incorporates the latest research on fat loss, strength training, and progression for a 90-day transformation.";

impl Profile {
    /// Assemble the plan-generation prompt for this profile.
    pub fn to_prompt(&self) -> String {
        let equipment = if self.has_equipment {
            "access to a fully equipped gym"
        } else {
            "no gym equipment"
        };

        let mut about = format!(
            "I am a {} year old {}, {}cm tall, weighing {}kg. I have {}. \
             I can workout {} days per week. My goal is {} with a target weight of {}kg. \
             My fitness level is {}.",
            self.age,
            self.gender,
            self.height,
            self.weight,
            equipment,
            self.active_days,
            self.goal,
            self.goal_weight,
            self.fitness_level,
        );

        if let Some(injuries) = self
            .injuries
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            about.push_str(&format!(
                " I have the following medical conditions/injuries to consider: {}.",
                injuries
            ));
        }

        about.push_str(&format!(
            " I prefer a {} workout split.",
            self.workout_split
        ));

        format!(
            "Generate a personalized 90-day workout plan based on my profile:\n\n{}\n\n{}",
            about, PROMPT_REQUIREMENTS
        )
    }
}
