pub mod catalog;

pub use catalog::{achievements_for_height, completion_achievements, AchievementDef, UnlockCriteria, CATALOG};
