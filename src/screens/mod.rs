//! One state container per screen of the companion.

pub mod care;
pub mod community;
pub mod meals;
pub mod mood;
pub mod profile;
pub mod quiz;

pub use care::{CareAction, CareMetrics, CareState, CareTab};
pub use community::{CommunityAction, CommunityMetrics, CommunityState, CommunityTab};
pub use meals::{MealsAction, MealsMetrics, MealsState};
pub use mood::{MoodAction, MoodMetrics, MoodState};
pub use profile::{ProfileAction, ProfileMetrics, ProfileState, ProfileTab};
pub use quiz::{Quiz, QuizAction, QuizPhase};
