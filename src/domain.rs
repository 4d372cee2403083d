use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A mood rating on the 1 (terrible) to 5 (excellent) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const OKAY: MoodLevel = MoodLevel(3);
    pub const GOOD: MoodLevel = MoodLevel(4);

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::MoodOutOfRange(value))
        }
    }

    pub fn all() -> impl Iterator<Item = MoodLevel> {
        (Self::MIN..=Self::MAX).map(MoodLevel)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Terrible",
            2 => "Poor",
            3 => "Okay",
            4 => "Good",
            _ => "Excellent",
        }
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodLevel> for u8 {
    fn from(level: MoodLevel) -> Self {
        level.0
    }
}

impl Display for MoodLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: MoodLevel,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub taken_today: bool,
    pub reminders: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    Checkup,
    Specialist,
    Therapy,
}

impl AppointmentKind {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentKind::Checkup => "Checkup",
            AppointmentKind::Specialist => "Specialist",
            AppointmentKind::Therapy => "Therapy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub doctor: String,
    pub date: NaiveDate,
    pub time: String,
    pub kind: AppointmentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Medical,
    Diet,
    Exercise,
    Mood,
}

impl NoteCategory {
    pub fn label(self) -> &'static str {
        match self {
            NoteCategory::Medical => "medical",
            NoteCategory::Diet => "diet",
            NoteCategory::Exercise => "exercise",
            NoteCategory::Mood => "mood",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: NaiveDate,
    pub category: NoteCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub prep_time_mins: u32,
    pub cook_time_mins: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub calories: u32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn total_time_mins(&self) -> u32 {
        self.prep_time_mins + self.cook_time_mins
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    #[default]
    All,
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::All,
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
    ];

    /// Recipe tag this meal type filters on; `All` matches everything.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            MealType::All => None,
            MealType::Breakfast => Some("breakfast"),
            MealType::Lunch => Some("lunch"),
            MealType::Dinner => Some("dinner"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealType::All => "All",
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl FromStr for MealType {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Ok(MealType::All),
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            _ => Err(DomainError::UnknownMealType(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeCategory {
    Fitness,
    Nutrition,
    Mindfulness,
    Sleep,
    Journaling,
    DigitalWellness,
}

impl ChallengeCategory {
    pub fn label(self) -> &'static str {
        match self {
            ChallengeCategory::Fitness => "fitness",
            ChallengeCategory::Nutrition => "nutrition",
            ChallengeCategory::Mindfulness => "mindfulness",
            ChallengeCategory::Sleep => "sleep",
            ChallengeCategory::Journaling => "journaling",
            ChallengeCategory::DigitalWellness => "digital-wellness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub participants: u32,
    /// Community-wide completion, 0 to 100.
    pub progress: u8,
    pub difficulty: Difficulty,
    pub category: ChallengeCategory,
    pub reward: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    Achievement,
    Motivation,
    Question,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub likes: u32,
    pub comments: u32,
    pub category: PostCategory,
    pub liked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub earned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub points: u32,
    pub is_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub join_date: NaiveDate,
    pub bio: String,
}

/// The editable text fields of a [`UserProfile`]. The join date is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Location,
    Bio,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Location,
        ProfileField::Bio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Full Name",
            ProfileField::Email => "Email Address",
            ProfileField::Phone => "Phone Number",
            ProfileField::Location => "Location",
            ProfileField::Bio => "Bio",
        }
    }
}

impl UserProfile {
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Location => &self.location,
            ProfileField::Bio => &self.bio,
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Location => &mut self.location,
            ProfileField::Bio => &mut self.bio,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    MoodReminders,
    MealPlanUpdates,
    MedicationAlerts,
    ChallengeUpdates,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::MoodReminders,
        NotificationKind::MealPlanUpdates,
        NotificationKind::MedicationAlerts,
        NotificationKind::ChallengeUpdates,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::MoodReminders => "Mood Reminders",
            NotificationKind::MealPlanUpdates => "Meal Plan Updates",
            NotificationKind::MedicationAlerts => "Medication Alerts",
            NotificationKind::ChallengeUpdates => "Challenge Updates",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub mood_reminders: bool,
    pub meal_plan_updates: bool,
    pub medication_alerts: bool,
    pub challenge_updates: bool,
}

impl NotificationSettings {
    pub fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::MoodReminders => self.mood_reminders,
            NotificationKind::MealPlanUpdates => self.meal_plan_updates,
            NotificationKind::MedicationAlerts => self.medication_alerts,
            NotificationKind::ChallengeUpdates => self.challenge_updates,
        }
    }

    pub fn toggle(&mut self, kind: NotificationKind) {
        let flag = match kind {
            NotificationKind::MoodReminders => &mut self.mood_reminders,
            NotificationKind::MealPlanUpdates => &mut self.meal_plan_updates,
            NotificationKind::MedicationAlerts => &mut self.medication_alerts,
            NotificationKind::ChallengeUpdates => &mut self.challenge_updates,
        };
        *flag = !*flag;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u32,
    pub challenges_completed: u32,
    pub badges_earned: u32,
    pub streak_days: u32,
    pub posts_shared: u32,
    pub helped_others: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

#[cfg(test)]
mod tests {
    use super::{MealType, MoodLevel, NotificationKind, NotificationSettings, ProfileField, UserProfile};
    use crate::error::DomainError;
    use chrono::NaiveDate;

    #[test]
    fn mood_level_rejects_values_outside_scale() {
        assert_eq!(MoodLevel::new(0), Err(DomainError::MoodOutOfRange(0)));
        assert_eq!(MoodLevel::new(6), Err(DomainError::MoodOutOfRange(6)));
        assert_eq!(MoodLevel::new(3).expect("valid mood").label(), "Okay");
        assert_eq!(MoodLevel::all().count(), 5);
    }

    #[test]
    fn mood_level_deserializes_through_range_check() {
        let level: MoodLevel = serde_json::from_str("4").expect("valid mood");
        assert_eq!(level.value(), 4);
        assert!(serde_json::from_str::<MoodLevel>("9").is_err());
    }

    #[test]
    fn meal_type_parses_case_insensitively() {
        assert_eq!("Breakfast".parse::<MealType>(), Ok(MealType::Breakfast));
        assert!("brunch".parse::<MealType>().is_err());
        assert_eq!(MealType::All.tag(), None);
    }

    #[test]
    fn notification_toggle_only_touches_one_flag() {
        let mut settings = NotificationSettings {
            mood_reminders: true,
            meal_plan_updates: true,
            medication_alerts: true,
            challenge_updates: false,
        };
        settings.toggle(NotificationKind::ChallengeUpdates);
        assert!(settings.is_enabled(NotificationKind::ChallengeUpdates));
        assert!(settings.is_enabled(NotificationKind::MoodReminders));
    }

    #[test]
    fn profile_fields_are_addressable() {
        let mut profile = UserProfile {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            phone: String::new(),
            location: String::new(),
            join_date: NaiveDate::from_ymd_opt(2023, 6, 15).expect("valid date"),
            bio: String::new(),
        };
        profile.set_field(ProfileField::Location, "Oslo".to_string());
        assert_eq!(profile.field(ProfileField::Location), "Oslo");
        assert_eq!(profile.field(ProfileField::Name), "A");
    }
}
