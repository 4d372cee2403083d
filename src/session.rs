use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::capabilities::Context;
use crate::domain::Appointment;
use crate::error::DomainError;
use crate::metrics::{GardenLevel, TimeOfDay};
use crate::screens::{CareState, CommunityState, MealsState, MoodState, ProfileState};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenName {
    Dashboard,
    Mood,
    Meals,
    Care,
    Community,
    Profile,
}

impl ScreenName {
    pub const ALL: [ScreenName; 6] = [
        ScreenName::Dashboard,
        ScreenName::Mood,
        ScreenName::Meals,
        ScreenName::Care,
        ScreenName::Community,
        ScreenName::Profile,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ScreenName::Dashboard => "Dashboard",
            ScreenName::Mood => "Mood Garden",
            ScreenName::Meals => "Meal Planner",
            ScreenName::Care => "Care Hub",
            ScreenName::Community => "Community",
            ScreenName::Profile => "Profile",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|screen| *screen == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|screen| *screen == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Display for ScreenName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScreenName::Dashboard => "dashboard",
            ScreenName::Mood => "mood",
            ScreenName::Meals => "meals",
            ScreenName::Care => "care",
            ScreenName::Community => "community",
            ScreenName::Profile => "profile",
        };
        f.write_str(name)
    }
}

impl FromStr for ScreenName {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ScreenName::ALL
            .into_iter()
            .find(|screen| screen.to_string() == raw.trim().to_lowercase())
            .ok_or_else(|| DomainError::UnknownScreen(raw.to_string()))
    }
}

/// Figures shown on the dashboard, read from every other screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub time_of_day: TimeOfDay,
    pub greeting: String,
    pub mood_average: f64,
    pub garden: GardenLevel,
    pub adherence: u8,
    pub upcoming_appointments: usize,
    pub next_appointment: Option<Appointment>,
    pub joined_challenges: usize,
    pub favorite_recipes: usize,
}

/// One store per screen. Stores never share collections.
#[derive(Debug, Clone)]
pub struct Session {
    pub mood: Store<MoodState>,
    pub care: Store<CareState>,
    pub meals: Store<MealsState>,
    pub community: Store<CommunityState>,
    pub profile: Store<ProfileState>,
}

impl Session {
    /// Seeds every screen. The same `seed` always yields the same mock data.
    pub fn new(context: Context, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::debug!(?seed, user = %context.user_name, "seeding session");
        Self {
            mood: Store::new(MoodState::seeded(&context, &mut rng), context.clone()),
            care: Store::new(CareState::seeded(&context), context.clone()),
            meals: Store::new(MealsState::seeded(), context.clone()),
            community: Store::new(CommunityState::seeded(&context), context.clone()),
            profile: Store::new(ProfileState::seeded(&context), context),
        }
    }

    pub fn summary(&self) -> DashboardSummary {
        let time_of_day = TimeOfDay::from_hour(self.mood.context().hour());
        let first_name = self
            .profile
            .state()
            .committed
            .name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let mood = self.mood.metrics();
        let care = self.care.metrics();
        let community = self.community.metrics();
        let meals = self.meals.metrics();

        DashboardSummary {
            time_of_day,
            greeting: if first_name.is_empty() {
                time_of_day.greeting().to_string()
            } else {
                format!("{}, {first_name}", time_of_day.greeting())
            },
            mood_average: mood.average,
            garden: mood.garden,
            adherence: care.adherence,
            upcoming_appointments: care.upcoming.len(),
            next_appointment: care.upcoming.into_iter().next(),
            joined_challenges: community.joined,
            favorite_recipes: meals.favorites,
        }
    }

    pub fn snapshot(&self, screen: ScreenName) -> Result<serde_json::Value, serde_json::Error> {
        match screen {
            ScreenName::Dashboard => serde_json::to_value(self.summary()),
            ScreenName::Mood => serde_json::to_value(self.mood.state()),
            ScreenName::Meals => serde_json::to_value(self.meals.state()),
            ScreenName::Care => serde_json::to_value(self.care.state()),
            ScreenName::Community => serde_json::to_value(self.community.state()),
            ScreenName::Profile => serde_json::to_value(self.profile.state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::testing::{at, fixed_context};
    use crate::screens::{CareAction, CommunityAction, ProfileAction};

    #[test]
    fn screen_names_parse_and_cycle() {
        assert_eq!("Care".parse::<ScreenName>(), Ok(ScreenName::Care));
        assert!("settings".parse::<ScreenName>().is_err());
        assert_eq!(ScreenName::Profile.next(), ScreenName::Dashboard);
        assert_eq!(ScreenName::Dashboard.prev(), ScreenName::Profile);
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let (context, _) = fixed_context(at(2026, 10, 1, 9, 0));
        let first = Session::new(context.clone(), Some(11));
        let second = Session::new(context, Some(11));
        assert_eq!(first.mood.state(), second.mood.state());
    }

    #[test]
    fn summary_reads_across_screens() {
        let (context, clock) = fixed_context(at(2026, 10, 1, 9, 0));
        let mut session = Session::new(context, Some(3));
        let summary = session.summary();
        assert_eq!(summary.time_of_day, TimeOfDay::Morning);
        assert_eq!(summary.greeting, "Good Morning, Alex");
        assert_eq!(summary.adherence, 50);
        assert_eq!(summary.upcoming_appointments, 2);
        assert_eq!(
            summary.next_appointment.map(|appointment| appointment.title),
            Some("Cardiology Follow-up".to_string())
        );
        assert!((3.0..=5.0).contains(&summary.mood_average));

        session.care.dispatch(CareAction::ToggleTaken {
            medication_id: "1".to_string(),
        });
        session.community.dispatch(CommunityAction::Join {
            challenge_id: "7".to_string(),
        });
        clock.set(at(2026, 10, 1, 19, 30));

        let summary = session.summary();
        assert_eq!(summary.adherence, 100);
        assert_eq!(summary.joined_challenges, 2);
        assert_eq!(summary.time_of_day, TimeOfDay::Evening);
    }

    #[test]
    fn greeting_uses_the_saved_profile_name() {
        let (context, _) = fixed_context(at(2026, 10, 1, 13, 0));
        let mut session = Session::new(context, Some(3));
        session.profile.dispatch(ProfileAction::BeginEdit);
        session.profile.dispatch(ProfileAction::EditField(
            crate::domain::ProfileField::Name,
            "Jamie Lee".to_string(),
        ));
        assert_eq!(session.summary().greeting, "Good Afternoon, Alex");
        session.profile.dispatch(ProfileAction::Save);
        assert_eq!(session.summary().greeting, "Good Afternoon, Jamie");
    }

    #[test]
    fn snapshots_serialize_each_screen() {
        let (context, _) = fixed_context(at(2026, 10, 1, 9, 0));
        let session = Session::new(context, Some(5));
        for screen in ScreenName::ALL {
            let value = session.snapshot(screen).expect("serializable state");
            assert!(value.is_object(), "{screen}");
        }
        let care = session.snapshot(ScreenName::Care).expect("serializable state");
        assert_eq!(care["quiz"]["phase"]["phase"], "answering");
    }
}
