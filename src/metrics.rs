//! Pure derived values computed from screen collections.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Appointment, MealType, Medication, MoodEntry, Recipe};

/// Searches shorter than this many characters do not filter.
const MIN_SEARCH_LEN: usize = 3;
const ENCOURAGEMENT_THRESHOLD: u8 = 80;

/// Share of medications marked taken today, as a whole percent.
/// An empty list yields 0.
pub fn adherence_percent(medications: &[Medication]) -> u8 {
    if medications.is_empty() {
        return 0;
    }

    let taken = medications.iter().filter(|med| med.taken_today).count();
    let percent = (taken as f64 / medications.len() as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

pub fn adherence_message(percent: u8) -> &'static str {
    if percent > ENCOURAGEMENT_THRESHOLD {
        "Fantastic job staying on track!"
    } else {
        "Keep it up, consistency is key!"
    }
}

/// Arithmetic mean of the mood values, or 0 for an empty history.
pub fn mood_average(history: &[MoodEntry]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let sum: u32 = history.iter().map(|entry| u32::from(entry.mood.value())).sum();
    f64::from(sum) / history.len() as f64
}

/// Chart bar heights in percent of the maximum mood, oldest entry first.
pub fn mood_bar_heights(history: &[MoodEntry], window: usize) -> Vec<u8> {
    history
        .iter()
        .take(window)
        .rev()
        .map(|entry| {
            let percent = u16::from(entry.mood.value()) * 100 / u16::from(crate::domain::MoodLevel::MAX);
            u8::try_from(percent).unwrap_or(100)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GardenLevel {
    Seedling,
    Sprouting,
    Budding,
    Growing,
    Flourishing,
}

/// Lower bounds, highest tier first. The first satisfied bound wins.
const GARDEN_TIERS: [(f64, GardenLevel); 4] = [
    (4.5, GardenLevel::Flourishing),
    (3.5, GardenLevel::Growing),
    (2.5, GardenLevel::Budding),
    (1.5, GardenLevel::Sprouting),
];

impl GardenLevel {
    pub fn classify(average: f64) -> Self {
        GARDEN_TIERS
            .iter()
            .find(|(threshold, _)| average >= *threshold)
            .map(|(_, level)| *level)
            .unwrap_or(GardenLevel::Seedling)
    }

    pub fn label(self) -> &'static str {
        match self {
            GardenLevel::Seedling => "Seedling",
            GardenLevel::Sprouting => "Sprouting",
            GardenLevel::Budding => "Budding",
            GardenLevel::Growing => "Growing",
            GardenLevel::Flourishing => "Flourishing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeOfDay::Morning
        } else if hour < 17 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Good Morning",
            TimeOfDay::Afternoon => "Good Afternoon",
            TimeOfDay::Evening => "Good Evening",
        }
    }
}

/// Appointments dated today or later, soonest first.
pub fn upcoming_appointments(appointments: &[Appointment], today: NaiveDate) -> Vec<&Appointment> {
    let mut upcoming = appointments
        .iter()
        .filter(|appointment| appointment.date >= today)
        .collect::<Vec<_>>();
    upcoming.sort_by(|left, right| {
        left.date
            .cmp(&right.date)
            .then_with(|| left.time.cmp(&right.time))
    });
    upcoming
}

pub fn filter_recipes<'a>(recipes: &'a [Recipe], search: &str, meal_type: MealType) -> Vec<&'a Recipe> {
    let term = search.trim().to_lowercase();
    let searching = term.chars().count() >= MIN_SEARCH_LEN;

    recipes
        .iter()
        .filter(|recipe| {
            let search_match = !searching
                || recipe.name.to_lowercase().contains(&term)
                || recipe.tags.iter().any(|tag| tag.contains(&term));
            let meal_match = meal_type.tag().is_none_or(|tag| recipe.has_tag(tag));
            search_match && meal_match
        })
        .collect()
}

/// Human distance between two readings, e.g. "about 2 hours ago".
pub fn format_relative(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 0 {
        return "just now".to_string();
    }

    let distance = match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!("about {} hours", (minutes as f64 / 60.0).round() as i64),
        1440..=2519 => "1 day".to_string(),
        _ => format!("{} days", (minutes as f64 / 1440.0).round() as i64),
    };
    format!("{distance} ago")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::capabilities::testing::at;
    use crate::domain::{AppointmentKind, MoodLevel};
    use crate::seed;

    fn medication(id: &str, taken: bool) -> Medication {
        Medication {
            id: id.to_string(),
            name: format!("Med {id}"),
            dosage: "10mg".to_string(),
            frequency: "Daily".to_string(),
            taken_today: taken,
            reminders: false,
        }
    }

    fn entry(day: u32, mood: u8) -> MoodEntry {
        MoodEntry {
            date: NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date"),
            mood: MoodLevel::new(mood).expect("valid mood"),
            notes: None,
        }
    }

    #[test]
    fn adherence_of_empty_list_is_zero() {
        assert_eq!(adherence_percent(&[]), 0);
    }

    #[test]
    fn adherence_rounds_to_nearest_percent() {
        let meds = [
            medication("1", true),
            medication("2", true),
            medication("3", false),
        ];
        assert_eq!(adherence_percent(&meds), 67);
        assert_eq!(adherence_percent(&meds[..2]), 100);
        assert_eq!(adherence_percent(&meds[2..]), 0);
    }

    #[test]
    fn adherence_stays_within_bounds_for_every_mix() {
        for total in 1..=12 {
            for taken in 0..=total {
                let meds = (0..total)
                    .map(|index| medication(&index.to_string(), index < taken))
                    .collect::<Vec<_>>();
                let percent = adherence_percent(&meds);
                assert!(percent <= 100, "{taken}/{total} gave {percent}");
            }
        }
    }

    #[test]
    fn encouragement_switches_above_eighty() {
        assert_eq!(adherence_message(80), "Keep it up, consistency is key!");
        assert_eq!(adherence_message(81), "Fantastic job staying on track!");
    }

    #[test]
    fn mood_average_handles_empty_and_mixed_histories() {
        assert_eq!(mood_average(&[]), 0.0);
        let history = [entry(1, 5), entry(2, 4), entry(3, 3)];
        assert!((mood_average(&history) - 4.0).abs() < f64::EPSILON);

        let extremes = [entry(1, 1), entry(2, 5)];
        let average = mood_average(&extremes);
        assert!((0.0..=5.0).contains(&average));
    }

    #[test]
    fn garden_tiers_use_inclusive_lower_bounds() {
        assert_eq!(GardenLevel::classify(5.0), GardenLevel::Flourishing);
        assert_eq!(GardenLevel::classify(4.5), GardenLevel::Flourishing);
        assert_eq!(GardenLevel::classify(4.49), GardenLevel::Growing);
        assert_eq!(GardenLevel::classify(3.5), GardenLevel::Growing);
        assert_eq!(GardenLevel::classify(2.5), GardenLevel::Budding);
        assert_eq!(GardenLevel::classify(1.5), GardenLevel::Sprouting);
        assert_eq!(GardenLevel::classify(1.49), GardenLevel::Seedling);
        assert_eq!(GardenLevel::classify(0.0), GardenLevel::Seedling);
    }

    #[test]
    fn garden_tiers_are_monotonic_across_the_scale() {
        let mut previous = GardenLevel::classify(0.0);
        for step in 0..=500 {
            let average = f64::from(step) / 100.0;
            let level = GardenLevel::classify(average);
            assert_eq!(level, GardenLevel::classify(average));
            assert!(level >= previous, "tier went down at {average}");
            previous = level;
        }
    }

    #[test]
    fn time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23).greeting(), "Good Evening");
    }

    #[test]
    fn upcoming_excludes_past_and_sorts_by_date() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).expect("valid date");
        let make = |id: &str, offset: i64| Appointment {
            id: id.to_string(),
            title: format!("Visit {id}"),
            doctor: "Dr. Test".to_string(),
            date: today + Duration::days(offset),
            time: "10:00 AM".to_string(),
            kind: AppointmentKind::Checkup,
        };
        let appointments = [make("later", 3), make("past", -1), make("today", 0)];
        let ids = upcoming_appointments(&appointments, today)
            .into_iter()
            .map(|appointment| appointment.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["today", "later"]);
    }

    #[test]
    fn short_searches_do_not_filter() {
        let catalog = seed::recipe_catalog();
        assert_eq!(filter_recipes(&catalog, "qu", MealType::All).len(), catalog.len());
        let names = filter_recipes(&catalog, "QUICK", MealType::All)
            .into_iter()
            .map(|recipe| recipe.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Honey Garlic Chicken Stir-fry", "Avocado Toast with Egg"]);
    }

    #[test]
    fn meal_type_filters_by_tag() {
        let catalog = seed::recipe_catalog();
        let breakfast = filter_recipes(&catalog, "", MealType::Breakfast);
        assert_eq!(breakfast.len(), 2);
        assert!(breakfast.iter().all(|recipe| recipe.has_tag("breakfast")));
        assert!(filter_recipes(&catalog, "", MealType::Dinner).is_empty());
    }

    #[test]
    fn bar_heights_run_oldest_first() {
        let history = [entry(3, 5), entry(2, 3), entry(1, 1)];
        assert_eq!(mood_bar_heights(&history, 7), vec![20, 60, 100]);
        assert_eq!(mood_bar_heights(&history, 2), vec![60, 100]);
    }

    #[test]
    fn bar_heights_cover_every_mood_level() {
        let history = MoodLevel::all()
            .map(|level| entry(u32::from(level.value()), level.value()))
            .collect::<Vec<_>>();
        assert_eq!(mood_bar_heights(&history, 7), vec![100, 80, 60, 40, 20]);
    }

    #[test]
    fn relative_times_read_naturally() {
        let now = at(2026, 1, 1, 12, 0);
        assert_eq!(format_relative(now, now), "less than a minute ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(2), now), "about 2 hours ago");
        assert_eq!(format_relative(now - Duration::days(3), now), "3 days ago");
    }
}
