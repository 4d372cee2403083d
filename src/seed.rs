//! Mock data every session starts from.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::capabilities::Context;
use crate::domain::{
    Appointment, AppointmentKind, Badge, CareNote, CareTeamMember, Challenge, ChallengeCategory,
    Difficulty, LeaderboardEntry, Medication, MoodEntry, MoodLevel, NoteCategory,
    NotificationSettings, Post, PostCategory, QuizQuestion, Rarity, Recipe, UserProfile, UserStats,
};

pub const DEFAULT_USER_NAME: &str = "Alex Johnson";
pub const INITIAL_RECIPES_SHOWN: usize = 3;

/// One entry for each of the seven days before `today`, newest first,
/// with moods drawn from 3..=5.
pub fn mood_history<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<MoodEntry> {
    (1..=7)
        .map(|days_ago| {
            let mood = MoodLevel::new(rng.gen_range(3..=5)).unwrap_or(MoodLevel::OKAY);
            let notes = if days_ago % 2 == 0 {
                "Had a pretty good day."
            } else {
                "Felt productive and happy."
            };
            MoodEntry {
                date: today - Duration::days(days_ago),
                mood,
                notes: Some(notes.to_string()),
            }
        })
        .collect()
}

pub fn medications() -> Vec<Medication> {
    vec![
        Medication {
            id: "1".to_string(),
            name: "Lisinopril".to_string(),
            dosage: "10mg".to_string(),
            frequency: "Daily".to_string(),
            taken_today: false,
            reminders: true,
        },
        Medication {
            id: "2".to_string(),
            name: "Metformin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "Twice daily".to_string(),
            taken_today: true,
            reminders: false,
        },
    ]
}

pub fn appointments(context: &Context) -> Vec<Appointment> {
    let today = context.today();
    let upcoming = |days_from_now: i64, title: &str, doctor: &str, kind: AppointmentKind| Appointment {
        id: context.next_id(),
        title: title.to_string(),
        doctor: doctor.to_string(),
        date: today + Duration::days(days_from_now),
        time: format!("{}:00 AM", 10 + days_from_now),
        kind,
    };

    vec![
        upcoming(1, "Cardiology Follow-up", "Dr. Michael Chen", AppointmentKind::Specialist),
        upcoming(3, "Annual Physical", "Dr. Sarah Johnson", AppointmentKind::Checkup),
    ]
}

pub fn care_notes() -> Vec<CareNote> {
    vec![
        CareNote {
            id: "1".to_string(),
            title: "Post-walk Update".to_string(),
            content: "Completed 30-minute walk. Felt energetic!".to_string(),
            author: "You".to_string(),
            date: date(2025, 6, 16),
            category: NoteCategory::Exercise,
        },
        CareNote {
            id: "2".to_string(),
            title: "Blood Pressure".to_string(),
            content: "Morning reading: 122/78. Looking good.".to_string(),
            author: "Alex (Caregiver)".to_string(),
            date: date(2025, 6, 15),
            category: NoteCategory::Medical,
        },
    ]
}

pub fn care_team() -> Vec<CareTeamMember> {
    [
        ("1", "Dr. Sarah Johnson", "Primary Care Physician"),
        ("2", "Dr. Michael Chen", "Cardiologist"),
        ("3", "Alex Wilson", "Family Caregiver"),
    ]
    .into_iter()
    .map(|(id, name, role)| CareTeamMember {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
    })
    .collect()
}

pub fn quiz_questions() -> Vec<QuizQuestion> {
    let question = |text: &str, options: [&str; 4], correct: &str| QuizQuestion {
        question: text.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_answer: correct.to_string(),
    };

    vec![
        question(
            "What is the first step in any first-aid situation (DRSABCD)?",
            ["Check Airway", "Check for Danger", "Send for help", "Check for Response"],
            "Check for Danger",
        ),
        question(
            "For an adult, what is the correct ratio of chest compressions to rescue breaths for CPR?",
            ["15:2", "30:2", "10:1", "5:1"],
            "30:2",
        ),
        question(
            "How should you treat a minor burn?",
            [
                "Apply ice directly",
                "Cover with a blanket",
                "Run under cool water for 20 mins",
                "Apply butter or oil",
            ],
            "Run under cool water for 20 mins",
        ),
        question(
            "What is the primary action to control severe bleeding?",
            [
                "Apply a tourniquet",
                "Elevate the limb",
                "Apply direct, firm pressure",
                "Give the person water",
            ],
            "Apply direct, firm pressure",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    name: &str,
    (prep_time_mins, cook_time_mins): (u32, u32),
    servings: u32,
    difficulty: Difficulty,
    calories: u32,
    ingredients: &[&str],
    instructions: &[&str],
    tags: &[&str],
) -> Recipe {
    let owned = |items: &[&str]| items.iter().map(|item| item.to_string()).collect::<Vec<_>>();
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        prep_time_mins,
        cook_time_mins,
        servings,
        difficulty,
        calories,
        ingredients: owned(ingredients),
        instructions: owned(instructions),
        tags: owned(tags),
    }
}

pub fn recipe_catalog() -> Vec<Recipe> {
    vec![
        recipe(
            "1",
            "Mediterranean Quinoa Bowl",
            (15, 20),
            2,
            Difficulty::Easy,
            420,
            &["quinoa", "cucumber", "tomatoes", "feta cheese", "olive oil", "lemon"],
            &["Cook quinoa", "Dice veggies", "Mix all"],
            &["healthy", "vegetarian", "gluten-free"],
        ),
        recipe(
            "2",
            "Honey Garlic Chicken Stir-fry",
            (10, 15),
            4,
            Difficulty::Medium,
            380,
            &["chicken breast", "broccoli", "bell peppers", "garlic", "honey", "soy sauce"],
            &["Cut chicken", "Stir-fry with veggies", "Add sauce"],
            &["protein", "quick", "asian"],
        ),
        recipe(
            "3",
            "Avocado Toast with Egg",
            (5, 8),
            1,
            Difficulty::Easy,
            340,
            &["bread", "avocado", "eggs", "chili flakes"],
            &["Toast bread", "Mash avocado", "Top with egg"],
            &["breakfast", "quick"],
        ),
        recipe(
            "4",
            "Spicy Salmon with Asparagus",
            (10, 25),
            2,
            Difficulty::Medium,
            550,
            &["salmon fillet", "asparagus", "chili powder", "garlic", "olive oil"],
            &["Season salmon", "Roast with asparagus"],
            &["seafood", "healthy", "low-carb"],
        ),
        recipe(
            "5",
            "Vegan Lentil Soup",
            (15, 40),
            6,
            Difficulty::Easy,
            250,
            &["lentils", "carrots", "celery", "onion", "vegetable broth"],
            &["Sauté veggies", "Add lentils and broth", "Simmer until tender"],
            &["vegan", "soup", "comfort-food"],
        ),
        recipe(
            "6",
            "Berry Smoothie Bowl",
            (10, 0),
            1,
            Difficulty::Easy,
            310,
            &["frozen berries", "banana", "almond milk", "granola", "chia seeds"],
            &["Blend fruits", "Top with granola and seeds"],
            &["breakfast", "vegan", "healthy-snack"],
        ),
    ]
}

pub fn pantry() -> Vec<String> {
    ["chicken breast", "rice", "broccoli", "eggs", "spinach", "tomatoes"]
        .iter()
        .map(|item| item.to_string())
        .collect()
}

pub fn challenges() -> Vec<Challenge> {
    let challenge = |id: &str,
                     title: &str,
                     description: &str,
                     participants: u32,
                     progress: u8,
                     difficulty: Difficulty,
                     category: ChallengeCategory,
                     reward: &str| Challenge {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        participants,
        progress,
        difficulty,
        category,
        reward: reward.to_string(),
    };

    vec![
        challenge("1", "Mindful Morning", "Meditate for 10 mins daily", 234, 65, Difficulty::Easy, ChallengeCategory::Mindfulness, "+50 Points"),
        challenge("2", "Hydration Hero", "Drink 8 glasses of water", 189, 78, Difficulty::Easy, ChallengeCategory::Nutrition, "+50 Points"),
        challenge("5", "8-Hour Sleep", "Get a full night's rest", 112, 50, Difficulty::Easy, ChallengeCategory::Sleep, "+75 Points"),
        challenge("3", "Step It Up", "Achieve 10,000 steps", 312, 43, Difficulty::Medium, ChallengeCategory::Fitness, "+100 Points"),
        challenge("6", "Daily Journaling", "Write down your thoughts for 5 mins", 88, 25, Difficulty::Easy, ChallengeCategory::Journaling, "+60 Points"),
        challenge("7", "Digital Detox", "No screens an hour before bed", 142, 15, Difficulty::Hard, ChallengeCategory::DigitalWellness, "+150 Points"),
    ]
}

pub fn initially_joined() -> Vec<String> {
    vec!["2".to_string()]
}

pub fn posts(now: NaiveDateTime) -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            author: "Sarah M.".to_string(),
            content: "Just hit my 10k steps goal for the third day in a row! Feeling amazing. Thanks for the motivation everyone!".to_string(),
            timestamp: now - Duration::hours(2),
            likes: 24,
            comments: 8,
            category: PostCategory::Achievement,
            liked: false,
        },
        Post {
            id: "2".to_string(),
            author: "David L.".to_string(),
            content: "Big shoutout to this community for keeping me accountable on the hydration challenge. It's making a huge difference.".to_string(),
            timestamp: now - Duration::hours(4),
            likes: 12,
            comments: 15,
            category: PostCategory::Motivation,
            liked: true,
        },
    ]
}

pub fn badges() -> Vec<Badge> {
    [
        ("1", "First Steps", "Complete a fitness challenge", Rarity::Common, true),
        ("2", "Hydration Hero", "Complete the Hydration challenge", Rarity::Common, true),
        ("3", "Zen Master", "Complete the Mindfulness challenge", Rarity::Rare, true),
        ("4", "Community Star", "Get 50 likes on your posts", Rarity::Epic, false),
    ]
    .into_iter()
    .map(|(id, name, description, rarity, earned)| Badge {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        rarity,
        earned,
    })
    .collect()
}

pub fn leaderboard(user_name: &str) -> Vec<LeaderboardEntry> {
    [
        ("Jennifer K.", 2840),
        ("Michael R.", 2756),
        ("Lisa W.", 2698),
        (user_name, 2445),
        ("Carlos M.", 2398),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, points))| LeaderboardEntry {
        rank: index as u32 + 1,
        name: name.to_string(),
        points,
        is_user: name == user_name,
    })
    .collect()
}

pub fn profile(user_name: &str) -> UserProfile {
    UserProfile {
        name: user_name.to_string(),
        email: "alex.j@example.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        location: "San Francisco, CA".to_string(),
        join_date: date(2023, 6, 15),
        bio: "Passionate about wellness and helping others on their health journey. Love hiking, cooking healthy meals, and practicing mindfulness.".to_string(),
    }
}

pub fn notification_settings() -> NotificationSettings {
    NotificationSettings {
        mood_reminders: true,
        meal_plan_updates: true,
        medication_alerts: true,
        challenge_updates: false,
    }
}

pub fn user_stats() -> UserStats {
    UserStats {
        total_points: 2445,
        challenges_completed: 12,
        badges_earned: 8,
        streak_days: 15,
        posts_shared: 23,
        helped_others: 7,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
