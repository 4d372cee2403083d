mod ui;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use wellness_companion::ScreenName;
use wellness_companion::Session;
use wellness_companion::config::{Config, load_config, resolve_config_path, save_config};
use wellness_companion::domain::{MealType, MoodLevel};
use wellness_companion::metrics::format_relative;
use wellness_companion::screens::{CareAction, CommunityAction, MealsAction, MoodAction, QuizAction};

use crate::ui::run_dashboard;

#[derive(Debug, Parser)]
#[command(name = "wellness-companion", about = "Terminal wellness companion")]
struct Cli {
	#[arg(long)]
	config: Option<PathBuf>,
	/// Seed for the mock data; overrides the config file.
	#[arg(long)]
	seed: Option<u64>,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Dashboard,
	Summary,
	Mood {
		#[arg(long)]
		value: u8,
		#[arg(long)]
		note: Option<String>,
	},
	Medications {
		#[arg(long = "take")]
		take: Vec<String>,
	},
	Quiz {
		#[arg(long = "answer")]
		answers: Vec<String>,
	},
	Recipes {
		#[arg(long)]
		search: Option<String>,
		#[arg(long, default_value = "all")]
		meal_type: MealType,
		#[arg(long, default_value_t = 0)]
		generate: usize,
	},
	Challenges {
		#[arg(long = "join")]
		join: Vec<String>,
	},
	State {
		screen: ScreenName,
	},
	Config {
		#[command(subcommand)]
		action: Option<ConfigCommand>,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
	Show,
	Init,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();
	let config_path = resolve_config_path(cli.config)?;
	let config = load_config(&config_path)?;
	let command = cli.command.unwrap_or(Command::Dashboard);
	init_tracing(&config, matches!(command, Command::Dashboard));

	let mut session = Session::new(config.context(), cli.seed.or(config.seed));

	match command {
		Command::Dashboard => {
			run_dashboard(&mut session)?;
		}
		Command::Summary => {
			print_summary(&session);
		}
		Command::Mood { value, note } => {
			let level = MoodLevel::new(value)?;
			session.mood.dispatch(MoodAction::Select(level));
			if let Some(note) = note {
				session.mood.dispatch(MoodAction::EditNote(note));
			}
			session.mood.dispatch(MoodAction::Submit);
			print_mood(&session);
		}
		Command::Medications { take } => {
			for medication_id in take {
				session.care.dispatch(CareAction::ToggleTaken { medication_id });
			}
			print_medications(&session);
		}
		Command::Quiz { answers } => {
			for answer in answers {
				session.care.dispatch(CareAction::Quiz(QuizAction::Select(answer)));
				session.care.dispatch(CareAction::Quiz(QuizAction::Advance));
			}
			print_quiz(&session);
		}
		Command::Recipes {
			search,
			meal_type,
			generate,
		} => {
			session.meals.dispatch(MealsAction::Search(search.unwrap_or_default()));
			session.meals.dispatch(MealsAction::SelectMealType(meal_type));
			for _ in 0..generate {
				session.meals.dispatch(MealsAction::Generate);
			}
			print_recipes(&session);
		}
		Command::Challenges { join } => {
			for challenge_id in join {
				session.community.dispatch(CommunityAction::Join { challenge_id });
			}
			print_challenges(&session);
		}
		Command::State { screen } => {
			let snapshot = session.snapshot(screen)?;
			println!("{}", serde_json::to_string_pretty(&snapshot)?);
		}
		Command::Config { action } => match action.unwrap_or(ConfigCommand::Show) {
			ConfigCommand::Show => {
				println!("# {}", config_path.display());
				print!("{}", toml::to_string_pretty(&config)?);
			}
			ConfigCommand::Init => {
				if config_path.exists() {
					println!("config already exists at {}", config_path.display());
				} else {
					save_config(&config_path, &Config::default())?;
					println!("initialized config at {}", config_path.display());
				}
			}
		},
	}

	Ok(())
}

fn init_tracing(config: &Config, silent: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
	// the dashboard owns the terminal, so its logs are discarded
	let writer = if silent {
		BoxMakeWriter::new(std::io::sink)
	} else {
		BoxMakeWriter::new(std::io::stderr)
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(writer)
		.init();
}

fn print_summary(session: &Session) {
	let summary = session.summary();
	println!("{}", summary.greeting);
	println!(
		"mood garden: {} (average {:.1})",
		summary.garden.label(),
		summary.mood_average
	);
	println!("medication adherence: {}%", summary.adherence);
	println!("upcoming appointments: {}", summary.upcoming_appointments);
	if let Some(appointment) = &summary.next_appointment {
		println!(
			"next: {} with {} on {} at {}",
			appointment.title,
			appointment.doctor,
			appointment.date.format("%Y-%m-%d"),
			appointment.time
		);
	}
	println!("joined challenges: {}", summary.joined_challenges);
	println!("favorite recipes: {}", summary.favorite_recipes);
}

fn print_mood(session: &Session) {
	let metrics = session.mood.metrics();
	println!(
		"garden: {} (average {:.1} over {} entries)",
		metrics.garden.label(),
		metrics.average,
		metrics.entries
	);

	for entry in &session.mood.state().history {
		println!(
			"{} | {} | {}",
			entry.date.format("%Y-%m-%d"),
			entry.mood,
			entry.notes.as_deref().unwrap_or("")
		);
	}
}

fn print_medications(session: &Session) {
	let metrics = session.care.metrics();
	for medication in &session.care.state().medications {
		println!(
			"[{}] {} | {} {} | {}",
			if medication.taken_today { "x" } else { " " },
			medication.id,
			medication.name,
			medication.dosage,
			medication.frequency
		);
	}
	println!(
		"\nadherence: {}% ({}/{}) - {}",
		metrics.adherence, metrics.taken, metrics.total, metrics.adherence_message
	);
}

fn print_quiz(session: &Session) {
	let quiz = &session.care.state().quiz;
	if quiz.is_finished() {
		println!("quiz complete: {}/{} correct", quiz.score(), quiz.len());
		return;
	}

	if let Some(question) = quiz.current_question() {
		println!("score so far: {}", quiz.score());
		println!("next question: {}", question.question);
		for (index, option) in question.options.iter().enumerate() {
			println!("  {}. {}", index + 1, option);
		}
	}
}

fn print_recipes(session: &Session) {
	let metrics = session.meals.metrics();
	if metrics.visible.is_empty() {
		println!("no recipes match");
	}

	for recipe in &metrics.visible {
		let favorite = if session.meals.state().is_favorite(&recipe.id) { "*" } else { " " };
		println!(
			"{favorite} {} | {} | {} min | {} kcal | {}",
			recipe.id,
			recipe.name,
			recipe.total_time_mins(),
			recipe.calories,
			recipe.tags.join(", ")
		);
	}

	for notice in session.meals.state().notices.iter() {
		println!("! {}", notice.message);
	}
	println!("\n{} more suggestions available", metrics.remaining_suggestions);
}

fn print_challenges(session: &Session) {
	let state = session.community.state();
	for challenge in &state.challenges {
		println!(
			"[{}] {} | {} | {} | {} participants | {}% | {}",
			if state.has_joined(&challenge.id) { "x" } else { " " },
			challenge.id,
			challenge.title,
			challenge.category.label(),
			challenge.participants,
			challenge.progress,
			challenge.reward
		);
	}

	let now = session.community.context().now();
	println!("\nlatest posts:");
	for post in state.posts.iter().take(3) {
		println!(
			"{} | {} | {} likes | {}",
			post.author,
			format_relative(post.timestamp, now),
			post.likes,
			post.content
		);
	}
}
