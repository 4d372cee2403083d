use std::error::Error;
use std::io;
use std::time::Duration as StdDuration;

use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use crossterm::{ExecutableCommand, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::{Frame, Terminal};

use wellness_companion::domain::{MealType, MoodLevel, NotificationKind, ProfileField, Recipe};
use wellness_companion::metrics::upcoming_appointments;
use wellness_companion::notice::Notices;
use wellness_companion::screens::{
	CareAction, CareTab, CommunityAction, CommunityTab, MealsAction, MoodAction, ProfileAction, ProfileTab,
	QuizAction, QuizPhase,
};
use wellness_companion::{ScreenName, Session};

const FOCUSED_PANEL_BORDER_COLOR: Color = Color::Yellow;
const INACTIVE_PANEL_BORDER_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_BACKGROUND_COLOR: Color = Color::Rgb(42, 45, 52);
const QUIZ_KEYS: [char; 4] = ['a', 'b', 'c', 'd'];

pub fn run_dashboard(session: &mut Session) -> Result<(), Box<dyn Error>> {
	enable_raw_mode()?;
	let mut stdout = io::stdout();
	stdout.execute(EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_event_loop(&mut terminal, session);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
	terminal.show_cursor()?;

	result
}

fn run_event_loop(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	session: &mut Session,
) -> Result<(), Box<dyn Error>> {
	let mut app = App::default();

	loop {
		session.meals.dispatch(MealsAction::ExpireNotices);
		session.profile.dispatch(ProfileAction::ExpireNotices);
		app.clamp_cursor(session);
		terminal.draw(|frame| draw_dashboard(frame, &app, session))?;

		if event::poll(StdDuration::from_millis(250))? {
			if let CEvent::Key(key) = event::read()? {
				if key.kind != KeyEventKind::Press {
					continue;
				}

				let should_quit = match &app.mode {
					InputMode::Prompt(_) => handle_prompt_key(&mut app, key.code, session),
					InputMode::Select(_) => handle_select_key(&mut app, key.code, session),
					InputMode::Normal => handle_normal_key(&mut app, key.code, session),
				};

				if should_quit {
					break;
				}
			}
		}
	}

	Ok(())
}

fn draw_dashboard(frame: &mut Frame, app: &App, session: &Session) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(3), Constraint::Min(12), Constraint::Length(4)])
		.split(frame.area());

	render_screen_tabs(frame, layout[0], app);
	match app.screen {
		ScreenName::Dashboard => render_dashboard_screen(frame, layout[1], session),
		ScreenName::Mood => render_mood_screen(frame, layout[1], session),
		ScreenName::Meals => render_meals_screen(frame, layout[1], app, session),
		ScreenName::Care => render_care_screen(frame, layout[1], app, session),
		ScreenName::Community => render_community_screen(frame, layout[1], app, session),
		ScreenName::Profile => render_profile_screen(frame, layout[1], app, session),
	}
	render_footer(frame, layout[2], app);

	if let InputMode::Select(select) = &app.mode {
		render_select_popup(frame, select);
	}
}

fn render_screen_tabs(frame: &mut Frame, area: Rect, app: &App) {
	let selected = ScreenName::ALL
		.iter()
		.position(|screen| *screen == app.screen)
		.unwrap_or(0);
	let tabs = Tabs::new(ScreenName::ALL.iter().map(|screen| screen.title()))
		.select(selected)
		.block(Block::default().borders(Borders::ALL).title("Wellness Companion"))
		.highlight_style(
			Style::default()
				.fg(FOCUSED_PANEL_BORDER_COLOR)
				.add_modifier(Modifier::BOLD),
		);
	frame.render_widget(tabs, area);
}

fn render_sub_tabs(frame: &mut Frame, area: Rect, labels: Vec<&'static str>, selected: usize) {
	let tabs = Tabs::new(labels)
		.select(selected)
		.block(Block::default().borders(Borders::BOTTOM))
		.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
	frame.render_widget(tabs, area);
}

fn render_dashboard_screen(frame: &mut Frame, area: Rect, session: &Session) {
	let summary = session.summary();
	let mut lines = vec![
		Line::from(Span::styled(
			summary.greeting.clone(),
			Style::default().add_modifier(Modifier::BOLD),
		)),
		Line::from(""),
		Line::from(format!(
			"Mood garden: {} (average {:.1})",
			summary.garden.label(),
			summary.mood_average
		)),
		Line::from(format!("Medication adherence: {}%", summary.adherence)),
		Line::from(format!("Upcoming appointments: {}", summary.upcoming_appointments)),
	];

	if let Some(appointment) = &summary.next_appointment {
		lines.push(Line::from(format!(
			"  next: {} with {} on {} at {}",
			appointment.title,
			appointment.doctor,
			appointment.date.format("%b %-d"),
			appointment.time
		)));
	}
	lines.push(Line::from(format!("Challenges joined: {}", summary.joined_challenges)));
	lines.push(Line::from(format!("Favorite recipes: {}", summary.favorite_recipes)));

	let panel = Paragraph::new(lines).block(panel_block("Today", true));
	frame.render_widget(panel, area);
}

fn render_mood_screen(frame: &mut Frame, area: Rect, session: &Session) {
	let state = session.mood.state();
	let metrics = session.mood.metrics();
	let body = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
		.split(area);

	let mut check_in = MoodLevel::all()
		.map(|level| {
			let marker = if state.selected == Some(level) { ">" } else { " " };
			Line::from(format!("{marker} {} {}", level.value(), level.label()))
		})
		.collect::<Vec<_>>();
	check_in.push(Line::from(""));
	if state.note_input_open {
		check_in.push(Line::from(format!("Note: {}", state.note_draft)));
		check_in.push(Line::from("n edit note | Enter save entry"));
	} else {
		check_in.push(Line::from("1-5 choose how you feel"));
	}
	frame.render_widget(
		Paragraph::new(check_in).block(panel_block("How are you feeling?", true)),
		body[0],
	);

	let mut history = vec![
		Line::from(format!(
			"{} (average {:.1})",
			metrics.garden.label(),
			metrics.average
		)),
		Line::from(""),
	];
	// bars arrive oldest first, the journal lists newest first
	for (entry, height) in state.history.iter().zip(metrics.bar_heights.iter().rev()) {
		history.push(Line::from(format!(
			"{} {:<20} {}",
			entry.date.format("%a %b %-d"),
			"#".repeat(usize::from(*height / 5)),
			entry.notes.as_deref().unwrap_or("")
		)));
	}
	frame.render_widget(
		Paragraph::new(history)
			.wrap(Wrap { trim: true })
			.block(panel_block("Mood Garden", false)),
		body[1],
	);
}

fn render_meals_screen(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
	let state = session.meals.state();
	let metrics = session.meals.metrics();
	let body = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
		.split(area);

	let items = if metrics.visible.is_empty() {
		vec![ListItem::new("(no recipes match)")]
	} else {
		metrics
			.visible
			.iter()
			.map(|recipe| {
				let favorite = if state.is_favorite(&recipe.id) { "*" } else { " " };
				ListItem::new(format!(
					"{favorite} {} ({} min, {} kcal)",
					recipe.name,
					recipe.total_time_mins(),
					recipe.calories
				))
			})
			.collect()
	};
	let title = format!(
		"Recipes | {} | search: {}",
		state.meal_type.label(),
		if state.search.is_empty() { "-" } else { state.search.as_str() }
	);
	render_cursor_list(frame, body[0], title, items, app.cursor, !metrics.visible.is_empty());

	let mut detail = match metrics
		.open_recipe
		.as_ref()
		.or_else(|| metrics.visible.get(app.cursor))
	{
		Some(recipe) => recipe_lines(recipe, metrics.open_recipe.is_some()),
		None => vec![Line::from("Generate a recipe with g")],
	};
	detail.push(Line::from(""));
	detail.push(Line::from(format!("Pantry: {}", state.pantry.join(", "))));
	detail.push(Line::from(format!(
		"Planned today: {} | {} more suggestions",
		metrics.planned_today.len(),
		metrics.remaining_suggestions
	)));
	detail.extend(notice_lines(&state.notices));

	frame.render_widget(
		Paragraph::new(detail)
			.wrap(Wrap { trim: true })
			.block(panel_block("Details", metrics.open_recipe.is_some())),
		body[1],
	);
}

fn recipe_lines(recipe: &Recipe, expanded: bool) -> Vec<Line<'static>> {
	let mut lines = vec![
		Line::from(Span::styled(
			recipe.name.clone(),
			Style::default().add_modifier(Modifier::BOLD),
		)),
		Line::from(format!(
			"{} | prep {} min | cook {} min | serves {}",
			recipe.difficulty.label(),
			recipe.prep_time_mins,
			recipe.cook_time_mins,
			recipe.servings
		)),
		Line::from(format!("Tags: {}", recipe.tags.join(", "))),
	];

	if expanded {
		lines.push(Line::from(""));
		lines.extend(recipe.ingredients.iter().map(|item| Line::from(format!("- {item}"))));
		lines.push(Line::from(""));
		lines.extend(
			recipe
				.instructions
				.iter()
				.enumerate()
				.map(|(index, step)| Line::from(format!("{}. {step}", index + 1))),
		);
	}
	lines
}

fn render_care_screen(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
	let state = session.care.state();
	let metrics = session.care.metrics();
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(2), Constraint::Min(6)])
		.split(area);
	render_sub_tabs(
		frame,
		layout[0],
		CareTab::ALL.iter().map(|tab| tab.label()).collect(),
		index_of(&CareTab::ALL, state.tab),
	);

	match state.tab {
		CareTab::Calendar => {
			let today = session.care.context().today();
			let lines = upcoming_appointments(&state.appointments, today)
				.into_iter()
				.map(|appointment| {
					Line::from(format!(
						"{} {} | {} with {} ({})",
						appointment.date.format("%a %b %-d"),
						appointment.time,
						appointment.title,
						appointment.doctor,
						appointment.kind.label()
					))
				})
				.collect::<Vec<_>>();
			frame.render_widget(Paragraph::new(lines).block(panel_block("Upcoming", true)), layout[1]);
		}
		CareTab::Medications => {
			let items = state
				.medications
				.iter()
				.map(|medication| {
					ListItem::new(format!(
						"[{}] {} {} | {}",
						if medication.taken_today { "x" } else { " " },
						medication.name,
						medication.dosage,
						medication.frequency
					))
				})
				.collect();
			let title = format!(
				"Adherence {}% ({}/{}) | {}",
				metrics.adherence, metrics.taken, metrics.total, metrics.adherence_message
			);
			render_cursor_list(frame, layout[1], title, items, app.cursor, true);
		}
		CareTab::Quiz => {
			let quiz = &state.quiz;
			let lines = match quiz.phase() {
				QuizPhase::Results => vec![
					Line::from(format!("You scored {}/{}", quiz.score(), quiz.len())),
					Line::from("r restart"),
				],
				QuizPhase::Answering { index, selection } => {
					let mut lines = Vec::new();
					if let Some(question) = quiz.current_question() {
						lines.push(Line::from(format!(
							"Question {}/{}: {}",
							index + 1,
							quiz.len(),
							question.question
						)));
						for (key, option) in QUIZ_KEYS.iter().zip(question.options.iter()) {
							let style = match selection {
								Some(_) if *option == question.correct_answer => Style::default().fg(Color::Green),
								Some(chosen) if chosen == option => Style::default().fg(Color::Red),
								_ => Style::default(),
							};
							lines.push(Line::from(Span::styled(format!("  {key}) {option}"), style)));
						}
						if selection.is_some() {
							lines.push(Line::from(if quiz.is_last_question() {
								"n see results"
							} else {
								"n next question"
							}));
						}
					}
					lines
				}
			};
			frame.render_widget(
				Paragraph::new(lines)
					.wrap(Wrap { trim: true })
					.block(panel_block("First Aid Quiz", true)),
				layout[1],
			);
		}
		CareTab::Notes => {
			let lines = state
				.notes
				.iter()
				.flat_map(|note| {
					[
						Line::from(Span::styled(
							format!("{} [{}] {}", note.date.format("%b %-d"), note.category.label(), note.title),
							Style::default().add_modifier(Modifier::BOLD),
						)),
						Line::from(format!("  {} - {}", note.content, note.author)),
					]
				})
				.collect::<Vec<_>>();
			frame.render_widget(
				Paragraph::new(lines)
					.wrap(Wrap { trim: true })
					.block(panel_block("Care Notes", true)),
				layout[1],
			);
		}
		CareTab::Team => {
			let lines = state
				.team
				.iter()
				.map(|member| Line::from(format!("{} | {}", member.name, member.role)))
				.collect::<Vec<_>>();
			frame.render_widget(Paragraph::new(lines).block(panel_block("Care Team", true)), layout[1]);
		}
	}
}

fn render_community_screen(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
	let state = session.community.state();
	let metrics = session.community.metrics();
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(2), Constraint::Min(6)])
		.split(area);
	render_sub_tabs(
		frame,
		layout[0],
		CommunityTab::ALL.iter().map(|tab| tab.label()).collect(),
		index_of(&CommunityTab::ALL, state.tab),
	);

	match state.tab {
		CommunityTab::Challenges => {
			let items = state
				.challenges
				.iter()
				.map(|challenge| {
					ListItem::new(format!(
						"[{}] {} | {} | {} participants | {}% | {}",
						if state.has_joined(&challenge.id) { "x" } else { " " },
						challenge.title,
						challenge.category.label(),
						challenge.participants,
						challenge.progress,
						challenge.reward
					))
				})
				.collect();
			let title = format!("Challenges ({} joined)", metrics.joined);
			render_cursor_list(frame, layout[1], title, items, app.cursor, true);
		}
		CommunityTab::Wall => {
			let items = state
				.posts
				.iter()
				.zip(metrics.post_ages.iter())
				.map(|(post, age)| {
					ListItem::new(format!(
						"{} {} ({}) | {} likes | {}",
						if post.liked { "<3" } else { "  " },
						post.author,
						age.age,
						post.likes,
						post.content
					))
				})
				.collect();
			render_cursor_list(frame, layout[1], "Community Wall".to_string(), items, app.cursor, true);
		}
		CommunityTab::Badges => {
			let lines = state
				.badges
				.iter()
				.map(|badge| {
					Line::from(format!(
						"{} {} | {}",
						if badge.earned { "*" } else { " " },
						badge.name,
						badge.description
					))
				})
				.collect::<Vec<_>>();
			let title = format!("Badges ({} earned)", metrics.earned_badges);
			frame.render_widget(Paragraph::new(lines).block(panel_block(&title, true)), layout[1]);
		}
		CommunityTab::Leaderboard => {
			let lines = state
				.leaderboard
				.iter()
				.map(|entry| {
					let style = if entry.is_user {
						Style::default().add_modifier(Modifier::BOLD)
					} else {
						Style::default()
					};
					Line::from(Span::styled(
						format!("#{} {} | {} pts", entry.rank, entry.name, entry.points),
						style,
					))
				})
				.collect::<Vec<_>>();
			frame.render_widget(Paragraph::new(lines).block(panel_block("Leaderboard", true)), layout[1]);
		}
	}
}

fn render_profile_screen(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
	let state = session.profile.state();
	let metrics = session.profile.metrics();
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(2), Constraint::Min(6), Constraint::Length(3)])
		.split(area);
	render_sub_tabs(
		frame,
		layout[0],
		ProfileTab::ALL.iter().map(|tab| tab.label()).collect(),
		index_of(&ProfileTab::ALL, state.tab),
	);

	match state.tab {
		ProfileTab::Profile => {
			let profile = state.displayed();
			let items = ProfileField::ALL
				.iter()
				.map(|field| ListItem::new(format!("{}: {}", field.label(), profile.field(*field))))
				.collect();
			let title = format!(
				"{}member since {}",
				if metrics.editing { "Editing | " } else { "" },
				metrics.member_since
			);
			render_cursor_list(frame, layout[1], title, items, app.cursor, metrics.editing);
		}
		ProfileTab::Stats => {
			let stats = state.stats;
			let lines = vec![
				Line::from(format!("Total points: {}", stats.total_points)),
				Line::from(format!("Challenges completed: {}", stats.challenges_completed)),
				Line::from(format!("Badges earned: {}", stats.badges_earned)),
				Line::from(format!("Current streak: {} days", stats.streak_days)),
				Line::from(format!("Posts shared: {}", stats.posts_shared)),
				Line::from(format!("People helped: {}", stats.helped_others)),
			];
			frame.render_widget(Paragraph::new(lines).block(panel_block("My Journey", true)), layout[1]);
		}
		ProfileTab::Settings => {
			let items = NotificationKind::ALL
				.iter()
				.map(|kind| {
					ListItem::new(format!(
						"[{}] {}",
						if state.notifications.is_enabled(*kind) { "x" } else { " " },
						kind.label()
					))
				})
				.collect();
			let title = format!("Notifications ({} on)", metrics.enabled_notifications);
			render_cursor_list(frame, layout[1], title, items, app.cursor, true);
		}
		ProfileTab::Privacy => {
			let lines = if state.delete_confirm_open {
				vec![
					Line::from(Span::styled(
						"Delete your account? This cannot be undone.",
						Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
					)),
					Line::from("Esc keep my account"),
				]
			} else {
				vec![
					Line::from("Your data stays on this device."),
					Line::from("d delete account"),
				]
			};
			frame.render_widget(Paragraph::new(lines).block(panel_block("Security", true)), layout[1]);
		}
	}

	frame.render_widget(Paragraph::new(notice_lines(&state.notices)), layout[2]);
}

fn render_cursor_list(
	frame: &mut Frame,
	area: Rect,
	title: String,
	items: Vec<ListItem<'static>>,
	cursor: usize,
	focused: bool,
) {
	let len = items.len();
	let list = List::new(items)
		.block(panel_block(&title, focused))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	if len > 0 {
		state.select(Some(cursor.min(len - 1)));
	}
	frame.render_stateful_widget(list, area, &mut state);
}

fn notice_lines(notices: &Notices) -> Vec<Line<'static>> {
	notices
		.iter()
		.map(|notice| {
			Line::from(Span::styled(
				notice.message.clone(),
				Style::default().fg(Color::Green),
			))
		})
		.collect()
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
	let footer_lines = match &app.mode {
		InputMode::Normal => vec![
			Line::from("Tab/BackTab screen | [ ] section | j/k move | q quit"),
			Line::from(screen_hint(app.screen)),
			Line::from(app.status.clone()),
		],
		InputMode::Prompt(prompt) => vec![
			Line::from(prompt.title.clone()),
			Line::from(format!("> {}", prompt.input)),
			Line::from("Enter submit | Esc cancel"),
		],
		InputMode::Select(select) => vec![
			Line::from(select.title.clone()),
			Line::from(format!(
				"Selected: {}",
				select
					.selected_option()
					.map(|meal_type| meal_type.label())
					.unwrap_or("(none)")
			)),
			Line::from("j/k or arrows move | Enter choose | Esc cancel"),
		],
	};

	let footer = Paragraph::new(footer_lines).block(Block::default().borders(Borders::ALL).title("Shortcuts"));
	frame.render_widget(footer, area);
}

fn screen_hint(screen: ScreenName) -> &'static str {
	match screen {
		ScreenName::Dashboard => "Tab to start your check-in",
		ScreenName::Mood => "1-5 mood | n note | Enter save",
		ScreenName::Meals => "/ search | t meal type | i add ingredient | g generate | Enter open | f favorite | p plan | x dismiss",
		ScreenName::Care => "space taken (medications) | a-d answer | n next | r restart (quiz)",
		ScreenName::Community => "Enter join (challenges) | l like | w write post (wall)",
		ScreenName::Profile => "e edit | Enter change field | s save | c cancel | space toggle | d delete | x dismiss",
	}
}

fn render_select_popup(frame: &mut Frame, select: &SelectState) {
	let area = centered_rect(40, 40, frame.area());
	frame.render_widget(Clear, area);

	let items = select
		.options
		.iter()
		.map(|meal_type| ListItem::new(meal_type.label()))
		.collect::<Vec<_>>();
	let list = List::new(items)
		.block(Block::default().borders(Borders::ALL).title(select.title.clone()))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	if !select.options.is_empty() {
		state.select(Some(select.selected.min(select.options.len() - 1)));
	}
	frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Percentage((100 - percent_y) / 2),
			Constraint::Percentage(percent_y),
			Constraint::Percentage((100 - percent_y) / 2),
		])
		.split(area);
	Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage((100 - percent_x) / 2),
			Constraint::Percentage(percent_x),
			Constraint::Percentage((100 - percent_x) / 2),
		])
		.split(popup_layout[1])[1]
}

fn handle_normal_key(app: &mut App, code: KeyCode, session: &mut Session) -> bool {
	match code {
		KeyCode::Char('q') => return true,
		KeyCode::Esc => return handle_escape(app, session),
		KeyCode::Tab => app.switch_screen(app.screen.next()),
		KeyCode::BackTab => app.switch_screen(app.screen.prev()),
		KeyCode::Char(']') | KeyCode::Right => shift_section(app, session, 1),
		KeyCode::Char('[') | KeyCode::Left => shift_section(app, session, -1),
		KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
		KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
		_ => match app.screen {
			ScreenName::Dashboard => {}
			ScreenName::Mood => handle_mood_key(app, code, session),
			ScreenName::Meals => handle_meals_key(app, code, session),
			ScreenName::Care => handle_care_key(app, code, session),
			ScreenName::Community => handle_community_key(app, code, session),
			ScreenName::Profile => handle_profile_key(app, code, session),
		},
	}

	false
}

/// Esc closes the innermost open thing on the current screen, or quits.
fn handle_escape(app: &mut App, session: &mut Session) -> bool {
	match app.screen {
		ScreenName::Meals if session.meals.state().open_recipe.is_some() => {
			session.meals.dispatch(MealsAction::CloseRecipe);
		}
		ScreenName::Profile if session.profile.state().delete_confirm_open => {
			session.profile.dispatch(ProfileAction::CloseDeleteConfirm);
		}
		ScreenName::Profile if session.profile.state().is_editing() => {
			session.profile.dispatch(ProfileAction::Cancel);
			app.status = "Edit cancelled".to_string();
		}
		_ => return true,
	}
	false
}

fn shift_section(app: &mut App, session: &mut Session, delta: isize) {
	match app.screen {
		ScreenName::Care => {
			let tab = cycle(&CareTab::ALL, session.care.state().tab, delta);
			session.care.dispatch(CareAction::SelectTab(tab));
		}
		ScreenName::Community => {
			let tab = cycle(&CommunityTab::ALL, session.community.state().tab, delta);
			session.community.dispatch(CommunityAction::SelectTab(tab));
		}
		ScreenName::Profile => {
			let tab = cycle(&ProfileTab::ALL, session.profile.state().tab, delta);
			session.profile.dispatch(ProfileAction::SelectTab(tab));
		}
		ScreenName::Meals => {
			let meal_type = cycle(&MealType::ALL, session.meals.state().meal_type, delta);
			session.meals.dispatch(MealsAction::SelectMealType(meal_type));
		}
		ScreenName::Dashboard | ScreenName::Mood => return,
	}
	app.cursor = 0;
}

fn handle_mood_key(app: &mut App, code: KeyCode, session: &mut Session) {
	match code {
		KeyCode::Char(digit @ '1'..='5') => {
			let value = digit.to_digit(10).and_then(|value| u8::try_from(value).ok());
			if let Some(level) = value.and_then(|value| MoodLevel::new(value).ok()) {
				session.mood.dispatch(MoodAction::Select(level));
				app.status = format!("Feeling {}", level.label().to_lowercase());
			}
		}
		KeyCode::Char('n') if session.mood.state().note_input_open => {
			let draft = session.mood.state().note_draft.clone();
			app.mode = InputMode::Prompt(PromptState::with_input("Add a note", PromptKind::MoodNote, draft));
		}
		KeyCode::Enter => {
			if session.mood.state().selected.is_some() {
				session.mood.dispatch(MoodAction::Submit);
				app.status = "Mood saved".to_string();
			} else {
				app.status = "Pick a mood first".to_string();
			}
		}
		_ => {}
	}
}

fn handle_meals_key(app: &mut App, code: KeyCode, session: &mut Session) {
	let selected = session
		.meals
		.metrics()
		.visible
		.get(app.cursor)
		.map(|recipe| recipe.id.clone());

	match code {
		KeyCode::Char('/') => {
			let current = session.meals.state().search.clone();
			app.mode = InputMode::Prompt(PromptState::with_input("Search recipes", PromptKind::Search, current));
		}
		KeyCode::Char('i') => {
			app.mode = InputMode::Prompt(PromptState::new("Add an ingredient", PromptKind::Ingredient));
		}
		KeyCode::Char('t') => {
			app.mode = InputMode::Select(SelectState::new("Meal type", session.meals.state().meal_type));
		}
		KeyCode::Char('g') => {
			session.meals.dispatch(MealsAction::Generate);
		}
		KeyCode::Char('x') => {
			let latest = session.meals.state().notices.latest().map(|notice| notice.id.clone());
			if let Some(id) = latest {
				session.meals.dispatch(MealsAction::DismissNotice(id));
			}
		}
		KeyCode::Enter => {
			if let Some(recipe_id) = selected {
				session.meals.dispatch(MealsAction::OpenRecipe(recipe_id));
			}
		}
		KeyCode::Char('f') => {
			if let Some(recipe_id) = selected {
				session.meals.dispatch(MealsAction::ToggleFavorite(recipe_id));
			}
		}
		KeyCode::Char('p') => {
			let target = session.meals.state().open_recipe.clone().or(selected);
			if let Some(recipe_id) = target {
				session.meals.dispatch(MealsAction::AddToPlan(recipe_id));
			}
		}
		_ => {}
	}
}

fn handle_care_key(app: &mut App, code: KeyCode, session: &mut Session) {
	match (session.care.state().tab, code) {
		(CareTab::Medications, KeyCode::Char(' ') | KeyCode::Enter) => {
			let medication_id = session
				.care
				.state()
				.medications
				.get(app.cursor)
				.map(|medication| medication.id.clone());
			if let Some(medication_id) = medication_id {
				session.care.dispatch(CareAction::ToggleTaken { medication_id });
				app.status = session.care.metrics().adherence_message.to_string();
			}
		}
		(CareTab::Quiz, KeyCode::Char(key)) if QUIZ_KEYS.contains(&key) => {
			let option = session.care.state().quiz.current_question().and_then(|question| {
				QUIZ_KEYS
					.iter()
					.position(|candidate| *candidate == key)
					.and_then(|index| question.options.get(index).cloned())
			});
			if let Some(option) = option {
				session.care.dispatch(CareAction::Quiz(QuizAction::Select(option)));
			}
		}
		(CareTab::Quiz, KeyCode::Char('n')) => {
			if session.care.state().quiz.selection().is_some() {
				session.care.dispatch(CareAction::Quiz(QuizAction::Advance));
			}
		}
		(CareTab::Quiz, KeyCode::Char('r')) => {
			session.care.dispatch(CareAction::Quiz(QuizAction::Restart));
		}
		_ => {}
	}
}

fn handle_community_key(app: &mut App, code: KeyCode, session: &mut Session) {
	match (session.community.state().tab, code) {
		(CommunityTab::Challenges, KeyCode::Enter | KeyCode::Char(' ')) => {
			let challenge_id = session
				.community
				.state()
				.challenges
				.get(app.cursor)
				.map(|challenge| challenge.id.clone());
			if let Some(challenge_id) = challenge_id {
				session.community.dispatch(CommunityAction::Join { challenge_id });
			}
		}
		(CommunityTab::Wall, KeyCode::Char('l')) => {
			let post_id = session
				.community
				.state()
				.posts
				.get(app.cursor)
				.map(|post| post.id.clone());
			if let Some(post_id) = post_id {
				session.community.dispatch(CommunityAction::ToggleLike { post_id });
			}
		}
		(CommunityTab::Wall, KeyCode::Char('w')) => {
			app.mode = InputMode::Prompt(PromptState::new("Share with the community", PromptKind::Post));
		}
		_ => {}
	}
}

fn handle_profile_key(app: &mut App, code: KeyCode, session: &mut Session) {
	let state = session.profile.state();
	match (state.tab, code) {
		(ProfileTab::Profile, KeyCode::Char('e')) if !state.is_editing() => {
			session.profile.dispatch(ProfileAction::BeginEdit);
			app.status = "Editing profile".to_string();
		}
		(ProfileTab::Profile, KeyCode::Enter) if state.is_editing() => {
			if let Some(field) = ProfileField::ALL.get(app.cursor).copied() {
				let current = state.displayed().field(field).to_string();
				app.mode = InputMode::Prompt(PromptState::with_input(
					field.label(),
					PromptKind::ProfileField(field),
					current,
				));
			}
		}
		(ProfileTab::Profile, KeyCode::Char('s')) if state.is_editing() => {
			session.profile.dispatch(ProfileAction::Save);
			app.status = "Profile saved".to_string();
		}
		(ProfileTab::Profile, KeyCode::Char('c')) if state.is_editing() => {
			session.profile.dispatch(ProfileAction::Cancel);
			app.status = "Edit cancelled".to_string();
		}
		(ProfileTab::Settings, KeyCode::Char(' ') | KeyCode::Enter) => {
			if let Some(kind) = NotificationKind::ALL.get(app.cursor).copied() {
				session.profile.dispatch(ProfileAction::ToggleNotification(kind));
			}
		}
		(ProfileTab::Privacy, KeyCode::Char('d')) => {
			session.profile.dispatch(ProfileAction::OpenDeleteConfirm);
		}
		(_, KeyCode::Char('x')) => {
			if let Some(id) = state.notices.latest().map(|notice| notice.id.clone()) {
				session.profile.dispatch(ProfileAction::DismissNotice(id));
			}
		}
		_ => {}
	}
}

fn handle_prompt_key(app: &mut App, code: KeyCode, session: &mut Session) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Input cancelled".to_string();
		}
		KeyCode::Backspace => {
			if let InputMode::Prompt(prompt) = &mut app.mode {
				prompt.input.pop();
			}
		}
		KeyCode::Char(value) => {
			if let InputMode::Prompt(prompt) = &mut app.mode {
				prompt.input.push(value);
			}
		}
		KeyCode::Enter => {
			let prompt = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Prompt(prompt) => prompt,
				InputMode::Normal | InputMode::Select(_) => return false,
			};
			app.status = submit_prompt(prompt, session);
		}
		_ => {}
	}

	false
}

fn handle_select_key(app: &mut App, code: KeyCode, session: &mut Session) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Selection cancelled".to_string();
		}
		KeyCode::Up | KeyCode::Char('k') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(-1);
			}
		}
		KeyCode::Down | KeyCode::Char('j') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(1);
			}
		}
		KeyCode::Enter => {
			let select = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Select(select) => select,
				_ => return false,
			};

			if let Some(meal_type) = select.selected_option() {
				session.meals.dispatch(MealsAction::SelectMealType(meal_type));
				app.cursor = 0;
				app.status = format!("Showing {}", meal_type.label().to_lowercase());
			}
		}
		_ => {}
	}

	false
}

fn submit_prompt(prompt: PromptState, session: &mut Session) -> String {
	match prompt.kind {
		PromptKind::MoodNote => {
			session.mood.dispatch(MoodAction::EditNote(prompt.input));
			"Note added".to_string()
		}
		PromptKind::Search => {
			session.meals.dispatch(MealsAction::Search(prompt.input));
			let found = session.meals.metrics().visible.len();
			format!("{found} recipes match")
		}
		PromptKind::Ingredient => {
			session.meals.dispatch(MealsAction::EditIngredient(prompt.input));
			session.meals.dispatch(MealsAction::AddIngredient);
			format!("{} items in pantry", session.meals.state().pantry.len())
		}
		PromptKind::Post => {
			let before = session.community.state().posts.len();
			session.community.dispatch(CommunityAction::EditPost(prompt.input));
			session.community.dispatch(CommunityAction::SubmitPost);
			if session.community.state().posts.len() > before {
				"Posted to the community wall".to_string()
			} else {
				"Nothing to post".to_string()
			}
		}
		PromptKind::ProfileField(field) => {
			session.profile.dispatch(ProfileAction::EditField(field, prompt.input));
			format!("{} updated, s to save", field.label())
		}
	}
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
	Block::default()
		.borders(Borders::ALL)
		.title(title.to_string())
		.border_style(border_style(focused))
}

fn border_style(focused: bool) -> Style {
	if focused {
		Style::default()
			.fg(FOCUSED_PANEL_BORDER_COLOR)
			.add_modifier(Modifier::BOLD)
	} else {
		Style::default().fg(INACTIVE_PANEL_BORDER_COLOR)
	}
}

fn index_of<T: PartialEq>(all: &[T], current: T) -> usize {
	all.iter().position(|item| *item == current).unwrap_or(0)
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
	let len = all.len() as isize;
	let index = index_of(all, current) as isize;
	all[(index + delta).rem_euclid(len) as usize]
}

#[derive(Debug, Clone)]
struct PromptState {
	title: String,
	input: String,
	kind: PromptKind,
}

impl PromptState {
	fn new(title: impl Into<String>, kind: PromptKind) -> Self {
		Self::with_input(title, kind, String::new())
	}

	fn with_input(title: impl Into<String>, kind: PromptKind, input: String) -> Self {
		Self {
			title: title.into(),
			input,
			kind,
		}
	}
}

#[derive(Debug, Clone)]
enum PromptKind {
	MoodNote,
	Search,
	Ingredient,
	Post,
	ProfileField(ProfileField),
}

#[derive(Debug, Clone)]
struct SelectState {
	title: String,
	options: Vec<MealType>,
	selected: usize,
}

impl SelectState {
	fn new(title: impl Into<String>, current: MealType) -> Self {
		Self {
			title: title.into(),
			options: MealType::ALL.to_vec(),
			selected: index_of(&MealType::ALL, current),
		}
	}

	fn move_selection(&mut self, delta: i32) {
		if self.options.is_empty() {
			self.selected = 0;
			return;
		}

		if delta > 0 {
			self.selected = (self.selected + delta as usize).min(self.options.len() - 1);
		} else {
			self.selected = self.selected.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_option(&self) -> Option<MealType> {
		self.options.get(self.selected).copied()
	}
}

#[derive(Debug, Clone)]
enum InputMode {
	Normal,
	Prompt(PromptState),
	Select(SelectState),
}

#[derive(Debug, Clone)]
struct App {
	screen: ScreenName,
	cursor: usize,
	mode: InputMode,
	status: String,
}

impl Default for App {
	fn default() -> Self {
		Self {
			screen: ScreenName::Dashboard,
			cursor: 0,
			mode: InputMode::Normal,
			status: "Ready".to_string(),
		}
	}
}

impl App {
	fn switch_screen(&mut self, screen: ScreenName) {
		self.screen = screen;
		self.cursor = 0;
	}

	fn move_cursor(&mut self, delta: isize) {
		self.cursor = self.cursor.saturating_add_signed(delta);
	}

	fn clamp_cursor(&mut self, session: &Session) {
		let len = cursor_len(self.screen, session);
		self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
	}
}

/// Number of rows the cursor can move over on the current screen and tab.
fn cursor_len(screen: ScreenName, session: &Session) -> usize {
	match screen {
		ScreenName::Dashboard | ScreenName::Mood => 0,
		ScreenName::Meals => session.meals.metrics().visible.len(),
		ScreenName::Care => match session.care.state().tab {
			CareTab::Medications => session.care.state().medications.len(),
			_ => 0,
		},
		ScreenName::Community => match session.community.state().tab {
			CommunityTab::Challenges => session.community.state().challenges.len(),
			CommunityTab::Wall => session.community.state().posts.len(),
			_ => 0,
		},
		ScreenName::Profile => match session.profile.state().tab {
			ProfileTab::Profile => ProfileField::ALL.len(),
			ProfileTab::Settings => NotificationKind::ALL.len(),
			_ => 0,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use wellness_companion::Context;

	fn session() -> Session {
		Session::new(Context::system(), Some(7))
	}

	fn press(app: &mut App, session: &mut Session, keys: &[KeyCode]) {
		for key in keys {
			match &app.mode {
				InputMode::Prompt(_) => handle_prompt_key(app, *key, session),
				InputMode::Select(_) => handle_select_key(app, *key, session),
				InputMode::Normal => handle_normal_key(app, *key, session),
			};
			app.clamp_cursor(session);
		}
	}

	fn type_text(text: &str) -> Vec<KeyCode> {
		text.chars().map(KeyCode::Char).collect()
	}

	#[test]
	fn mood_check_in_records_an_entry_with_a_note() {
		let mut session = session();
		let mut app = App::default();
		let mut keys = vec![KeyCode::Tab, KeyCode::Char('4'), KeyCode::Char('n')];
		keys.extend(type_text("slept well"));
		keys.extend([KeyCode::Enter, KeyCode::Enter]);
		press(&mut app, &mut session, &keys);

		let latest = &session.mood.state().history[0];
		assert_eq!(latest.mood, MoodLevel::GOOD);
		assert_eq!(latest.notes.as_deref(), Some("slept well"));
		assert_eq!(app.status, "Mood saved");
	}

	#[test]
	fn quiz_keys_answer_and_advance() {
		let mut session = session();
		let mut app = App::default();
		app.switch_screen(ScreenName::Care);
		press(&mut app, &mut session, &[KeyCode::Char(']'), KeyCode::Char(']')]);
		assert_eq!(session.care.state().tab, CareTab::Quiz);

		press(&mut app, &mut session, &[KeyCode::Char('n')]);
		assert!(matches!(
			session.care.state().quiz.phase(),
			QuizPhase::Answering { index: 0, .. }
		));

		press(&mut app, &mut session, &[KeyCode::Char('a'), KeyCode::Char('n')]);
		assert!(matches!(
			session.care.state().quiz.phase(),
			QuizPhase::Answering { index: 1, selection: None }
		));
	}

	#[test]
	fn profile_edits_go_through_a_prompt_and_save() {
		let mut session = session();
		let mut app = App::default();
		app.switch_screen(ScreenName::Profile);
		let mut keys = vec![KeyCode::Char('e'), KeyCode::Enter];
		keys.extend(std::iter::repeat_n(KeyCode::Backspace, 40));
		keys.extend(type_text("Jamie Lee"));
		keys.extend([KeyCode::Enter, KeyCode::Char('s')]);
		press(&mut app, &mut session, &keys);

		assert_eq!(session.profile.state().committed.name, "Jamie Lee");
		assert!(!session.profile.state().is_editing());
	}

	#[test]
	fn x_dismisses_the_latest_notice() {
		let mut session = session();
		let mut app = App::default();
		app.switch_screen(ScreenName::Meals);
		press(&mut app, &mut session, &[KeyCode::Char('f'), KeyCode::Char('f')]);
		assert_eq!(session.meals.state().notices.len(), 2);
		press(&mut app, &mut session, &[KeyCode::Char('x')]);
		assert_eq!(session.meals.state().notices.len(), 1);

		app.switch_screen(ScreenName::Profile);
		press(&mut app, &mut session, &[KeyCode::Char('e'), KeyCode::Char('s')]);
		assert_eq!(session.profile.state().notices.len(), 1);
		press(&mut app, &mut session, &[KeyCode::Char('x')]);
		assert!(session.profile.state().notices.is_empty());
	}

	#[test]
	fn escape_cancels_an_edit_before_quitting() {
		let mut session = session();
		let mut app = App::default();
		app.switch_screen(ScreenName::Profile);
		press(&mut app, &mut session, &[KeyCode::Char('e')]);
		assert!(!handle_normal_key(&mut app, KeyCode::Esc, &mut session));
		assert!(!session.profile.state().is_editing());
		assert!(handle_normal_key(&mut app, KeyCode::Esc, &mut session));
	}

	#[test]
	fn meal_type_select_filters_recipes() {
		let mut session = session();
		let mut app = App::default();
		app.switch_screen(ScreenName::Meals);
		press(
			&mut app,
			&mut session,
			&[KeyCode::Char('t'), KeyCode::Char('j'), KeyCode::Enter],
		);
		assert_eq!(session.meals.state().meal_type, MealType::ALL[1]);
		assert!(matches!(app.mode, InputMode::Normal));
	}

	#[test]
	fn cursor_stays_within_the_list() {
		let mut session = session();
		let mut app = App::default();
		app.switch_screen(ScreenName::Community);
		press(&mut app, &mut session, &[KeyCode::Char('j'); 50]);
		assert_eq!(app.cursor, session.community.state().challenges.len() - 1);
		press(&mut app, &mut session, &[KeyCode::Tab]);
		assert_eq!(app.cursor, 0);
	}

	#[test]
	fn sections_wrap_around() {
		assert_eq!(cycle(&CareTab::ALL, CareTab::Calendar, -1), CareTab::Team);
		assert_eq!(cycle(&CareTab::ALL, CareTab::Team, 1), CareTab::Calendar);
	}
}
