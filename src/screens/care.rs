use serde::{Deserialize, Serialize};

use crate::capabilities::Context;
use crate::domain::{Appointment, CareNote, CareTeamMember, Medication};
use crate::metrics::{adherence_message, adherence_percent, upcoming_appointments};
use crate::screens::quiz::{Quiz, QuizAction};
use crate::seed;
use crate::store::Screen;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareTab {
    #[default]
    Calendar,
    Medications,
    Quiz,
    Notes,
    Team,
}

impl CareTab {
    pub const ALL: [CareTab; 5] = [
        CareTab::Calendar,
        CareTab::Medications,
        CareTab::Quiz,
        CareTab::Notes,
        CareTab::Team,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CareTab::Calendar => "Calendar",
            CareTab::Medications => "Medications",
            CareTab::Quiz => "First-Aid Quiz",
            CareTab::Notes => "Notes",
            CareTab::Team => "Care Team",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareState {
    pub tab: CareTab,
    pub appointments: Vec<Appointment>,
    pub medications: Vec<Medication>,
    pub notes: Vec<CareNote>,
    pub team: Vec<CareTeamMember>,
    pub quiz: Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareAction {
    SelectTab(CareTab),
    ToggleTaken { medication_id: String },
    Quiz(QuizAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareMetrics {
    pub adherence: u8,
    pub adherence_message: &'static str,
    pub taken: usize,
    pub total: usize,
    pub upcoming: Vec<Appointment>,
}

impl CareState {
    pub fn seeded(context: &Context) -> Self {
        Self {
            tab: CareTab::default(),
            appointments: seed::appointments(context),
            medications: seed::medications(),
            notes: seed::care_notes(),
            team: seed::care_team(),
            quiz: Quiz::new(seed::quiz_questions()),
        }
    }

    pub fn medication(&self, id: &str) -> Option<&Medication> {
        self.medications.iter().find(|medication| medication.id == id)
    }

    fn apply(&mut self, action: CareAction) {
        match action {
            CareAction::SelectTab(tab) => self.tab = tab,
            CareAction::ToggleTaken { medication_id } => {
                let Some(medication) = self
                    .medications
                    .iter_mut()
                    .find(|medication| medication.id == medication_id)
                else {
                    tracing::warn!(%medication_id, "toggle for unknown medication ignored");
                    return;
                };
                medication.taken_today = !medication.taken_today;
            }
            CareAction::Quiz(action) => self.quiz.apply(action),
        }
    }
}

impl Screen for CareState {
    type Action = CareAction;
    type Metrics = CareMetrics;

    fn reduce(&self, action: CareAction, _context: &Context) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    fn metrics(&self, context: &Context) -> CareMetrics {
        let adherence = adherence_percent(&self.medications);
        CareMetrics {
            adherence,
            adherence_message: adherence_message(adherence),
            taken: self
                .medications
                .iter()
                .filter(|medication| medication.taken_today)
                .count(),
            total: self.medications.len(),
            upcoming: upcoming_appointments(&self.appointments, context.today())
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
