//! Setup wizard flow
//!
//! Step-wise draft of an itinerary request. The draft lives in component
//! state until the review step confirms it; completion calls the generator
//! exactly once. Editing afterwards restarts the wizard rather than
//! patching the generated itinerary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tripline_core::{CityCatalog, ItineraryInput, Pace, TravelStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Destination,
    Schedule,
    Interests,
    Style,
    Review,
}

impl WizardStep {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Destination => Self::Schedule,
            Self::Schedule => Self::Interests,
            Self::Interests => Self::Style,
            Self::Style | Self::Review => Self::Review,
        }
    }

    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::Destination | Self::Schedule => Self::Destination,
            Self::Interests => Self::Schedule,
            Self::Style => Self::Interests,
            Self::Review => Self::Style,
        }
    }
}

/// The in-progress itinerary request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardDraft {
    pub destination_id: Option<String>,
    pub duration_days: u32,
    pub start_date: Option<NaiveDate>,
    pub interests: Vec<String>,
    pub travel_style: TravelStyle,
    pub pace: Pace,
}

impl Default for WizardDraft {
    fn default() -> Self {
        Self {
            destination_id: None,
            duration_days: 3,
            start_date: None,
            interests: Vec::new(),
            travel_style: TravelStyle::Balanced,
            pace: Pace::Moderate,
        }
    }
}

impl WizardDraft {
    /// Whether the given step has what it needs to advance.
    #[must_use]
    pub fn can_advance(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Destination => self.destination_id.is_some(),
            // Interests and dates are optional; duration may be zero and
            // yields an empty-state itinerary downstream.
            WizardStep::Schedule | WizardStep::Interests | WizardStep::Style => true,
            WizardStep::Review => false,
        }
    }

    pub fn toggle_interest(&mut self, interest: &str) {
        let trimmed = interest.trim();
        if trimmed.is_empty() {
            return;
        }
        let had = self.interests.len();
        self.interests.retain(|i| !i.eq_ignore_ascii_case(trimmed));
        if self.interests.len() == had {
            self.interests.push(trimmed.to_string());
        }
    }

    /// Resolve the draft into a generator input. `None` until a known
    /// destination has been chosen.
    #[must_use]
    pub fn build_input(&self, catalog: &CityCatalog, generated_at: i64) -> Option<ItineraryInput> {
        let destination = self
            .destination_id
            .as_deref()
            .and_then(|id| catalog.find(id))?
            .clone();
        Some(ItineraryInput {
            destination,
            duration_days: self.duration_days,
            interests: self.interests.clone(),
            travel_style: self.travel_style,
            pace: self.pace,
            start_date: self.start_date,
            generated_at,
        })
    }
}
