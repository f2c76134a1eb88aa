//! Itinerary generation engine
//!
//! Pure and synchronous: a destination profile plus trip parameters in, a
//! day-by-day schedule out. No shared state, no clock, no randomness; the
//! same input always produces the same itinerary.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::city::{City, SCORE_DIMENSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    #[default]
    Free,
    Budget,
    Moderate,
    Expensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Relaxed,
    #[default]
    Balanced,
    Active,
}

/// Itinerary density: how many activities each day gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Packed,
}

/// One scheduled activity inside a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique within the whole itinerary.
    pub id: String,
    pub name: String,
    pub description: String,
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub start_time: Option<String>,
    pub duration_minutes: u32,
    pub cost: CostTier,
    pub category: String,
    #[serde(default)]
    pub vibe_tags: Vec<String>,
    #[serde(default)]
    pub reservation_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// 1-based.
    pub day_number: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub theme: String,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub transport_tips: Vec<String>,
    /// Sum of this day's activity costs, in cents.
    pub estimated_cost_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: City,
    pub total_days: u32,
    pub interests: Vec<String>,
    pub travel_style: TravelStyle,
    pub days: Vec<Day>,
    /// Always exactly the sum of the per-day costs.
    pub estimated_total_cost_cents: i64,
    pub currency: String,
    /// Unix milliseconds, supplied by the caller.
    pub generated_at: i64,
}

/// Request for one itinerary. Created once by the wizard completion flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryInput {
    pub destination: City,
    pub duration_days: u32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default)]
    pub pace: Pace,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub generated_at: i64,
}

// --- configuration ---------------------------------------------------------

const DEFAULT_ITINERARY_DATA: &str =
    include_str!("../../tripline-web/static/assets/data/itinerary.json");

/// A reusable activity blueprint from the embedded pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub cost: CostTier,
    #[serde(default)]
    pub vibe_tags: Vec<String>,
    #[serde(default)]
    pub reservation_required: bool,
    #[serde(default)]
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceActivityCounts {
    #[serde(default = "default_relaxed_count")]
    pub relaxed: usize,
    #[serde(default = "default_moderate_count")]
    pub moderate: usize,
    #[serde(default = "default_packed_count")]
    pub packed: usize,
}

impl Default for PaceActivityCounts {
    fn default() -> Self {
        Self {
            relaxed: default_relaxed_count(),
            moderate: default_moderate_count(),
            packed: default_packed_count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierCostsCents {
    #[serde(default)]
    pub free: i64,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub moderate: i64,
    #[serde(default)]
    pub expensive: i64,
}

impl TierCostsCents {
    #[must_use]
    pub const fn cost_of(&self, tier: CostTier) -> i64 {
        match tier {
            CostTier::Free => self.free,
            CostTier::Budget => self.budget,
            CostTier::Moderate => self.moderate,
            CostTier::Expensive => self.expensive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItineraryConfig {
    #[serde(default)]
    pub pace_activity_counts: PaceActivityCounts,
    #[serde(default = "default_interest_bonus")]
    pub interest_bonus: u32,
    #[serde(default = "default_style_bonus")]
    pub style_bonus: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub tier_costs_cents: TierCostsCents,
    #[serde(default)]
    pub day_themes: BTreeMap<String, String>,
    #[serde(default)]
    pub transport_tips: Vec<String>,
    #[serde(default)]
    pub templates: Vec<ActivityTemplate>,
}

impl ItineraryConfig {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ITINERARY_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    fn activities_per_day(&self, pace: Pace) -> usize {
        match pace {
            Pace::Relaxed => self.pace_activity_counts.relaxed,
            Pace::Moderate => self.pace_activity_counts.moderate,
            Pace::Packed => self.pace_activity_counts.packed,
        }
    }
}

fn default_relaxed_count() -> usize {
    2
}
fn default_moderate_count() -> usize {
    3
}
fn default_packed_count() -> usize {
    5
}
fn default_interest_bonus() -> u32 {
    5
}
fn default_style_bonus() -> u32 {
    2
}
fn default_currency() -> String {
    "USD".to_string()
}

// --- generation ------------------------------------------------------------

static DEFAULT_CONFIG: Lazy<ItineraryConfig> = Lazy::new(ItineraryConfig::load_from_static);

/// The embedded activity pool, parsed once.
#[must_use]
pub fn default_itinerary_config() -> &'static ItineraryConfig {
    &DEFAULT_CONFIG
}

/// Generate an itinerary against the embedded activity pool.
#[must_use]
pub fn generate_itinerary(input: &ItineraryInput) -> Itinerary {
    generate_itinerary_with(default_itinerary_config(), input)
}

/// Generate an itinerary against an explicit configuration.
///
/// `duration_days == 0` yields a valid itinerary with no days. Unknown
/// interests contribute no weight and are otherwise ignored.
#[must_use]
pub fn generate_itinerary_with(config: &ItineraryConfig, input: &ItineraryInput) -> Itinerary {
    let weights = category_weights(config, input);
    let per_day = config.activities_per_day(input.pace);
    let mut picker = TemplatePicker::new(&config.templates, &weights);

    let mut days = Vec::with_capacity(input.duration_days as usize);
    let mut total_cents = 0i64;
    for day_number in 1..=input.duration_days {
        let activities = schedule_day(&mut picker, per_day);
        let day_cents: i64 = activities
            .iter()
            .map(|a| config.tier_costs_cents.cost_of(a.cost))
            .sum();
        total_cents += day_cents;
        days.push(Day {
            day_number,
            date: input
                .start_date
                .and_then(|start| start.checked_add_days(Days::new(u64::from(day_number - 1)))),
            theme: day_theme(config, &weights, &activities),
            activities,
            // Practical guidance is front-loaded onto arrival day.
            transport_tips: if day_number == 1 {
                config.transport_tips.clone()
            } else {
                Vec::new()
            },
            estimated_cost_cents: day_cents,
        });
    }

    Itinerary {
        destination: input.destination.clone(),
        total_days: input.duration_days,
        interests: input.interests.clone(),
        travel_style: input.travel_style,
        days,
        estimated_total_cost_cents: total_cents,
        currency: config.currency.clone(),
        generated_at: input.generated_at,
    }
}

/// Per-category weight from the destination score vector, boosted by
/// matching interests or destination vibe tags, nudged by travel style.
fn category_weights(config: &ItineraryConfig, input: &ItineraryInput) -> Vec<(String, u32)> {
    SCORE_DIMENSIONS
        .iter()
        .map(|&dim| {
            let mut weight = u32::from(input.destination.scores.dimension(dim));
            let matches_interest = input
                .interests
                .iter()
                .any(|interest| interest.eq_ignore_ascii_case(dim));
            let matches_vibe = input
                .destination
                .vibe_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(dim));
            if matches_interest || matches_vibe {
                weight += config.interest_bonus;
            }
            let styled = match input.travel_style {
                TravelStyle::Active => matches!(dim, "adventure" | "nature"),
                TravelStyle::Relaxed => matches!(dim, "beach" | "culture"),
                TravelStyle::Balanced => false,
            };
            if styled {
                weight += config.style_bonus;
            }
            (dim.to_string(), weight)
        })
        .collect()
}

const fn slot_for_index(idx: usize) -> TimeSlot {
    match idx % 4 {
        0 => TimeSlot::Morning,
        1 => TimeSlot::Afternoon,
        2 => TimeSlot::Evening,
        _ => TimeSlot::Night,
    }
}

fn schedule_day(picker: &mut TemplatePicker<'_>, per_day: usize) -> Vec<Activity> {
    let mut activities = Vec::with_capacity(per_day);
    for slot_idx in 0..per_day {
        let Some((template, instance_id)) = picker.next() else {
            break;
        };
        activities.push(Activity {
            id: instance_id,
            name: template.name.clone(),
            description: template.description.clone(),
            time_slot: slot_for_index(slot_idx),
            start_time: template.start_time.clone(),
            duration_minutes: template.duration_minutes,
            cost: template.cost,
            category: template.category.clone(),
            vibe_tags: template.vibe_tags.clone(),
            reservation_required: template.reservation_required,
        });
    }
    activities
}

/// Theme of the category that contributed the most activities to the day,
/// ties broken by overall category weight.
fn day_theme(
    config: &ItineraryConfig,
    weights: &[(String, u32)],
    activities: &[Activity],
) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for activity in activities {
        *counts.entry(activity.category.as_str()).or_default() += 1;
    }
    let dominant = weights
        .iter()
        .filter(|(cat, _)| counts.contains_key(cat.as_str()))
        .max_by_key(|(cat, weight)| (counts[cat.as_str()], *weight))
        .map(|(cat, _)| cat.as_str());
    dominant
        .and_then(|cat| config.day_themes.get(cat).cloned())
        .unwrap_or_else(|| "Open day".to_string())
}

/// Deterministic weighted interleave over the activity pool.
///
/// Categories are emitted by smooth weighted round-robin, so a destination
/// rated 10 for culture and 2 for beach sees culture activities roughly five
/// times as often. Each template is used once; only after the whole pool is
/// exhausted does selection cycle back, minting suffixed instance ids so no
/// id ever repeats within an itinerary.
struct TemplatePicker<'a> {
    templates: &'a [ActivityTemplate],
    weights: Vec<(String, i64)>,
    current: Vec<i64>,
    total_weight: i64,
    use_counts: Vec<u32>,
    cursor: Vec<usize>,
}

impl<'a> TemplatePicker<'a> {
    fn new(templates: &'a [ActivityTemplate], weights: &[(String, u32)]) -> Self {
        let weights: Vec<(String, i64)> = weights
            .iter()
            .filter(|(_, w)| *w > 0)
            .map(|(cat, w)| (cat.clone(), i64::from(*w)))
            .collect();
        let total_weight = weights.iter().map(|(_, w)| *w).sum();
        Self {
            templates,
            current: vec![0; weights.len()],
            cursor: vec![0; weights.len()],
            weights,
            total_weight,
            use_counts: vec![0; templates.len()],
        }
    }

    fn next(&mut self) -> Option<(&'a ActivityTemplate, String)> {
        if self.templates.is_empty() || self.weights.is_empty() {
            return None;
        }
        // One full cycle over the categories is enough to find a pickable
        // one; if none has an unused template left, fall back to reuse.
        for _ in 0..self.weights.len() {
            let cat_idx = self.advance_round_robin();
            if let Some(tpl_idx) = self.fresh_template_in(cat_idx) {
                return Some(self.take(tpl_idx));
            }
        }
        let tpl_idx = self.least_used_template()?;
        Some(self.take(tpl_idx))
    }

    /// Smooth weighted round-robin step: every category gains its weight,
    /// the leader is picked and pays back the total.
    fn advance_round_robin(&mut self) -> usize {
        let mut best = 0;
        for (idx, (_, weight)) in self.weights.iter().enumerate() {
            self.current[idx] += weight;
            if self.current[idx] > self.current[best] {
                best = idx;
            }
        }
        self.current[best] -= self.total_weight;
        best
    }

    fn fresh_template_in(&mut self, cat_idx: usize) -> Option<usize> {
        let category = self.weights[cat_idx].0.as_str();
        let start = self.cursor[cat_idx];
        let found = self
            .templates
            .iter()
            .enumerate()
            .skip(start)
            .find(|(idx, tpl)| tpl.category == category && self.use_counts[*idx] == 0)
            .map(|(idx, _)| idx);
        if let Some(idx) = found {
            self.cursor[cat_idx] = idx + 1;
        }
        found
    }

    fn least_used_template(&self) -> Option<usize> {
        (0..self.templates.len()).min_by_key(|&idx| self.use_counts[idx])
    }

    fn take(&mut self, tpl_idx: usize) -> (&'a ActivityTemplate, String) {
        let template = &self.templates[tpl_idx];
        self.use_counts[tpl_idx] += 1;
        let count = self.use_counts[tpl_idx];
        let instance_id = if count == 1 {
            template.id.clone()
        } else {
            format!("{}-{count}", template.id)
        };
        (template, instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::ScoreVector;
    use std::collections::HashSet;

    fn destination() -> City {
        City {
            object_id: "paris-fr".into(),
            name: "Paris".into(),
            scores: ScoreVector {
                culture: 10,
                adventure: 4,
                nature: 3,
                beach: 1,
                nightlife: 8,
            },
            vibe_tags: vec!["romantic".into(), "historic".into()],
            ..City::default()
        }
    }

    fn input(duration_days: u32, pace: Pace) -> ItineraryInput {
        ItineraryInput {
            destination: destination(),
            duration_days,
            interests: vec!["culture".into(), "snowboarding".into()],
            travel_style: TravelStyle::Balanced,
            pace,
            start_date: None,
            generated_at: 1_750_000_000_000,
        }
    }

    #[test]
    fn total_cost_equals_sum_of_day_costs() {
        let itinerary = generate_itinerary(&input(4, Pace::Packed));
        let summed: i64 = itinerary.days.iter().map(|d| d.estimated_cost_cents).sum();
        assert_eq!(itinerary.estimated_total_cost_cents, summed);
    }

    #[test]
    fn packed_pace_yields_more_activities_than_relaxed() {
        let packed = generate_itinerary(&input(2, Pace::Packed));
        let relaxed = generate_itinerary(&input(2, Pace::Relaxed));
        assert!(
            packed.days[0].activities.len() > relaxed.days[0].activities.len(),
            "packed {} vs relaxed {}",
            packed.days[0].activities.len(),
            relaxed.days[0].activities.len()
        );
    }

    #[test]
    fn zero_duration_yields_empty_days_without_error() {
        let itinerary = generate_itinerary(&input(0, Pace::Moderate));
        assert!(itinerary.days.is_empty());
        assert_eq!(itinerary.estimated_total_cost_cents, 0);
        assert_eq!(itinerary.total_days, 0);
    }

    #[test]
    fn start_date_stamps_consecutive_days() {
        let mut request = input(2, Pace::Moderate);
        request.start_date = NaiveDate::from_ymd_opt(2026, 6, 15);
        let itinerary = generate_itinerary(&request);
        assert_eq!(
            itinerary.days[0].date,
            NaiveDate::from_ymd_opt(2026, 6, 15)
        );
        assert_eq!(
            itinerary.days[1].date,
            NaiveDate::from_ymd_opt(2026, 6, 16)
        );
    }

    #[test]
    fn activity_ids_never_repeat_within_an_itinerary() {
        // Long packed trip forces the pool to cycle.
        let itinerary = generate_itinerary(&input(10, Pace::Packed));
        let mut seen = HashSet::new();
        for day in &itinerary.days {
            for activity in &day.activities {
                assert!(
                    seen.insert(activity.id.clone()),
                    "duplicate activity id {}",
                    activity.id
                );
            }
        }
        assert!(seen.len() >= 40, "packed 10-day trip should fill days");
    }

    #[test]
    fn transport_tips_only_on_first_day() {
        let itinerary = generate_itinerary(&input(3, Pace::Moderate));
        assert!(!itinerary.days[0].transport_tips.is_empty());
        assert!(itinerary.days[1].transport_tips.is_empty());
        assert!(itinerary.days[2].transport_tips.is_empty());
    }

    #[test]
    fn dominant_category_leads_selection() {
        let itinerary = generate_itinerary(&input(1, Pace::Moderate));
        let culture_count = itinerary.days[0]
            .activities
            .iter()
            .filter(|a| a.category == "culture")
            .count();
        assert!(
            culture_count >= 1,
            "highest-weight category should appear on day one"
        );
    }

    #[test]
    fn unknown_interests_are_ignored() {
        let mut with_unknown = input(2, Pace::Moderate);
        with_unknown.interests = vec!["snowboarding".into()];
        let mut without = input(2, Pace::Moderate);
        without.interests = vec![];
        let a = generate_itinerary(&with_unknown);
        let b = generate_itinerary(&without);
        assert_eq!(a.days, b.days);
    }

    #[test]
    fn empty_template_pool_degrades_to_empty_days() {
        let config = ItineraryConfig {
            templates: Vec::new(),
            ..ItineraryConfig::default()
        };
        let itinerary = generate_itinerary_with(&config, &input(2, Pace::Packed));
        assert_eq!(itinerary.days.len(), 2);
        assert!(itinerary.days[0].activities.is_empty());
        assert_eq!(itinerary.estimated_total_cost_cents, 0);
    }

    #[test]
    fn slots_distribute_morning_afternoon_evening() {
        let itinerary = generate_itinerary(&input(1, Pace::Moderate));
        let slots: Vec<TimeSlot> = itinerary.days[0]
            .activities
            .iter()
            .map(|a| a.time_slot)
            .collect();
        assert_eq!(
            slots,
            [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening]
        );
    }
}
