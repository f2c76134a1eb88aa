use std::collections::HashSet;

use chrono::NaiveDate;
use tripline_core::{
    CityCatalog, ItineraryInput, Pace, TravelStyle, generate_itinerary,
};

fn request(destination_id: &str, duration_days: u32, pace: Pace) -> ItineraryInput {
    let catalog = CityCatalog::load_from_static();
    ItineraryInput {
        destination: catalog
            .find(destination_id)
            .expect("catalog destination")
            .clone(),
        duration_days,
        interests: vec!["nature".into()],
        travel_style: TravelStyle::Balanced,
        pace,
        start_date: None,
        generated_at: 1_750_000_000_000,
    }
}

#[test]
fn cost_invariant_holds_across_catalog_and_paces() {
    let catalog = CityCatalog::load_from_static();
    for destination in &catalog.cities {
        for pace in [Pace::Relaxed, Pace::Moderate, Pace::Packed] {
            for duration in [0u32, 1, 3, 7] {
                let mut input = request("paris-fr", duration, pace);
                input.destination = destination.clone();
                let itinerary = generate_itinerary(&input);
                let summed: i64 = itinerary.days.iter().map(|d| d.estimated_cost_cents).sum();
                assert_eq!(
                    itinerary.estimated_total_cost_cents, summed,
                    "cost mismatch for {} {pace:?} {duration} days",
                    destination.name
                );
                assert_eq!(itinerary.days.len() as u32, duration);
            }
        }
    }
}

#[test]
fn packed_outpaces_relaxed_for_every_destination() {
    let catalog = CityCatalog::load_from_static();
    for destination in &catalog.cities {
        let mut packed = request("paris-fr", 2, Pace::Packed);
        packed.destination = destination.clone();
        let mut relaxed = packed.clone();
        relaxed.pace = Pace::Relaxed;
        let packed = generate_itinerary(&packed);
        let relaxed = generate_itinerary(&relaxed);
        assert!(
            packed.days[0].activities.len() > relaxed.days[0].activities.len(),
            "pace ordering violated for {}",
            destination.name
        );
    }
}

#[test]
fn generation_is_deterministic() {
    let input = request("queenstown-nz", 5, Pace::Moderate);
    let first = generate_itinerary(&input);
    let second = generate_itinerary(&input);
    assert_eq!(first, second);
}

#[test]
fn dates_increment_one_per_day_from_start() {
    let mut input = request("tokyo-jp", 4, Pace::Moderate);
    input.start_date = NaiveDate::from_ymd_opt(2026, 6, 15);
    let itinerary = generate_itinerary(&input);
    let dates: Vec<String> = itinerary
        .days
        .iter()
        .map(|d| d.date.expect("stamped date").to_string())
        .collect();
    assert_eq!(dates, ["2026-06-15", "2026-06-16", "2026-06-17", "2026-06-18"]);

    input.start_date = None;
    let undated = generate_itinerary(&input);
    assert!(undated.days.iter().all(|d| d.date.is_none()));
}

#[test]
fn day_numbers_are_one_based_and_contiguous() {
    let itinerary = generate_itinerary(&request("marrakech-ma", 6, Pace::Packed));
    let numbers: Vec<u32> = itinerary.days.iter().map(|d| d.day_number).collect();
    assert_eq!(numbers, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn long_trips_never_repeat_activity_ids() {
    let itinerary = generate_itinerary(&request("barcelona-es", 14, Pace::Packed));
    let mut seen = HashSet::new();
    for day in &itinerary.days {
        for activity in &day.activities {
            assert!(seen.insert(activity.id.clone()), "repeat id {}", activity.id);
        }
    }
}

#[test]
fn beach_destination_interest_shifts_selection() {
    // Cancún rates beach 10; asking for beach should surface beach
    // activities on day one.
    let mut input = request("cancun-mx", 1, Pace::Moderate);
    input.interests = vec!["beach".into()];
    let itinerary = generate_itinerary(&input);
    assert!(
        itinerary.days[0]
            .activities
            .iter()
            .any(|a| a.category == "beach"),
        "expected a beach activity, got {:?}",
        itinerary.days[0]
            .activities
            .iter()
            .map(|a| a.category.clone())
            .collect::<Vec<_>>()
    );
}
