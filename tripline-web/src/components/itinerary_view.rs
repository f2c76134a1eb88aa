use tripline_core::{CostTier, Itinerary, TimeSlot};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub itinerary: Itinerary,
    pub on_restart: Callback<()>,
}

fn slot_label(slot: TimeSlot) -> &'static str {
    match slot {
        TimeSlot::Morning => "Morning",
        TimeSlot::Afternoon => "Afternoon",
        TimeSlot::Evening => "Evening",
        TimeSlot::Night => "Night",
    }
}

fn tier_label(tier: CostTier) -> &'static str {
    match tier {
        CostTier::Free => "free",
        CostTier::Budget => "$",
        CostTier::Moderate => "$$",
        CostTier::Expensive => "$$$",
    }
}

fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

#[function_component(ItineraryView)]
pub fn itinerary_view(p: &Props) -> Html {
    let it = &p.itinerary;
    let on_restart = {
        let cb = p.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };

    if it.days.is_empty() {
        return html! {
            <section class="panel itinerary-view">
                <h2>{ format!("{} itinerary", it.destination.name) }</h2>
                <p class="muted">{ "No days planned yet. Pick a duration to fill the schedule." }</p>
                <button onclick={on_restart}>{ "Start over" }</button>
            </section>
        };
    }

    let days = it.days.iter().map(|day| {
        let activities = day.activities.iter().map(|activity| html! {
            <li class="activity-row">
                <span class="slot">{ slot_label(activity.time_slot) }</span>
                { activity.start_time.as_ref().map_or_else(Html::default, |t| html! {
                    <time>{ t.clone() }</time>
                }) }
                <span class="name">{ activity.name.clone() }</span>
                <span class="muted">{ format!("{} min · {}", activity.duration_minutes, tier_label(activity.cost)) }</span>
                { activity.reservation_required.then(|| html! {
                    <span class="badge">{ "reserve ahead" }</span>
                }).unwrap_or_default() }
            </li>
        });
        html! {
            <article class="day-card">
                <header>
                    <h3>{ format!("Day {}: {}", day.day_number, day.theme) }</h3>
                    { day.date.map_or_else(Html::default, |d| html! { <time>{ d.to_string() }</time> }) }
                    <span class="muted">{ format!("{} {}", format_cents(day.estimated_cost_cents), it.currency) }</span>
                </header>
                <ul role="list">{ for activities }</ul>
                { if day.transport_tips.is_empty() { Html::default() } else {
                    html! {
                        <aside class="transport-tips">
                            <h4>{ "Getting around" }</h4>
                            <ul role="list">
                                { for day.transport_tips.iter().map(|tip| html! { <li>{ tip.clone() }</li> }) }
                            </ul>
                        </aside>
                    }
                } }
            </article>
        }
    });

    html! {
        <section class="panel itinerary-view">
            <header>
                <h2>{ format!("{} · {} days", it.destination.name, it.total_days) }</h2>
                <span class="total-cost">
                    { format!("est. {} {}", format_cents(it.estimated_total_cost_cents), it.currency) }
                </span>
            </header>
            { for days }
            <button onclick={on_restart}>{ "Start over" }</button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_format_as_currency() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(2000), "20.00");
        assert_eq!(format_cents(12345), "123.45");
    }

    #[test]
    fn labels_cover_all_variants() {
        assert_eq!(slot_label(TimeSlot::Night), "Night");
        assert_eq!(tier_label(CostTier::Expensive), "$$$");
        assert_eq!(tier_label(CostTier::Free), "free");
    }
}
