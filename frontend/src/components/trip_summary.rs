use trip_planner_lib::summary::{TripSummary, LOG_HEADERS};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct SummaryProps {
    pub summary: TripSummary,
}

/// Route and stop count cards shown above the map.
#[function_component]
pub fn TripOverview(props: &SummaryProps) -> Html {
    let summary = &props.summary;

    html! {
        <div class="row">
            <h4>{"Trip Details:"}</h4>
            if let Some(caption) = &summary.caption {
                <label class="caption">{caption.clone()}</label>
            }
            <div class="card">
                <h5 class="card-title text-primary">{"Route Info"}</h5>
                <p><strong>{"Distance: "}</strong>{summary.distance.clone()}</p>
                <p><strong>{"Duration: "}</strong>{summary.duration.clone()}</p>
            </div>
            <div class="card">
                <h5 class="card-title text-success">{"Stops"}</h5>
                <p><strong>{"Fuel Stops: "}</strong>{summary.fuel_stops}</p>
                <p><strong>{"Rest Stops: "}</strong>{summary.rest_stops}</p>
            </div>
        </div>
    }
}

/// Stop addresses and the duty log, below the map.
#[function_component]
pub fn TripDetails(props: &SummaryProps) -> Html {
    let summary = &props.summary;
    if !summary.has_route_info {
        return html! {};
    }

    let stop_card = |title: &'static str, class: &'static str, total: u32, lines: &Vec<String>| {
        html! {
            <div class="card">
                <h5 class={classes!("card-title", class)}>{title}</h5>
                <p><strong>{"Total: "}</strong>{total}</p>
                { for lines.iter().map(|line| html! { <p>{line.clone()}</p> }) }
            </div>
        }
    };

    html! {
        <div class="card trip-summary">
            <h4>{"Trip Summary"}</h4>
            <div class="card">
                <h5 class="card-title text-primary">{"Route Info"}</h5>
                <p><strong>{"Distance: "}</strong>{summary.distance.clone()}</p>
                <p><strong>{"Duration: "}</strong>{summary.duration.clone()}</p>
            </div>
            <div class="row">
                {stop_card("⛽ Fuel Stops", "text-warning", summary.fuel_stops, &summary.fuel_stop_lines)}
                {stop_card("🛑 Rest Stops", "text-info", summary.rest_stops, &summary.rest_stop_lines)}
            </div>
            if !summary.log_rows.is_empty() {
                <h5>{"Log Output"}</h5>
                <table class="log-table">
                    <thead>
                        <tr>{ for LOG_HEADERS.iter().map(|header| html! { <th>{*header}</th> }) }</tr>
                    </thead>
                    <tbody>
                        { for summary.log_rows.iter().map(|row| html! {
                            <tr>{ for row.iter().map(|cell| html! { <td>{cell.clone()}</td> }) }</tr>
                        }) }
                    </tbody>
                </table>
            }
        </div>
    }
}
