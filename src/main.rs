use std::env;
use std::process::ExitCode;

use dotenvy::dotenv;
use serde::Serialize;

use property_dashboard::models::config::DashboardConfig;
use property_dashboard::pagination::{ListQueryState, Page};
use property_dashboard::query::QueryState;
use property_dashboard::services::{
    Dashboard, amenities, documents, notices, onboarding, parking, residents, service_requests,
    staff, units,
};

const USAGE: &str = "usage: property-dashboard <resource> [search] [page] [filter=value ...]
resources: staff, units, amenities, parking, residents, notices,
           service-requests, documents, onboarding";

/// Builds the list state from the trailing arguments: `name=value` sets a
/// filter, a bare number selects the page, anything else is search text.
fn list_state(config: &DashboardConfig, args: &[String]) -> ListQueryState {
    let mut state = ListQueryState::new(config.page_size());
    let mut page = None;
    let mut search = Vec::new();

    for arg in args {
        if let Some((name, value)) = arg.split_once('=') {
            state.set_filter(name, value);
        } else if let Ok(number) = arg.parse::<usize>() {
            page = Some(number);
        } else {
            search.push(arg.as_str());
        }
    }

    state.set_search_text(search.join(" "));
    if let Some(page) = page {
        state.set_page(page);
    }
    state
}

fn print_page<T: Serialize>(state: QueryState<Page<T>>) -> ExitCode {
    match state.into_result() {
        Ok(Some(page)) => match serde_json::to_string_pretty(&page) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("Failed to serialize page: {err}");
                ExitCode::FAILURE
            }
        },
        Ok(None) => {
            log::error!("No data returned");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("Request failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((resource, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading dashboard config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let dashboard = match Dashboard::from_config(&config) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            log::error!("Error initialising dashboard: {err}");
            return ExitCode::FAILURE;
        }
    };

    if !dashboard.session().is_authenticated() {
        log::warn!("No session token found; requests are sent anonymously");
    }

    let state = list_state(&config, rest);

    match resource.as_str() {
        "staff" => print_page(staff::list_staff(&dashboard, &state).await),
        "units" => print_page(units::list_units(&dashboard, &state).await),
        "amenities" => print_page(amenities::list_amenities(&dashboard, &state).await),
        "parking" => print_page(parking::list_parking_slots(&dashboard, &state).await),
        "residents" => print_page(residents::list_residents(&dashboard, &state).await),
        "notices" => print_page(notices::list_notices(&dashboard, &state).await),
        "service-requests" => {
            print_page(service_requests::list_service_requests(&dashboard, &state).await)
        }
        "documents" => print_page(documents::list_documents(&dashboard, &state).await),
        "onboarding" => print_page(onboarding::list_applications(&dashboard, &state).await),
        other => {
            eprintln!("unknown resource `{other}`\n{USAGE}");
            ExitCode::from(2)
        }
    }
}
