mod args;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use factorio_core::event::Event;
use factorio_planner::Planner;
use factorio_sim::Simulator;

use args::Args;
use error::CliError;

fn main() {
    let args = Args::parse();
    init_tracing(args.quiet);

    match run(&args) {
        Ok(json) => {
            println!("{json}");
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(args: &Args) -> Result<String, CliError> {
    tracing::info!(target = %args.target.display(), "loading catalog");
    let catalog = factorio_data::load_catalog(
        &args.items,
        &args.recipes,
        &args.factories,
        &args.technologies,
    )?;
    let target = factorio_data::load_target(&args.target)?;

    let mut planner = Planner::new(&catalog, &target.initial_items, &target.initial_factories)?;
    let solved = planner.plan(&target.goal_items)?;
    if !solved {
        return Err(CliError::PlanInfeasible);
    }

    let last_tick = planner.last_tick();
    let mut events: Vec<Event> = target
        .initial_factories
        .iter()
        .map(|(id, factory_type, factory_name)| Event::Build {
            timestamp: -1,
            factory_type: factory_type.clone(),
            factory_name: factory_name.clone(),
            factory_id: *id,
        })
        .collect();
    events.extend(planner.into_events());
    events.push(Event::Victory {
        timestamp: last_tick,
    });

    tracing::info!(event_count = events.len(), last_tick, "running simulator to confirm feasibility");
    let (final_tick, _) = Simulator::new(&catalog, events.clone(), &target.initial_items)?.simulate()?;
    tracing::info!(final_tick, "simulation reached victory tick");

    let output_events: Vec<Event> = events
        .into_iter()
        .filter(|e| !matches!(e, Event::Victory { .. }))
        .chain(std::iter::once(Event::Victory {
            timestamp: final_tick,
        }))
        .collect();
    Ok(factorio_data::to_json_string(&output_events)?)
}
