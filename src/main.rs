mod cli;
mod data;
mod weights;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use weights::WeightReport;

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Weigh(weigh_args) => {
            weigh_runs(weigh_args)?;
        }
        Command::Init(init_args) => {
            generate_sample_runs(init_args)?;
        }
    }

    Ok(())
}

fn weigh_runs(args: cli::WeighArgs) -> Result<()> {
    info!("Loading runs from {:?}", args.input);

    let runs = data::load_runs(&args.input)?;
    let runs_by_agent = data::partition_by_agent(&runs);
    info!(
        "Loaded {} runs for {} agent(s)",
        runs.len(),
        runs_by_agent.len()
    );

    let report = WeightReport::build(&runs_by_agent)?;

    match &args.output {
        Some(path) => {
            report.save_json(path, args.pretty)?;
            print_summary(&report);
            println!("\nWeight report saved to: {:?}", path);
        }
        // Bare JSON on stdout so the output stays pipeable
        None => println!("{}", report.to_json(args.pretty)?),
    }

    Ok(())
}

fn print_summary(report: &WeightReport) {
    println!("\nWeighted agents:");
    for agent in &report.agents {
        println!(
            "  {} - {} runs, {} tasks, {} families",
            agent.agent_id, agent.num_runs, agent.num_tasks, agent.num_families
        );
    }
}

fn generate_sample_runs(args: cli::InitArgs) -> Result<()> {
    let runs = data::sample_runs();

    data::save_runs(&runs, &args.output)?;
    println!("Generated sample runs file at: {:?}", args.output);

    Ok(())
}
