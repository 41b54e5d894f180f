use std::io::{self, Write};
use std::path::PathBuf;

use crate::analyzers::SelectionAnalyzer;
use crate::cli::args::{Cli, Commands, InputArgs, OutputArgs};
use crate::cli::prompt::Prompter;
use crate::config::AppConfig;
use crate::error::Result;
use crate::game::run_text_game;
use crate::models::Selection;
use crate::processors::{aggregate_by_year, compute_bins_with_mode, FilterChain};
use crate::readers::{RecordStore, TableReader};
use crate::utils::filename::{generate_default_chart_dirname, generate_default_chart_filename};
use crate::utils::logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ChartBundle, ChartWriter, OutputFormat};

pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(
        cli.verbose,
        Some(config.log_level.as_str()),
        cli.log_file.as_deref(),
    )?;

    match cli.command {
        Commands::Explore { input, output } => {
            let config = apply_overrides(config, &input, &output)?;
            let store = load_store(&config, input.quiet)?;

            let stdin = io::stdin();
            let mut stdin = stdin.lock();
            let mut stdout = io::stdout();

            println!("*** Earthquake Data ***");
            let selection = {
                let mut prompter = Prompter::new(&mut stdin, &mut stdout);
                if prompter.wants_manual_selection()? {
                    prompter.select(&store.selection())?
                } else {
                    store.selection()
                }
            };

            write_charts(&config, &store, &selection, output.output)?;
        }

        Commands::Analyze {
            input,
            output,
            latitude,
            longitude,
            date,
            magnitude,
        } => {
            let config = apply_overrides(config, &input, &output)?;

            let chain = FilterChain {
                latitude,
                longitude,
                date,
                magnitude,
            };
            // Ranges are domain-checked before the tables are read
            chain.validate()?;

            let store = load_store(&config, input.quiet)?;
            let selection = chain.apply(&store.selection())?;
            println!(
                "Selected {} of {} records",
                selection.len(),
                store.quakes.len()
            );

            write_charts(&config, &store, &selection, output.output)?;
        }

        Commands::Info { input, top } => {
            let mut config = config;
            if let Some(top) = top {
                config.strongest_events = top;
            }
            let config = apply_overrides(config, &input, &OutputArgs::default())?;
            let store = load_store(&config, input.quiet)?;
            let selection = store.selection();

            let analyzer = SelectionAnalyzer::new();
            let stats = analyzer.analyze(&selection)?;
            println!("\n{}", stats.detailed_summary());

            print_strongest_events(&analyzer, &store, &selection, config.strongest_events);
        }

        Commands::Play => {
            let stdin = io::stdin();
            let mut stdin = stdin.lock();
            let mut stdout = io::stdout();
            let mut rng = rand::rng();

            let session = run_text_game(&mut stdin, &mut stdout, &mut rng)?;
            writeln!(
                stdout,
                "\nFinal score: {}, high score: {}",
                session.board.score(),
                session.high_score
            )?;
        }
    }

    Ok(())
}

/// CLI flags win over configuration values
fn apply_overrides(
    mut config: AppConfig,
    input: &InputArgs,
    output: &OutputArgs,
) -> Result<AppConfig> {
    if let Some(path) = &input.seismic_file {
        config.seismic_file = path.clone();
    }
    if let Some(path) = &input.cities_file {
        config.cities_file = path.clone();
    }
    if input.mmap {
        config.use_mmap = true;
    }
    if let Some(format) = &output.format {
        config.output_format = format.clone();
    }
    if let Some(bins) = output.bins {
        config.bin_count = bins;
    }
    if let Some(mode) = output.edge_mode {
        config.edge_mode = mode;
    }

    config.check()?;
    Ok(config)
}

fn load_store(config: &AppConfig, quiet: bool) -> Result<RecordStore> {
    let progress = ProgressReporter::new_spinner("Loading data...", quiet);
    let reader = TableReader::with_mmap(config.use_mmap);

    let store = RecordStore::load_with(
        &reader,
        &config.seismic_file,
        &config.cities_file,
        Some(&progress),
    )?;

    progress.finish_with_message(&format!(
        "Loaded {} seismic records and {} cities",
        store.quakes.len(),
        store.cities.len()
    ));
    Ok(store)
}

fn write_charts(
    config: &AppConfig,
    store: &RecordStore,
    selection: &Selection<'_>,
    output: Option<PathBuf>,
) -> Result<()> {
    let analyzer = SelectionAnalyzer::new();
    let stats = analyzer.analyze(selection)?;
    println!("\n{}", stats.summary());

    let bins = compute_bins_with_mode(selection, config.bin_count, config.edge_mode)?;
    let yearly = aggregate_by_year(selection);

    println!("\nLongitude bins:");
    for bin in &bins {
        println!(
            "  {:<24} {:>6} events, avg magnitude {:.2}",
            bin.label.replace('\n', " "),
            bin.count(),
            bin.average_magnitude()
        );
    }

    print_strongest_events(&analyzer, store, selection, config.strongest_events);

    let writer = ChartWriter::new().with_format(&config.output_format)?;
    let path = output.unwrap_or_else(|| match writer.format() {
        OutputFormat::Json => generate_default_chart_filename(),
        OutputFormat::Csv => generate_default_chart_dirname(),
    });

    let bundle = ChartBundle::build(selection, &bins, &yearly);
    let info = writer.write_bundle(&bundle, &path)?;
    println!("\n{}", info.summary());

    Ok(())
}

fn print_strongest_events(
    analyzer: &SelectionAnalyzer,
    store: &RecordStore,
    selection: &Selection<'_>,
    count: usize,
) {
    if count == 0 {
        return;
    }

    let cities = store.usable_cities();
    let events = analyzer.strongest_events(selection, &cities, count);

    println!("\nStrongest events (showing {}):", events.len());
    for (i, event) in events.iter().enumerate() {
        println!("{}. {}", i + 1, event.describe());
    }
}
