//! Shiny Graph CLI: query a YAML map file from the command line
//!
//! Loads the map once, then answers shortest-path and adjacency queries.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde_json::json;
use shiny_graph::{Distance, MapLoader, SearchConfig, StoreConfig, WeightedGraph};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[derive(Parser)]
#[command(name = "shiny-graph", version, about = "Shortest routes over a YAML map")]
struct Cli {
    /// Map file: each place maps to its neighbors and their distances
    #[arg(long, env = "SHINY_GRAPH_MAP")]
    map: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Verify store invariants on every operation (slow)
    #[arg(long)]
    check_invariants: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest route between two places
    Path {
        from: String,
        to: String,

        /// Give up after expanding this many places
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// List every place
    Nodes,
    /// List the places reachable in one hop from a place
    Children { node: String },
    /// List the places with a direct route to a place
    Parents { node: String },
    /// Start an interactive shell
    Shell,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let loader = MapLoader::with_store_config(StoreConfig {
        check_invariants: cli.check_invariants,
    });
    let map = loader
        .load_file(&cli.map)
        .with_context(|| format!("could not load map {}", cli.map.display()))?;

    match &cli.command {
        Commands::Path {
            from,
            to,
            max_expansions,
            timeout_ms,
        } => {
            let mut config = match timeout_ms {
                Some(ms) => SearchConfig::with_timeout(Duration::from_millis(*ms)),
                None => SearchConfig::default(),
            };
            config.max_expansions = *max_expansions;
            run_path(&map, from, to, &config, &cli.format)
        }
        Commands::Nodes => run_nodes(&map, &cli.format),
        Commands::Children { node } => run_adjacency(&map, node, Direction::Children, &cli.format),
        Commands::Parents { node } => run_adjacency(&map, node, Direction::Parents, &cli.format),
        Commands::Shell => run_shell(&map, &cli.format),
    }
}

fn run_path(
    map: &WeightedGraph,
    from: &str,
    to: &str,
    config: &SearchConfig,
    format: &OutputFormat,
) -> Result<()> {
    let path = map
        .shortest_path_with(from, to, config)
        .with_context(|| format!("searching for a route from {} to {}", from, to))?;

    if path.is_empty() {
        match format {
            OutputFormat::Json => println!("{}", json!({ "from": from, "to": to, "route": null })),
            OutputFormat::Table => println!("No route from {} to {}", from, to),
        }
        return Ok(());
    }

    let total = path.total_distance()?;
    match format {
        OutputFormat::Json => {
            let output = json!({
                "from": from,
                "to": to,
                "route": {
                    "nodes": path.nodes()?,
                    "edges": path.edges(),
                    "distance": total,
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Step", "From", "To", "Distance", "Total"]);

            // Prefix sums of a route are bounded by its finite total
            let mut running = 0.0;
            for (i, hop) in path.edges().iter().enumerate() {
                running += hop.distance.value();
                table.add_row(vec![
                    (i + 1).to_string(),
                    hop.start.clone(),
                    hop.end.clone(),
                    hop.distance.to_string(),
                    running.to_string(),
                ]);
            }

            println!("{}", table);
            println!("{}", path);
        }
    }
    Ok(())
}

fn run_nodes(map: &WeightedGraph, format: &OutputFormat) -> Result<()> {
    let mut nodes: Vec<String> = map.graph().list_nodes().into_iter().collect();
    nodes.sort();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Place", "Routes out"]);
            for node in &nodes {
                let out = map.graph().list_children(node)?.values().map(|l| l.len()).sum::<usize>();
                table.add_row(vec![node.clone(), out.to_string()]);
            }
            println!("{}", table);
            println!("{} place(s), {} route(s)", nodes.len(), map.graph().edge_count());
        }
    }
    Ok(())
}

enum Direction {
    Children,
    Parents,
}

fn run_adjacency(
    map: &WeightedGraph,
    node: &str,
    direction: Direction,
    format: &OutputFormat,
) -> Result<()> {
    let node = node.to_string();
    let (adjacent, header) = match direction {
        Direction::Children => (map.graph().list_children(&node)?, "To"),
        Direction::Parents => (map.graph().list_parents(&node)?, "From"),
    };

    let mut rows: Vec<(String, Vec<Distance>)> = adjacent
        .into_iter()
        .map(|(other, labels)| {
            let mut distances: Vec<Distance> = labels.into_iter().collect();
            distances.sort();
            (other, distances)
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = rows
                .iter()
                .map(|(other, distances)| json!({ "node": other, "distances": distances }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(none)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec![header, "Distances"]);
            for (other, distances) in &rows {
                let distances: Vec<String> = distances.iter().map(Distance::to_string).collect();
                table.add_row(vec![other.clone(), distances.join(", ")]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_shell(map: &WeightedGraph, format: &OutputFormat) -> Result<()> {
    println!("Shiny Graph Interactive Shell");
    println!("Type :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("shiny> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let result = match words.as_slice() {
            [] => continue,
            [":quit" | ":exit" | ":q"] => break,
            [":help" | ":h"] => {
                println!("Commands:");
                println!("  path <from> <to>   — Shortest route");
                println!("  children <place>   — Routes out of a place");
                println!("  parents <place>    — Routes into a place");
                println!("  nodes              — List places");
                println!("  :quit              — Exit shell");
                Ok(())
            }
            ["path", from, to] => run_path(map, from, to, &SearchConfig::default(), format),
            ["children", node] => run_adjacency(map, node, Direction::Children, format),
            ["parents", node] => run_adjacency(map, node, Direction::Parents, format),
            ["nodes"] => run_nodes(map, format),
            _ => {
                eprintln!("Unknown command, try :help");
                Ok(())
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {:#}", e);
        }
    }

    println!("Bye!");
    Ok(())
}
