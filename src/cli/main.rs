#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use csv::{ReaderBuilder, Writer};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use flownet::parser::{parse_adjacency_matrix, parse_bipartite, parse_edges, parse_flow};
use flownet::{
    breadth_first_search, connected_components, depth_first_search, dijkstra, double_tree,
    kruskal, maximum_matching, moore_bellman_ford, nearest_neighbour, optimal_tour, prim,
    CycleCancelling, EdgeKind, EdmondsKarp, FlowEvent, Graph, MinCostFlow, Observer,
    ShortestPath, SuccessiveShortestPaths, VertexIndex,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "flownet-cli")]
#[command(about = "Graph algorithms and network flows on graph files", long_about = None)]
struct Cli {
    /// Treat edges as undirected
    #[arg(long, global = true)]
    undirected: bool,
    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,
    /// Write per-edge flows as CSV to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Maximum flow between two vertices, edge weights are capacities
    MaxFlow {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        source: usize,
        #[arg(long)]
        sink: usize,
    },
    /// Minimum cost flow of a flow file (balances, costs and capacities)
    OptimalFlow {
        /// Path to the flow file
        file: PathBuf,
        #[arg(value_enum)]
        strategy: Strategy,
        /// Give up cycle cancelling after this many cancellations
        #[arg(long)]
        max_iterations: Option<usize>,
    },
    /// Shortest path between two vertices
    ShortestPath {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
        #[arg(long, value_enum, default_value_t = PathAlgorithm::MooreBellmanFord)]
        algorithm: PathAlgorithm,
    },
    /// Maximum matching of a bipartite graph file
    Matching {
        /// Path to the bipartite graph file
        file: PathBuf,
    },
    /// Breadth-first search order
    Bfs {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        start: usize,
    },
    /// Depth-first search order
    Dfs {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        start: usize,
    },
    /// Number of connected components
    Components {
        #[command(flatten)]
        input: Input,
    },
    /// Minimum spanning tree, edge direction ignored
    SpanningTree {
        #[command(flatten)]
        input: Input,
        #[arg(long, value_enum, default_value_t = TreeAlgorithm::Prim)]
        algorithm: TreeAlgorithm,
        /// Vertex Prim's algorithm grows the tree from
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
    /// Round trip through every vertex, edge direction ignored
    Tour {
        #[command(flatten)]
        input: Input,
        #[arg(long, value_enum, default_value_t = TourAlgorithm::NearestNeighbour)]
        algorithm: TourAlgorithm,
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
}

#[derive(Args)]
struct Input {
    /// Path to the graph file
    file: PathBuf,
    /// Format of the graph file
    #[arg(short, long, value_enum, default_value_t = Format::Weighted)]
    format: Format,
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    /// Vertex count, then `start end` pairs
    Edges,
    /// Vertex count, then `start end weight` triples
    Weighted,
    /// Vertex count, then the adjacency matrix
    Matrix,
    /// `start,end,weight[,cost]` rows with header
    Csv,
}

#[derive(Copy, Clone, ValueEnum)]
enum Strategy {
    CycleCancelling,
    SuccessiveShortestPaths,
}

#[derive(Copy, Clone, ValueEnum)]
enum PathAlgorithm {
    Dijkstra,
    MooreBellmanFord,
}

#[derive(Copy, Clone, ValueEnum)]
enum TreeAlgorithm {
    Prim,
    Kruskal,
}

#[derive(Copy, Clone, ValueEnum)]
enum TourAlgorithm {
    NearestNeighbour,
    DoubleTree,
    /// Exhaustive search, only feasible for a handful of vertices
    Optimal,
}

#[derive(Copy, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// CSV edge row as found in the file
#[derive(Deserialize)]
struct RawEdge {
    start: i64,
    end: i64,
    weight: f64,
    cost: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawEdge")]
struct CsvEdge {
    start: usize,
    end: usize,
    weight: f64,
    cost: Option<f64>,
}

impl TryFrom<RawEdge> for CsvEdge {
    type Error = String;

    fn try_from(raw: RawEdge) -> Result<Self, Self::Error> {
        let index = |value: i64| {
            usize::try_from(value).map_err(|_| format!("Invalid vertex index {value}"))
        };
        if !raw.weight.is_finite() {
            return Err(format!("Invalid edge weight {}", raw.weight));
        }
        if raw.cost.is_some_and(|cost| !cost.is_finite()) {
            return Err("Invalid edge cost".to_string());
        }
        Ok(Self {
            start: index(raw.start)?,
            end: index(raw.end)?,
            weight: raw.weight,
            cost: raw.cost,
        })
    }
}

/// Result row of the `--output` file
#[derive(Serialize)]
struct FlowRow {
    edge: usize,
    start: usize,
    end: usize,
    flow: f64,
}

fn lib_error(error: flownet::Error) -> Box<dyn Error> {
    error.to_string().into()
}

fn read_csv_graph(path: &Path) -> CliResult<Graph> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let rows: Result<Vec<CsvEdge>, _> = rdr.deserialize().collect();
    let rows = rows?;

    let count = rows.iter().map(|row| row.start.max(row.end) + 1).max().unwrap_or(0);
    let mut graph = Graph::directed();
    for _ in 0..count {
        graph.new_vertex();
    }
    for row in rows {
        let kind = match row.cost {
            Some(cost) => EdgeKind::Cost { cost, flow: 0.0 },
            None => EdgeKind::Plain,
        };
        graph.new_edge_with(
            VertexIndex::new(row.start),
            VertexIndex::new(row.end),
            row.weight,
            kind,
        );
    }
    Ok(graph)
}

fn read_graph(input: &Input, undirected: bool) -> CliResult<Graph> {
    let mut graph = match input.format {
        Format::Csv => read_csv_graph(&input.file)?,
        Format::Edges => parse_edges(&fs::read_to_string(&input.file)?, false).map_err(lib_error)?,
        Format::Weighted => {
            parse_edges(&fs::read_to_string(&input.file)?, true).map_err(lib_error)?
        }
        Format::Matrix => {
            parse_adjacency_matrix(&fs::read_to_string(&input.file)?).map_err(lib_error)?
        }
    };
    graph.set_directed(!undirected);
    log::debug!(
        "read {} vertices and {} edges from {}",
        graph.vertex_count(),
        graph.edge_count(),
        input.file.display()
    );
    Ok(graph)
}

fn vertex(graph: &Graph, pos: usize) -> CliResult<VertexIndex> {
    if pos < graph.vertex_count() {
        Ok(graph.vertex_at(pos))
    } else {
        Err(lib_error(flownet::Error::VertexOutOfRange {
            vertex: pos,
            count: graph.vertex_count(),
        }))
    }
}

fn debug_observer() -> Observer {
    Box::new(|event: &FlowEvent<'_>| log::debug!("{event:?}"))
}

// Function to write the per-edge flows
fn write_csv(network: &Graph, filepath: &Path) -> CliResult<()> {
    let mut wtr = Writer::from_path(filepath)?;
    for edge in network.edges() {
        wtr.serialize(FlowRow {
            edge: edge.pos(),
            start: edge.start().index(),
            end: edge.end().index(),
            flow: edge.flow(),
        })?;
    }
    wtr.flush()?;
    log::info!("wrote {} rows to {}", network.edge_count(), filepath.display());
    Ok(())
}

fn print_order(order: &[VertexIndex]) {
    let order: Vec<String> = order.iter().map(|v| v.index().to_string()).collect();
    println!("{}", order.join(" "));
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut network = None;
    match &cli.command {
        Commands::MaxFlow {
            input,
            source,
            sink,
        } => {
            let graph = read_graph(input, cli.undirected)?;
            let (source, sink) = (vertex(&graph, *source)?, vertex(&graph, *sink)?);
            let flow = EdmondsKarp::new()
                .with_observer(debug_observer())
                .max_flow(&graph, source, sink);
            println!("{}", flow.value);
            network = Some(flow.network);
        }
        Commands::OptimalFlow {
            file,
            strategy,
            max_iterations,
        } => {
            let mut graph = parse_flow(&fs::read_to_string(file)?).map_err(lib_error)?;
            graph.set_directed(!cli.undirected);
            let mut engine: Box<dyn MinCostFlow> = match strategy {
                Strategy::CycleCancelling => {
                    let mut engine = CycleCancelling::new().with_observer(debug_observer());
                    if let Some(max_iterations) = max_iterations {
                        engine = engine.with_max_iterations(*max_iterations);
                    }
                    Box::new(engine)
                }
                Strategy::SuccessiveShortestPaths => {
                    Box::new(SuccessiveShortestPaths::new().with_observer(debug_observer()))
                }
            };
            let flow = engine.min_cost_flow(&graph).map_err(lib_error)?;
            println!("{}", flow.cost);
            network = Some(flow.network);
        }
        Commands::ShortestPath {
            input,
            start,
            end,
            algorithm,
        } => {
            let graph = read_graph(input, cli.undirected)?;
            let (start, end) = (vertex(&graph, *start)?, vertex(&graph, *end)?);
            let result = match algorithm {
                PathAlgorithm::Dijkstra => dijkstra(&graph, start, end).map_err(lib_error)?,
                PathAlgorithm::MooreBellmanFord => moore_bellman_ford(&graph, start, end),
            };
            match result {
                ShortestPath::NoPath => println!("no path"),
                ShortestPath::NegativeCycle(cycle) => {
                    print!("negative cycle: ");
                    print_order(&cycle);
                }
                ShortestPath::Path { distance, path } => {
                    println!("{distance}");
                    print_order(&path);
                }
            }
        }
        Commands::Matching { file } => {
            let graph = parse_bipartite(&fs::read_to_string(file)?).map_err(lib_error)?;
            let matched = maximum_matching(&graph).map_err(lib_error)?;
            println!("{}", matched.len());
            for edge in matched {
                println!("{} {}", graph[edge].start().index(), graph[edge].end().index());
            }
        }
        Commands::Bfs { input, start } => {
            let graph = read_graph(input, cli.undirected)?;
            print_order(&breadth_first_search(&graph, vertex(&graph, *start)?));
        }
        Commands::Dfs { input, start } => {
            let graph = read_graph(input, cli.undirected)?;
            print_order(&depth_first_search(&graph, vertex(&graph, *start)?));
        }
        Commands::Components { input } => {
            let graph = read_graph(input, cli.undirected)?;
            println!("{}", connected_components(&graph));
        }
        Commands::SpanningTree {
            input,
            algorithm,
            start,
        } => {
            let graph = read_graph(input, cli.undirected)?;
            let mst = match algorithm {
                TreeAlgorithm::Prim => prim(&graph, vertex(&graph, *start)?),
                TreeAlgorithm::Kruskal => kruskal(&graph),
            };
            if !mst.is_spanning() {
                log::warn!("graph is disconnected, result covers only part of it");
            }
            println!("{}", mst.weight);
            for edge in mst.tree.edges() {
                println!("{} {}", edge.start().index(), edge.end().index());
            }
        }
        Commands::Tour {
            input,
            algorithm,
            start,
        } => {
            let graph = read_graph(input, cli.undirected)?;
            let start = vertex(&graph, *start)?;
            let mut tour = match algorithm {
                TourAlgorithm::NearestNeighbour => nearest_neighbour(&graph, start),
                TourAlgorithm::DoubleTree => double_tree(&graph, start),
                TourAlgorithm::Optimal => optimal_tour(&graph),
            }
            .map_err(lib_error)?;
            if let Some(pos) = tour.vertices.iter().position(|v| *v == start) {
                tour.vertices.rotate_left(pos);
            }
            println!("{}", tour.length);
            print_order(&tour.vertices);
        }
    }

    match (network, &cli.output) {
        (Some(network), Some(path)) => write_csv(&network, path)?,
        (None, Some(_)) => log::warn!("--output only applies to flow commands"),
        _ => {}
    }
    Ok(())
}
