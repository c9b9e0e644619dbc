use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use segtrace::{
    input::{group_range, index_from_signed, range_from_signed},
    project_hierarchy, Combiner, HierarchyNode, Leaf, Max, Min, SegmentTree, Sum,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "segtrace", about = "Segment tree with replayable step traces")]
struct Cli {
    /// Combine operator.
    #[arg(long, value_enum, default_value_t = Operator::Sum, global = true)]
    op: Operator,

    /// Print results only, without the step trace.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Operator {
    Sum,
    Min,
    Max,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tree and print the construction trace.
    Build {
        /// Leaves as `value`, `key=value` or `key=value@group`.
        #[arg(required = true, allow_hyphen_values = true)]
        leaves: Vec<String>,
    },
    /// Aggregate the inclusive index range [start, end].
    Query {
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        end: i64,
        /// Leaves as `value`, `key=value` or `key=value@group`.
        #[arg(required = true, allow_hyphen_values = true)]
        leaves: Vec<String>,
    },
    /// Assign a new value to one leaf.
    Update {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        #[arg(allow_hyphen_values = true)]
        value: i64,
        /// Leaves as `value`, `key=value` or `key=value@group`.
        #[arg(required = true, allow_hyphen_values = true)]
        leaves: Vec<String>,
    },
    /// Aggregate every leaf tagged with a group.
    Group {
        name: String,
        /// Leaves as `key=value@group`.
        #[arg(required = true, allow_hyphen_values = true)]
        leaves: Vec<String>,
    },
    /// Print the built tree as an indented outline.
    Hierarchy {
        /// Leaves as `value`, `key=value` or `key=value@group`.
        #[arg(required = true, allow_hyphen_values = true)]
        leaves: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.op {
        Operator::Sum => run(Sum, cli.command, cli.quiet),
        Operator::Min => run(Min, cli.command, cli.quiet),
        Operator::Max => run(Max, cli.command, cli.quiet),
    }
}

fn run<C: Combiner<Value = i64>>(combiner: C, command: Commands, quiet: bool) -> Result<()> {
    let mut tree = SegmentTree::new(combiner);

    match command {
        Commands::Build { leaves } => {
            let leaves = parse_leaves(&leaves)?;
            let trace = tree.build(&leaves);
            if !quiet {
                print!("{trace}");
            }
            println!("tree array: {}", render_array(tree.tree_array()));
            println!("fingerprint: {}", trace.fingerprint());
        }
        Commands::Query { start, end, leaves } => {
            tree.build(&parse_leaves(&leaves)?);
            let result = range_from_signed(start, end, tree.len())
                .and_then(|(qs, qe)| tree.query(qs, qe))
                .with_context(|| format!("query [{start}:{end}] failed"))?;
            if !quiet {
                print!("{}", result.trace);
            }
            println!(
                "{} [{}:{}] = {}",
                tree.combiner().name(),
                start,
                end,
                result.value
            );
        }
        Commands::Update {
            index,
            value,
            leaves,
        } => {
            tree.build(&parse_leaves(&leaves)?);
            let trace = index_from_signed(index, tree.len())
                .and_then(|index| tree.update(index, value))
                .with_context(|| format!("update at index {index} failed"))?;
            if !quiet {
                print!("{trace}");
            }
            if let Some(root) = tree.root_value() {
                println!("{} over all leaves = {}", tree.combiner().name(), root);
            }
        }
        Commands::Group { name, leaves } => {
            let leaves = parse_leaves(&leaves)?;
            let range = group_range(&leaves, &name)
                .with_context(|| format!("cannot resolve group '{name}'"))?;
            tree.build(&leaves);
            let result = tree.query(range.start, range.end)?;
            if !quiet {
                print!("{}", result.trace);
            }
            println!(
                "{} of group '{}' {} = {}",
                tree.combiner().name(),
                name,
                range,
                result.value
            );
        }
        Commands::Hierarchy { leaves } => {
            tree.build(&parse_leaves(&leaves)?);
            if let Some(root) = project_hierarchy(&tree.nodes()) {
                print_outline(&root, 0);
            }
        }
    }

    Ok(())
}

fn parse_leaves(args: &[String]) -> Result<Vec<Leaf<i64>>> {
    args.iter()
        .enumerate()
        .map(|(idx, arg)| {
            let mut leaf: Leaf<i64> = arg
                .parse()
                .with_context(|| format!("invalid leaf #{} '{}'", idx, arg))?;
            if leaf.key.is_empty() {
                leaf.key = idx.to_string();
            }
            Ok(leaf)
        })
        .collect()
}

fn render_array(slots: &[Option<i64>]) -> String {
    let cells: Vec<String> = slots
        .iter()
        .map(|slot| slot.map_or_else(|| "_".to_string(), |v| v.to_string()))
        .collect();
    format!("[{}]", cells.join(", "))
}

fn print_outline(node: &HierarchyNode<i64>, depth: usize) {
    println!("{}{} (id {})", "  ".repeat(depth), node.node, node.node.id);
    for child in &node.children {
        print_outline(child, depth + 1);
    }
}
