use clap::Parser;
use crate_optimizer::manifest::{self, ManifestLine};
use crate_optimizer::render;
use crate_optimizer::solver::Solver;
use crate_optimizer::types::{LumberKind, Solution};
use crate_optimizer::{Config, ManifestError};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "crate_optimizer",
    about = "Packs a manifest into framed shipping crates"
)]
struct Cli {
    /// Manifest CSV: item,height,width,length,weight,qty (first line is a header)
    #[arg(long, required_unless_present = "demo")]
    manifest: Option<String>,

    /// Pack the built-in demo manifest
    #[arg(long, conflicts_with = "manifest")]
    demo: bool,

    /// Pallet length in inches
    #[arg(long, default_value_t = 250.0)]
    pallet_length: f64,

    /// Pallet width in inches
    #[arg(long, default_value_t = 84.0)]
    pallet_width: f64,

    /// Maximum stacked height in inches
    #[arg(long, default_value_t = 80.0)]
    max_height: f64,

    /// Maximum cargo weight per crate in pounds
    #[arg(long, default_value_t = 2500.0)]
    max_weight: f64,

    /// Clearance along every pallet edge in inches
    #[arg(long, default_value_t = 1.0)]
    safety_gap: f64,

    /// Spacing between cradle posts in inches
    #[arg(long, default_value_t = 48.0)]
    framing_spacing: f64,

    /// Lumber width in inches (2x4 actual: 3.5)
    #[arg(long, default_value_t = 3.5)]
    lumber_width: f64,

    /// Lumber thickness in inches (2x4 actual: 1.5)
    #[arg(long, default_value_t = 1.5)]
    lumber_thick: f64,

    /// Leave out diagonal bracing
    #[arg(long)]
    no_bracing: bool,

    /// Always lay items flat
    #[arg(long)]
    no_vertical: bool,

    /// Show ASCII end elevation of each crate
    #[arg(long)]
    layout: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            pallet_length: self.pallet_length,
            pallet_width: self.pallet_width,
            max_height: self.max_height,
            max_weight: self.max_weight,
            safety_gap: self.safety_gap,
            framing_spacing: self.framing_spacing,
            lumber_width: self.lumber_width,
            lumber_thick: self.lumber_thick,
            add_bracing: !self.no_bracing,
            allow_vertical: !self.no_vertical,
        }
    }
}

fn load_manifest(cli: &Cli) -> Result<Vec<ManifestLine>, String> {
    let lines = match &cli.manifest {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read manifest '{}': {}", path, e))?;
            manifest::parse_csv(&text)
        }
        None => manifest::demo(),
    };
    if lines.is_empty() {
        return Err(ManifestError::Empty.to_string());
    }
    Ok(lines)
}

fn print_solution(config: &Config, solution: &Solution, layout: bool) {
    for c in &solution.crates {
        println!("Crate {}:", c.id);
        for p in &c.items {
            println!(
                "  {} {} @ ({:.1}, {:.1}, {:.1}) [{:?}]",
                p.item.uid, p.dims, p.position.x, p.position.y, p.position.z, p.orientation
            );
        }
        let over = if c.is_overweight(config) { " OVERWEIGHT" } else { "" };
        println!(
            "  weight {:.0}/{:.0} lbs{}, height {:.1}\", wood {:.1} ft (~{} 8ft boards)",
            c.total_weight,
            config.max_weight,
            over,
            c.height,
            c.wood_usage,
            c.board_count()
        );
        println!(
            "  lumber: {} runners, {} posts, {} rungs, {} rails, {} diagonals",
            c.lumber_count(LumberKind::BaseRunner),
            c.lumber_count(LumberKind::Post),
            c.lumber_count(LumberKind::Rung),
            c.lumber_count(LumberKind::Rail),
            c.diagonal_count()
        );
        if layout {
            print!("{}", render::render_crate(config, c));
        }
        println!();
    }

    println!(
        "Summary: {} crate{} used, {} item{} placed, {:.1} ft of lumber",
        solution.crate_count(),
        if solution.crate_count() == 1 { "" } else { "s" },
        solution.placed_count(),
        if solution.placed_count() == 1 { "" } else { "s" },
        solution.total_wood_usage(),
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = cli.config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let lines = load_manifest(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let solver = Solver::new(config, manifest::expand(&lines));
    let solution = solver.solve();

    if cli.json {
        match serde_json::to_string_pretty(&solution) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_solution(&config, &solution, cli.layout);
    }

    if let Some(e) = &solution.error {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
