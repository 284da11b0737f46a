#![deny(unused_variables)]
#![deny(unused_imports)]

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use gridworld_value_iteration::config::GridWorldConfig;
use gridworld_value_iteration::policy::derive_policy;
use gridworld_value_iteration::render::{policy_grid, utility_grid};

fn init_logging() {
    // RUST_LOG overrides; solver progress is logged at info by default
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "gridworld_value_iteration=info".parse() {
        filter = filter.add_directive(directive);
    }
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // The reference scenario: 2 columns x 3 rows, pit and goal on the top row
    let config = GridWorldConfig::default();
    let environment = config.build_environment()?;
    let solver = config.solver()?;

    info!(
        rows = environment.num_rows(),
        cols = environment.num_cols(),
        prob_forward = environment.prob_forward(),
        gamma = solver.gamma(),
        epsilon = solver.epsilon(),
        "solving grid world"
    );

    // Solve for utilities, then read the greedy policy off them
    let solution = solver.solve(&environment)?;
    let policy = derive_policy(&environment, &solution.utilities);

    println!("=== Utilities ({} iterations) ===", solution.iterations);
    println!("{}", utility_grid(&environment, &solution.utilities));

    println!("=== Policy ===");
    println!("Legend: [^^^ >>> vvv <<<] = Best Action, [x] = Terminal");
    println!("{}", policy_grid(&environment, &policy));

    return Ok(());
}
