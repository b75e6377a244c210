use clap::{Parser, Subcommand};
use simplex_solver::{LpProblem, Solution, SolutionStatus, Solver, Tableau};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simplex")]
#[command(about = "Tableau simplex solver for max cx subject to Ax <= b, x >= 0", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the two bundled example problems
    Demo {
        /// Print the initial and final tableau
        #[arg(short, long)]
        tableau: bool,
    },
    /// Solve a problem read from a JSON file with fields a, b and c
    Solve {
        /// The file containing the problem
        file: PathBuf,
        /// Print the initial and final tableau
        #[arg(short, long)]
        tableau: bool,
        /// Give up after this many pivots
        #[arg(short, long)]
        max_iterations: Option<usize>,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { tableau } => {
            let solver = Solver::new();

            // MAX 3x1 + 5x2
            //   x1 <= 4
            //   2x2 <= 12
            //   3x1 + 2x2 <= 18
            let case1 = LpProblem::new(
                vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
                vec![4.0, 12.0, 18.0],
                vec![3.0, 5.0],
            );
            // MAX 1000x1 + 1800x2
            //   20x1 + 30x2 <= 1200
            //   x1 <= 40
            //   x2 <= 30
            let case2 = LpProblem::new(
                vec![vec![20.0, 30.0], vec![1.0, 0.0], vec![0.0, 1.0]],
                vec![1200.0, 40.0, 30.0],
                vec![1000.0, 1800.0],
            );

            let mut failed = false;
            for (name, problem) in [("Case 1", case1), ("Case 2", case2)] {
                println!("{}", name);
                failed |= !run(&solver, &problem, tableau);
                println!("--------------------------------");
            }
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Solve {
            file,
            tableau,
            max_iterations,
            format,
        } => {
            let source = match std::fs::read_to_string(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file: {}", e);
                    std::process::exit(1);
                }
            };

            let problem: LpProblem = match serde_json::from_str(&source) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Parse error: {}", e);
                    std::process::exit(1);
                }
            };

            let mut solver = Solver::new();
            if let Some(max) = max_iterations {
                solver = solver.with_max_iterations(max);
            }

            if format == "json" {
                let solution = match solver.solve(&problem) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Invalid problem: {}", e);
                        std::process::exit(1);
                    }
                };
                match serde_json::to_string_pretty(&solution) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error encoding solution: {}", e);
                        std::process::exit(1);
                    }
                }
                if !solution.is_certified() {
                    std::process::exit(1);
                }
            } else if !run(&solver, &problem, tableau) {
                std::process::exit(1);
            }
        }
    }
}

/// Solve and print one problem; false unless a certified optimum was found
fn run(solver: &Solver, problem: &LpProblem, show_tableau: bool) -> bool {
    if show_tableau {
        match Tableau::new(problem) {
            Ok(initial) => {
                println!();
                println!(">>>> Initial tableau");
                println!("{}", initial);
            }
            Err(e) => {
                eprintln!("Invalid problem: {}", e);
                return false;
            }
        }
    }

    let (solution, last) = match solver.solve_with_tableau(problem) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid problem: {}", e);
            return false;
        }
    };

    if show_tableau {
        println!();
        println!(">>>> Final tableau");
        println!("{}", last);
    }

    println!();
    report(&solution)
}

fn report(solution: &Solution) -> bool {
    println!("Status: {}", solution.status);

    match solution.status {
        SolutionStatus::Optimal => {
            println!("Solution found in {} iterations", solution.iterations);
            if let Some(z) = solution.objective_value {
                println!("   z = {}", z);
            }
            for (i, value) in solution.values.iter().enumerate() {
                println!("x[{}] = {}", i + 1, value);
            }
            if !solution.violations.is_empty() {
                println!("Warning: the solution breaks {} constraint(s):", solution.violations.len());
                for v in &solution.violations {
                    println!("  {:?}", v);
                }
                return false;
            }
            true
        }
        SolutionStatus::Unbounded => {
            println!("The problem has no finite optimal solution.");
            false
        }
        SolutionStatus::IterationLimit => {
            println!(
                "No optimal solution after {} iterations (possible cycling).",
                solution.iterations
            );
            false
        }
        SolutionStatus::Error => {
            println!("Solver encountered an error.");
            false
        }
    }
}
