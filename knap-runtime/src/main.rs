use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use knap_algorithms::knapsack::{bound::upper_bound, sort_by_density, Solver};
use knap_challenges::knapsack::{Challenge, Solution, Track};
use knap_utils::{jsonify, load_json_object};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::{fs, io::Read, path::PathBuf};

#[derive(Serialize)]
struct OutputData {
    strategy: knap_algorithms::knapsack::Strategy,
    total_value: u64,
    is_optimal: bool,
    taken: Vec<u8>,
    upper_bound: f64,
}

fn cli() -> Command {
    Command::new("knap-runtime")
        .about("Solves, verifies or generates 0/1 knapsack instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Solves an instance")
                .arg(
                    arg!(<INPUT> "Path to an instance file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Solver parameters as a json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--json "Emit the solution as json instead of the text format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a solution against an instance")
                .arg(
                    arg!(<INPUT> "Path to an instance file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Path to a solution file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random instance")
                .arg(arg!(<NONCE> "Nonce used in seed generation").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--num_items [NUM_ITEMS] "Number of items")
                        .default_value("50")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--max_weight [MAX_WEIGHT] "Largest item weight")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--max_value [MAX_VALUE] "Largest item value")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--budget [BUDGET] "Capacity as a percentage of total item weight")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the instance will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<String>("INPUT").unwrap().clone(),
            sub_m.get_one::<String>("hyperparameters").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_flag("json"),
        ),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<String>("INPUT").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate", sub_m)) => generate(
            *sub_m.get_one::<u64>("NONCE").unwrap(),
            Track {
                num_items: *sub_m.get_one::<usize>("num_items").unwrap(),
                max_weight: *sub_m.get_one::<u32>("max_weight").unwrap(),
                max_value: *sub_m.get_one::<u32>("max_value").unwrap(),
                budget: *sub_m.get_one::<u32>("budget").unwrap(),
            },
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn solve(
    input: String,
    hyperparameters: Option<String>,
    output_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let challenge = load_challenge(&input)?;
    let hyperparameters = hyperparameters
        .map(|h| load_json_object(&h))
        .transpose()?;

    let (strategy, solution) = Solver::solve(&challenge, &hyperparameters)?;

    let output = if json {
        jsonify(&OutputData {
            strategy,
            total_value: solution.total_value,
            is_optimal: solution.is_optimal,
            taken: solution.taken.iter().map(|&t| t as u8).collect(),
            upper_bound: upper_bound(&sort_by_density(&challenge.items), challenge.capacity),
        })?
    } else {
        solution.to_string()
    };
    write_output(output_file, output)
}

pub fn verify(input: String, solution: String) -> Result<()> {
    if input == "-" && solution == "-" {
        return Err(anyhow!("Only one of INPUT and SOLUTION can be read from stdin"));
    }
    let challenge = load_challenge(&input)?;
    let solution: Solution = read_text(&solution)?.parse()?;

    let total_value = challenge
        .verify_solution(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("Solution is valid (total value {})", total_value);
    Ok(())
}

pub fn generate(nonce: u64, track: Track, output_file: Option<PathBuf>) -> Result<()> {
    let seed: [u8; 32] = StdRng::seed_from_u64(nonce).gen();
    let challenge = Challenge::generate_instance(&seed, &track)?;
    write_output(output_file, challenge.to_input_string())
}

fn load_challenge(input: &str) -> Result<Challenge> {
    Ok(read_text(input)?.parse::<Challenge>()?)
}

fn read_text(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| anyhow!("Failed to read file '{}': {}", path, e))
    }
}

fn write_output(output_file: Option<PathBuf>, output: String) -> Result<()> {
    if let Some(path) = output_file {
        fs::write(&path, output + "\n")?;
        eprintln!("output written to: {:?}", path);
    } else {
        println!("{}", output);
    }
    Ok(())
}
