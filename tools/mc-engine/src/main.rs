//! mc_engine: Monte Carlo batch/replay CLI for the tactics engine.
//!
//! Usage:
//!   mc_engine --scenario scenario.json --runs 200 --seed 42 --max-time 600 --dt 0.1
//!   mc_engine --scenario scenario.json --replay --sample-interval 2.0 --output replay.json

use std::fs;
use std::path::PathBuf;
use std::process;

use mc_runner::config::MCConfig;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || has_flag(&args, "--help") || has_flag(&args, "-h") {
        print_usage();
        process::exit(if args.is_empty() { 1 } else { 0 });
    }

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            process::exit(1);
        }
    };

    let scenario_text = match fs::read_to_string(&config.scenario_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading scenario {}: {e}", config.scenario_path);
            process::exit(1);
        }
    };
    let scenario: serde_json::Value = match serde_json::from_str(&scenario_text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error parsing scenario JSON: {e}");
            process::exit(1);
        }
    };

    if config.verbose {
        eprintln!(
            "mc_engine: scenario={} runs={} seed={} max_time={} dt={} replay={}",
            config.scenario_path, config.num_runs, config.base_seed, config.max_sim_time, config.dt, config.replay_mode
        );
    }

    if config.replay_mode {
        run_replay_command(&scenario, &config);
    } else {
        run_batch_command(&scenario, &config);
    }
}

fn run_batch_command(scenario: &serde_json::Value, config: &MCConfig) {
    let doc = mc_runner::run_batch(scenario, config);
    let json = serde_json::to_string_pretty(&doc).expect("results document always serializes");
    write_output(&config.output_path, &json);
}

fn run_replay_command(scenario: &serde_json::Value, config: &MCConfig) {
    match mc_runner::run_replay(scenario, config.base_seed, config) {
        Ok(replay) => {
            let json = serde_json::to_string_pretty(&replay).expect("replay document always serializes");
            write_output(&config.output_path, &json);
        }
        Err(e) => {
            eprintln!("Error running replay: {e}");
            process::exit(1);
        }
    }
}

fn write_output(output_path: &Option<String>, json: &str) {
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("Error writing output to {path}: {e}");
                process::exit(1);
            }
        }
        None => println!("{json}"),
    }
}

fn print_usage() {
    eprintln!(
        "mc_engine: Monte Carlo batch/replay tactics engine CLI\n\
         \n\
         Flags:\n\
         \n\
           --scenario <path>         Scenario JSON to load (required)\n\
           --replay                  Run a single seed in replay-capture mode\n\
           --runs <N>                Number of seeds to run (default: 100)\n\
           --seed <S>                Base seed (default: 42)\n\
           --max-time <T>            Max sim time per run, seconds (default: 600)\n\
           --dt <D>                  Tick size, seconds (default: 0.1)\n\
           --sample-interval <I>     Replay sample interval, seconds (default: 2.0)\n\
           --output <path>           Output file (default: stdout)\n\
           --verbose                 Print run configuration to stderr\n\
           --progress                Emit JSON-lines progress to stderr\n\
         \n\
         Exit codes: 0 success, 1 argument or I/O error.\n"
    );
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).map(String::as_str)
}

fn build_config(args: &[String]) -> Result<MCConfig, String> {
    let scenario_path = flag_value(args, "--scenario").ok_or("--scenario <path> is required")?;
    let _ = PathBuf::from(scenario_path);

    let mut config = MCConfig { scenario_path: scenario_path.to_string(), ..MCConfig::default() };
    config.replay_mode = has_flag(args, "--replay");
    config.verbose = has_flag(args, "--verbose");
    config.progress = has_flag(args, "--progress");
    config.output_path = flag_value(args, "--output").map(str::to_string);

    if let Some(v) = flag_value(args, "--runs") {
        config.num_runs = v.parse().map_err(|_| format!("invalid --runs value: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--seed") {
        config.base_seed = v.parse().map_err(|_| format!("invalid --seed value: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--max-time") {
        config.max_sim_time = v.parse().map_err(|_| format!("invalid --max-time value: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--dt") {
        config.dt = v.parse().map_err(|_| format!("invalid --dt value: {v}"))?;
    }
    if let Some(v) = flag_value(args, "--sample-interval") {
        config.sample_interval = v.parse().map_err(|_| format!("invalid --sample-interval value: {v}"))?;
    }

    Ok(config)
}
