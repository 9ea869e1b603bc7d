//! Run configuration (component Q), with the defaults the CLI falls
//! back to when a flag is omitted.

#[derive(Debug, Clone)]
pub struct MCConfig {
    pub num_runs: u32,
    pub base_seed: u32,
    pub max_sim_time: f64,
    pub dt: f64,
    pub scenario_path: String,
    pub output_path: Option<String>,
    pub verbose: bool,
    pub progress: bool,
    pub replay_mode: bool,
    pub sample_interval: f64,
}

impl Default for MCConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            base_seed: 42,
            max_sim_time: 600.0,
            dt: 0.1,
            scenario_path: String::new(),
            output_path: None,
            verbose: false,
            progress: false,
            replay_mode: false,
            sample_interval: 2.0,
        }
    }
}
