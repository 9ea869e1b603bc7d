//! The Monte Carlo batch/replay runner (component Q) and the result and
//! replay JSON document types it writes (§6 output formats).
//!
//! Everything here sits one layer above `mc-sim`'s tick loop: it owns
//! the seed-to-seed world lifecycle (fresh `MCWorld` per run), the
//! early-termination check, and the two output shapes a caller asks
//! for — a batch `ResultsDocument` or a single-seed `ReplayDocument`.

pub mod config;
pub mod replay;
pub mod resolved;
pub mod results;
pub mod run;

pub use config::MCConfig;
pub use replay::{run_replay, ReplayDocument};
pub use resolved::all_combat_resolved;
pub use results::{EngagementEvent, EntitySurvival, ResultsDocument, RunResult};
pub use run::{run_batch, run_single};
