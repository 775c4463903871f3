//! Command-line flags layered over `config.ron`.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Flags accepted by the Keystone server. Each one, when given, wins over the
/// matching field of the loaded config.
#[derive(Parser, Debug, Default)]
#[command(name = "keystone", version, about = "Keystone block behavior engine")]
pub struct CliArgs {
    /// Exclusive upper bound on block Y coordinates.
    #[arg(long, value_name = "BLOCKS")]
    pub max_height: Option<i32>,

    /// Tracing filter directive, e.g. `debug` or `warn,keystone_blocks=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Sound cue for materials without their own place sound.
    #[arg(long, value_name = "CUE")]
    pub place_sound: Option<String>,

    /// Directory holding `config.ron` (default: the platform config dir).
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Copies every flag present in `args` into this config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(max_height) = args.max_height {
            self.world.max_height = max_height;
        }
        if let Some(filter) = &args.log_level {
            self.debug.log_level.clone_from(filter);
        }
        if let Some(cue) = &args.place_sound {
            self.placement.default_place_sound.clone_from(cue);
        }
    }
}
