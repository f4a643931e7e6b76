mod app;

use clap::ArgMatches;
use cube_sketch::config::{MissingVanishingPoint, Thresholds};
use cube_sketch::error::Result;
use cube_sketch::synth::SynthOptions;
use log::debug;
use std::path::PathBuf;

/// The validated arguments passed in by the user
#[derive(Debug, Clone)]
pub struct Args {
    pub input_filepaths: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub config_filepath: Option<PathBuf>,
    pub missing_vp: Option<MissingVanishingPoint>,
    pub synthesize_filepath: Option<PathBuf>,
    pub synth: SynthOptions,
    pub verbosity: u8,
}

fn opt_path_arg(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.get_one::<String>(name).map(PathBuf::from)
}

fn number_arg<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, name: &str) -> T {
    matches
        .get_one::<T>(name)
        .cloned()
        .unwrap_or_else(|| panic!("Argument '{}' has a default value", name))
}

fn from_matches(matches: &ArgMatches) -> Args {
    Args {
        input_filepaths: matches
            .get_many::<String>("input_filepaths")
            .map(|v| v.map(PathBuf::from).collect())
            .unwrap_or_default(),
        output_dir: opt_path_arg(matches, "output_dir"),
        config_filepath: opt_path_arg(matches, "config_filepath"),
        missing_vp: matches
            .get_one::<String>("missing_vp")
            .and_then(|s| s.parse().ok()),
        synthesize_filepath: opt_path_arg(matches, "synthesize_filepath"),
        synth: SynthOptions {
            seed: number_arg(matches, "seed"),
            jitter: number_arg(matches, "jitter"),
            width: number_arg(matches, "width"),
            height: number_arg(matches, "height"),
        },
        verbosity: matches.get_count("verbose"),
    }
}

pub fn parse_args() -> Args {
    from_matches(&app::create().get_matches())
}

impl Args {
    /// Thresholds from `--config` (or the defaults), with `--missing-vp` applied on top.
    pub fn thresholds(&self) -> Result<Thresholds> {
        let mut thresholds = match &self.config_filepath {
            Some(path) => Thresholds::from_json_file(path)?,
            None => Thresholds::default(),
        };
        if let Some(policy) = self.missing_vp {
            thresholds.missing_vanishing_point = policy;
        }
        debug!("Using thresholds: {:?}", thresholds);
        Ok(thresholds)
    }
}
