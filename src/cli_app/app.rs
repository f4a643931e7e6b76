use clap::{command, Arg, ArgAction, Command};

fn float_in_range(min: f64, max: f64) -> impl Fn(&str) -> Result<f64, String> + Clone {
    move |f: &str| {
        f.parse::<f64>()
            .ok()
            .filter(|f| *f >= min && *f <= max)
            .ok_or_else(|| {
                format!(
                    "Expected Float on range {} <= Float <= {} but got \"{}\"",
                    min, max, f
                )
            })
    }
}

pub fn create() -> Command {
    command!()
    .arg(Arg::new("input_filepaths")
        .value_name("FILEPATH")
        .num_args(1..)
        .action(ArgAction::Append)
        .help("Sketch request JSON files to score. Each holds nine strokes and the canvas size: {\"strokes\": [[{\"x\": .., \"y\": ..}, ..], ..], \"width\": .., \"height\": ..}")
    )
    .arg(Arg::new("output_dir")
        .value_name("DIRECTORY")
        .short('o')
        .long("output-dir")
        .help("Write `<name>.result.json` and the overlay `<name>.png` here for each input. Without it, results are printed to stdout, one JSON object per line.")
    )
    .arg(Arg::new("config_filepath")
        .value_name("FILEPATH")
        .short('c')
        .long("config")
        .help("JSON file overriding analysis thresholds, e.g. {\"rmse_sensitivity\": 8.0}. Fields left out keep their defaults.")
    )
    .arg(Arg::new("missing_vp")
        .value_name("POLICY")
        .short('m')
        .long("missing-vp")
        .value_parser(["exclude", "penalize", "assume-perfect"])
        .help("How the perspective score treats a side whose vanishing point could not be found: leave it out, count it as a full canvas diagonal off, or count it as perfect.")
    )
    .arg(Arg::new("synthesize_filepath")
        .value_name("FILEPATH")
        .short('s')
        .long("synthesize")
        .help("Instead of scoring, write a synthetic cube sketch request to this file.")
    )
    .arg(Arg::new("seed")
        .value_name("INTEGER")
        .long("seed")
        .default_value("0")
        .value_parser(clap::value_parser!(u64))
        .help("Random seed for --synthesize.")
    )
    .arg(Arg::new("jitter")
        .value_name("FLOAT")
        .long("jitter")
        .default_value("2.0")
        .value_parser(float_in_range(0.0, 100.0))
        .help("Largest hand-wobble, in canvas units, added to each synthesized point. [range: 0 <= value <= 100]")
    )
    .arg(Arg::new("width")
        .value_name("FLOAT")
        .long("width")
        .default_value("800")
        .value_parser(float_in_range(1.0, 8192.0))
        .help("Canvas width for --synthesize.")
    )
    .arg(Arg::new("height")
        .value_name("FLOAT")
        .long("height")
        .default_value("600")
        .value_parser(float_in_range(1.0, 8192.0))
        .help("Canvas height for --synthesize.")
    )
    .arg(Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Output debugging messages. Pass multiple times for more verbose logging.")
    )
}
