use crate::cli_app::Args;
use cube_sketch::analysis;
use cube_sketch::config::Thresholds;
use cube_sketch::error::{AnalysisError, Error, Result};
use cube_sketch::geometry::Point;
use cube_sketch::inout::{AnalysisRequest, AnalysisResult};
use cube_sketch::synth;
use log::{debug, error, info};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::path::{Path, PathBuf};

// Score every input sketch, or write a synthetic one when asked to
pub fn run(args: Args) -> Result<()> {
    debug!("Running with arguments: {:?}", args);

    if let Some(ref filepath) = args.synthesize_filepath {
        synth::cube(&args.synth).write_json_file(filepath)?;
        info!("Wrote synthetic sketch to {}", filepath.display());
        return Ok(());
    }

    if args.input_filepaths.is_empty() {
        return Err(Error::Usage("no sketch files given (see --help)".to_string()));
    }

    let thresholds = args.thresholds()?;
    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    // Sketches share nothing, so each gets its own pipeline run.
    let outcomes: Vec<Result<AnalysisResult>> = args
        .input_filepaths
        .par_iter()
        .map(|filepath| score_file(filepath, args.output_dir.as_deref(), &thresholds))
        .collect();

    let mut failed = 0;
    for (filepath, outcome) in args.input_filepaths.iter().zip(outcomes) {
        match outcome {
            Ok(result) if args.output_dir.is_none() => {
                println!("{}", serde_json::to_string(&result)?)
            }
            Ok(_) => {}
            Err(e) => {
                error!("{}: {}", filepath.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(Error::Failed {
            failed,
            total: args.input_filepaths.len(),
        });
    }
    Ok(())
}

fn output_paths(output_dir: &Path, filepath: &Path) -> (PathBuf, PathBuf) {
    let stem = filepath
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sketch".to_string());
    (
        output_dir.join(format!("{}.result.json", stem)),
        output_dir.join(format!("{}.png", stem)),
    )
}

fn score_file(
    filepath: &Path,
    output_dir: Option<&Path>,
    thresholds: &Thresholds,
) -> Result<AnalysisResult> {
    let request = AnalysisRequest::from_json_file(filepath)?;
    let analysis = analysis::run(&request, thresholds)?;
    let result = analysis.to_result()?;

    info!(
        "{}: line score {:>6.2}, perspective score {:>6.2}, left VP {}, right VP {}",
        filepath.display(),
        result.average_line_score,
        result.perspective_score,
        describe(&result.left_vp),
        describe(&result.right_vp),
    );

    if let Some(dir) = output_dir {
        let (result_filepath, image_filepath) = output_paths(dir, filepath);
        result.write_json_file(&result_filepath)?;
        std::fs::write(
            &image_filepath,
            analysis
                .overlay
                .png_bytes()
                .map_err(AnalysisError::from)?,
        )?;
        debug!(
            "Wrote {} and {}",
            result_filepath.display(),
            image_filepath.display()
        );
    }

    Ok(result)
}

fn describe(vp: &Option<Point>) -> String {
    vp.map(|p| p.to_string()).unwrap_or_else(|| "none".to_string())
}
