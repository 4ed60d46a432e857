//! Render command implementation
//!
//! Loads a request document, validates it and writes `<out_root>/<id>.wav`,
//! going through the render cache unless told otherwise.

use anyhow::Result;
use chiptone_audio::{render, AudioResult, RenderResult};
use chiptone_spec::{validate_request, Request};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::json_output::{
    audio_error_to_json, error_codes, input_error_to_json, print_json, validation_to_json,
    CommandOutput, JsonError, RenderSummary,
};
use super::reporting;
use crate::cache::{CacheKey, CacheManager};
use crate::input::load_request;

/// Exit code for requests that fail to load or validate.
pub const EXIT_INVALID: u8 = 1;

/// Exit code for requests that validate but fail to render.
pub const EXIT_GENERATION_FAILED: u8 = 2;

/// Options shared by `render` and `preset render`.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory the `<id>.wav` file is written to
    pub out_root: PathBuf,
    /// Skip the cache entirely
    pub no_cache: bool,
    /// Cache directory override
    pub cache_dir: Option<PathBuf>,
    /// Print JSON instead of colored text
    pub json: bool,
}

/// Renders a request, consulting the cache first.
///
/// Cache failures never fail the render; they are logged and the request is
/// rendered directly.
///
/// # Returns
/// The render result and whether it came from the cache
pub fn render_cached(
    request: &Request,
    cache: Option<&CacheManager>,
) -> AudioResult<(RenderResult, bool)> {
    let Some(cache) = cache else {
        return render(request).map(|result| (result, false));
    };

    let key = match CacheKey::for_request(request) {
        Ok(key) => key,
        Err(e) => {
            warn!(id = %request.id, error = %e, "could not compute cache key");
            return render(request).map(|result| (result, false));
        }
    };

    match cache.get(&key) {
        Ok(Some(result)) => {
            info!(id = %request.id, "cache hit");
            return Ok((result, true));
        }
        Ok(None) => debug!(id = %request.id, "cache miss"),
        Err(e) => warn!(id = %request.id, error = %e, "cache lookup failed"),
    }

    let result = render(request)?;
    if let Err(e) = cache.put(&key, &result) {
        warn!(id = %request.id, error = %e, "could not store render in cache");
    }
    Ok((result, false))
}

/// Run the render command
///
/// # Arguments
/// * `request_path` - Path to the request file
/// * `options` - Output directory, cache and output mode
///
/// # Returns
/// Exit code: 0 success, 1 invalid request, 2 generation failure
pub fn run(request_path: &str, options: &RenderOptions) -> Result<ExitCode> {
    let request = match load_request(Path::new(request_path)) {
        Ok(loaded) => loaded.request,
        Err(e) => {
            if options.json {
                let error = input_error_to_json(&e, Some(request_path));
                print_json(&CommandOutput::<RenderSummary>::failure(vec![error], vec![]))?;
            } else {
                println!("{} {}", "FAILED".red().bold(), e);
            }
            return Ok(ExitCode::from(EXIT_INVALID));
        }
    };

    if !options.json {
        println!("{} {}", "Rendering:".cyan().bold(), request_path);
    }
    render_to_dir(&request, options)
}

/// Validates and renders `request` into `<out_root>/<id>.wav`.
pub(crate) fn render_to_dir(request: &Request, options: &RenderOptions) -> Result<ExitCode> {
    let start = Instant::now();

    let validation = validate_request(request);
    let (errors, warnings) = validation_to_json(&validation);
    if !validation.is_ok() {
        if options.json {
            let mut all_errors = vec![JsonError::new(
                error_codes::INVALID_REQUEST,
                format!("request '{}' has {} error(s)", request.id, errors.len()),
            )];
            all_errors.extend(errors);
            print_json(&CommandOutput::<RenderSummary>::failure(all_errors, warnings))?;
        } else {
            reporting::print_validation_results(&validation);
            println!(
                "\n{} Request has {} error(s)",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(ExitCode::from(EXIT_INVALID));
    }

    let cache = if options.no_cache {
        None
    } else {
        match CacheManager::open(options.cache_dir.as_deref()) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!(error = %e, "cache unavailable, rendering without it");
                None
            }
        }
    };

    let (result, cache_hit) = match render_cached(request, cache.as_ref()) {
        Ok(rendered) => rendered,
        Err(e) => {
            if options.json {
                print_json(&CommandOutput::<RenderSummary>::failure(
                    vec![audio_error_to_json(&e)],
                    warnings,
                ))?;
            } else {
                reporting::print_validation_results(&validation);
                println!("\n{} {}", "FAILED".red().bold(), e);
            }
            return Ok(ExitCode::from(EXIT_GENERATION_FAILED));
        }
    };

    let output_path = options.out_root.join(request.file_name());
    reporting::write_output(&output_path, result.container.as_bytes())?;
    let duration_ms = start.elapsed().as_millis() as u64;

    if options.json {
        let summary = RenderSummary::new(&request.id, &result, cache_hit)
            .with_output_path(output_path.display().to_string());
        print_json(&CommandOutput::success(summary, warnings))?;
    } else {
        reporting::print_validation_results(&validation);
        reporting::print_render_summary(&result);
        let source = if cache_hit { "cached" } else { "rendered" };
        println!(
            "\n{} {} {} ({}ms)",
            "SUCCESS".green().bold(),
            output_path.display(),
            source.dimmed(),
            duration_ms
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Validates and renders `request` straight to `output`, bypassing the cache.
///
/// With `raw` set, only the little-endian PCM payload is written.
pub(crate) fn render_to_file(
    request: &Request,
    output: &Path,
    raw: bool,
    json: bool,
) -> Result<ExitCode> {
    let validation = validate_request(request);
    let (errors, warnings) = validation_to_json(&validation);
    if !validation.is_ok() {
        if json {
            let mut all_errors = vec![JsonError::new(
                error_codes::INVALID_REQUEST,
                format!("parameters have {} error(s)", errors.len()),
            )];
            all_errors.extend(errors);
            print_json(&CommandOutput::<RenderSummary>::failure(all_errors, warnings))?;
        } else {
            reporting::print_validation_results(&validation);
            println!(
                "\n{} Parameters have {} error(s)",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(ExitCode::from(EXIT_INVALID));
    }

    let result = match render(request) {
        Ok(result) => result,
        Err(e) => {
            if json {
                print_json(&CommandOutput::<RenderSummary>::failure(
                    vec![audio_error_to_json(&e)],
                    warnings,
                ))?;
            } else {
                println!("{} {}", "FAILED".red().bold(), e);
            }
            return Ok(ExitCode::from(EXIT_GENERATION_FAILED));
        }
    };

    let bytes = if raw {
        result.container.pcm_data()
    } else {
        result.container.as_bytes()
    };
    reporting::write_output(output, bytes)?;

    if json {
        let mut summary = RenderSummary::new(&request.id, &result, false)
            .with_output_path(output.display().to_string());
        summary.bytes = bytes.len();
        print_json(&CommandOutput::success(summary, warnings))?;
    } else {
        reporting::print_validation_results(&validation);
        reporting::print_render_summary(&result);
        let kind = if raw { "raw PCM" } else { "WAV" };
        println!(
            "\n{} {} ({}, {} bytes)",
            "SUCCESS".green().bold(),
            output.display(),
            kind,
            bytes.len()
        );
    }

    Ok(ExitCode::SUCCESS)
}
