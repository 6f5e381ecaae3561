// generate_templates.rs
// Pre-generates unfolded kernel templates so later unfolding only reads them from disk.
//
// Usage:
//   generate_templates [config.json]
//
// Without a config file the templates go to ./uf_kernel_tpls for 28x28, 48x48
// and 56x56 images with every kernel size below the image size.
// Set RUST_LOG=debug to see every (image size, kernel size) pair.

use cnn_unfold::config::{load_config, UnfoldConfig};
use cnn_unfold::{generate_template_set, BatchReport, Result};
use std::process;
use std::time::Instant;

fn config_from_args(args: &[String]) -> Result<UnfoldConfig> {
    match args.get(1) {
        Some(path) => load_config(path),
        None => Ok(UnfoldConfig::default()),
    }
}

fn run(config: &UnfoldConfig) -> Result<BatchReport> {
    let cache = config.cache();
    log::info!(
        "Generating {} template set(s) into {}",
        config.template_sets.len(),
        cache.dir().display()
    );
    generate_template_set(&cache, &config.template_sets)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = match config_from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load configuration: {}", e);
            process::exit(1);
        }
    };

    let start = Instant::now();
    match run(&config) {
        Ok(report) => println!(
            "Generated {} template(s), {} already cached ({:.2} seconds)",
            report.generated.len(),
            report.skipped.len(),
            start.elapsed().as_secs_f64()
        ),
        Err(e) => {
            eprintln!("Template generation failed: {}", e);
            process::exit(1);
        }
    }
}
