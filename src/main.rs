use env_logger::Env;
use kmeans_visualizer::*;
use log::error;
use std::env;

fn main() {
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", "info"));

    let executable = env::var("KMEANS_DEMO_EXECUTABLE").unwrap_or_else(|_| "../bin/kmeans-demo".to_string());
    let result = Pipeline::new(PipelineConfig::<f32>::default(), SquaredEuclideanDistance)
        .and_then(|pipeline| pipeline.run(&ExternalProcess::new(executable)));
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
