use anyhow::{bail, Context, Result};
use soilsense::{IndexPipeline, OutputSink, PipelineConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.as_slice() {
        [flag, path] if flag == "--config" => PipelineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        [input_dir, output_dir] => PipelineConfig::new(input_dir, output_dir),
        [] => PipelineConfig::default(),
        _ => bail!("usage: soilsense [<input_dir> <output_dir> | --config <file>]"),
    };

    let sink = OutputSink::new(&config.output_dir);
    let pipeline = IndexPipeline::new(config);

    let products = pipeline.run().context("index pipeline failed")?;

    sink.save_all(&products)
        .context("failed to write output images")?;
    sink.print_samples(&products);

    println!("All images saved successfully in PNG format.");
    Ok(())
}
