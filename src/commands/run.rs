//! `linksweep run` command: the full pipeline.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest::Manifest;
use crate::pipeline::{archive, chunk, correlate, extract, submit};

/// Execute the full pipeline: split, extract, submit, correlate, archive.
///
/// The manifest is rediscovered from the working directory after
/// splitting, so parts left over from an earlier, unarchived run are
/// carried through the remaining stages as well.
///
/// # Errors
///
/// Returns an error string if any stage fails.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let written = chunk::split_dataset(ctx, config)?;
    let manifest = Manifest::discover(ctx.fs.as_ref(), config)?;
    extract::extract_links(ctx, config, &manifest)?;
    let submitted = submit::submit_batches(ctx, config, &manifest)?;
    let matches = correlate::match_responses(ctx, config, &manifest)?;
    let archive_dir = archive::archive_run(ctx, config)?;

    println!(
        "{} part(s) written, {} batch(es) submitted, {} link error(s) logged.",
        written.len(),
        submitted,
        matches
    );
    println!("Artifacts saved to {}.", archive_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::{CannedChecker, FixedIdGenerator, MemFileSystem};
    use crate::ports::FileSystem;
    use std::path::Path;

    #[test]
    fn full_run_produces_report_and_archive() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/urls.csv"), "b1,http://a\nb2,http://b\n").unwrap();
        let checker = CannedChecker::new(fs.clone(), "res_").with_status("http://a", "404");
        let ctx = ServiceContext {
            fs: Box::new(fs.clone()),
            shell: Box::new(checker),
            id_gen: Box::new(FixedIdGenerator::new(["7777"])),
        };
        let config = PipelineConfig { max_rows_per_part: 1, ..PipelineConfig::default() };

        run(&ctx, &config).unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("data/logid_7777/logfile.csv")).unwrap(),
            "b1,http://a,404\n"
        );
        assert_eq!(
            fs.list_dir(Path::new("data")).unwrap(),
            vec!["logid_7777".to_string(), "urls.csv".to_string()]
        );
    }
}
