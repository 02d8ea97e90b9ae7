//! Batch submission: pass each link file to the external checker.

use log::{info, warn};

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest::Manifest;

/// Invokes the checker once per existing link file, strictly in sequence.
///
/// Each invocation blocks until the checker exits. Its stdout and stderr
/// are captured but not interpreted; the checker's observable effect is
/// the response file it writes into the working directory. A non-zero exit
/// and a missing response file are logged as warnings, and the run
/// continues with the next batch.
///
/// Returns the number of batches submitted.
///
/// # Errors
///
/// Returns an error if the checker process cannot be spawned at all.
pub fn submit_batches(
    ctx: &ServiceContext,
    config: &PipelineConfig,
    manifest: &Manifest,
) -> Result<usize, String> {
    let mut submitted = 0;
    for entry in manifest.entries() {
        let link_path = entry.link_path(config);
        if !ctx.fs.exists(&link_path) {
            warn!("no link file for {}, skipping", entry.part_name(config));
            continue;
        }

        let link_name = entry.link_name(config);
        info!("begin processing {link_name}");
        let command = format!("{} {}", config.checker_command, link_path.display());
        let output = ctx
            .shell
            .run(&command)
            .map_err(|e| format!("failed to invoke checker for {link_name}: {e}"))?;
        info!("end processing {link_name}");

        if output.exit_code != 0 {
            warn!("checker exited with status {} for {link_name}", output.exit_code);
        }
        if !ctx.fs.exists(&entry.response_path(config)) {
            warn!("no response file {} after submitting {link_name}", entry.response_name(config));
        }
        submitted += 1;
    }
    Ok(submitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::{CannedChecker, FixedIdGenerator, MemFileSystem};
    use crate::ports::FileSystem;
    use crate::pipeline::manifest::PartEntry;
    use std::path::Path;

    fn context_with_checker(fs: &MemFileSystem, checker: CannedChecker) -> ServiceContext {
        ServiceContext {
            fs: Box::new(fs.clone()),
            shell: Box::new(checker),
            id_gen: Box::new(FixedIdGenerator::new(["7777"])),
        }
    }

    #[test]
    fn invokes_checker_once_per_link_file_in_index_order() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0_links.csv"), "http://a\n").unwrap();
        fs.write(Path::new("data/part_1_links.csv"), "http://b\n").unwrap();
        fs.write(Path::new("data/part_0.csv"), "b1,http://a\n").unwrap();
        fs.write(Path::new("data/part_1.csv"), "b2,http://b\n").unwrap();
        let checker = CannedChecker::new(fs.clone(), "res_");
        let handle = checker.clone();
        let config = PipelineConfig::default();
        let manifest = Manifest::discover(&fs, &config).unwrap();
        let ctx = context_with_checker(&fs, checker);

        let submitted = submit_batches(&ctx, &config, &manifest).unwrap();

        assert_eq!(submitted, 2);
        assert_eq!(
            handle.invocations(),
            vec![
                "linkcheck data/part_0_links.csv".to_string(),
                "linkcheck data/part_1_links.csv".to_string(),
            ]
        );
        assert!(fs.exists(Path::new("data/res_part_0_links.csv")));
        assert!(fs.exists(Path::new("data/res_part_1_links.csv")));
    }

    #[test]
    fn skips_parts_without_a_link_file() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0.csv"), "b1,http://a\n").unwrap();
        let config = PipelineConfig::default();
        let manifest = Manifest::new(vec![PartEntry::new(0)]);
        let ctx = context_with_checker(&fs, CannedChecker::new(fs.clone(), "res_"));

        let submitted = submit_batches(&ctx, &config, &manifest).unwrap();

        assert_eq!(submitted, 0);
        assert!(!fs.exists(Path::new("data/res_part_0_links.csv")));
    }

    #[test]
    fn continues_past_failing_checker_invocations() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0_links.csv"), "http://a\n").unwrap();
        fs.write(Path::new("data/part_1_links.csv"), "http://b\n").unwrap();
        let checker = CannedChecker::new(fs.clone(), "res_").without_responses().with_exit_code(1);
        let config = PipelineConfig::default();
        let manifest = Manifest::new(vec![PartEntry::new(0), PartEntry::new(1)]);
        let ctx = context_with_checker(&fs, checker);

        let submitted = submit_batches(&ctx, &config, &manifest).unwrap();

        assert_eq!(submitted, 2);
        assert!(!fs.exists(Path::new("data/res_part_0_links.csv")));
    }
}
