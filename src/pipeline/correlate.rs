//! Correlation: join flagged checker responses back to source identifiers.

use csv::WriterBuilder;
use log::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest::Manifest;
use crate::pipeline::record;

/// Matches each response file's flagged rows against its part's records
/// and appends `(identifier, url, status)` rows to the report.
///
/// For every response row whose status token is in the configured error
/// set, every record in the corresponding part whose URL field exactly
/// equals the response row's URL yields one report row. Parts without a
/// response file are skipped. Response rows lacking a status field are
/// skipped with a warning; flagged URLs that match no record are dropped
/// at debug level. The report is append-only, so correlating twice
/// without archiving in between duplicates its rows.
///
/// Returns the number of report rows appended.
///
/// # Errors
///
/// Returns an error if a part or response file cannot be read or parsed,
/// or the report cannot be written.
pub fn match_responses(
    ctx: &ServiceContext,
    config: &PipelineConfig,
    manifest: &Manifest,
) -> Result<usize, String> {
    let mut appended = 0;
    for entry in manifest.entries() {
        let response_path = entry.response_path(config);
        if !ctx.fs.exists(&response_path) {
            debug!("no response file for {}, skipping", entry.part_name(config));
            continue;
        }
        info!(
            "matching {} against {}",
            entry.response_name(config),
            entry.part_name(config)
        );

        let part_path = entry.part_path(config);
        let part_text = ctx
            .fs
            .read_to_string(&part_path)
            .map_err(|e| format!("failed to read part {}: {e}", part_path.display()))?;
        let records =
            record::parse_records(&part_text).map_err(|e| format!("{}: {e}", part_path.display()))?;

        let response_text = ctx
            .fs
            .read_to_string(&response_path)
            .map_err(|e| format!("failed to read response {}: {e}", response_path.display()))?;
        let rows = record::parse_records(&response_text)
            .map_err(|e| format!("{}: {e}", response_path.display()))?;

        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        let mut wrote_any = false;
        for (row_no, row) in rows.iter().enumerate() {
            let url = row.field(0).unwrap_or("");
            let Some(status) = row.field(2) else {
                warn!(
                    "{}: row {} has no status field, skipping",
                    entry.response_name(config),
                    row_no + 1
                );
                continue;
            };
            if !config.is_error_status(status) {
                continue;
            }

            let mut matched = false;
            for rec in &records {
                if rec.url() == Some(url) {
                    writer
                        .write_record([rec.id(), url, status])
                        .map_err(|e| format!("failed to serialize report row: {e}"))?;
                    info!("logged link error: {},{url},{status}", rec.id());
                    matched = true;
                    wrote_any = true;
                    appended += 1;
                }
            }
            if !matched {
                debug!("{url} matches no record in {}", entry.part_name(config));
            }
        }

        if wrote_any {
            let bytes = writer
                .into_inner()
                .map_err(|e| format!("failed to flush report rows: {e}"))?;
            let text = String::from_utf8(bytes)
                .map_err(|e| format!("report rows were not utf-8: {e}"))?;
            let report = config.report_path();
            ctx.fs
                .append(&report, &text)
                .map_err(|e| format!("failed to append to report {}: {e}", report.display()))?;
        }
    }
    Ok(appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::{CannedChecker, FixedIdGenerator, MemFileSystem};
    use crate::ports::FileSystem;
    use std::path::Path;

    fn fake_context(fs: &MemFileSystem) -> ServiceContext {
        ServiceContext {
            fs: Box::new(fs.clone()),
            shell: Box::new(CannedChecker::new(fs.clone(), "res_")),
            id_gen: Box::new(FixedIdGenerator::new(["7777"])),
        }
    }

    fn run_with(
        part: &str,
        response: &str,
    ) -> (MemFileSystem, PipelineConfig, Result<usize, String>) {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0.csv"), part).unwrap();
        fs.write(Path::new("data/res_part_0_links.csv"), response).unwrap();
        let config = PipelineConfig::default();
        let manifest = Manifest::discover(&fs, &config).unwrap();
        let ctx = fake_context(&fs);
        let result = match_responses(&ctx, &config, &manifest);
        (fs, config, result)
    }

    #[test]
    fn flagged_row_with_matching_url_is_reported() {
        let (fs, config, result) =
            run_with("b1,http://a\nb2,http://b\n", "http://b,text/html,404\n");

        assert_eq!(result.unwrap(), 1);
        assert_eq!(
            fs.read_to_string(&config.report_path()).unwrap(),
            "b2,http://b,404\n"
        );
    }

    #[test]
    fn non_error_status_is_never_reported() {
        let (fs, config, result) =
            run_with("b1,http://a\n", "http://a,text/html,200\nhttp://a,text/html,301\n");

        assert_eq!(result.unwrap(), 0);
        assert!(!fs.exists(&config.report_path()));
    }

    #[test]
    fn unmatched_url_is_ignored_without_error() {
        let (fs, config, result) =
            run_with("b1,http://a\n", "http://elsewhere,text/html,404\n");

        assert_eq!(result.unwrap(), 0);
        assert!(!fs.exists(&config.report_path()));
    }

    #[test]
    fn short_response_row_is_skipped() {
        let (fs, config, result) =
            run_with("b1,http://a\n", "http://a,text/html\nhttp://a,text/html,404\n");

        assert_eq!(result.unwrap(), 1);
        assert_eq!(fs.read_to_string(&config.report_path()).unwrap(), "b1,http://a,404\n");
    }

    #[test]
    fn every_record_sharing_the_url_is_reported() {
        let (fs, config, result) =
            run_with("b1,http://a\nb2,http://a\n", "http://a,text/html,500\n");

        assert_eq!(result.unwrap(), 2);
        assert_eq!(
            fs.read_to_string(&config.report_path()).unwrap(),
            "b1,http://a,500\nb2,http://a,500\n"
        );
    }

    #[test]
    fn responses_do_not_need_to_preserve_link_order() {
        let (fs, config, result) = run_with(
            "b1,http://a\nb2,http://b\n",
            "http://b,text/html,404\nhttp://a,text/html,403\n",
        );

        assert_eq!(result.unwrap(), 2);
        assert_eq!(
            fs.read_to_string(&config.report_path()).unwrap(),
            "b2,http://b,404\nb1,http://a,403\n"
        );
    }

    #[test]
    fn parts_without_responses_are_skipped() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("data/part_0.csv"), "b1,http://a\n").unwrap();
        fs.write(Path::new("data/part_1.csv"), "b2,http://b\n").unwrap();
        fs.write(Path::new("data/res_part_1_links.csv"), "http://b,text/html,404\n").unwrap();
        let config = PipelineConfig::default();
        let manifest = Manifest::discover(&fs, &config).unwrap();
        let ctx = fake_context(&fs);

        let appended = match_responses(&ctx, &config, &manifest).unwrap();

        assert_eq!(appended, 1);
        assert_eq!(fs.read_to_string(&config.report_path()).unwrap(), "b2,http://b,404\n");
    }

    #[test]
    fn rerunning_appends_duplicate_rows() {
        let (fs, config, _) = run_with("b1,http://a\n", "http://a,text/html,404\n");
        let manifest = Manifest::discover(&fs, &config).unwrap();
        let ctx = fake_context(&fs);

        match_responses(&ctx, &config, &manifest).unwrap();

        assert_eq!(
            fs.read_to_string(&config.report_path()).unwrap(),
            "b1,http://a,404\nb1,http://a,404\n"
        );
    }
}
