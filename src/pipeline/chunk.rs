//! Dataset chunking: split the source dataset into bounded part files.

use log::info;

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::manifest::{Manifest, PartEntry};
use crate::pipeline::record::{self, Record};

/// Splits the dataset into part files of at most `max_rows_per_part` rows.
///
/// Parts are numbered from 0 with no gaps; only the final part may be
/// short, and it is never empty. Row order within and across parts matches
/// the dataset, and every field of every row is carried through, so the
/// parts concatenate back to the original dataset. An empty dataset
/// produces no part files.
///
/// Returns the manifest of parts written by this call.
///
/// # Errors
///
/// Returns an error if the row bound is zero, the dataset cannot be read
/// or parsed, or a part file cannot be written.
pub fn split_dataset(ctx: &ServiceContext, config: &PipelineConfig) -> Result<Manifest, String> {
    if config.max_rows_per_part == 0 {
        return Err("max_rows_per_part must be at least 1".to_string());
    }

    let dataset = config.dataset_path();
    let text = ctx
        .fs
        .read_to_string(&dataset)
        .map_err(|e| format!("failed to read dataset {}: {e}", dataset.display()))?;
    let records =
        record::parse_records(&text).map_err(|e| format!("{}: {e}", dataset.display()))?;

    let mut entries = Vec::new();
    let mut next_index: u64 = 0;
    let mut buffer: Vec<Record> = Vec::new();
    for record in records {
        buffer.push(record);
        if buffer.len() == config.max_rows_per_part {
            entries.push(flush_part(ctx, config, next_index, &buffer)?);
            next_index += 1;
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        entries.push(flush_part(ctx, config, next_index, &buffer)?);
    }

    info!("split {} into {} part file(s)", dataset.display(), entries.len());
    Ok(Manifest::new(entries))
}

fn flush_part(
    ctx: &ServiceContext,
    config: &PipelineConfig,
    index: u64,
    buffer: &[Record],
) -> Result<PartEntry, String> {
    let entry = PartEntry::new(index);
    let path = entry.part_path(config);
    let text = record::to_csv(buffer).map_err(|e| format!("{}: {e}", path.display()))?;
    ctx.fs
        .write(&path, &text)
        .map_err(|e| format!("failed to write part {}: {e}", path.display()))?;
    Ok(entry)
}
