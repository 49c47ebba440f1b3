use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;

use crate::board::link_table::LinkTable;
use crate::board::task_board::TaskBoard;

pub fn timestamped_export_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let now = OffsetDateTime::now_utc();
    let fmt = format_description!("[year][month][day]_[hour][minute][second]");
    let stamp = now.format(fmt).unwrap_or_else(|_| "unknown".to_string());
    dir.join(format!("{}_{}.{}", stem, stamp, ext))
}

// Tasks with their observations, in board order
pub fn export_board_json(board: &TaskBoard, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() { fs::create_dir_all(parent)?; }
    let mut f = File::create(path)?;
    serde_json::to_writer_pretty(&mut f, &board.tasks)?;
    // ensure newline at end
    f.write_all(b"\n")?;
    f.flush()?;
    Ok(())
}

pub fn export_links_csv(links: &LinkTable, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() { fs::create_dir_all(parent)?; }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["name", "url"])?;
    for link in links.iter() {
        wtr.write_record([link.name.as_str(), link.url.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
