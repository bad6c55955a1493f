//! Result writers and formatting helpers.
//!
//! Writers report failures as [`Error::OutputWrite`]; callers are expected
//! to log them and keep the computed result.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::problem::Cost;
use crate::tour::hcp::HcpInstance;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Summary of a run, written as JSON next to the result files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub instance: String,
    pub problem: String,
    pub cost: Cost,
    pub optimum: Option<Cost>,
    pub optimal: bool,
    pub seeds_run: usize,
    pub found_after_secs: f64,
    pub elapsed_secs: f64,
    /// 1-based tour or row-major grid values
    pub configuration: Vec<usize>,
}

/// Write an HCP tour (`TYPE : HCP TOUR`) as `<dir>/<name>.tour`.
pub fn save_hcp_tour(dir: &Path, name: &str, tour: &[usize]) -> Result<PathBuf> {
    let name = if name.is_empty() { "undefined" } else { name };
    let file_name = if name.ends_with(".tour") {
        name.to_string()
    } else {
        format!("{}.tour", name)
    };
    let path = dir.join(file_name);
    let title = name.trim_end_matches(".tour");

    write_file(&path, |file| {
        writeln!(file, "NAME : {}", title)?;
        writeln!(file, "TYPE : HCP TOUR")?;
        writeln!(file, "COMMENT : {}-node graph", tour.len())?;
        writeln!(file, "DIMENSION : {}", tour.len())?;
        writeln!(file, "EDGE_DATA_FORMAT : EDGE_LIST")?;
        writeln!(file, "EDGE_DATA_SECTION")?;
        for &node in tour {
            writeln!(file, "{}", node + 1)?;
        }
        writeln!(file, "-1")?;
        writeln!(file, "EOF")
    })?;

    Ok(path)
}

/// Write an HCP instance (`TYPE : HCP`) with 1-based edges.
pub fn save_hcp_instance(path: &Path, instance: &HcpInstance) -> Result<()> {
    write_file(path, |file| {
        writeln!(file, "NAME : {}", instance.name)?;
        writeln!(file, "TYPE : HCP")?;
        writeln!(file, "COMMENT : {}-node graph", instance.node_count())?;
        writeln!(file, "DIMENSION : {}", instance.node_count())?;
        writeln!(file, "EDGE_DATA_FORMAT : EDGE_LIST")?;
        writeln!(file, "EDGE_DATA_SECTION")?;
        for (u, v) in instance.edges() {
            writeln!(file, "{} {}", u + 1, v + 1)?;
        }
        writeln!(file, "-1")?;
        writeln!(file, "EOF")
    })
}

/// Write a TSP tour as `<dir>/<name>_<k>.tour`, using the first unused `k`.
pub fn save_tsp_tour(
    dir: &Path,
    name: &str,
    tour: &[usize],
    length: Cost,
    elapsed: Duration,
) -> Result<PathBuf> {
    let mut counter = 1;
    let (path, file_name) = loop {
        let file_name = format!("{}_{}.tour", name, counter);
        let path = dir.join(&file_name);
        if !path.exists() {
            break (path, file_name);
        }
        counter += 1;
    };

    write_file(&path, |file| {
        writeln!(file, "NAME: {}", file_name)?;
        writeln!(
            file,
            "COMMENT: Tour length {}, time {:.2}",
            length,
            elapsed.as_secs_f64()
        )?;
        writeln!(file, "TYPE: TOUR")?;
        writeln!(file, "DIMENSION: {}", tour.len())?;
        writeln!(file, "TOUR_SECTION")?;
        for &node in tour {
            writeln!(file, "{}", node + 1)?;
        }
        writeln!(file, "-1")?;
        writeln!(file, "EOF")
    })?;

    Ok(path)
}

/// Write a completed grid as `<dir>/<name>_solution.txt`.
pub fn save_sudoku_solution(
    dir: &Path,
    name: &str,
    cells: &[u8],
    size: usize,
    elapsed: Duration,
) -> Result<PathBuf> {
    let path = dir.join(format!("{}_solution.txt", name));

    write_file(&path, |file| {
        for row in cells.chunks(size.max(1)) {
            for value in row {
                write!(file, "{} ", value)?;
            }
            writeln!(file)?;
        }
        write!(file, "\ntotal time {:.2} seconds", elapsed.as_secs_f64())
    })?;

    Ok(path)
}

/// Write a run summary as pretty-printed JSON.
pub fn save_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    write_file(path, |file| {
        serde_json::to_writer_pretty(&mut *file, summary)?;
        writeln!(file)
    })
}

fn write_file<F>(path: &Path, contents: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = BufWriter::new(File::create(path)?);
        contents(&mut file)?;
        file.flush()
    };

    write().map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Saved {}", path.display());
    Ok(())
}
