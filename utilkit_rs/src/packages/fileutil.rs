//! Directory size statistics exposed as `fileutil:DirStat`.
//!
//! `DirStat(dir, threshold, save)` walks `dir`, summarises sizes per file
//! type and, when `threshold > 0`, lists every file at or above it. With
//! `save` set, that list is also written to
//! `<report_dir>/<YYYYMMDD><4 digits>_file.txt`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use rand::Rng;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::PartialOutput;
use crate::registry::{BatchReport, Candidate, Registry};

pub const PACKAGE_NAME: &str = "fileutil";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    Image,
    Js,
    Css,
    Gzip,
    Other,
}

impl FileKind {
    /// Classify by extension. Matching is case-sensitive: `b.JPG` is `Other`.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jpg" | "jpeg" | "png" | "gif" | "svg") => FileKind::Image,
            Some("js") => FileKind::Js,
            Some("css") => FileKind::Css,
            Some("gz") => FileKind::Gzip,
            _ => FileKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Js => "js",
            FileKind::Css => "css",
            FileKind::Gzip => "gzip",
            FileKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStat {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub kind: FileKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTotal {
    pub kind: FileKind,
    pub size: u64,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct DirSummary {
    pub root: PathBuf,
    /// Files in walk order.
    pub files: Vec<FileStat>,
    pub total_size: u64,
    /// Per-type totals, largest first.
    pub by_type: Vec<TypeTotal>,
}

/// Walk `dir` in file-name order. Unreadable entries and directories are
/// skipped; a missing root simply yields an empty summary.
pub fn scan_dir(dir: &Path) -> DirSummary {
    let mut files = Vec::new();
    let mut by_type: Vec<TypeTotal> = Vec::new();
    let mut total_size = 0u64;

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.file_type().is_dir() {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };

        let size = metadata.len();
        let kind = FileKind::detect(entry.path());
        total_size += size;
        match by_type.iter_mut().find(|t| t.kind == kind) {
            Some(total) => {
                total.size += size;
                total.count += 1;
            }
            None => by_type.push(TypeTotal {
                kind,
                size,
                count: 1,
            }),
        }

        files.push(FileStat {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
            size,
            kind,
        });
    }

    by_type.sort_by(|a, b| b.size.cmp(&a.size).then(a.kind.cmp(&b.kind)));
    debug!(root = %dir.display(), files = files.len(), total_size, "scanned directory");

    DirSummary {
        root: dir.to_path_buf(),
        files,
        total_size,
        by_type,
    }
}

impl DirSummary {
    /// Share of the total as a percentage; zero when the directory is empty.
    pub fn percentage(&self, size: u64) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            size as f64 / self.total_size as f64 * 100.0
        }
    }

    pub fn large_files(&self, threshold: u64) -> impl Iterator<Item = &FileStat> {
        self.files.iter().filter(move |f| f.size >= threshold)
    }

    /// Render the report. `threshold == 0` omits the large-file section.
    pub fn render(&self, threshold: u64, saved_to: Option<&Path>) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Directory: {} total size: {}",
                self.root.display(),
                human_size(self.total_size)
            ),
            String::new(),
            format!("{:<8} {:>12} {:>8}", "type", "size", "share"),
        ];
        for total in &self.by_type {
            lines.push(format!(
                "{:<8} {:>12} {:>8}",
                total.kind.as_str(),
                human_size(total.size),
                format!("{:.1}%", self.percentage(total.size))
            ));
        }

        if threshold == 0 {
            return lines;
        }

        let (count, size) = self
            .large_files(threshold)
            .fold((0usize, 0u64), |(n, sum), f| (n + 1, sum + f.size));
        lines.push(String::new());
        lines.push(format!(
            "Files >= {}: {}, total size: {}",
            human_size(threshold),
            count,
            human_size(size)
        ));
        lines.push(format!("{:<8} {:<30} {:>10}", "type", "name", "size"));
        for file in self.large_files(threshold) {
            lines.push(format!(
                "{:<8} {:<30} {:>10}",
                file.kind.as_str(),
                file.name,
                human_size(file.size)
            ));
        }
        lines.push(String::new());
        if let Some(path) = saved_to {
            lines.push(format!("Large file list saved to: {}", path.display()));
        }
        lines
    }
}

/// 1024-based human readable size: `512B`, `1.50KB`, `2.00MB`, `1.25GB`.
pub fn human_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match size {
        s if s >= GB => format!("{:.2}GB", s as f64 / GB as f64),
        s if s >= MB => format!("{:.2}MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.2}KB", s as f64 / KB as f64),
        s => format!("{s}B"),
    }
}

/// `<YYYYMMDD><nnnn>_file.txt`
pub fn report_file_name(date: NaiveDate, suffix: u16) -> String {
    format!("{}{:04}_file.txt", date.format("%Y%m%d"), suffix % 10_000)
}

fn new_report_file_name() -> String {
    let suffix = rand::rng().random_range(0..10_000u16);
    report_file_name(Local::now().date_naive(), suffix)
}

/// Write `type path size` lines for every file at or above `threshold`.
/// Returns the absolute path of the written report.
pub fn save_large_files(summary: &DirSummary, threshold: u64, report_dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(report_dir)?;
    let path = report_dir.join(new_report_file_name());

    {
        let mut out = BufWriter::new(File::create(&path)?);
        for file in summary.large_files(threshold) {
            writeln!(
                out,
                "{} {} {}",
                file.kind.as_str(),
                file.path.display(),
                human_size(file.size)
            )?;
        }
        out.flush()?;
    }

    let absolute = std::path::absolute(&path).unwrap_or(path);
    info!(report = %absolute.display(), "saved large file report");
    Ok(absolute)
}

/// The `DirStat` operation. A negative threshold behaves like zero.
///
/// If the report cannot be saved the rendered summary still reaches the
/// user, followed by the I/O error.
pub fn dir_stat(dir: &Path, threshold: i64, save: bool, report_dir: &Path) -> anyhow::Result<Vec<String>> {
    let summary = scan_dir(dir);
    let threshold = u64::try_from(threshold).unwrap_or(0);

    if threshold == 0 || !save {
        return Ok(summary.render(threshold, None));
    }

    match save_large_files(&summary, threshold, report_dir) {
        Ok(saved_to) => Ok(summary.render(threshold, Some(&saved_to))),
        Err(err) => Err(PartialOutput {
            lines: summary.render(threshold, None),
            error: err.into(),
        }
        .into()),
    }
}

pub fn register_into(registry: &Registry, report_dir: PathBuf) -> BatchReport {
    registry.batch_register(
        PACKAGE_NAME,
        vec![Candidate::new(
            "DirStat",
            move |dir: PathBuf, threshold: i64, save: bool| {
                dir_stat(&dir, threshold, save, &report_dir)
            },
        )],
    )
}
