use flate2::read::MultiGzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

// os
#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);
#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

const GFF_EXTENSIONS: [&str; 2] = ["gff", "gff3"];

/// return a pre-configured progress bar
pub fn get_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let progressbar_style = ProgressStyle::default_spinner()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner} {msg:<30} {wide_bar} ETA {eta_precise} ")
        .expect("no template error");

    let progress_bar = ProgressBar::new(length);

    progress_bar.set_style(progressbar_style);
    progress_bar.enable_steady_tick(Duration::from_millis(TICK_SETTINGS.1));
    progress_bar.set_message(msg.to_owned());

    progress_bar
}

/// open a plain or gzip-compressed file as a buffered line reader
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, CliError> {
    let file = File::open(&path)?;

    if is_gzipped(path.as_ref()) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// read a whole plain or gzip-compressed file into memory
pub fn reader<P: AsRef<Path>>(path: P) -> Result<String, CliError> {
    let mut contents = String::new();
    open_reader(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// create a buffered writer, truncating any previous file
pub fn open_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>, CliError> {
    Ok(BufWriter::new(File::create(path)?))
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// argument checker for all subcommands
pub trait ArgCheck {
    fn check(&self) -> Result<(), CliError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), CliError> {
        self.check_annotation()?;
        self.check_tables()?;

        if let Some(parent) = self.get_output().parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(CliError::InvalidInput(format!(
                    "output directory {:?} does not exist",
                    parent
                )));
            }
        }

        Ok(())
    }

    fn check_annotation(&self) -> Result<(), CliError> {
        validate_gff(self.get_annotation())
    }

    fn check_tables(&self) -> Result<(), CliError> {
        if self.get_tables().is_empty() {
            let err = "No reference tables provided".to_string();
            return Err(CliError::InvalidInput(err));
        }

        for table in self.get_tables() {
            validate(table)?;
        }

        Ok(())
    }

    fn get_annotation(&self) -> &PathBuf;
    fn get_output(&self) -> &PathBuf;
    fn get_tables(&self) -> Vec<&PathBuf>;
}

/// error handling for CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// argument validation for reference tables
///
/// An empty table is accepted: tools without hits still write
/// their headers, and an absent evidence source only weakens
/// the resolution.
pub fn validate(arg: &PathBuf) -> Result<(), CliError> {
    if !arg.exists() {
        return Err(CliError::InvalidInput(format!("{:?} does not exist", arg)));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!("{:?} is not a file", arg)));
    }

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => {
            log::warn!("file {:?} is empty", arg);
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}

/// argument validation for annotation files
pub fn validate_gff(arg: &PathBuf) -> Result<(), CliError> {
    if !arg.exists() {
        return Err(CliError::InvalidInput(format!("{:?} does not exist", arg)));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!("{:?} is not a file", arg)));
    }

    let name = arg
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or_default()
        .trim_end_matches(".gz");

    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if GFF_EXTENSIONS.contains(&ext) => (),
        _ => {
            return Err(CliError::InvalidInput(format!(
                "file {:?} is not a GFF file",
                arg
            )))
        }
    }

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => {
            Err(CliError::InvalidInput(format!("file {:?} is empty", arg)))
        }
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}
