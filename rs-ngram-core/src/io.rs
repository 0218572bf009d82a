use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

use log::warn;

use crate::error::{NGramError, NGramResult};

/// Extension of corpus files picked up when training from a folder.
pub const CORPUS_EXTENSION: &str = "txt";

/// Small built-in corpus used when no dataset is available.
pub const SAMPLE_CORPUS: &str = "
	artificial intelligence is transforming the world.
	next word prediction helps typing faster.
	language models learn patterns from text.
	a simple n gram model predicts next words.
";

/// Reads a whole UTF-8 text file into a `String`.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Loads a dataset file.
///
/// Returns `None` when the file is missing or unreadable. The failure is
/// reported through the logger and never propagated, so callers can
/// substitute `SAMPLE_CORPUS` or an empty string.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Option<String> {
	let path = path.as_ref();
	match read_file(path) {
		Ok(text) => Some(text),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			warn!("Dataset file not found at: {}", path.display());
			None
		}
		Err(e) => {
			warn!("Failed to read dataset {}: {}", path.display(), e);
			None
		}
	}
}

/// Names of the corpora available in `folder`: every `.txt` file it
/// directly contains, without the extension, sorted.
pub fn corpus_names<P: AsRef<Path>>(folder: P) -> io::Result<Vec<String>> {
	let names = list_files(folder, CORPUS_EXTENSION)?
		.iter()
		.filter_map(|file| Path::new(file).file_stem())
		.map(|stem| stem.to_string_lossy().to_string())
		.collect();
	Ok(names)
}

/// Resolves a corpus name to its file inside `folder`.
///
/// Only names listed by `corpus_names` are accepted, so a name can never
/// point outside the folder (`"../x"`, absolute paths, nested folders).
///
/// # Errors
/// Returns `UnknownCorpus` for any other name, or an I/O error if the
/// folder cannot be listed.
pub fn corpus_path<P: AsRef<Path>>(folder: P, name: &str) -> NGramResult<PathBuf> {
	let folder = folder.as_ref();
	if !corpus_names(folder)?.iter().any(|known| known == name) {
		return Err(NGramError::UnknownCorpus(name.to_owned()));
	}
	Ok(folder.join(format!("{}.{}", name, CORPUS_EXTENSION)))
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so that callers iterate in
/// a stable order.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn load_dataset_missing_file_is_none() {
		assert!(load_dataset("definitely/not/here.txt").is_none());
	}
}
