use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::info;

use super::ngram_model::NGramModel;
use crate::error::{NGramError, NGramResult};
use crate::io::{list_files, read_file, CORPUS_EXTENSION};

/// Builds a model from every `.txt` corpus file of a directory.
///
/// # Parameters
/// - `filepath`: Path to a directory containing corpus files.
/// - `n`: Order of the resulting model.
///
/// # Behavior
/// - Each file is one `train` call.
/// - Files are split into chunks (based on CPU cores), each chunk is
///   trained into a partial model on its own thread.
/// - Partial models are merged into the final one.
///
/// # Errors
/// - Returns an error if `n < 1` or the path is not a directory.
/// - Returns an error if a corpus file cannot be read.
///
/// # Notes
/// - Only files directly contained in the directory are read.
/// - An empty directory yields an untrained model.
pub fn train_folder<P: AsRef<Path>>(filepath: P, n: usize) -> NGramResult<NGramModel> {
	let mut final_model = NGramModel::new(n)?;

	let folder = filepath.as_ref();

	if !folder.is_dir() {
		return Err(NGramError::InvalidPath(format!("Expected a directory, got: {}", folder.display())));
	}

	let files = list_files(folder, CORPUS_EXTENSION)?;
	if files.is_empty() {
		info!("No corpus file found in {}", folder.display());
		return Ok(final_model);
	}

	let paths: Vec<_> = files.iter().map(|file| folder.join(file)).collect();
	let chunk_size = paths.len().div_ceil(num_cpus::get().max(1));

	let (tx, rx) = mpsc::channel();
	let mut workers = 0;
	for chunk in paths.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk = chunk.to_vec();
		workers += 1;

		thread::spawn(move || {
			let partial = train_files(&chunk, n);
			// The receiver outlives every worker
			let _ = tx.send(partial);
		});
	}
	drop(tx);

	let mut received = 0;
	for partial_model in rx.iter() {
		final_model.merge(&partial_model?)?;
		received += 1;
	}
	if received != workers {
		return Err(NGramError::Worker(format!("{} of {} workers reported", received, workers)));
	}

	info!(
		"Trained order-{} model from {} files, vocabulary size {}",
		n,
		files.len(),
		final_model.vocabulary().len()
	);

	Ok(final_model)
}

/// Trains a partial model with one `train` call per file.
fn train_files<P: AsRef<Path>>(paths: &[P], n: usize) -> NGramResult<NGramModel> {
	let mut model = NGramModel::new(n)?;
	for path in paths {
		model.train(&read_file(path)?);
	}
	Ok(model)
}
