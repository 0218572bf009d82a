use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use rs_ngram_core::io::{corpus_names, corpus_path, read_file};
use rs_ngram_core::{train_folder, NGramError, NGramModel, NGramResult, DEFAULT_ORDER, DEFAULT_TOP_K};

/// Default upper bound for a `/v1/train` body (64 MiB).
const DEFAULT_MAX_BODY: usize = 64 * 1024 * 1024;

/// HTTP front-end for the n-gram prediction model.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Folder holding `.txt` corpus files
	#[arg(short, long, default_value = "./data")]
	data: String,

	/// Maximum n-gram order
	#[arg(short = 'n', long, default_value_t = DEFAULT_ORDER)]
	order: usize,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	/// Largest accepted `/v1/train` body, in bytes
	#[arg(long, default_value_t = DEFAULT_MAX_BODY)]
	max_body: usize,
}

/// Query parameters of the `/v1/predict` endpoint
#[derive(Deserialize)]
struct PredictParams {
	phrase: Option<String>,
	top_k: Option<usize>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
}

#[derive(Serialize)]
struct Stats {
	order: usize,
	vocabulary_size: usize,
	trained: bool,
}

/// The model is not synchronized internally; every handler goes through the lock.
struct SharedData {
	model: NGramModel,
	data_folder: PathBuf,
}

/// HTTP GET endpoint `/v1/predict`
///
/// Returns the ranked next-token candidates for `phrase` as JSON.
#[get("/v1/predict")]
async fn get_predict(data: web::Data<Mutex<SharedData>>, query: web::Query<PredictParams>) -> impl Responder {
	let phrase = match &query.phrase {
		Some(p) => p,
		None => return HttpResponse::BadRequest().body("Missing phrase"),
	};
	let top_k = query.top_k.unwrap_or(DEFAULT_TOP_K);

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	HttpResponse::Ok().json(shared_data.model.predict(phrase, top_k))
}

/// HTTP PUT endpoint `/v1/train`
///
/// Trains the shared model on the plain-text request body. Counts accumulate.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model.train(&body);
	HttpResponse::Ok().body("Model trained successfully")
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let model = &shared_data.model;
	HttpResponse::Ok().json(Stats {
		order: model.order(),
		vocabulary_size: model.vocabulary().len(),
		trained: model.is_trained(),
	})
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(m) => m.data_folder.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match corpus_names(&folder) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// Trains a fresh model on the named corpora of `folder`.
///
/// Names must be corpora listed in the folder; anything else is rejected
/// before a file is opened.
fn train_corpora(folder: &Path, order: usize, names: &[String]) -> NGramResult<NGramModel> {
	let mut model = NGramModel::new(order)?;
	for name in names {
		model.train(&read_file(corpus_path(folder, name)?)?);
	}
	Ok(model)
}

/// HTTP PUT endpoint `/v1/load_corpora?names=a,b`
///
/// Replaces the shared model with one trained on the named corpus files.
/// Files are read on the blocking pool; the lock is only held to swap models.
#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let names: Vec<String> = match &query.names {
		Some(s) if !s.trim().is_empty() => s
			.split(',')
			.map(|s| s.trim())
			.filter(|s| !s.is_empty())
			.map(str::to_owned)
			.collect(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let (folder, order) = match data.lock() {
		Ok(m) => (m.data_folder.clone(), m.model.order()),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let model = match web::block(move || train_corpora(&folder, order, &names)).await {
		Ok(Ok(model)) => model,
		Ok(Err(NGramError::UnknownCorpus(name))) => {
			return HttpResponse::NotFound().body(format!("Unknown corpus: {name}"));
		}
		Ok(Err(e)) => return HttpResponse::InternalServerError().body(format!("Failed to load corpora: {e}")),
		Err(_) => return HttpResponse::InternalServerError().body("Training task failed"),
	};

	match data.lock() {
		Ok(mut m) => m.model = model,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	}
	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Registers every endpoint of the API.
fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_predict)
		.service(put_train)
		.service(get_stats)
		.service(get_corpora)
		.service(put_corpora);
}

/// Main entry point for the server.
///
/// Trains the model from the data folder, wraps it in a `Mutex`,
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	let data_folder = PathBuf::from(&cli.data);

	let model = if data_folder.is_dir() {
		train_folder(&data_folder, cli.order)
	} else {
		NGramModel::new(cli.order)
	}
	.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
	info!("Model ready (order {}, trained: {})", model.order(), model.is_trained());

	let shared_model = web::Data::new(Mutex::new(SharedData { model, data_folder }));

	let max_body = cli.max_body;

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.app_data(web::PayloadConfig::new(max_body))
			.configure(configure)
	})
		.bind((cli.host.as_str(), cli.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use std::fs;

	use actix_web::http::StatusCode;
	use actix_web::test;
	use rs_ngram_core::Prediction;
	use tempfile::tempdir;

	use super::*;

	fn shared(data_folder: &Path) -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData {
			model: NGramModel::new(DEFAULT_ORDER).unwrap(),
			data_folder: data_folder.to_path_buf(),
		}))
	}

	macro_rules! app {
		($data:expr) => {
			test::init_service(
				App::new()
					.app_data($data.clone())
					.app_data(web::PayloadConfig::new(DEFAULT_MAX_BODY))
					.configure(configure),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn load_corpora_rejects_names_outside_folder() {
		let root = tempdir().unwrap();
		let folder = root.path().join("data");
		fs::create_dir(&folder).unwrap();
		fs::write(folder.join("news.txt"), "the cat sat.").unwrap();
		fs::write(root.path().join("secret.txt"), "secret token leaked").unwrap();
		let data = shared(&folder);
		let app = app!(data);

		for names in ["../secret", "news,../secret", "%2Ftmp%2Fsecret"] {
			let req = test::TestRequest::put().uri(&format!("/v1/load_corpora?names={names}")).to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{names}");
		}

		let req = test::TestRequest::get().uri("/v1/predict?phrase=secret").to_request();
		let predictions: Vec<Prediction> = test::call_and_read_body_json(&app, req).await;
		assert!(predictions.is_empty());
	}

	#[actix_web::test]
	async fn load_corpora_trains_listed_corpus() {
		let folder = tempdir().unwrap();
		fs::write(folder.path().join("news.txt"), "the cat sat. the cat ran.").unwrap();
		let data = shared(folder.path());
		let app = app!(data);

		let req = test::TestRequest::put().uri("/v1/load_corpora?names=news").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/predict?phrase=the%20cat&top_k=1").to_request();
		let predictions: Vec<Prediction> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(predictions, vec![Prediction::new("ran", 0.5)]);
	}

	#[actix_web::test]
	async fn train_accepts_large_body() {
		let folder = tempdir().unwrap();
		let data = shared(folder.path());
		let app = app!(data);

		// Well past actix's 256 KiB default
		let body = "next word prediction helps typing faster. ".repeat(10_000);
		let req = test::TestRequest::put().uri("/v1/train").set_payload(body).to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
		assert!(data.lock().unwrap().model.is_trained());
	}

	#[actix_web::test]
	async fn predict_requires_phrase() {
		let folder = tempdir().unwrap();
		let data = shared(folder.path());
		let app = app!(data);

		let req = test::TestRequest::get().uri("/v1/predict").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn corpora_lists_names() {
		let folder = tempdir().unwrap();
		fs::write(folder.path().join("news.txt"), "n").unwrap();
		fs::write(folder.path().join("books.txt"), "b").unwrap();
		let data = shared(folder.path());
		let app = app!(data);

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "books\nnews");
	}
}
