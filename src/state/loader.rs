use crate::state::app_settings::DataSource;
use crate::state::messages::{LoaderRequest, LoaderResponse};
use bracket_engine::TournamentData;
use bracket_engine::load::{LoadError, load_tournament_file, parse_tournament};
use log::{debug, error};
use tokio::sync::mpsc;

pub const ERROR_CHAR: char = '!';
const LOADING_CHAR: char = '⠿';

/// Sample bracket shown when no file is given.
const SAMPLE_BRACKET_JSON: &str = include_str!("../../sample_bracket.json");

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Reads and parses the tournament off the UI loop.
pub struct LoaderWorker {
    source: DataSource,
    requests: mpsc::Receiver<LoaderRequest>,
    responses: mpsc::Sender<LoaderResponse>,
}

impl LoaderWorker {
    pub fn new(
        source: DataSource,
        requests: mpsc::Receiver<LoaderRequest>,
        responses: mpsc::Sender<LoaderResponse>,
    ) -> Self {
        Self { source, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let announce = matches!(request, LoaderRequest::Load);
            if announce {
                self.send_loading_state(LoadingState { is_loading: true, spinner_char: LOADING_CHAR })
                    .await;
            }

            let result = self.read_source().await;
            debug!("load request {request:?} complete");

            // Sent for every request; a success clears an earlier error marker.
            let spinner_char = if result.is_ok() { ' ' } else { ERROR_CHAR };
            self.send_loading_state(LoadingState { is_loading: false, spinner_char }).await;

            let response = match result {
                Ok(data) => LoaderResponse::TournamentLoaded { data, source: self.source.describe() },
                Err(err) => LoaderResponse::Error { message: err.to_string() },
            };

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send loader response: {e}");
                break;
            }
        }
    }

    async fn read_source(&self) -> Result<TournamentData, LoadError> {
        match &self.source {
            DataSource::Embedded => parse_tournament(SAMPLE_BRACKET_JSON),
            DataSource::File(path) => {
                debug!("reading tournament from {}", path.display());
                let path = path.clone();
                let shown = path.display().to_string();
                tokio::task::spawn_blocking(move || load_tournament_file(path))
                    .await
                    .map_err(|e| LoadError::Io(std::io::Error::other(e), shown))?
            }
        }
    }

    async fn send_loading_state(&self, loading_state: LoadingState) {
        let _ = self
            .responses
            .send(LoaderResponse::LoadingStateChanged { loading_state })
            .await;
    }
}
