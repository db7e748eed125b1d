//! Local stand-in for the remote crossword generator.
//!
//! Serves `GET /v1/crossword` with the same envelope as the real service.
//! Puzzles are canned; only `size`, `theme` and `difficulty` are echoed so
//! clients can check that their query arrived.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub status: String,
    pub error: Option<String>,
    pub data: Option<CrosswordData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordData {
    pub size: u32,
    pub difficulty: String,
    pub theme: String,
    pub grid: Vec<Vec<Option<String>>>,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
    pub word_count: u32,
    pub html: String,
    pub image: Image,
    pub solution_image: Image,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Clue {
    pub number: u32,
    pub clue: String,
    pub answer: String,
    pub length: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Image {
    #[serde(rename = "imageName")]
    pub image_name: String,
    pub format: String,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    pub expires: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub size: Option<String>,
    pub theme: Option<String>,
    pub difficulty: Option<String>,
}

/// Fixed expiry stamped on generated image descriptors.
const IMAGE_EXPIRES: i64 = 1_767_225_600_000;

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/v1/crossword", get(generate))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Envelope>) {
    (
        status,
        Json(Envelope {
            status: "error".to_string(),
            error: Some(message.to_string()),
            data: None,
            code: Some(status.as_u16()),
        }),
    )
}

async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GenerateParams>,
) -> (StatusCode, Json<Envelope>) {
    let key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if key != Some(&*state.api_key) {
        warn!("rejected request with missing or invalid API key");
        return error(StatusCode::UNAUTHORIZED, "Invalid or missing API key");
    }

    let size = match grid_size(params.size.as_deref()) {
        Some(size) => size,
        None => return error(StatusCode::BAD_REQUEST, "size must be one of: small, medium, large"),
    };
    let difficulty = params.difficulty.unwrap_or_else(|| "medium".to_string());
    if !matches!(difficulty.as_str(), "easy" | "medium" | "hard") {
        return error(StatusCode::BAD_REQUEST, "difficulty must be one of: easy, medium, hard");
    }
    let theme = params.theme.unwrap_or_else(|| "random".to_string());

    info!(size, %theme, %difficulty, "serving crossword");
    (
        StatusCode::OK,
        Json(Envelope {
            status: "ok".to_string(),
            error: None,
            data: Some(puzzle(size, theme, difficulty)),
            code: None,
        }),
    )
}

fn grid_size(size: Option<&str>) -> Option<u32> {
    match size.unwrap_or("medium") {
        "small" => Some(10),
        "medium" => Some(15),
        "large" => Some(20),
        _ => None,
    }
}

/// A `size` x `size` grid holding two crossing words in the top-left corner.
fn puzzle(size: u32, theme: String, difficulty: String) -> CrosswordData {
    let mut grid = vec![vec![None; size as usize]; size as usize];
    for (i, ch) in "CAT".chars().enumerate() {
        grid[0][i] = Some(ch.to_string());
    }
    for (i, ch) in "COW".chars().enumerate() {
        grid[i][0] = Some(ch.to_string());
    }

    let image = |name: &str| Image {
        image_name: format!("{name}.png"),
        format: "png".to_string(),
        download_url: format!("http://localhost/images/{name}.png"),
        expires: IMAGE_EXPIRES,
    };

    CrosswordData {
        size,
        difficulty,
        theme,
        grid,
        across: vec![Clue {
            number: 1,
            clue: "Purring pet".to_string(),
            answer: "CAT".to_string(),
            length: 3,
        }],
        down: vec![Clue {
            number: 1,
            clue: "Dairy animal".to_string(),
            answer: "COW".to_string(),
            length: 3,
        }],
        word_count: 2,
        html: "<table class=\"crossword\"></table>".to_string(),
        image: image("crossword"),
        solution_image: image("crossword-solution"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_defaults_to_medium() {
        assert_eq!(grid_size(None), Some(15));
        assert_eq!(grid_size(Some("small")), Some(10));
        assert_eq!(grid_size(Some("large")), Some(20));
        assert_eq!(grid_size(Some("huge")), None);
    }

    #[test]
    fn puzzle_grid_matches_size_and_words() {
        let data = puzzle(10, "animals".to_string(), "easy".to_string());
        assert_eq!(data.grid.len(), 10);
        assert!(data.grid.iter().all(|row| row.len() == 10));
        assert_eq!(data.grid[0][2].as_deref(), Some("T"));
        assert_eq!(data.grid[2][0].as_deref(), Some("W"));
        assert_eq!(data.grid[5][5], None);
        assert_eq!(data.word_count as usize, data.across.len() + data.down.len());
    }

    #[test]
    fn envelope_serializes_with_camel_case_data() {
        let envelope = Envelope {
            status: "ok".to_string(),
            error: None,
            data: Some(puzzle(10, "food".to_string(), "hard".to_string())),
            code: None,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json["error"].is_null());
        assert!(json.get("code").is_none());
        assert_eq!(json["data"]["wordCount"], 2);
        assert_eq!(json["data"]["solutionImage"]["downloadURL"], "http://localhost/images/crossword-solution.png");
    }

    #[test]
    fn error_envelope_carries_code() {
        let (status, Json(body)) = error(StatusCode::UNAUTHORIZED, "nope");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.code, Some(401));
        assert!(body.data.is_none());
    }
}
