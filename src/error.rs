use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Detector Error: {0}")]
    Detector(#[from] DetectorError),
    #[error("Landmark Error: {0}")]
    Landmark(#[from] LandmarkError),
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

// Image payload errors
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Image payload is empty")]
    EmptyPayload,
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("{0} is not configured")]
    Unavailable(&'static str),
    #[error("{detector} failed: {message}")]
    Inference {
        detector: &'static str,
        message: String,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkError {
    #[error("Expected at least {expected} landmarks, got {actual}")]
    TooFewPoints { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
