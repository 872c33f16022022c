//! Request/response contract for the extract-color endpoint.
//!
//! The HTTP transport (multipart parsing, routing, status mapping) lives
//! outside this crate; it hands raw fields in and renders the returned
//! values or errors back out.

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::sample::{self, PixelGrid, SampleError};

/// One extract-color request, as the transport layer hands it over.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractRequest<'a> {
    /// Raw bytes of the uploaded image, if any was attached.
    pub image: Option<&'a [u8]>,
    /// The `x` form field, unparsed.
    pub x: Option<&'a str>,
    /// The `y` form field, unparsed.
    pub y: Option<&'a str>,
}

/// Successful response payload: `{"hex": "#rrggbb", "rgb": [r, g, b]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelColor {
    pub hex: String,
    pub rgb: [u8; 3],
}

/// Why an extract-color request was rejected.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No image part was attached to the request.
    #[error("request carries no image")]
    MissingImage,
    /// One or both coordinate fields are absent.
    #[error("request carries no coordinates")]
    MissingCoordinates,
    /// A coordinate field is not a base-10 unsigned integer.
    #[error("coordinate field `{field}` is not a valid non-negative integer: `{value}`")]
    InvalidCoordinate { field: &'static str, value: String },
    /// Decoding or pixel lookup failed.
    #[error(transparent)]
    Sample(#[from] SampleError),
}

impl RequestError {
    /// HTTP status code the transport should answer with.
    pub fn status(&self) -> u16 {
        match self {
            RequestError::Sample(SampleError::InvalidImage(_)) => 422,
            _ => 400,
        }
    }

    /// Stable message for the `{"error": ...}` response body.
    pub fn message(&self) -> String {
        match self {
            RequestError::MissingImage => "No image provided".to_owned(),
            RequestError::MissingCoordinates => "No coordinates provided".to_owned(),
            RequestError::InvalidCoordinate { field, value } => {
                format!("Invalid {field} coordinate: {value}")
            }
            RequestError::Sample(SampleError::OutOfBounds { .. }) => {
                "Coordinates out of bounds".to_owned()
            }
            RequestError::Sample(err) => err.to_string(),
        }
    }

    /// Render the `{"error": ...}` body the transport serializes.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message() })
    }
}

/// Validate a request and read the pixel it names.
///
/// Checks run in a fixed order: image presence, coordinate presence,
/// coordinate syntax, image decode, bounds. The first failure wins.
pub fn extract_color(request: &ExtractRequest) -> Result<PixelColor, RequestError> {
    let image = request.image.ok_or(RequestError::MissingImage)?;
    let (x, y) = match (request.x, request.y) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(RequestError::MissingCoordinates),
    };
    let x = parse_coordinate("x", x)?;
    let y = parse_coordinate("y", y)?;

    let grid = PixelGrid::decode(image)?;
    let color = sample::sample_at(&grid, x, y)?;
    Ok(PixelColor {
        hex: color.to_hex(),
        rgb: [color.r, color.g, color.b],
    })
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<u32, RequestError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| RequestError::InvalidCoordinate {
            field,
            value: value.to_owned(),
        })
}
