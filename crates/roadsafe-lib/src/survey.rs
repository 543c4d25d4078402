use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::coord::{normalize, Normalized};
use crate::error::Result;

/// Identifier for a surveyed node, e.g. `"h1"` or `"s25"`.
pub type NodeId = String;

/// Decimal-degree coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Coordinate as recorded by the survey: either already usable decimal
/// degrees or the raw string the surveyor wrote down.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyCoordinate {
    Decimal(LatLon),
    Raw(String),
}

impl SurveyCoordinate {
    /// Decimal degrees when the recorded value was parseable.
    pub fn decimal(&self) -> Option<LatLon> {
        match self {
            SurveyCoordinate::Decimal(value) => Some(*value),
            SurveyCoordinate::Raw(_) => None,
        }
    }
}

/// A directed link recorded between two surveyed points.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub neighbor: NodeId,
    pub distance_m: f64,
    pub direction: Option<String>,
}

/// One photographed observation attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Position of the image in the survey sheet (1-based).
    pub sequence: u8,
    pub year: Option<i64>,
    pub severity: Option<f64>,
    pub issue: Option<String>,
}

/// A single surveyed point with its recorded links and observations.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyNode {
    pub id: NodeId,
    pub coordinate: SurveyCoordinate,
    pub connections: Vec<Connection>,
    pub images: Vec<ImageRecord>,
}

/// In-memory representation of a complete survey.
///
/// Keyed by node id in a `BTreeMap` so iteration order is stable; the
/// nearest-node resolver and repeated graph builds rely on that.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    pub nodes: BTreeMap<NodeId, SurveyNode>,
}

impl Survey {
    pub fn node(&self, id: &str) -> Option<&SurveyNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Highest image sequence number a survey sheet carries.
const MAX_IMAGES_PER_NODE: u8 = 6;

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "Coordinate")]
    coordinate: String,
    #[serde(rename = "Connections", default)]
    connections: Vec<String>,
    #[serde(rename = "Distances", default)]
    distances: Vec<f64>,
    #[serde(rename = "Directions", default)]
    directions: Vec<Option<String>>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(rename = "Timestamp")]
    timestamp: Option<i64>,
    #[serde(rename = "Severity")]
    severity: Option<f64>,
    #[serde(rename = "Issue")]
    issue: Option<String>,
}

/// Load survey metadata from a JSON file.
///
/// The file maps node id to a record with a `Coordinate` string, the
/// parallel `Connections`/`Distances`/`Directions` arrays, and up to six
/// `Image N` observation objects. Coordinates are normalized to decimal
/// degrees on load; values that fail to parse are kept verbatim so the
/// caller can detect them.
pub fn load_survey(path: impl AsRef<Path>) -> Result<Survey> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(crate::error::Error::SurveyNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let raw: BTreeMap<String, RawNode> = serde_json::from_str(&contents)?;

    let mut nodes = BTreeMap::new();
    for (id, record) in raw {
        let node = convert_node(&id, record);
        nodes.insert(id, node);
    }

    debug!(nodes = nodes.len(), path = %path.display(), "survey loaded");
    Ok(Survey { nodes })
}

fn convert_node(id: &str, record: RawNode) -> SurveyNode {
    let coordinate = match normalize(&record.coordinate) {
        Normalized::Parsed(latlon) => SurveyCoordinate::Decimal(latlon),
        Normalized::Unchanged(raw) => {
            warn!(node = id, coordinate = raw, "coordinate did not parse; kept verbatim");
            SurveyCoordinate::Raw(raw.to_string())
        }
    };

    // Connections and Distances are parallel arrays; an index with no
    // matching distance is dropped, a missing direction becomes None.
    let mut connections = Vec::new();
    for (index, neighbor) in record.connections.iter().enumerate() {
        let Some(&distance_m) = record.distances.get(index) else {
            warn!(node = id, neighbor = %neighbor, "connection without a distance; dropped");
            continue;
        };
        let direction = record.directions.get(index).cloned().flatten();
        connections.push(Connection {
            neighbor: neighbor.clone(),
            distance_m,
            direction,
        });
    }

    let mut images = Vec::new();
    for sequence in 1..=MAX_IMAGES_PER_NODE {
        let key = format!("Image {}", sequence);
        let Some(value) = record.extra.get(&key) else {
            continue;
        };
        match serde_json::from_value::<RawImage>(value.clone()) {
            Ok(image) => images.push(ImageRecord {
                sequence,
                year: image.timestamp,
                severity: image.severity,
                issue: image.issue,
            }),
            Err(error) => {
                warn!(node = id, image = sequence, %error, "image record did not parse; dropped");
            }
        }
    }

    SurveyNode {
        id: id.to_string(),
        coordinate,
        connections,
        images,
    }
}
