//! # ROI Interchange Format
//!
//! JSON representation of the regions of interest attached to one image:
//!
//! ```json
//! {
//!     "Image_ID": 51,
//!     "ROIs": [
//!         {
//!             "ROI_ID": 7,
//!             "Shapes": [
//!                 { "type": "Rectangle", "x": 10.0, "y": 12.0, "width": 64.0, "height": 32.0,
//!                   "theZ": 0, "theT": 0, "strokeColor": -16776961 }
//!             ]
//!         }
//!     ]
//! }
//! ```
//!
//! Every shape carries a `type` discriminator with type-specific geometry and
//! optional styling fields. Colors are signed RGBA integers as stored by OMERO.

mod error;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use error::RoiError;

/// ROIs of one image, as exchanged on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiFile {
    /// Image the ROIs belong to
    #[serde(rename = "Image_ID")]
    pub image_id: i64,

    /// ROIs in export order
    #[serde(rename = "ROIs", default)]
    pub rois: Vec<Roi>,
}

/// A region of interest made of one or more shapes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    /// Server-side ROI id, ignored on import
    #[serde(rename = "ROI_ID", default)]
    pub id: Option<i64>,

    /// Shapes in export order
    #[serde(rename = "Shapes", default)]
    pub shapes: Vec<Shape>,
}

/// One shape with its styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Server-side shape id, ignored on import
    #[serde(default)]
    pub id: Option<i64>,

    /// Timepoint index
    #[serde(rename = "theT", default)]
    pub the_t: Option<i32>,

    /// Z-plane index
    #[serde(rename = "theZ", default)]
    pub the_z: Option<i32>,

    /// Fill color as signed RGBA
    #[serde(rename = "fillColor", default)]
    pub fill_color: Option<i32>,

    /// Stroke color as signed RGBA
    #[serde(rename = "strokeColor", default)]
    pub stroke_color: Option<i32>,

    /// Stroke width in pixels
    #[serde(rename = "strokeWidth", default)]
    pub stroke_width: Option<f64>,

    /// Font family for text
    #[serde(rename = "fontFamily", default)]
    pub font_family: Option<String>,

    /// Font size in points
    #[serde(rename = "fontSize", default)]
    pub font_size: Option<f64>,

    /// Font style, e.g. "Bold"
    #[serde(rename = "fontStyle", default)]
    pub font_style: Option<String>,

    /// Free text attached to the shape
    #[serde(rename = "textValue", default)]
    pub text_value: Option<String>,

    /// Type and geometry
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Shape {
    /// Unstyled shape on plane (0, 0)
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            the_t: Some(0),
            the_z: Some(0),
            fill_color: None,
            stroke_color: None,
            stroke_width: None,
            font_family: None,
            font_size: None,
            font_style: None,
            text_value: None,
            geometry,
        }
    }
}

/// Shape geometry, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Axis-aligned rectangle
    Rectangle {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
    },
    /// Axis-aligned ellipse
    Ellipse {
        /// Center x
        x: f64,
        /// Center y
        y: f64,
        /// Horizontal radius
        #[serde(rename = "radiusX")]
        radius_x: f64,
        /// Vertical radius
        #[serde(rename = "radiusY")]
        radius_y: f64,
    },
    /// Single point
    Point {
        /// x coordinate
        x: f64,
        /// y coordinate
        y: f64,
    },
    /// Straight line with optional end markers
    Line {
        /// Start x
        x1: f64,
        /// Start y
        y1: f64,
        /// End x
        x2: f64,
        /// End y
        y2: f64,
        /// Marker at the start, e.g. "Arrow"
        #[serde(rename = "markerStart", default)]
        marker_start: Option<String>,
        /// Marker at the end
        #[serde(rename = "markerEnd", default)]
        marker_end: Option<String>,
    },
    /// Bitmask placed at a rectangle
    Mask {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
    },
    /// Closed polygon, points as `"x1,y1 x2,y2 ..."`
    Polygon {
        /// Point list
        points: String,
    },
    /// Open polyline, points as `"x1,y1 x2,y2 ..."`
    Polyline {
        /// Point list
        points: String,
    },
    /// Text label
    Label {
        /// Label text
        text: String,
        /// Anchor x
        #[serde(default)]
        x: f64,
        /// Anchor y
        #[serde(default)]
        y: f64,
    },
}

impl Geometry {
    /// Value of the `type` discriminator
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Rectangle { .. } => "Rectangle",
            Geometry::Ellipse { .. } => "Ellipse",
            Geometry::Point { .. } => "Point",
            Geometry::Line { .. } => "Line",
            Geometry::Mask { .. } => "Mask",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::Polyline { .. } => "Polyline",
            Geometry::Label { .. } => "Label",
        }
    }
}

impl RoiFile {
    /// Empty ROI file for an image
    pub fn new(image_id: i64) -> Self {
        Self {
            image_id,
            rois: Vec::new(),
        }
    }

    /// Total number of shapes across all ROIs
    pub fn shape_count(&self) -> usize {
        self.rois.iter().map(|r| r.shapes.len()).sum()
    }

    /// Serialize with four-space indentation
    pub fn to_json(&self) -> Result<String, RoiError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|e| RoiError::InvalidFormat(e.to_string()))
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, RoiError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an ROI file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RoiError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the ROI file to disk
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), RoiError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// File name for an image's exported ROIs: `<name>_ID<id>_rois.json`,
/// with spaces in the image name replaced by underscores
pub fn roi_file_name(image_name: &str, image_id: i64) -> String {
    format!("{}_ID{}_rois.json", image_name.replace(' ', "_"), image_id)
}
