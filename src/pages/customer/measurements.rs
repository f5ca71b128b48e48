use serde::{Deserialize, Serialize};

use crate::{libs::dser::deser_opt_f64, AdminError, AdminResult};

/// A customer's saved measurement profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default)]
    pub chest: f64,
    #[serde(default)]
    pub neck: f64,
    #[serde(default)]
    pub shoulders: f64,
    #[serde(default)]
    pub sleeves: f64,
    #[serde(default)]
    pub waist: f64,
    #[serde(rename = "topLenght", default)]
    pub top_length: f64,
    #[serde(rename = "bottomLenght", default)]
    pub bottom_length: f64,
}

/// Measurements as typed into the form; any field may still be empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementsInput {
    #[serde(default, deserialize_with = "deser_opt_f64")]
    pub chest: Option<f64>,
    #[serde(default, deserialize_with = "deser_opt_f64")]
    pub neck: Option<f64>,
    #[serde(default, deserialize_with = "deser_opt_f64")]
    pub shoulders: Option<f64>,
    #[serde(default, deserialize_with = "deser_opt_f64")]
    pub sleeves: Option<f64>,
    #[serde(default, deserialize_with = "deser_opt_f64")]
    pub waist: Option<f64>,
    #[serde(rename = "topLenght", default, deserialize_with = "deser_opt_f64")]
    pub top_length: Option<f64>,
    #[serde(rename = "bottomLenght", default, deserialize_with = "deser_opt_f64")]
    pub bottom_length: Option<f64>,
}

pub const MIN_MEASUREMENT: f64 = 1.0;

impl MeasurementsInput {
    /// `(field, value, upper bound)` in form order
    fn fields(&self) -> [(&'static str, Option<f64>, f64); 7] {
        [
            ("chest", self.chest, 100.0),
            ("shoulders", self.shoulders, 50.0),
            ("neck", self.neck, 30.0),
            ("sleeves", self.sleeves, 50.0),
            ("waist", self.waist, 50.0),
            ("top length", self.top_length, 100.0),
            ("bottom length", self.bottom_length, 100.0),
        ]
    }

    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|(_, v, _)| v.is_none())
    }

    pub fn validate(&self) -> AdminResult<Measurements> {
        let fields = self.fields();
        if fields.iter().any(|(_, v, _)| !v.is_some_and(f64::is_finite)) {
            return Err(AdminError::validation("Please fill all measurements"));
        }
        for (name, value, max) in fields {
            let value = value.unwrap_or_default();
            if value < MIN_MEASUREMENT {
                return Err(AdminError::validation(format!(
                    "Measurements must be at least {MIN_MEASUREMENT}, {name} is {value}"
                )));
            }
            if value > max {
                return Err(AdminError::validation(format!(
                    "Invalid measurement values, {name} must not exceed {max}"
                )));
            }
        }
        Ok(Measurements {
            chest: self.chest.unwrap_or_default(),
            neck: self.neck.unwrap_or_default(),
            shoulders: self.shoulders.unwrap_or_default(),
            sleeves: self.sleeves.unwrap_or_default(),
            waist: self.waist.unwrap_or_default(),
            top_length: self.top_length.unwrap_or_default(),
            bottom_length: self.bottom_length.unwrap_or_default(),
        })
    }
}

impl From<Measurements> for MeasurementsInput {
    fn from(m: Measurements) -> Self {
        Self {
            chest: Some(m.chest),
            neck: Some(m.neck),
            shoulders: Some(m.shoulders),
            sleeves: Some(m.sleeves),
            waist: Some(m.waist),
            top_length: Some(m.top_length),
            bottom_length: Some(m.bottom_length),
        }
    }
}
