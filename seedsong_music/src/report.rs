// JSON report of a generation run: the input parameters plus one entry per
// note with its name and beat timing. The report is a plain data dump; with a
// fixed seed it is byte-identical across runs.

use crate::melody::Melody;
use crate::params::GenerationParams;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportNote {
    pub name: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MelodyReport {
    pub params: GenerationParams,
    pub notes: Vec<ReportNote>,
}

impl MelodyReport {
    pub fn new(params: &GenerationParams, melody: &Melody) -> Self {
        MelodyReport {
            params: params.clone(),
            notes: melody
                .notes
                .iter()
                .map(|n| ReportNote {
                    name: n.name(),
                    start: n.start,
                    duration: n.duration,
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
