//! Treatment timeline and downloadable session reports

use serde::Serialize;

use super::types::{ClinicDate, Treatment, TreatmentImage};

/// Sort newest first; equal dates keep their input order
pub fn sort_treatments_by_date_descending<'a, I>(treatments: I) -> Vec<&'a Treatment>
where
    I: IntoIterator<Item = &'a Treatment>,
{
    let mut sorted: Vec<&Treatment> = treatments.into_iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// A patient's sessions, newest first
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    sessions: Vec<&'a Treatment>,
}

/// Before/after photo pair shown above the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoComparison<'a> {
    pub before: &'a TreatmentImage,
    pub after: &'a TreatmentImage,
}

impl<'a> Timeline<'a> {
    pub fn new<I>(treatments: I) -> Self
    where
        I: IntoIterator<Item = &'a Treatment>,
    {
        Self {
            sessions: sort_treatments_by_date_descending(treatments),
        }
    }

    pub fn sessions(&self) -> &[&'a Treatment] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn latest(&self) -> Option<&'a Treatment> {
        self.sessions.first().copied()
    }

    pub fn earliest(&self) -> Option<&'a Treatment> {
        self.sessions.last().copied()
    }

    /// `(oldest, newest)` session dates
    pub fn date_range(&self) -> Option<(ClinicDate, ClinicDate)> {
        Some((self.earliest()?.date, self.latest()?.date))
    }

    /// Thumbnails of the first and latest session; needs two sessions
    pub fn comparison(&self) -> Option<PhotoComparison<'a>> {
        if self.sessions.len() < 2 {
            return None;
        }
        Some(PhotoComparison {
            before: self.earliest()?.primary_image()?,
            after: self.latest()?.primary_image()?,
        })
    }

    /// 1-based session number counted from the oldest visit
    pub fn session_number(&self, index: usize) -> usize {
        self.sessions.len().saturating_sub(index)
    }

    /// Heading for the session at `index` in newest-first order
    pub fn session_title(&self, index: usize) -> String {
        if index == 0 {
            "Latest Session".to_string()
        } else {
            format!("Session {}", self.session_number(index))
        }
    }

    /// Downloadable report entries, in timeline order
    pub fn reports(&self) -> Vec<Report> {
        self.sessions.iter().map(|t| Report::for_treatment(t)).collect()
    }
}

/// Downloadable summary of one treatment session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub treatment_id: String,
    pub date: ClinicDate,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

impl Report {
    pub fn for_treatment(treatment: &Treatment) -> Self {
        Self {
            treatment_id: treatment.id.clone(),
            date: treatment.date,
            title: format!("Treatment Report - {}", treatment.date),
            thumbnail_url: treatment.primary_image().map(|img| img.url.clone()),
        }
    }
}
