use crate::error::{Result, SynthError};
use crate::models::CompetitorIdentity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// On-disk roster document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    pub competitors: Vec<CompetitorIdentity>,
}

/// Competitor Roster - the set of properties a user can pick for comparison
///
/// Distance labels are parsed once while the roster is loaded, so every
/// later synthesis call works on structured values.
#[derive(Debug, Clone, Default)]
pub struct CompetitorRoster {
    /// Competitors in file order
    competitors: Vec<CompetitorIdentity>,

    /// Map from competitor id to position in `competitors`
    positions_by_id: HashMap<String, usize>,
}

impl CompetitorRoster {
    /// Create a new empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate ids
    pub fn from_competitors(competitors: Vec<CompetitorIdentity>) -> Result<Self> {
        let mut positions_by_id = HashMap::with_capacity(competitors.len());
        for (position, competitor) in competitors.iter().enumerate() {
            if positions_by_id.insert(competitor.id.clone(), position).is_some() {
                return Err(SynthError::DuplicateCompetitor(competitor.id.clone()));
            }
        }
        Ok(Self {
            competitors,
            positions_by_id,
        })
    }

    /// Parse a roster from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RosterFile = serde_json::from_str(json)?;
        Self::from_competitors(file.competitors)
    }

    /// Load a roster from a JSON file
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        info!("Loading competitor roster from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let roster = Self::from_json(&json_content)?;

        info!("Loaded {} competitors", roster.len());
        Ok(roster)
    }

    pub fn get(&self, id: &str) -> Option<&CompetitorIdentity> {
        self.positions_by_id.get(id).map(|&position| &self.competitors[position])
    }

    /// Competitors matching `ids`, in roster order; unknown ids are skipped
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Vec<CompetitorIdentity> {
        for id in ids {
            if !self.positions_by_id.contains_key(id.as_ref()) {
                warn!("Competitor '{}' not found in roster, skipping", id.as_ref());
            }
        }

        self.competitors
            .iter()
            .filter(|c| ids.iter().any(|id| id.as_ref() == c.id))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> &[CompetitorIdentity] {
        &self.competitors
    }

    /// Search for competitors by partial name match
    pub fn search(&self, query: &str) -> Vec<&CompetitorIdentity> {
        let query_lower = query.to_lowercase();
        self.competitors.iter().filter(|c| c.name.to_lowercase().contains(&query_lower)).collect()
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}
