//! Project case-study records backing the detail modal.
//!
//! The data ships as one embedded JSON block parsed once at load. Lookups by
//! card id are infallible reads against the parsed map; a malformed block is
//! surfaced as a parse error so the caller can degrade to an empty map
//! instead of taking the page down.

use serde::Deserialize;
use std::collections::HashMap;

/// A single case study as rendered in the project modal.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub role: String,
    pub challenge: String,
    pub solution: String,
    pub outcome: String,
    pub hero_image: String,
    pub tools: Vec<String>,
}

pub type ProjectMap = HashMap<String, ProjectRecord>;

pub fn parse_projects(raw: &str) -> Result<ProjectMap, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Parse the embedded project data block.
pub fn load_projects() -> Result<ProjectMap, serde_json::Error> {
    parse_projects(PROJECT_DATA)
}

const PROJECT_DATA: &str = r##"{
  "proj-1": {
    "title": "Ember & Oak",
    "subtitle": "Brand story for a craft coffee roaster",
    "description": "A full narrative rebrand for a small-batch roaster, from origin-trip photo essays to the voice used on every bag.",
    "role": "Lead storyteller and content strategist",
    "challenge": "The roaster had loyal regulars but no story that travelled beyond the counter; online sales were flat.",
    "solution": "Built a serialized origin-story campaign pairing farmer interviews with roast-day photo journals, released weekly.",
    "outcome": "Online subscriptions tripled in four months and the campaign was picked up by two regional food magazines.",
    "heroImage": "images/projects/ember-oak.jpg",
    "tools": ["Premiere Pro", "Lightroom", "Notion", "Instagram"]
  },
  "proj-2": {
    "title": "Wayfinder",
    "subtitle": "Launch film for a hiking-gear startup",
    "description": "A three-minute launch film and cutdown series introducing a modular pack system to a crowded outdoor market.",
    "role": "Director and editor",
    "challenge": "The product's modularity demoed well in person but read as complicated in every early ad test.",
    "solution": "Framed the film around one hiker's day, letting the pack reconfigure naturally as the terrain changed, no spec callouts.",
    "outcome": "The campaign funded in 31 hours and the film drove 68% of referred traffic during launch week.",
    "heroImage": "images/projects/wayfinder.jpg",
    "tools": ["Premiere Pro", "After Effects", "DaVinci Resolve"]
  },
  "proj-3": {
    "title": "Hearthside Sessions",
    "subtitle": "Documentary series for a community arts venue",
    "description": "Six short documentaries profiling the performers and volunteers who keep a century-old venue alive.",
    "role": "Producer and interviewer",
    "challenge": "The venue needed a fundraising centerpiece that felt like the room itself, not a donation appeal.",
    "solution": "Shot each session in one evening with a two-person crew, cutting performance footage against off-stage conversations.",
    "outcome": "The series anchored a campaign that exceeded its restoration goal by 40%.",
    "heroImage": "images/projects/hearthside.jpg",
    "tools": ["Final Cut Pro", "Audition", "Figma"]
  }
}"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_parses() {
        let projects = load_projects().expect("embedded project data must parse");
        assert_eq!(projects.len(), 3);
    }

    #[test]
    fn test_lookup_present_id() {
        let projects = load_projects().unwrap();
        let record = projects.get("proj-1").expect("proj-1 should exist");
        assert_eq!(record.title, "Ember & Oak");
        assert!(!record.tools.is_empty());
        for tool in &record.tools {
            assert!(!tool.is_empty());
        }
    }

    #[test]
    fn test_lookup_absent_id_is_none() {
        let projects = load_projects().unwrap();
        assert!(projects.get("proj-999").is_none());
    }

    #[test]
    fn test_malformed_block_is_an_error() {
        assert!(parse_projects("{ not json").is_err());
        // A record missing required fields also fails rather than producing
        // a partial entry.
        assert!(parse_projects(r#"{"proj-1": {"title": "x"}}"#).is_err());
    }

    #[test]
    fn test_camel_case_field_mapping() {
        let raw = r#"{
          "p": {
            "title": "t", "subtitle": "s", "description": "d",
            "role": "r", "challenge": "c", "solution": "s",
            "outcome": "o", "heroImage": "images/x.jpg", "tools": ["a", "b"]
          }
        }"#;
        let projects = parse_projects(raw).unwrap();
        assert_eq!(projects["p"].hero_image, "images/x.jpg");
        assert_eq!(projects["p"].tools, vec!["a", "b"]);
    }
}
