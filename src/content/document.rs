//! Document sources - built-in whitepaper and JSON section files.
//!
//! The built-in document is the LIFE System whitepaper. A JSON file holding
//! an array of section records replaces it wholesale:
//!
//! ```json
//! [{"id": "intro", "title": "Introduction", "subtitle": "...",
//!   "content": "**Heading**\n\nBody• item", "keyPoints": ["..."], "visual": "globe"}]
//! ```

use std::fs;
use std::path::Path;

use log::info;

use super::section::Section;
use super::store::SectionStore;
use crate::error::Result;

/// Load the store from `path`, or the built-in document when `None`.
pub fn load_store(path: Option<&Path>) -> Result<SectionStore> {
    let sections = match path {
        Some(path) => load_sections(path)?,
        None => builtin_sections(),
    };
    info!(
        "loaded {} sections from {}",
        sections.len(),
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in document".to_string())
    );
    SectionStore::new(sections)
}

/// Read a JSON array of section records.
pub fn load_sections(path: &Path) -> Result<Vec<Section>> {
    let raw = fs::read_to_string(path)?;
    parse_sections(&raw)
}

/// Decode a JSON array of section records.
pub fn parse_sections(json: &str) -> Result<Vec<Section>> {
    Ok(serde_json::from_str(json)?)
}

/// The LIFE System whitepaper.
pub fn builtin_sections() -> Vec<Section> {
    vec![
        Section::new("executive-summary", "Executive Summary")
            .with_subtitle("From extractive competition to regenerative cooperation")
            .with_visual("globe")
            .with_content(
                "**Overview**\n\n\
                 The LIFE System is a framework for transforming how communities \
                 coordinate resources, make decisions and respond to crises. It \
                 replaces zero-sum allocation with cooperative mechanisms that are \
                 validated in simulation before they are proposed for adoption.\n\n\
                 **Headline Findings**\n\n\
                 Across a 17-year simulated horizon the framework outperforms the \
                 traditional baseline on every measured dimension:\
                 • 48% better aggregate outcomes by 2042\
                 • 4.6 billion people reached at full adoption\
                 • 89% democratic participation rate\
                 • Twice the crisis response effectiveness",
            )
            .with_key_points([
                "Simulation-validated before adoption",
                "48% better outcomes than the baseline",
                "Designed for gradual, voluntary uptake",
            ]),
        Section::new("problem", "The Problem")
            .with_subtitle("Why current systems stall")
            .with_visual("trend-down")
            .with_content(
                "Traditional economic coordination optimizes for short-term \
                 extraction. Our baseline model shows overall system performance \
                 declining from 30.1 in 2025 to 13.5 by 2042 under current policy.\n\n\
                 **Structural Causes**\n\n\
                 Three patterns recur in every region we modeled:\
                 • Economic insecurity that discourages long-term planning\
                 • Fragmented social connection and declining trust\
                 • Environmental costs pushed onto future generations\n\n\
                 None of these is solved by incremental reform alone — they are \
                 properties of the incentive structure itself.",
            )
            .with_key_points([
                "Baseline performance falls by more than half",
                "Insecurity, fragmentation and externalized costs",
            ]),
        Section::new("framework", "The LIFE Framework")
            .with_subtitle("Mechanisms for cooperative coordination")
            .with_visual("network")
            .with_content(
                "**Design Principles**\n\n\
                 The framework is built from mechanisms that can be adopted \
                 independently and reinforce each other when combined:\
                 • Participatory budgeting at community scale\
                 • Contribution-based resource allocation\
                 • Regenerative environmental accounting\
                 • Transparent, auditable decision records\n\n\
                 **Levels of Operation**\n\n\
                 Mechanisms operate at five nested levels — individual, community, \
                 regional, national and global — with clear interfaces between them.",
            )
            .with_key_points([
                "Independent, composable mechanisms",
                "Five nested levels of coordination",
            ]),
        Section::new("methodology", "Simulation Methodology")
            .with_subtitle("Agent-based modeling over seventeen years")
            .with_visual("chart")
            .with_content(
                "**Agent-Based Modeling**\n\n\
                 The simulation models 50,000 individual agents with behavioral \
                 profiles calibrated against survey data.\n\n\
                 **Timeline**\n\n\
                 The run covers a 5-year baseline (2025-2030) followed by a 12-year \
                 transformation period (2030-2042):\
                 • Baseline phase under current policy\
                 • Pilot communities from 2030\
                 • Scaling phase from 2034\
                 • Global coordination from 2038",
            )
            .with_key_points([
                "50,000 agents",
                "5-year baseline plus 12-year transformation",
            ]),
        Section::new("results", "Results")
            .with_subtitle("What the simulation shows")
            .with_visual("bar-chart")
            .with_content(
                "**Performance**\n\n\
                 System performance under the framework reaches 75.0 by 2042 against \
                 13.5 for the baseline.\n\n\
                 **Wellbeing Metrics**\n\n\
                 Improvements over the traditional system, by metric:\
                 • Life satisfaction: +195%\
                 • Economic security: +222%\
                 • Social connection: +457%\
                 • Environmental impact: +380%\
                 • Democratic participation: +256%",
            )
            .with_key_points([
                "Performance 75.0 vs 13.5 in 2042",
                "Largest gain in social connection",
            ]),
        Section::new("roadmap", "Implementation Roadmap")
            .with_subtitle("From pilots to global coordination")
            .with_visual("roadmap")
            .with_content(
                "Adoption is voluntary and staged. Participation grows from 8 million \
                 people in 2030 to 4.6 billion by 2042.\n\n\
                 **Optimization Priorities**\n\n\
                 Sensitivity analysis identifies where effort pays off most:\
                 • Timing optimization — critical\
                 • Crisis resilience — critical\
                 • System maturation — high\
                 • Resource optimization — high",
            )
            .with_key_points([
                "Staged, voluntary adoption",
                "Timing and resilience matter most",
            ]),
        Section::new("conclusion", "Conclusion")
            .with_subtitle("An invitation to collaborate")
            .with_visual("handshake")
            .with_content(
                "The evidence supports piloting the LIFE System in willing \
                 communities now.\n\n\
                 **Get Involved**\n\n\
                 Research materials are released under CC BY 4.0:\
                 • Read and critique the full paper\
                 • Re-run the simulations from source\
                 • Propose a pilot community",
            ),
    ]
}
