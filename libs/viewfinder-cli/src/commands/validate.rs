// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Check a scenario without running it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::scenario::Scenario;

/// Event kinds and how often each appears, in name order.
pub fn event_counts(scenario: &Scenario) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for step in &scenario.steps {
        *counts.entry(step.event.kind()).or_insert(0) += 1;
    }
    counts
}

pub fn run(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;

    println!(
        "{}: ok ({} steps over {} ms)",
        scenario.name.as_deref().unwrap_or("scenario"),
        scenario.steps.len(),
        scenario.duration_ms()
    );
    println!("  initial lens:   {}", scenario.config.camera.lens_selector);
    println!("  focus hide:     {} ms", scenario.config.focus.hide_delay_ms);
    if let Some(analyzer) = &scenario.config.analyzer {
        println!(
            "  analyzer:       {:?}, depth {}",
            analyzer.backpressure_strategy, analyzer.queue_depth
        );
    }
    for (kind, count) in event_counts(&scenario) {
        println!("  {:<16}{}", kind, count);
    }
    Ok(())
}
