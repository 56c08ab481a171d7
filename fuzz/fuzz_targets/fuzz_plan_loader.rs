#![no_main]

use std::path::Path;

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use phasetrack::config::ConfigLoader;
use phasetrack::{DelayPolicy, PaidCheckpoints, evaluate_sequence};

fuzz_target!(|data: &[u8]| {
    let Ok(yaml_str) = std::str::from_utf8(data) else {
        return;
    };

    let loader = ConfigLoader::with_defaults();
    let Ok(result) = loader.load_str(yaml_str, Path::new("fuzz.yaml")) else {
        return;
    };

    // Any plan the loader accepts must evaluate without panicking,
    // including at the extremes of the date range.
    let phases = result.plan.ordered_phases();
    for today in [NaiveDate::MIN, NaiveDate::MAX] {
        let _ = evaluate_sequence(
            &phases,
            today,
            &PaidCheckpoints::new(),
            &DelayPolicy::cascading(),
        );
    }
});
