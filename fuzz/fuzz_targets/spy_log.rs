#![no_main]

use libfuzzer_sys::fuzz_target;
use spylog_tasks_reporter::{SpyLog, parse_build_record, resolve};

const EVENT_TYPES: [&str; 2] = ["ProjectSucceeded", "ProjectFailed"];

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(spy_log) = SpyLog::parse(xml) else {
        return;
    };

    for event in spy_log.execution_events(&EVENT_TYPES) {
        if let Ok(record) = parse_build_record(event) {
            let _ = resolve(&record.build.source_directory, "/workspace/job");
        }
    }
});
