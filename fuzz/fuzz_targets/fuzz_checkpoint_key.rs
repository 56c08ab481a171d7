#![no_main]

use libfuzzer_sys::fuzz_target;
use phasetrack::CheckpointId;

fuzz_target!(|data: &[u8]| {
    if let Ok(key) = std::str::from_utf8(data) {
        if let Ok(id) = key.parse::<CheckpointId>() {
            // Display must produce a key that parses back to the same id.
            assert_eq!(id.to_string().parse::<CheckpointId>(), Ok(id));
        }
    }
});
